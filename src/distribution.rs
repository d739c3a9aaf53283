//! Non-comparison sorts: counting, radix (LSD) and bucket. Each rebuilds
//! the sequence from auxiliary tables, so every slot overwrite on the way
//! back is its own step.

use std::mem;

use log::debug;

use crate::array_model::SortKey;
use crate::clock::Clock;
use crate::config::{BUCKETS, MAX_COUNTING_RANGE, RADIX};
use crate::error::{Result, VisualizerError};
use crate::render::{HighlightKind, RenderPort};
use crate::sorter::Sorter;

/// Prefix-summed frequency table over `[min, max]`: entry `k - min` holds
/// how many keys are `<= k`.
pub fn cumulative_counts<I: IntoIterator<Item = u32>>(keys: I, min: u32, max: u32) -> Vec<usize> {
    let mut counts = vec![0usize; (max - min) as usize + 1];
    for k in keys {
        counts[(k - min) as usize] += 1;
    }
    for i in 1..counts.len() {
        counts[i] += counts[i - 1];
    }
    counts
}

/// Index of the bucket `key` falls into when `[min, max]` is cut into
/// `buckets` equal slices.
pub fn bucket_index(key: u32, min: u32, max: u32, buckets: usize) -> usize {
    let range = (max - min) as u64 + 1;
    let size = range.div_ceil(buckets as u64);
    ((key - min) as u64 / size) as usize
}

impl<T: SortKey, R: RenderPort, C: Clock> Sorter<'_, T, R, C> {
    pub(crate) fn counting_sort(&mut self) -> Result<()> {
        let Some((min, max)) = self.arr.key_bounds() else {
            return Ok(());
        };
        if max - min >= MAX_COUNTING_RANGE {
            return Err(VisualizerError::RangeTooLarge { min, max, limit: MAX_COUNTING_RANGE });
        }

        let n = self.arr.len();
        for i in 0..n {
            self.step(&format!("Counting occurrences of {}", self.arr.key(i)), &[i], HighlightKind::Comparing)?;
        }
        let mut counts = cumulative_counts(self.arr.as_slice().iter().map(SortKey::key), min, max);
        debug!("Cumulative counts: {:?}", counts);

        let mut output: Vec<T> = self.arr.as_slice().to_vec();
        for i in (0..n).rev() {
            let v = self.arr.get(i);
            let slot = &mut counts[(v.key() - min) as usize];
            *slot -= 1;
            let pos = *slot;
            output[pos] = v;
            self.step(&format!("Placing {} at output position {pos}", v.key()), &[i], HighlightKind::Comparing)?;
        }

        self.copy_back(&output, "Writing back")
    }

    pub(crate) fn radix_sort(&mut self) -> Result<()> {
        let Some((_, max)) = self.arr.key_bounds() else {
            return Ok(());
        };

        let mut place: u32 = 1;
        while max / place > 0 {
            self.step(&format!("Sorting array based on digit at place {place}"), &[], HighlightKind::Comparing)?;

            let digit = |k: u32| ((k / place) % RADIX) as usize;
            let mut counts = [0usize; RADIX as usize];
            for v in self.arr.as_slice() {
                counts[digit(v.key())] += 1;
            }
            for d in 1..counts.len() {
                counts[d] += counts[d - 1];
            }
            let mut output: Vec<T> = self.arr.as_slice().to_vec();
            for v in self.arr.as_slice().iter().rev() {
                let d = digit(v.key());
                counts[d] -= 1;
                output[counts[d]] = *v;
            }
            debug!("Pass for place {place} done");

            self.copy_back(&output, &format!("Updating array by digit at place {place}: writing"))?;
            place = match place.checked_mul(RADIX) {
                Some(p) => p,
                None => break,
            };
        }
        Ok(())
    }

    pub(crate) fn bucket_sort(&mut self) -> Result<()> {
        let Some((min, max)) = self.arr.key_bounds() else {
            return Ok(());
        };

        let mut buckets: Vec<Vec<T>> = vec![Vec::new(); BUCKETS];
        for i in 0..self.arr.len() {
            let v = self.arr.get(i);
            let b = bucket_index(v.key(), min, max, BUCKETS);
            buckets[b].push(v);
            self.step(&format!("Placing {} in bucket {b}", v.key()), &[i], HighlightKind::Comparing)?;
        }
        debug!("Buckets: {:?}", buckets);

        let mut index = 0;
        for b in 0..BUCKETS {
            let mut bucket = mem::take(&mut buckets[b]);
            for i in 1..bucket.len() {
                let key = bucket[i];
                let mut j = i;
                while j > 0 && self.greater(bucket[j - 1].key(), key.key()) {
                    bucket[j] = bucket[j - 1];
                    self.step(&format!("Comparing and moving elements in bucket {b}"), &[], HighlightKind::Comparing)?;
                    j -= 1;
                }
                bucket[j] = key;
            }

            for v in bucket {
                self.write(index, v)?;
                self.step(&format!("Writing {} from bucket {b} to index {index}", v.key()), &[index], HighlightKind::Placement)?;
                index += 1;
            }
        }
        Ok(())
    }

    fn copy_back(&mut self, output: &[T], what: &str) -> Result<()> {
        for (i, &v) in output.iter().enumerate() {
            self.write(i, v)?;
            self.step(&format!("{what} {} to index {i}", v.key()), &[i], HighlightKind::Placement)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cumulative_counts_for_small_range() {
        let keys = [4u32, 2, 2, 8, 3, 3, 1];
        let counts = cumulative_counts(keys, 1, 8);
        assert_eq!(counts, vec![1, 3, 5, 6, 6, 6, 6, 7]);
        assert_eq!(counts[(3 - 1) as usize], 5);
    }

    #[test]
    fn bucket_index_stays_in_range() {
        assert_eq!(bucket_index(25, 25, 500, BUCKETS), 0);
        assert_eq!(bucket_index(500, 25, 500, BUCKETS), BUCKETS - 1);
        assert_eq!(bucket_index(7, 7, 7, BUCKETS), 0);
        for k in 0..=u8::MAX as u32 {
            assert!(bucket_index(k, 0, 255, BUCKETS) < BUCKETS);
        }
    }
}
