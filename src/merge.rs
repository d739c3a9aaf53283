use crate::array_model::SortKey;
use crate::clock::Clock;
use crate::error::Result;
use crate::render::{HighlightKind, RenderPort};
use crate::sorter::Sorter;

impl<T: SortKey, R: RenderPort, C: Clock> Sorter<'_, T, R, C> {
    /// Sorts the inclusive range `[l, r]`. Recursion depth is `log2(n)`.
    pub(crate) fn merge_sort(&mut self, l: usize, r: usize) -> Result<()> {
        if l < r {
            let m = l + (r - l) / 2;
            self.merge_sort(l, m)?;
            self.merge_sort(m + 1, r)?;
            self.merge(l, m, r)?;
        }
        Ok(())
    }

    fn merge(&mut self, l: usize, m: usize, r: usize) -> Result<()> {
        let left: Vec<T> = self.arr.as_slice()[l..=m].to_vec();
        let right: Vec<T> = self.arr.as_slice()[m + 1..=r].to_vec();

        let range: Vec<usize> = (l..=r).collect();
        self.step(&format!("Merging subarrays from {l} to {r}"), &range, HighlightKind::Comparing)?;

        let (mut i, mut j, mut k) = (0, 0, l);
        while i < left.len() && j < right.len() {
            // ties go left
            let next = if self.greater(left[i].key(), right[j].key()) {
                j += 1;
                right[j - 1]
            } else {
                i += 1;
                left[i - 1]
            };
            self.place(k, next)?;
            k += 1;
        }
        for &value in left[i..].iter().chain(&right[j..]) {
            self.place(k, value)?;
            k += 1;
        }
        Ok(())
    }

    fn place(&mut self, k: usize, value: T) -> Result<()> {
        self.write(k, value)?;
        self.step(&format!("Placing {} at index {k}", value.key()), &[k], HighlightKind::Placement)
    }
}
