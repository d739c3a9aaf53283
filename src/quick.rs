use crate::array_model::SortKey;
use crate::clock::Clock;
use crate::error::Result;
use crate::render::{HighlightKind, RenderPort};
use crate::sorter::Sorter;

impl<T: SortKey, R: RenderPort, C: Clock> Sorter<'_, T, R, C> {
    /// Lomuto quicksort driven by an explicit stack of inclusive ranges,
    /// left partition first.
    pub(crate) fn quick_sort(&mut self) -> Result<()> {
        let mut stack = vec![(0, self.arr.len() - 1)];
        while let Some((low, high)) = stack.pop() {
            if low >= high {
                continue;
            }
            let p = self.partition(low, high)?;
            if p + 1 < high {
                stack.push((p + 1, high));
            }
            if p > low + 1 {
                stack.push((low, p - 1));
            }
        }
        Ok(())
    }

    fn partition(&mut self, low: usize, high: usize) -> Result<usize> {
        let pivot = self.arr.key(high);
        let mut i = low;
        for j in low..high {
            let v = self.arr.key(j);
            if self.less(v, pivot) {
                self.swap(i, j)?;
                self.step(&format!("Swapping elements at indices {i} and {j}"), &[i, j], HighlightKind::Comparing)?;
                i += 1;
            }
        }
        self.swap(i, high)?;
        self.step(&format!("Placing pivot {pivot} at index {i}"), &[i, high], HighlightKind::Placement)?;
        Ok(i)
    }
}
