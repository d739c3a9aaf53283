use crate::array_model::SortKey;
use crate::clock::Clock;
use crate::error::Result;
use crate::render::{HighlightKind, RenderPort};
use crate::sorter::Sorter;

impl<T: SortKey, R: RenderPort, C: Clock> Sorter<'_, T, R, C> {
    pub(crate) fn heap_sort(&mut self) -> Result<()> {
        let n = self.arr.len();
        for i in (0..n / 2).rev() {
            self.sift_down(n, i)?;
        }
        for end in (1..n).rev() {
            self.swap(0, end)?;
            self.step(&format!("Swapping root with element at index {end}"), &[0, end], HighlightKind::Placement)?;
            self.sift_down(end, 0)?;
        }
        Ok(())
    }

    /// Restores the max-heap property below `i` within the first `n` slots.
    fn sift_down(&mut self, n: usize, mut i: usize) -> Result<()> {
        loop {
            let mut largest = i;
            let (left, right) = (2 * i + 1, 2 * i + 2);
            if left < n && self.greater(self.arr.key(left), self.arr.key(largest)) {
                largest = left;
            }
            // right only wins when strictly greater
            if right < n && self.greater(self.arr.key(right), self.arr.key(largest)) {
                largest = right;
            }
            if largest == i {
                return Ok(());
            }
            self.swap(i, largest)?;
            self.step(&format!("Swapping elements at indices {i} and {largest}"), &[i, largest], HighlightKind::Comparing)?;
            i = largest;
        }
    }
}
