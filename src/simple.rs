use crate::array_model::SortKey;
use crate::clock::Clock;
use crate::error::Result;
use crate::render::{HighlightKind, RenderPort};
use crate::sorter::Sorter;

impl<T: SortKey, R: RenderPort, C: Clock> Sorter<'_, T, R, C> {
    /// One step per adjacent comparison, swapped or not.
    pub(crate) fn bubble_sort(&mut self) -> Result<()> {
        let n = self.arr.len();
        for i in 0..n {
            for j in 0..n - i - 1 {
                let (a, b) = (self.arr.key(j), self.arr.key(j + 1));
                if self.greater(a, b) {
                    self.swap(j, j + 1)?;
                }
                self.step(&format!("Comparing {a} and {b}"), &[j, j + 1], HighlightKind::Comparing)?;
            }
        }
        Ok(())
    }

    pub(crate) fn selection_sort(&mut self) -> Result<()> {
        let n = self.arr.len();
        for i in 0..n - 1 {
            let mut min = i;
            for j in i + 1..n {
                let (a, b) = (self.arr.key(j), self.arr.key(min));
                if self.less(a, b) {
                    min = j;
                }
                self.step(&format!("Comparing {a} and {b}"), &[min, j], HighlightKind::Comparing)?;
            }
            if min != i {
                self.swap(i, min)?;
                let status = format!("Moving {} into position {i}", self.arr.key(i));
                self.step(&status, &[i, min], HighlightKind::Placement)?;
            }
        }
        Ok(())
    }

    pub(crate) fn insertion_sort(&mut self) -> Result<()> {
        let n = self.arr.len();
        for i in 1..n {
            let key = self.arr.get(i);
            let mut j = i;
            while j > 0 {
                let prev = self.arr.get(j - 1);
                if !self.greater(prev.key(), key.key()) {
                    break;
                }
                self.write(j, prev)?;
                let status = format!("Inserting {}: shifting {} right", key.key(), prev.key());
                self.step(&status, &[j - 1, j], HighlightKind::Comparing)?;
                j -= 1;
            }
            if j != i {
                self.write(j, key)?;
                self.step(&format!("Placing {} at index {j}", key.key()), &[j], HighlightKind::Placement)?;
            }
        }
        Ok(())
    }
}
