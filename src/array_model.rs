use std::fmt;
use std::fmt::Display;

use rand::Rng;

use crate::config::{MAX_VALUE, MIN_VALUE};

/// An element that can be animated: bars are drawn and compared by `key`.
pub trait SortKey: Copy + fmt::Debug + Send + 'static {
    fn key(&self) -> u32;
}

impl SortKey for u32 {
    fn key(&self) -> u32 {
        *self
    }
}

/// The sequence being sorted. Its length is fixed for its whole lifetime;
/// runners only reorder it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayModel<T: SortKey = u32> {
    values: Vec<T>,
}

impl<T: SortKey> ArrayModel<T> {
    pub fn from_vec(values: Vec<T>) -> Self {
        ArrayModel { values }
    }

    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.check(i);
        self.values[i]
    }

    #[inline]
    pub fn set(&mut self, i: usize, value: T) {
        self.check(i);
        self.values[i] = value;
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.check(i);
        self.check(j);
        self.values.swap(i, j);
    }

    #[inline]
    pub fn key(&self, i: usize) -> u32 {
        self.get(i).key()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0].key() <= w[1].key())
    }

    /// Smallest and largest key, `None` when empty.
    pub fn key_bounds(&self) -> Option<(u32, u32)> {
        let mut keys = self.values.iter().map(SortKey::key);
        let first = keys.next()?;
        Some(keys.fold((first, first), |(lo, hi), k| (lo.min(k), hi.max(k))))
    }

    fn check(&self, i: usize) {
        assert!(
            i < self.values.len(),
            "index {} out of bounds for sequence of length {}",
            i,
            self.values.len()
        );
    }
}

impl ArrayModel<u32> {
    /// Fresh random sequence with values in `[MIN_VALUE, MAX_VALUE]`.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Self {
        let values = (0..len).map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE)).collect();
        ArrayModel { values }
    }
}

impl<T: SortKey> Display for ArrayModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v.key())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use super::*;

    #[test]
    fn shuffled_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let model = ArrayModel::shuffled(&mut rng, 200);
        assert_eq!(model.len(), 200);
        assert!(model.as_slice().iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
    }

    #[test]
    fn swap_and_set() {
        let mut model = ArrayModel::from_vec(vec![1u32, 2, 3]);
        model.swap(0, 2);
        model.set(1, 9);
        assert_eq!(model.as_slice(), &[3, 9, 1]);
        assert_eq!(model.key_bounds(), Some((1, 9)));
        assert_eq!(model.to_string(), "[3 9 1]");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn invalid_index_is_fatal() {
        let model = ArrayModel::from_vec(vec![1u32, 2]);
        model.get(2);
    }

    #[test]
    fn empty_has_no_bounds() {
        let model: ArrayModel = ArrayModel::from_vec(vec![]);
        assert!(model.is_sorted());
        assert_eq!(model.key_bounds(), None);
    }
}
