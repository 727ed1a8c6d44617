//! Train/test splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{ReeltagError, Result};

/// Row indices of a shuffled train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Shuffle `0..n` with `seed` and hold out `ceil(test_size * n)` rows.
    ///
    /// At least one row always stays in the training part.
    pub fn new(n: usize, test_size: f64, seed: u64) -> Result<Self> {
        if !(0.0..1.0).contains(&test_size) {
            return Err(ReeltagError::configuration(format!(
                "test size must be in [0, 1), got {test_size}"
            )));
        }
        if n == 0 {
            return Err(ReeltagError::invalid_input("cannot split an empty dataset"));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut StdRng::seed_from_u64(seed));

        let n_test = ((test_size * n as f64).ceil() as usize).min(n - 1);
        let train = indices.split_off(n_test);
        Ok(TrainTestSplit {
            train,
            test: indices,
        })
    }

    /// Pick the rows of `items` belonging to `indices`.
    pub fn select<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
        indices.iter().map(|&i| items[i].clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition() {
        let split = TrainTestSplit::new(10, 0.25, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 7);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded() {
        assert_eq!(
            TrainTestSplit::new(50, 0.2, 7).unwrap(),
            TrainTestSplit::new(50, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn test_zero_test_size() {
        let split = TrainTestSplit::new(4, 0.0, 1).unwrap();
        assert!(split.test.is_empty());
        assert_eq!(split.train.len(), 4);
    }

    #[test]
    fn test_invalid() {
        assert!(TrainTestSplit::new(4, 1.0, 1).is_err());
        assert!(TrainTestSplit::new(4, -0.1, 1).is_err());
        assert!(TrainTestSplit::new(0, 0.2, 1).is_err());
    }

    #[test]
    fn test_select() {
        let items = vec!["a", "b", "c"];
        assert_eq!(TrainTestSplit::select(&items, &[2, 0]), vec!["c", "a"]);
    }
}
