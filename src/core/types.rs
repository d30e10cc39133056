//! Sample representation used by the bundled kernels and data loaders

use crate::core::{OneClassError, Result};
use serde::{Deserialize, Serialize};

/// Sparse vector representation with sorted indices
///
/// Deserialized vectors must already have strictly increasing indices and
/// one value per index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSparseVector")]
pub struct SparseVector {
    /// Sorted indices of non-zero elements
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Like [`SparseVector::new`], but reports a length mismatch or a
    /// repeated index as an error instead of panicking
    pub fn try_new(indices: Vec<usize>, values: Vec<f64>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(OneClassError::InvalidParameter(format!(
                "{} indices but {} values",
                indices.len(),
                values.len()
            )));
        }

        let sv = Self::new(indices, values);
        if let Some(w) = sv.indices.windows(2).find(|w| w[0] == w[1]) {
            return Err(OneClassError::InvalidParameter(format!(
                "Duplicate feature index: {}",
                w[0]
            )));
        }
        Ok(sv)
    }

    /// Build a sparse vector from a dense slice, dropping exact zeros
    pub fn from_dense(dense: &[f64]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Get the value at a specific index (0 if not present)
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Dot product with another sparse vector.
    ///
    /// Both index lists are sorted, so this is a merge walk in
    /// O(nnz(x) + nnz(y)).
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut result = 0.0;
        let (mut i, mut j) = (0, 0);

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    result += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }

        result
    }

    /// Squared Euclidean distance ||x - y||²
    pub fn squared_distance(&self, other: &SparseVector) -> f64 {
        let mut distance_sq = 0.0;
        let (mut i, mut j) = (0, 0);

        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Equal => {
                    let diff = self.values[i] - other.values[j];
                    distance_sq += diff * diff;
                    i += 1;
                    j += 1;
                }
                // Only self has a value here, other is implicitly 0
                std::cmp::Ordering::Less => {
                    distance_sq += self.values[i] * self.values[i];
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    distance_sq += other.values[j] * other.values[j];
                    j += 1;
                }
            }
        }

        distance_sq += self.values[i..].iter().map(|v| v * v).sum::<f64>();
        distance_sq += other.values[j..].iter().map(|v| v * v).sum::<f64>();

        distance_sq
    }

    /// Compute squared L2 norm
    pub fn norm_squared(&self) -> f64 {
        self.values.iter().map(|&v| v * v).sum()
    }

    /// Compute L2 norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Number of non-zero elements
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// One past the largest stored index, 0 for an empty vector
    pub fn dim(&self) -> usize {
        self.indices.last().map_or(0, |&idx| idx + 1)
    }
}

/// Wire form of [`SparseVector`], checked before it is accepted
#[derive(Deserialize)]
struct RawSparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl TryFrom<RawSparseVector> for SparseVector {
    type Error = OneClassError;

    fn try_from(raw: RawSparseVector) -> Result<Self> {
        if raw.indices.len() != raw.values.len() {
            return Err(OneClassError::InvalidModel(format!(
                "sparse vector has {} indices but {} values",
                raw.indices.len(),
                raw.values.len()
            )));
        }
        if !raw.indices.windows(2).all(|w| w[0] < w[1]) {
            return Err(OneClassError::InvalidModel(
                "sparse vector indices must be strictly increasing".to_string(),
            ));
        }
        Ok(Self {
            indices: raw.indices,
            values: raw.values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_vector_creation() {
        let sv = SparseVector::new(vec![2, 0, 4], vec![2.0, 1.0, 3.0]);

        assert_eq!(sv.indices, vec![0, 2, 4]);
        assert_eq!(sv.values, vec![1.0, 2.0, 3.0]);
        assert_eq!(sv.dim(), 5);
    }

    #[test]
    fn test_sparse_vector_from_dense() {
        let sv = SparseVector::from_dense(&[0.0, 1.5, 0.0, -2.0]);
        assert_eq!(sv.indices, vec![1, 3]);
        assert_eq!(sv.values, vec![1.5, -2.0]);
    }

    #[test]
    fn test_sparse_vector_get() {
        let sv = SparseVector::new(vec![1, 3, 5], vec![1.0, 2.0, 3.0]);

        assert_eq!(sv.get(0), 0.0);
        assert_eq!(sv.get(1), 1.0);
        assert_eq!(sv.get(3), 2.0);
        assert_eq!(sv.get(5), 3.0);
        assert_eq!(sv.get(6), 0.0);
    }

    #[test]
    fn test_sparse_vector_norm() {
        let sv = SparseVector::new(vec![0, 1], vec![3.0, 4.0]);
        assert_eq!(sv.norm_squared(), 25.0);
        assert_eq!(sv.norm(), 5.0);
    }

    #[test]
    fn test_dot_product() {
        let x = SparseVector::new(vec![0, 2, 5], vec![1.0, 3.0, 2.0]);
        let y = SparseVector::new(vec![2, 3, 5], vec![2.0, 1.0, 4.0]);

        // Overlap at 2 and 5: 3*2 + 2*4
        assert_eq!(x.dot(&y), 14.0);
        assert_eq!(y.dot(&x), 14.0);
        assert_eq!(SparseVector::empty().dot(&x), 0.0);
    }

    #[test]
    fn test_squared_distance() {
        let x = SparseVector::new(vec![0, 2, 5], vec![1.0, 3.0, 2.0]);
        let y = SparseVector::new(vec![2, 3, 5], vec![2.0, 1.0, 4.0]);

        // 1 + 1 + 1 + 4
        assert_eq!(x.squared_distance(&y), 7.0);
        assert_eq!(x.squared_distance(&x), 0.0);

        let empty = SparseVector::empty();
        let z = SparseVector::new(vec![0, 1], vec![1.0, 2.0]);
        assert_eq!(empty.squared_distance(&z), 5.0);
        assert_eq!(z.squared_distance(&empty), 5.0);
    }

    #[test]
    fn test_sparse_vector_utilities() {
        let sv = SparseVector::new(vec![1, 3], vec![2.0, 4.0]);
        assert_eq!(sv.nnz(), 2);
        assert!(!sv.is_empty());

        let empty = SparseVector::empty();
        assert_eq!(empty.nnz(), 0);
        assert!(empty.is_empty());
        assert_eq!(empty.dim(), 0);
    }

    #[test]
    #[should_panic(expected = "Indices and values must have same length")]
    fn test_sparse_vector_length_mismatch() {
        SparseVector::new(vec![0, 1], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_try_new_rejects_bad_input() {
        let sv = SparseVector::try_new(vec![3, 1], vec![1.0, 2.0]).unwrap();
        assert_eq!(sv.indices, vec![1, 3]);

        assert!(matches!(
            SparseVector::try_new(vec![0, 1], vec![1.0]),
            Err(OneClassError::InvalidParameter(_))
        ));
        assert!(matches!(
            SparseVector::try_new(vec![2, 0, 2], vec![1.0, 2.0, 3.0]),
            Err(OneClassError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_deserialize_checks_structure() {
        let sv: SparseVector =
            serde_json::from_str(r#"{"indices":[0,4],"values":[1.0,2.0]}"#).unwrap();
        assert_eq!(sv.get(4), 2.0);

        let mismatched = serde_json::from_str::<SparseVector>(r#"{"indices":[0,1],"values":[2.0]}"#);
        assert!(mismatched.is_err());

        let unsorted =
            serde_json::from_str::<SparseVector>(r#"{"indices":[4,0],"values":[1.0,2.0]}"#);
        assert!(unsorted.is_err());

        let repeated =
            serde_json::from_str::<SparseVector>(r#"{"indices":[1,1],"values":[1.0,2.0]}"#);
        assert!(repeated.is_err());
    }
}
