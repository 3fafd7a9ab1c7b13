//! Physical data types
//!
//! A physical quantity is either a single value (the gas concentration of a
//! plug-flow element) or a vector of values (several species, or a profile
//! sampled on points).

use nalgebra::DVector;

/// Physical data container
///
/// # Storage Types
///
/// - **Scalar**: Single value (0D)
/// - **Vector**: 1D array
///
/// # Examples
///
/// ```rust
/// use biotrickle_rs::physics::PhysicalData;
///
/// let concentration = PhysicalData::from_scalar(1.95e-4);
/// assert_eq!(concentration.try_as_scalar(), Some(1.95e-4));
///
/// let species = PhysicalData::uniform_vector(3, 0.0);
/// assert_eq!(species.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicalData {
    /// Scalar value (0D)
    ///
    /// Use for: gas concentration of a single contaminant
    Scalar(f64),

    /// Vector (1D)
    ///
    /// Use for: several contaminants, sampled profiles
    Vector(DVector<f64>),
}

impl PhysicalData {

    // ======================================= constructors =======================================

    /// Create from scalar
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create from vector
    pub fn from_vec(vector: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(vector))
    }

    /// Create uniform vector
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    // ========================================== Queries ==========================================

    /// Get length
    pub fn len(&self) -> usize {
        match self {
            PhysicalData::Scalar(_) => 1,
            PhysicalData::Vector(v) => v.len(),
        }
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every element is finite
    pub fn is_finite(&self) -> bool {
        self.as_slice().iter().all(|x| x.is_finite())
    }

    // ======================================== Extractions ========================================

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            PhysicalData::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// View all elements as a flat slice
    pub fn as_slice(&self) -> &[f64] {
        match self {
            PhysicalData::Scalar(value) => std::slice::from_ref(value),
            PhysicalData::Vector(value) => value.as_slice(),
        }
    }

    // ====================================== Apply functions ======================================

    /// Apply a function f to data
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        match self {
            PhysicalData::Scalar(value) => *value = f(*value),
            PhysicalData::Vector(value) => value.iter_mut().for_each(|x| *x = f(*x)),
        }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for PhysicalData {
    type Output = PhysicalData;
    fn add(self, rhs: Self) -> Self::Output {
        use PhysicalData::*;
        match (self, rhs) {
            (Scalar(x), Scalar(y)) => Scalar(x + y),
            (Scalar(x), Vector(y)) |
            (Vector(y), Scalar(x)) => Vector(y.map(|e| e + x)),
            (Vector(x), Vector(y)) => {
                assert_eq!(x.len(), y.len(), "Vector length must match");
                Vector(x + y)
            }
        }
    }
}

impl std::ops::Mul<f64> for PhysicalData {
    type Output = PhysicalData;
    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            PhysicalData::Scalar(x) => PhysicalData::Scalar(x * scalar),
            PhysicalData::Vector(x) => PhysicalData::Vector(x * scalar),
        }
    }
}

impl std::ops::Mul<PhysicalData> for f64 {
    type Output = PhysicalData;
    fn mul(self, rhs: PhysicalData) -> Self::Output {
        rhs * self
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let data = PhysicalData::Scalar(42.0);
        assert_eq!(data.try_as_scalar(), Some(42.0));
        assert_eq!(data.len(), 1);
        assert_eq!(data.as_slice(), &[42.0]);
    }

    #[test]
    fn test_vector() {
        let data = PhysicalData::uniform_vector(100, 1.0);
        assert_eq!(data.len(), 100);
        assert!(data.try_as_scalar().is_none());
    }

    #[test]
    fn test_addition() {
        let c = PhysicalData::Scalar(1.0) + PhysicalData::Scalar(2.0);
        assert_eq!(c.try_as_scalar(), Some(3.0));

        let v = PhysicalData::from_vec(vec![1.0, 2.0]) + PhysicalData::Scalar(1.0);
        assert_eq!(v.as_slice(), &[2.0, 3.0]);
    }

    #[test]
    fn test_multiplication() {
        let data = PhysicalData::uniform_vector(10, 2.0);
        let result = 3.0 * data;
        assert_eq!(result.as_slice()[0], 6.0);
    }

    #[test]
    fn test_apply_and_finiteness() {
        let mut data = PhysicalData::from_vec(vec![1.0, 4.0]);
        data.apply(f64::sqrt);
        assert_eq!(data.as_slice(), &[1.0, 2.0]);
        assert!(data.is_finite());

        data.apply(|x| x / 0.0);
        assert!(!data.is_finite());
    }

    #[test]
    #[should_panic(expected = "Vector length must match")]
    fn test_vector_length_mismatch() {
        let _ = PhysicalData::uniform_vector(2, 1.0) + PhysicalData::uniform_vector(3, 1.0);
    }
}
