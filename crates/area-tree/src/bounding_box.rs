//! Axis-aligned boxes in n-dimensional space.

use nalgebra::DVector;

/// A closed axis-aligned hyper-rectangle, defined by a lower and an upper
/// corner.
///
/// The box is an immutable value: the clamp operations return a new box with
/// a single bound replaced. `low[d] <= high[d]` is maintained by the callers
/// that derive child boxes from a parent; it is not checked here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    low: DVector<f64>,
    high: DVector<f64>,
}

impl BoundingBox {
    /// Creates a box from its lower and upper corners.
    ///
    /// # Panics (debug builds only)
    /// Panics if the corners have different dimensionality.
    pub fn new(low: DVector<f64>, high: DVector<f64>) -> Self {
        debug_assert_eq!(
            low.len(),
            high.len(),
            "Box corners must have the same dimensionality"
        );
        Self { low, high }
    }

    /// Creates the box `[-half_extent, +half_extent]` in every dimension.
    pub fn cube(dimensions: usize, half_extent: f64) -> Self {
        Self {
            low: DVector::from_element(dimensions, -half_extent),
            high: DVector::from_element(dimensions, half_extent),
        }
    }

    /// Number of dimensions of the box.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.low.len()
    }

    /// Returns the lower corner.
    #[inline]
    pub fn low(&self) -> &DVector<f64> {
        &self.low
    }

    /// Returns the upper corner.
    #[inline]
    pub fn high(&self) -> &DVector<f64> {
        &self.high
    }

    /// Returns a copy of this box with `low[dim]` replaced by `value`.
    ///
    /// This is the box of the upper child after a split at `value`.
    pub fn clamp_lower(&self, dim: usize, value: f64) -> Self {
        let mut low = self.low.clone();
        low[dim] = value;
        Self {
            low,
            high: self.high.clone(),
        }
    }

    /// Returns a copy of this box with `high[dim]` replaced by `value`.
    ///
    /// This is the box of the lower child after a split at `value`.
    pub fn clamp_upper(&self, dim: usize, value: f64) -> Self {
        let mut high = self.high.clone();
        high[dim] = value;
        Self {
            low: self.low.clone(),
            high,
        }
    }

    /// Checks whether a point lies inside the box, bounds included.
    ///
    /// Returns `false` if the point has a different dimensionality.
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.dimensions()
            && point
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Product of the extents in all dimensions.
    pub fn volume(&self) -> f64 {
        (&self.high - &self.low).iter().product()
    }

    /// Volume of the intersection with another box (0 when they only touch
    /// or do not meet).
    pub fn overlap_volume(&self, other: &Self) -> f64 {
        self.low
            .iter()
            .zip(self.high.iter())
            .zip(other.low.iter().zip(other.high.iter()))
            .map(|((&lo0, &hi0), (&lo1, &hi1))| (hi0.min(hi1) - lo0.max(lo1)).max(0.0))
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> BoundingBox {
        BoundingBox::new(DVector::from_vec(vec![0.0, 0.0]), DVector::from_vec(vec![1.0, 1.0]))
    }

    #[test]
    fn cube_spans_field() {
        let b = BoundingBox::cube(3, 1000.0);
        assert_eq!(b.dimensions(), 3);
        assert!(b.low().iter().all(|&v| v == -1000.0));
        assert!(b.high().iter().all(|&v| v == 1000.0));
    }

    #[test]
    fn clamp_replaces_single_bound() {
        let b = unit_square();

        let lower = b.clamp_upper(0, 0.25);
        assert_eq!(lower.high()[0], 0.25);
        assert_eq!(lower.high()[1], 1.0);
        assert_eq!(lower.low(), b.low());

        let upper = b.clamp_lower(1, 0.5);
        assert_eq!(upper.low()[1], 0.5);
        assert_eq!(upper.low()[0], 0.0);
        assert_eq!(upper.high(), b.high());

        // Original untouched
        assert_eq!(b, unit_square());
    }

    #[test]
    fn contains_is_closed() {
        let b = unit_square();
        assert!(b.contains(&[0.0, 0.0]));
        assert!(b.contains(&[1.0, 0.5]));
        assert!(!b.contains(&[1.0001, 0.5]));
        assert!(!b.contains(&[0.5]));
    }

    #[test]
    fn volume_and_overlap() {
        let b = BoundingBox::cube(2, 10.0);
        assert_eq!(b.volume(), 400.0);

        let left = b.clamp_upper(0, 0.0);
        let right = b.clamp_lower(0, 0.0);
        assert_eq!(left.volume() + right.volume(), b.volume());
        assert_eq!(left.overlap_volume(&right), 0.0);
        assert_eq!(left.overlap_volume(&b), left.volume());
    }
}
