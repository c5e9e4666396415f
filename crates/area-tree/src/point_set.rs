//! Ordered point collections and median bisection.

use nalgebra::DVector;

use crate::{AreaError, Result};

/// An ordered collection of points sharing one dimensionality.
///
/// Every point is guaranteed to have exactly [`PointSet::dimensions`]
/// finite components; ragged or non-finite input is rejected when points
/// are added.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    dimensions: usize,
    points: Vec<DVector<f64>>,
}

/// Result of bisecting a sorted [`PointSet`] at its median.
#[derive(Debug, Clone, PartialEq)]
pub struct MedianSplit {
    /// Points `[0, n/2)`.
    pub lower: PointSet,
    /// Points `[n/2, n)`.
    pub upper: PointSet,
    /// Midpoint between the two points adjacent to the cut.
    pub coord: f64,
}

impl PointSet {
    /// Creates an empty set of the given dimensionality.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(AreaError::ZeroDimensions);
        }
        Ok(Self {
            dimensions,
            points: Vec::new(),
        })
    }

    /// Creates a set from existing points, validating their dimensionality.
    pub fn from_points(dimensions: usize, points: Vec<DVector<f64>>) -> Result<Self> {
        let mut set = Self::new(dimensions)?;
        set.points.reserve(points.len());
        for point in points {
            set.push(point)?;
        }
        Ok(set)
    }

    /// Creates a set from plain coordinate rows.
    pub fn from_rows<I, R>(dimensions: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let points = rows
            .into_iter()
            .map(|row| DVector::from_column_slice(row.as_ref()))
            .collect();
        Self::from_points(dimensions, points)
    }

    /// Appends a point.
    pub fn push(&mut self, point: DVector<f64>) -> Result<()> {
        let index = self.points.len();
        if point.len() != self.dimensions {
            return Err(AreaError::DimensionMismatch {
                index,
                expected: self.dimensions,
                found: point.len(),
            });
        }
        if let Some(dim) = point.iter().position(|v| !v.is_finite()) {
            return Err(AreaError::NonFiniteCoordinate { index, dim });
        }
        self.points.push(point);
        Ok(())
    }

    /// Number of components of every point.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points in their current order.
    #[inline]
    pub fn points(&self) -> &[DVector<f64>] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVector<f64>> {
        self.points.iter()
    }

    /// Sorts the points ascending by coordinate `dim`, in place.
    ///
    /// The sort is stable: points with equal coordinates keep their relative
    /// order, which keeps partitions reproducible.
    pub fn sort_by_dimension(&mut self, dim: usize) {
        self.points.sort_by(|a, b| a[dim].total_cmp(&b[dim]));
    }

    /// Consumes the set and returns it sorted by coordinate `dim`.
    pub fn sorted_by_dimension(mut self, dim: usize) -> Self {
        self.sort_by_dimension(dim);
        self
    }

    /// Bisects a set that is already sorted by `dim`.
    ///
    /// With `n` points and `half = n / 2`, the lower half holds `[0, half)`,
    /// the upper half `[half, n)`, and the split coordinate is the midpoint of
    /// `points[half - 1][dim]` and `points[half][dim]`.
    ///
    /// Returns `None` for fewer than two points, which cannot be bisected.
    pub fn median_split(mut self, dim: usize) -> Option<MedianSplit> {
        let n = self.points.len();
        if n < 2 {
            return None;
        }
        let half = n / 2;
        let coord = (self.points[half - 1][dim] + self.points[half][dim]) / 2.0;

        let upper = self.points.split_off(half);
        Some(MedianSplit {
            lower: Self {
                dimensions: self.dimensions,
                points: self.points,
            },
            upper: Self {
                dimensions: self.dimensions,
                points: upper,
            },
            coord,
        })
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a DVector<f64>;
    type IntoIter = std::slice::Iter<'a, DVector<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
