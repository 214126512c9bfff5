//! Per-sample control point estimates and the collection they are gathered in.

use nalgebra::Vector3;

/// Which interior control point a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPoint {
    B1,
    B2,
}

/// One interior sample's independent estimate of `b1` and `b2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPointEstimate {
    /// Index of the sample in the measurement sequence.
    pub sample_index: usize,
    /// Curve parameter the sample was solved at.
    pub u: f64,
    pub b1: Vector3<f64>,
    pub b2: Vector3<f64>,
}

impl ControlPointEstimate {
    #[inline]
    pub fn point(&self, which: ControlPoint) -> Vector3<f64> {
        match which {
            ControlPoint::B1 => self.b1,
            ControlPoint::B2 => self.b2,
        }
    }
}

/// Accumulates estimates in sample order during one estimation run.
#[derive(Debug, Default)]
pub struct EstimateCollectionBuilder {
    estimates: Vec<ControlPointEstimate>,
}

impl EstimateCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            estimates: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, estimate: ControlPointEstimate) {
        self.estimates.push(estimate);
    }

    pub fn finish(self) -> EstimateCollection {
        EstimateCollection {
            estimates: self.estimates,
        }
    }
}

/// Finished, read-only set of per-sample estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateCollection {
    estimates: Vec<ControlPointEstimate>,
}

impl EstimateCollection {
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlPointEstimate> {
        self.estimates.iter()
    }

    pub fn as_slice(&self) -> &[ControlPointEstimate] {
        &self.estimates
    }

    /// All estimates of one coordinate (`axis` 0..3) of one control point.
    pub fn axis_values(&self, which: ControlPoint, axis: usize) -> Vec<f64> {
        self.estimates
            .iter()
            .map(|e| e.point(which)[axis])
            .collect()
    }
}

impl FromIterator<ControlPointEstimate> for EstimateCollection {
    fn from_iter<I: IntoIterator<Item = ControlPointEstimate>>(iter: I) -> Self {
        let mut builder = EstimateCollectionBuilder::new();
        for estimate in iter {
            builder.push(estimate);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(index: usize, offset: f64) -> ControlPointEstimate {
        ControlPointEstimate {
            sample_index: index,
            u: 0.5,
            b1: Vector3::new(1.0 + offset, 2.0, 3.0),
            b2: Vector3::new(4.0, 5.0 + offset, 6.0),
        }
    }

    #[test]
    fn test_builder_preserves_order() {
        let mut builder = EstimateCollectionBuilder::with_capacity(3);
        builder.push(estimate(1, 0.0));
        builder.push(estimate(2, 0.5));
        builder.push(estimate(3, 1.0));
        let collection = builder.finish();

        assert_eq!(collection.len(), 3);
        let indices: Vec<_> = collection.iter().map(|e| e.sample_index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_axis_values() {
        let collection: EstimateCollection =
            [estimate(1, 0.0), estimate(2, 0.5)].into_iter().collect();

        assert_eq!(collection.axis_values(ControlPoint::B1, 0), vec![1.0, 1.5]);
        assert_eq!(collection.axis_values(ControlPoint::B2, 1), vec![5.0, 5.5]);
        assert_eq!(collection.axis_values(ControlPoint::B2, 2), vec![6.0, 6.0]);
    }
}
