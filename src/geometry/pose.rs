//! Pose: rigid transform of one measurement sample.
//!
//! The rotation is kept as a plain 3x3 matrix rather than a unit quaternion:
//! measured orientations carry noise and the estimator reads the camera's
//! viewing direction straight from the third column.

use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};

/// Rigid transform: rotation (columns are the local axis directions) + translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Construct from a homogeneous 4x4 matrix of form [R | t; 0 | 1].
    pub fn from_matrix(mat: Matrix4<f64>) -> Self {
        Self {
            rotation: mat.fixed_view::<3, 3>(0, 0).into_owned(),
            translation: mat.fixed_view::<3, 1>(0, 3).into_owned(),
        }
    }

    /// Camera pose at `position` whose viewing direction is `forward`.
    ///
    /// The camera looks down its negative Z axis, so the third column of the
    /// resulting rotation is `-forward` (normalized). `up` must not be parallel
    /// to `forward`.
    pub fn looking_along(
        position: Vector3<f64>,
        forward: &Vector3<f64>,
        up: &Vector3<f64>,
    ) -> Self {
        let rotation = Rotation3::face_towards(&(-forward), up);
        Self {
            rotation: rotation.into_inner(),
            translation: position,
        }
    }

    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();
        mat.fixed_view_mut::<3, 3>(0, 0).copy_from(&self.rotation);
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        mat
    }

    #[inline]
    pub fn position(&self) -> Vector3<f64> {
        self.translation
    }

    /// Local axis `i` (0 = x, 1 = y, 2 = z) in world coordinates.
    #[inline]
    pub fn axis(&self, i: usize) -> Vector3<f64> {
        self.rotation.column(i).into_owned()
    }

    /// Viewing direction: the negated third axis.
    #[inline]
    pub fn forward(&self) -> Vector3<f64> {
        -self.axis(2)
    }

    /// Line segments from the position along each local axis, scaled by `scale`.
    ///
    /// Returned in x, y, z order as `[start, end]` pairs.
    pub fn axis_segments(&self, scale: f64) -> [[Vector3<f64>; 2]; 3] {
        let origin = self.translation;
        [0, 1, 2].map(|i| [origin, origin + scale * self.axis(i)])
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
