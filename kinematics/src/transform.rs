use std::ops::Mul;

use fanuc_link::Position;
use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Vector3};

/// 4x4 rigid transform: rotation in the upper-left block, translation in the
/// last column, bottom row `[0, 0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomogeneousTransform(Matrix4<f64>);

impl HomogeneousTransform {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn from_parts(rotation: &Rotation3<f64>, translation: &Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(rotation.matrix());
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
        Self(matrix)
    }

    /// Builds from the top three rows; the bottom row is always `[0, 0, 0, 1]`.
    /// The caller is responsible for the rotation block being orthonormal.
    pub fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        let mut matrix = Matrix4::identity();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                matrix[(r, c)] = *value;
            }
        }
        Self(matrix)
    }

    /// Axis-angle rotation (direction is the axis, norm the angle in radians)
    /// plus a translation.
    pub fn from_rotation_vector(rvec: &Vector3<f64>, tvec: &Vector3<f64>) -> Self {
        Self::from_parts(&Rotation3::from_scaled_axis(*rvec), tvec)
    }

    /// Standard Denavit-Hartenberg link transform
    /// `Rz(theta) * Tz(d) * Tx(a) * Rx(alpha)`.
    pub fn dh(d: f64, theta: f64, a: f64, alpha: f64) -> Self {
        let (st, ct) = theta.sin_cos();
        let (sa, ca) = alpha.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            ct,  -ca * st,  sa * st, a * ct,
            st,   ca * ct, -sa * ct, a * st,
            0.0,       sa,       ca,      d,
            0.0,      0.0,      0.0,    1.0,
        );
        Self(matrix)
    }

    /// Pose with `w`, `p`, `r` read as roll, pitch, yaw in degrees.
    pub fn from_position(position: &Position) -> Self {
        Self(Isometry3::from(position).to_homogeneous())
    }

    /// Translation plus [`angles_from_transform`] converted to degrees.
    pub fn to_position(&self) -> Position {
        let t = self.translation();
        let (roll, pitch, yaw) = angles_from_transform(self);
        Position::new(
            t.x,
            t.y,
            t.z,
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees(),
        )
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    pub fn rotation(&self) -> Matrix3<f64> {
        self.0.fixed_view::<3, 3>(0, 0).into_owned()
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.0.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// True when the bottom row is exact and the rotation block is
    /// orthonormal within `tolerance`.
    pub fn is_rigid(&self, tolerance: f64) -> bool {
        let bottom = self.0.row(3);
        if bottom[0] != 0.0 || bottom[1] != 0.0 || bottom[2] != 0.0 || bottom[3] != 1.0 {
            return false;
        }
        let r = self.rotation();
        (r.transpose() * r - Matrix3::identity()).abs().max() < tolerance
    }
}

impl Default for HomogeneousTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for HomogeneousTransform {
    type Output = HomogeneousTransform;

    fn mul(self, rhs: HomogeneousTransform) -> Self::Output {
        HomogeneousTransform(self.0 * rhs.0)
    }
}

/// Tait-Bryan angles `(roll, pitch, yaw)` in radians, matching
/// `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn angles_from_transform(transform: &HomogeneousTransform) -> (f64, f64, f64) {
    let m = transform.matrix();
    let roll = m[(2, 1)].atan2(m[(2, 2)]);
    let pitch = (-m[(2, 0)]).atan2((m[(2, 1)].powi(2) + m[(2, 2)].powi(2)).sqrt());
    let yaw = m[(1, 0)].atan2(m[(0, 0)]);
    (roll, pitch, yaw)
}

/// `[x, y, z, roll, pitch, yaw]` with angles in radians.
pub fn coords_from_transform(transform: &HomogeneousTransform) -> [f64; 6] {
    let t = transform.translation();
    let (roll, pitch, yaw) = angles_from_transform(transform);
    [t.x, t.y, t.z, roll, pitch, yaw]
}
