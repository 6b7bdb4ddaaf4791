//! Conversions between [`Position`] and nalgebra rigid transforms.
//!
//! Enabled by the `nalgebra-support` feature:
//!
//! ```toml
//! [dependencies]
//! fanuc_link = { path = "../fanuc_link", features = ["nalgebra-support"] }
//! ```
//!
//! `w`, `p`, `r` are read as roll about X, pitch about Y and yaw about Z in
//! degrees, composed as `Rz(r) * Ry(p) * Rx(w)`.

#[cfg(feature = "nalgebra-support")]
use crate::Position;

#[cfg(feature = "nalgebra-support")]
use nalgebra::{Isometry3, Translation3, UnitQuaternion};

#[cfg(feature = "nalgebra-support")]
impl From<Position> for Isometry3<f64> {
    fn from(pos: Position) -> Self {
        let translation = Translation3::new(pos.x, pos.y, pos.z);
        let rotation = UnitQuaternion::from_euler_angles(
            pos.w.to_radians(),
            pos.p.to_radians(),
            pos.r.to_radians(),
        );
        Isometry3::from_parts(translation, rotation)
    }
}

#[cfg(feature = "nalgebra-support")]
impl From<&Position> for Isometry3<f64> {
    fn from(pos: &Position) -> Self {
        (*pos).into()
    }
}

#[cfg(feature = "nalgebra-support")]
impl From<Isometry3<f64>> for Position {
    fn from(iso: Isometry3<f64>) -> Self {
        let (roll, pitch, yaw) = iso.rotation.euler_angles();
        Position {
            x: iso.translation.x,
            y: iso.translation.y,
            z: iso.translation.z,
            w: roll.to_degrees(),
            p: pitch.to_degrees(),
            r: yaw.to_degrees(),
        }
    }
}
