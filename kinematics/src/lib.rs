//! Homogeneous transforms, generic DH chains and the M-20iA model built on them.

pub mod chain;
pub mod kinematics;
pub mod robot_config;
pub mod transform;

pub use chain::{DhLink, KinematicChain};
pub use kinematics::{joints_to_generalized, FanucKinematics};
pub use robot_config::RobotConfig;
pub use transform::{angles_from_transform, coords_from_transform, HomogeneousTransform};
