mod driver_error;
mod socket_error;

pub use driver_error::*;
pub use socket_error::*;
