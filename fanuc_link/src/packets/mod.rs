//! Text encodings for the command and telemetry channels.
//!
//! Messages carry no delimiter; the receiver relies on one message per read.
//! All numbers are integers in thousandths of the engineering unit.

mod command;
mod telemetry;

pub use command::*;
pub use telemetry::*;

pub(crate) fn to_wire(value: f64) -> i64 {
    (value * 1000.0) as i64
}

pub(crate) fn from_wire(value: i64) -> f64 {
    value as f64 / 1000.0
}
