use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Minimum,
    Maximum,
}

/// First axis of a Cartesian target found outside the envelope.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeViolation {
    pub axis: Axis,
    pub bound: Bound,
    pub value: f64,
    pub limit: f64,
}

impl fmt::Display for EnvelopeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (word, cmp) = match self.bound {
            Bound::Minimum => ("minimum", '<'),
            Bound::Maximum => ("maximum", '>'),
        };
        write!(
            f,
            "Exceeding the {} limits along the {:?} axis ({:.3} {} {:.3})",
            word, self.axis, self.value, cmp, self.limit
        )
    }
}

/// Axis-aligned box, in millimetres, that world-frame targets must stay inside.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SafetyEnvelope {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl SafetyEnvelope {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, (lo, hi)) in self.min.iter().zip(self.max.iter()).enumerate() {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(format!("Envelope bounds on axis {} must be finite.", i));
            }
            if lo > hi {
                return Err(format!(
                    "Envelope minimum {} exceeds maximum {} on axis {}.",
                    lo, hi, i
                ));
            }
        }
        Ok(())
    }

    /// Checks a target against the box. When several axes are out of range
    /// the Z axis is reported first, then Y, then X. NaN is always out of range.
    pub fn check(&self, x: f64, y: f64, z: f64) -> Result<(), EnvelopeViolation> {
        let axes = [(Axis::Z, 2, z), (Axis::Y, 1, y), (Axis::X, 0, x)];
        for (axis, i, value) in axes {
            if value.is_nan() || value < self.min[i] {
                return Err(EnvelopeViolation {
                    axis,
                    bound: Bound::Minimum,
                    value,
                    limit: self.min[i],
                });
            }
            if value > self.max[i] {
                return Err(EnvelopeViolation {
                    axis,
                    bound: Bound::Maximum,
                    value,
                    limit: self.max[i],
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.check(x, y, z).is_ok()
    }
}

impl Default for SafetyEnvelope {
    fn default() -> Self {
        Self {
            min: [680.0, -465.0, 420.0],
            max: [1380.0, 465.0, 1200.0],
        }
    }
}
