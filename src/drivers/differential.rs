//! Differential (skid-steer) wheel mixing.
//!
//! Pure arithmetic: turns arcade or tank requests into left/right group
//! outputs.  No state and no ports: the [`Drive`](crate::subsystems::drive::Drive)
//! subsystem applies the result.
//!
//! Pipeline for every input:
//!
//! ```text
//!  clamp [-1, 1] ─▶ deadband ─▶ square (sign kept) ─▶ mix ─▶ clamp ─▶ × max_output ─▶ invert
//! ```

use crate::config::DriveConfig;

/// Final outputs for the two motor groups, already inverted as configured.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct DifferentialDrive {
    config: DriveConfig,
}

impl DifferentialDrive {
    pub fn new(config: DriveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Mix a forward speed and a rotation rate (positive = clockwise).
    pub fn arcade(&self, forward: f64, rotation: f64) -> WheelSpeeds {
        let x = self.shape(forward);
        let z = self.shape(rotation);

        let max_input = x.abs().max(z.abs()).copysign(x);
        let (left, right) = if x >= 0.0 {
            if z >= 0.0 {
                (max_input, x - z)
            } else {
                (x + z, max_input)
            }
        } else if z >= 0.0 {
            (x + z, max_input)
        } else {
            (max_input, x - z)
        };

        self.output(left, right)
    }

    /// Drive each side independently.
    pub fn tank(&self, left: f64, right: f64) -> WheelSpeeds {
        self.output(self.shape(left), self.shape(right))
    }

    // ── Internal ──────────────────────────────────────────────

    fn shape(&self, value: f64) -> f64 {
        let v = apply_deadband(clamp_unit(value), self.config.deadband);
        if self.config.square_inputs {
            (v * v).copysign(v)
        } else {
            v
        }
    }

    fn output(&self, left: f64, right: f64) -> WheelSpeeds {
        let scale = self.config.max_output;
        let left = clamp_unit(left) * scale;
        let right = clamp_unit(right) * scale;
        WheelSpeeds {
            left: if self.config.invert_left { -left } else { left },
            right: if self.config.invert_right { -right } else { right },
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

/// Zero inside the band, rescaled outside so output still reaches ±1.
fn apply_deadband(value: f64, deadband: f64) -> f64 {
    if value.abs() > deadband {
        if value > 0.0 {
            (value - deadband) / (1.0 - deadband)
        } else {
            (value + deadband) / (1.0 - deadband)
        }
    } else {
        0.0
    }
}
