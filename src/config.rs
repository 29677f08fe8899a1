//! Robot configuration parameters
//!
//! All tunable parameters for the control core.  Wiring and pin numbers are
//! not here: the ports handed to each subsystem are already bound to their
//! devices.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core robot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotConfig {
    // --- Timing ---
    /// Period of the external tick source (milliseconds)
    pub tick_period_ms: u32,
    /// Long-running commands log their execute step once per this many ticks
    pub execute_log_every: u32,

    // --- Subsystems ---
    pub drive: DriveConfig,
    pub climber: ClimberConfig,
}

/// Differential mixer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveConfig {
    /// Inputs with magnitude at or below this are treated as zero
    pub deadband: f64,
    /// Scale applied to every motor output (0, 1]
    pub max_output: f64,
    /// Square inputs (preserving sign) for finer low-speed control
    pub square_inputs: bool,
    /// Negate the left group's output
    pub invert_left: bool,
    /// Negate the right group's output (mirror-mounted gearbox)
    pub invert_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimberConfig {
    /// Leg motor speed while extending, (0, 1]
    pub extend_speed: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 20, // 50 Hz
            execute_log_every: 50,
            drive: DriveConfig::default(),
            climber: ClimberConfig::default(),
        }
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            deadband: 0.02,
            max_output: 1.0,
            square_inputs: true,
            invert_left: false,
            invert_right: true,
        }
    }
}

impl Default for ClimberConfig {
    fn default() -> Self {
        Self { extend_speed: 1.0 }
    }
}

impl RobotConfig {
    /// Decode a JSON config and validate it.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_period_ms must be > 0"));
        }
        if self.execute_log_every == 0 {
            return Err(ConfigError::ValidationFailed("execute_log_every must be > 0"));
        }
        if !(0.0..1.0).contains(&self.drive.deadband) {
            return Err(ConfigError::ValidationFailed("drive.deadband must be in [0, 1)"));
        }
        if !(self.drive.max_output > 0.0 && self.drive.max_output <= 1.0) {
            return Err(ConfigError::ValidationFailed("drive.max_output must be in (0, 1]"));
        }
        if !(self.climber.extend_speed > 0.0 && self.climber.extend_speed <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "climber.extend_speed must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Tick period in seconds.
    pub fn tick_period_secs(&self) -> f64 {
        f64::from(self.tick_period_ms) / 1000.0
    }
}
