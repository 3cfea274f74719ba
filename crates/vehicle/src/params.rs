use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading vehicle tuning.
#[derive(Debug, thiserror::Error)]
pub enum VehicleConfigError {
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid vehicle tuning: {0}")]
    Invalid(String),
}

/// Tuning constants for [`crate::VehicleModel`].
///
/// All rates are rpm units per second. Every field is optional in YAML and
/// falls back to the default tuning:
///
/// ```yaml
/// power_gain: 120.0
/// rpm_min: -3.0
/// rpm_max: 10.0
/// acceleration: 3.0
/// reverse: 1.0
/// coasting: 0.5
/// braking: 4.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// Pixels per second per unit of rpm.
    pub power_gain: f32,
    pub rpm_min: f32,
    pub rpm_max: f32,
    /// Throttle while rolling forward or stopped.
    pub acceleration: f32,
    /// Brake pedal while stopped or rolling backward.
    pub reverse: f32,
    /// Decay toward zero with no pedal.
    pub coasting: f32,
    /// Pedal against the direction of travel.
    pub braking: f32,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            power_gain: 120.0,
            rpm_min: -3.0,
            rpm_max: 10.0,
            acceleration: 3.0,
            reverse: 1.0,
            coasting: 0.5,
            braking: 4.0,
        }
    }
}

impl VehicleParams {
    pub fn from_yaml_str(source: &str) -> Result<Self, VehicleConfigError> {
        let params: Self = serde_yaml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, VehicleConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let params = Self::from_yaml_str(&source)?;
        tracing::info!("loaded vehicle tuning from {}", path.as_ref().display());
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), VehicleConfigError> {
        let fields = [
            ("power_gain", self.power_gain),
            ("rpm_min", self.rpm_min),
            ("rpm_max", self.rpm_max),
            ("acceleration", self.acceleration),
            ("reverse", self.reverse),
            ("coasting", self.coasting),
            ("braking", self.braking),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(VehicleConfigError::Invalid(format!("{name} is not finite")));
            }
        }
        if !(self.rpm_min <= 0.0 && 0.0 <= self.rpm_max) {
            return Err(VehicleConfigError::Invalid(format!(
                "rpm range [{}, {}] must contain 0",
                self.rpm_min, self.rpm_max
            )));
        }
        for (name, value) in &fields[3..] {
            if *value < 0.0 {
                return Err(VehicleConfigError::Invalid(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }
}
