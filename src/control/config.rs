use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::control::layout::Viewport;
use crate::errors::SimulationError;

/// How the plane's acceleration vector is derived each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccelerationMode {
    #[default]
    ConstantVelocity,
    /// Magnitude applied along the current heading.
    ConstantAcceleration,
    /// Magnitude applied against the current velocity.
    ConstantDeceleration,
}

impl AccelerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccelerationMode::ConstantVelocity => "constant_velocity",
            AccelerationMode::ConstantAcceleration => "constant_acceleration",
            AccelerationMode::ConstantDeceleration => "constant_deceleration",
        }
    }
}

impl FromStr for AccelerationMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "constant_velocity" => Ok(AccelerationMode::ConstantVelocity),
            "constant_acceleration" => Ok(AccelerationMode::ConstantAcceleration),
            "constant_deceleration" => Ok(AccelerationMode::ConstantDeceleration),
            other => Err(SimulationError::UnknownMode {
                field: "acceleration_mode",
                value: other.to_string(),
            }),
        }
    }
}

/// Policy deciding when the next bomb leaves the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DropTrigger {
    /// Interval is seconds of simulation time.
    #[default]
    Time,
    /// Interval is meters between plane and the last bomb.
    Distance,
}

impl DropTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropTrigger::Time => "time",
            DropTrigger::Distance => "distance",
        }
    }

    /// Short unit shown next to the drop interval input.
    pub fn unit_label(&self) -> &'static str {
        match self {
            DropTrigger::Time => "s",
            DropTrigger::Distance => "m",
        }
    }

    pub fn unit_name(&self) -> &'static str {
        match self {
            DropTrigger::Time => "seconds",
            DropTrigger::Distance => "meters",
        }
    }
}

impl FromStr for DropTrigger {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "time" => Ok(DropTrigger::Time),
            "distance" => Ok(DropTrigger::Distance),
            other => Err(SimulationError::UnknownMode {
                field: "drop_trigger",
                value: other.to_string(),
            }),
        }
    }
}

/// Drag model applied to falling bombs. Bomb mass is taken as 1, so the
/// coefficient is directly an acceleration (or acceleration per m/s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AirResistance {
    #[default]
    None,
    Constant,
    #[serde(alias = "proportional_v")]
    ProportionalToSpeed,
}

impl AirResistance {
    pub fn as_str(&self) -> &'static str {
        match self {
            AirResistance::None => "none",
            AirResistance::Constant => "constant",
            AirResistance::ProportionalToSpeed => "proportional_to_speed",
        }
    }
}

impl FromStr for AirResistance {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "none" => Ok(AirResistance::None),
            "constant" => Ok(AirResistance::Constant),
            "proportional_to_speed" | "proportional_v" => Ok(AirResistance::ProportionalToSpeed),
            other => Err(SimulationError::UnknownMode {
                field: "air_resistance",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! impl_display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_via_as_str!(AccelerationMode, DropTrigger, AirResistance);

/// Immutable parameters of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial altitude above ground (m)
    pub altitude: f64,
    /// Initial speed (m/s)
    pub initial_speed: f64,
    /// Launch angle above the horizon (degrees)
    pub launch_angle: f64,
    pub acceleration_mode: AccelerationMode,
    /// Signed acceleration magnitude (m/s²)
    pub acceleration: f64,
    pub drop_trigger: DropTrigger,
    /// Seconds or meters depending on `drop_trigger`
    pub drop_interval: f64,
    pub bomb_count: u32,
    pub air_resistance: AirResistance,
    pub resistance_coefficient: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            altitude: 1000.0,
            initial_speed: 100.0,
            launch_angle: 0.0,
            acceleration_mode: AccelerationMode::ConstantVelocity,
            acceleration: 0.0,
            drop_trigger: DropTrigger::Time,
            drop_interval: 2.0,
            bomb_count: 5,
            air_resistance: AirResistance::None,
            resistance_coefficient: 0.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        require(
            "altitude",
            self.altitude.is_finite() && self.altitude > 0.0,
            || format!("must be a positive number of meters, got {}", self.altitude),
        )?;
        require(
            "initial_speed",
            self.initial_speed.is_finite() && self.initial_speed >= 0.0,
            || format!("must be non-negative, got {}", self.initial_speed),
        )?;
        require("launch_angle", self.launch_angle.is_finite(), || {
            format!("must be finite, got {}", self.launch_angle)
        })?;
        require("acceleration", self.acceleration.is_finite(), || {
            format!("must be finite, got {}", self.acceleration)
        })?;
        require(
            "drop_interval",
            self.drop_interval.is_finite() && self.drop_interval > 0.0,
            || format!("must be positive, got {}", self.drop_interval),
        )?;
        require("bomb_count", self.bomb_count >= 1, || {
            "at least one bomb is required".to_string()
        })?;
        require(
            "resistance_coefficient",
            self.resistance_coefficient.is_finite() && self.resistance_coefficient >= 0.0,
            || format!("must be non-negative, got {}", self.resistance_coefficient),
        )?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn launch_angle_rad(&self) -> f64 {
        self.launch_angle.to_radians()
    }
}

fn require(
    field: &'static str,
    ok: bool,
    reason: impl FnOnce() -> String,
) -> Result<(), SimulationError> {
    if ok {
        Ok(())
    } else {
        Err(SimulationError::OutOfRange {
            field,
            reason: reason(),
        })
    }
}

/// Raw values as read from the input form, before any parsing.
#[derive(Debug, Clone, Default)]
pub struct ConfigForm {
    pub altitude: String,
    pub initial_speed: String,
    pub flight_angle: String,
    pub acceleration_type: String,
    pub acceleration: String,
    pub drop_interval_type: String,
    pub drop_interval_value: String,
    pub number_of_bombs: String,
    pub air_resistance_type: String,
    pub air_resistance_value: String,
    pub viewport_width: String,
    pub viewport_height: String,
    /// Height taken by the controls panel; empty means none.
    pub reserved_height: String,
}

impl ConfigForm {
    /// Parses and validates the form. Any unparsable or out-of-range field
    /// rejects the whole form.
    pub fn parse(&self) -> Result<(SimulationConfig, Viewport), SimulationError> {
        let config = SimulationConfig {
            altitude: parse_number("altitude", &self.altitude)?,
            initial_speed: parse_number("initial_speed", &self.initial_speed)?,
            launch_angle: parse_number("launch_angle", &self.flight_angle)?,
            acceleration_mode: self.acceleration_type.parse()?,
            acceleration: parse_number("acceleration", &self.acceleration)?,
            drop_trigger: self.drop_interval_type.parse()?,
            drop_interval: parse_number("drop_interval", &self.drop_interval_value)?,
            bomb_count: parse_count("bomb_count", &self.number_of_bombs)?,
            air_resistance: self.air_resistance_type.parse()?,
            resistance_coefficient: parse_number(
                "resistance_coefficient",
                &self.air_resistance_value,
            )?,
        };
        config.validate()?;

        let reserved_height = if self.reserved_height.trim().is_empty() {
            0.0
        } else {
            parse_number("reserved_height", &self.reserved_height)?
        };
        let viewport = Viewport::new(
            parse_number("viewport_width", &self.viewport_width)?,
            parse_number("viewport_height", &self.viewport_height)?,
        )
        .with_reserved_height(reserved_height);

        Ok((config, viewport))
    }
}

impl From<&SimulationConfig> for ConfigForm {
    fn from(config: &SimulationConfig) -> Self {
        ConfigForm {
            altitude: config.altitude.to_string(),
            initial_speed: config.initial_speed.to_string(),
            flight_angle: config.launch_angle.to_string(),
            acceleration_type: config.acceleration_mode.to_string(),
            acceleration: config.acceleration.to_string(),
            drop_interval_type: config.drop_trigger.to_string(),
            drop_interval_value: config.drop_interval.to_string(),
            number_of_bombs: config.bomb_count.to_string(),
            air_resistance_type: config.air_resistance.to_string(),
            air_resistance_value: config.resistance_coefficient.to_string(),
            ..ConfigForm::default()
        }
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, SimulationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(SimulationError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_count(field: &'static str, raw: &str) -> Result<u32, SimulationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| SimulationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}
