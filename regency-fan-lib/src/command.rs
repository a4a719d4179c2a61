use num_enum::{FromPrimitive, IntoPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

use crate::constants::{FAN_DIR_CLOCKWISE, LIGHT_DELAY_OFF};
use crate::error::FrameError;

/// Raw 4-bit command codes sent in the high nibble of the first frame byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum CommandCode {
    Stop = 1,
    FanSpeed = 2,
    LightIntensity = 4,
    LightDelay = 5,
    FanDirection = 6,

    #[num_enum(catch_all)]
    Unknown(u8),
}

impl CommandCode {
    pub fn category(&self) -> CommandCategory {
        match self {
            CommandCode::Stop | CommandCode::FanSpeed => CommandCategory::FanSpeed,
            CommandCode::LightIntensity => CommandCategory::LightIntensity,
            CommandCode::LightDelay => CommandCategory::LightDelay,
            CommandCode::FanDirection => CommandCategory::FanDirection,
            CommandCode::Unknown(_) => CommandCategory::Invalid,
        }
    }
}

/// Category name reported in the `command` field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommandCategory {
    FanSpeed,
    LightIntensity,
    LightDelay,
    FanDirection,
    /// Placeholder for unassigned codes. Never appears in an emitted record.
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rotation {
    #[strum(to_string = "clockwise")]
    Clockwise,
    #[strum(to_string = "counter-clockwise")]
    CounterClockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DelayState {
    #[strum(to_string = "off")]
    Off,
    #[strum(to_string = "on")]
    On,
}

/// A decoded button press with its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stop,
    FanSpeed(u8),
    LightIntensity(u8),
    LightDelay(DelayState),
    FanDirection(Rotation),
}

impl Command {
    /// Interpret a command code and its value byte.
    ///
    /// Delay and direction compare against a single exact value; every other
    /// byte maps to the opposite state.
    pub fn decode(code: u8, value: u8) -> Result<Self, FrameError> {
        match CommandCode::from_primitive(code) {
            CommandCode::Stop => Ok(Command::Stop),
            CommandCode::FanSpeed => Ok(Command::FanSpeed(value)),
            CommandCode::LightIntensity => Ok(Command::LightIntensity(value)),
            CommandCode::LightDelay => Ok(Command::LightDelay(if value == LIGHT_DELAY_OFF {
                DelayState::Off
            } else {
                DelayState::On
            })),
            CommandCode::FanDirection => Ok(Command::FanDirection(if value == FAN_DIR_CLOCKWISE {
                Rotation::Clockwise
            } else {
                Rotation::CounterClockwise
            })),
            CommandCode::Unknown(code) => Err(FrameError::UnknownCommand(code)),
        }
    }

    pub fn code(&self) -> CommandCode {
        match self {
            Command::Stop => CommandCode::Stop,
            Command::FanSpeed(_) => CommandCode::FanSpeed,
            Command::LightIntensity(_) => CommandCode::LightIntensity,
            Command::LightDelay(_) => CommandCode::LightDelay,
            Command::FanDirection(_) => CommandCode::FanDirection,
        }
    }

    pub fn category(&self) -> CommandCategory {
        self.code().category()
    }
}

/// Renders the `value` field of a record.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Stop => write!(f, "stop"),
            Command::FanSpeed(speed) => write!(f, "speed {}", speed),
            Command::LightIntensity(level) => write!(f, "{} %", level),
            Command::LightDelay(state) => write!(f, "{}", state),
            Command::FanDirection(rotation) => write!(f, "{}", rotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        assert_eq!(CommandCode::from_primitive(1), CommandCode::Stop);
        assert_eq!(CommandCode::from_primitive(6), CommandCode::FanDirection);
        assert_eq!(CommandCode::from_primitive(3), CommandCode::Unknown(3));
        let raw: u8 = CommandCode::LightDelay.into();
        assert_eq!(raw, 5);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(CommandCategory::FanSpeed.to_string(), "fan_speed");
        assert_eq!(CommandCategory::LightIntensity.to_string(), "light_intensity");
        assert_eq!(CommandCategory::LightDelay.to_string(), "light_delay");
        assert_eq!(CommandCategory::FanDirection.to_string(), "fan_direction");
        assert_eq!(CommandCategory::Invalid.to_string(), "invalid");
    }

    #[test]
    fn test_stop_shares_fan_speed_category() {
        assert_eq!(Command::Stop.category(), CommandCategory::FanSpeed);
        assert_eq!(Command::FanSpeed(3).category(), CommandCategory::FanSpeed);
    }
}
