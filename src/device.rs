//! Device-state block of the air-conditioning unit.
//!
//! Only the device-control instructions mutate this block. The thermal model
//! reads it once per executed step.

use crate::config;
use crate::vm::error::ExecError;
use std::fmt;
use std::str::FromStr;

/// Operating mode. `Auto` is accepted but has no thermal effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Cool,
    Heat,
    Dry,
    Fan,
    Auto,
}

impl Mode {
    /// Numeric code exposed in snapshots (COOL=0 .. AUTO=4)
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Cool => "COOL",
            Mode::Heat => "HEAT",
            Mode::Dry => "DRY",
            Mode::Fan => "FAN",
            Mode::Auto => "AUTO",
        }
    }
}

impl FromStr for Mode {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COOL" => Ok(Mode::Cool),
            "HEAT" => Ok(Mode::Heat),
            "DRY" => Ok(Mode::Dry),
            "FAN" => Ok(Mode::Fan),
            "AUTO" => Ok(Mode::Auto),
            other => Err(ExecError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum FanSpeed {
    #[default]
    Off,
    Low,
    Mid,
    High,
}

impl FanSpeed {
    /// Numeric level (OFF=0 .. HIGH=3), also the thermal rate multiplier input
    pub fn level(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            FanSpeed::Off => "OFF",
            FanSpeed::Low => "LOW",
            FanSpeed::Mid => "MID",
            FanSpeed::High => "HIGH",
        }
    }
}

impl FromStr for FanSpeed {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OFF" => Ok(FanSpeed::Off),
            "LOW" => Ok(FanSpeed::Low),
            "MID" => Ok(FanSpeed::Mid),
            "HIGH" => Ok(FanSpeed::High),
            other => Err(ExecError::UnknownFanLevel(other.to_string())),
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// ON/OFF operand of `POWER` and `SET_SWING`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Switch {
    #[default]
    Off,
    On,
}

impl Switch {
    /// `ON` in any case switches on; every other word switches off.
    pub fn from_operand(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ON") {
            Switch::On
        } else {
            Switch::Off
        }
    }

    pub fn is_on(self) -> bool {
        self == Switch::On
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_on() { "ON" } else { "OFF" })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub power: Switch,
    pub mode: Mode,
    pub target_temp: i64,
    pub fan_speed: FanSpeed,
    pub swing: Switch,
}

impl Default for DeviceState {
    fn default() -> Self {
        DeviceState {
            power: Switch::Off,
            mode: Mode::Cool,
            target_temp: config::DEFAULT_TARGET_TEMP,
            fan_speed: FanSpeed::Off,
            swing: Switch::Off,
        }
    }
}

impl DeviceState {
    /// Device keys and their numeric values, in the fixed key order
    pub fn entries(&self) -> [(&'static str, i64); 5] {
        [
            ("POWER_STATE", self.power.code()),
            ("MODE", self.mode.code()),
            ("TARGET_TEMP", self.target_temp),
            ("FAN_SPEED", self.fan_speed.level()),
            ("SWING_STATE", self.swing.code()),
        ]
    }
}
