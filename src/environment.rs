//! Simulated room: sensor readings and the per-step thermal/humidity model.

use crate::config::{
    AMBIENT_DRIFT_FACTOR, AMBIENT_TEMP, BASE_THERMAL_RATE, DEFAULT_HUMIDITY, DEFAULT_OCCUPIED,
    DEFAULT_TEMP, DEFAULT_TIME, DRY_COOLING_RATE, DRY_HUMIDITY_FLOOR, FAN_RATE_BONUS,
    SECONDS_PER_DAY, TEMP_MAX, TEMP_MIN,
};
use crate::device::{DeviceState, Mode};
use crate::vm::error::ExecError;
use std::fmt;
use std::str::FromStr;

/// The closed set of sensor keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Temp,
    Humidity,
    Occupied,
    Time,
}

impl Sensor {
    pub const ALL: [Sensor; 4] = [Sensor::Temp, Sensor::Humidity, Sensor::Occupied, Sensor::Time];

    pub fn name(self) -> &'static str {
        match self {
            Sensor::Temp => "TEMP",
            Sensor::Humidity => "HUMIDITY",
            Sensor::Occupied => "OCCUPIED",
            Sensor::Time => "TIME",
        }
    }
}

impl FromStr for Sensor {
    type Err = ExecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TEMP" => Ok(Sensor::Temp),
            "HUMIDITY" => Ok(Sensor::Humidity),
            "OCCUPIED" => Ok(Sensor::Occupied),
            "TIME" => Ok(Sensor::Time),
            other => Err(ExecError::UnknownSensor(other.to_string())),
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current sensor readings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sensors {
    pub temp: i64,
    pub humidity: i64,
    pub occupied: i64,
    /// Seconds since midnight
    pub time: i64,
}

impl Default for Sensors {
    fn default() -> Self {
        Sensors {
            temp: DEFAULT_TEMP,
            humidity: DEFAULT_HUMIDITY,
            occupied: DEFAULT_OCCUPIED,
            time: DEFAULT_TIME,
        }
    }
}

impl Sensors {
    pub fn get(&self, sensor: Sensor) -> i64 {
        match sensor {
            Sensor::Temp => self.temp,
            Sensor::Humidity => self.humidity,
            Sensor::Occupied => self.occupied,
            Sensor::Time => self.time,
        }
    }

    pub fn set(&mut self, sensor: Sensor, value: i64) {
        match sensor {
            Sensor::Temp => self.temp = value,
            Sensor::Humidity => self.humidity = value,
            Sensor::Occupied => self.occupied = value,
            Sensor::Time => self.time = value,
        }
    }

    /// Move the clock forward, wrapping past midnight
    pub fn advance_time(&mut self, seconds: i64) {
        let now = self.time.rem_euclid(SECONDS_PER_DAY);
        self.time = (now + seconds.rem_euclid(SECONDS_PER_DAY)).rem_euclid(SECONDS_PER_DAY);
    }

    /// Sensor keys and values, in the fixed key order
    pub fn entries(&self) -> [(&'static str, i64); 4] {
        Sensor::ALL.map(|s| (s.name(), self.get(s)))
    }
}

/// Distance from `temp` to ambient. Computed in floating point so extreme
/// manual sensor values cannot overflow.
fn ambient_gap(temp: i64) -> f64 {
    AMBIENT_TEMP as f64 - temp as f64
}

/// Temperature change rate (°C per step) for a powered unit, before truncation.
///
/// DRY mode also consumes one point of humidity while above the floor.
pub fn powered_rate(sensors: &mut Sensors, device: &DeviceState) -> f64 {
    let fan_factor = 1.0 + FAN_RATE_BONUS * device.fan_speed.level() as f64;
    match device.mode {
        Mode::Cool if sensors.temp > device.target_temp => -BASE_THERMAL_RATE * fan_factor,
        Mode::Heat if sensors.temp < device.target_temp => BASE_THERMAL_RATE * fan_factor,
        Mode::Cool | Mode::Heat => 0.0,
        Mode::Dry if sensors.humidity > DRY_HUMIDITY_FLOOR => {
            sensors.humidity = (sensors.humidity - 1).max(0);
            DRY_COOLING_RATE
        }
        Mode::Dry => 0.0,
        Mode::Fan => ambient_gap(sensors.temp) * AMBIENT_DRIFT_FACTOR,
        Mode::Auto => 0.0,
    }
}

/// Apply one step of the thermal model to `sensors`.
///
/// With power off the drift is added before truncating; with power on the
/// rate itself is truncated. Both paths clamp to [TEMP_MIN, TEMP_MAX].
pub fn update(sensors: &mut Sensors, device: &DeviceState) {
    let before = sensors.temp;
    let next = if device.power.is_on() {
        let rate = powered_rate(sensors, device);
        sensors.temp.saturating_add(rate.trunc() as i64)
    } else {
        let drift = ambient_gap(sensors.temp) * AMBIENT_DRIFT_FACTOR;
        (sensors.temp as f64 + drift).trunc() as i64
    };
    sensors.temp = next.clamp(TEMP_MIN, TEMP_MAX);

    if sensors.temp != before {
        crate::debug_env!(
            "TEMP {} -> {} (power {}, mode {})",
            before,
            sensors.temp,
            device.power,
            device.mode
        );
    }
}
