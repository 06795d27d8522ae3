//! Configuration constants for the air-conditioner VM and its environment.

// Environment model
pub const AMBIENT_TEMP: i64 = 25; // Temperature the room drifts toward (°C)
pub const AMBIENT_DRIFT_FACTOR: f64 = 0.01; // Fraction of the gap closed per step
pub const TEMP_MIN: i64 = 0;
pub const TEMP_MAX: i64 = 50;
pub const BASE_THERMAL_RATE: f64 = 0.1; // °C per step for COOL/HEAT at fan OFF
pub const FAN_RATE_BONUS: f64 = 0.5; // Multiplier added per fan level
pub const DRY_HUMIDITY_FLOOR: i64 = 40; // DRY mode stops dehumidifying at or below this
pub const DRY_COOLING_RATE: f64 = -0.05;
pub const SECONDS_PER_DAY: i64 = 86_400;

// Power-on sensor defaults
pub const DEFAULT_TEMP: i64 = 25;
pub const DEFAULT_HUMIDITY: i64 = 60;
pub const DEFAULT_OCCUPIED: i64 = 0;
pub const DEFAULT_TIME: i64 = 43_200; // 12:00

// Power-on device defaults
pub const DEFAULT_TARGET_TEMP: i64 = 24;

// VM configuration
pub const REGISTER_COUNT: usize = 10; // T0..T9
pub const DEFAULT_MAX_STEPS: u64 = 10_000; // Step limit used by the CLI runner
