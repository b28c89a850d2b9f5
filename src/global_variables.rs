// Emergency override
pub const EMERGENCY_DURATION_SECS: u64 = 10;

// Adaptive cycle timing bounds (seconds)
pub const MIN_CYCLE_DURATION_SECS: u32 = 60;
pub const MAX_CYCLE_DURATION_SECS: u32 = 180;
pub const CYCLE_JITTER_SECS: f64 = 20.0;

// Control center defaults
pub const ADAPTIVE_CONTROL_DEFAULT: bool = true;
pub const DEFAULT_RECENT_ACTIONS: usize = 10;
pub const DEFAULT_SIMULATED_READINGS: usize = 10;

// Action log actors
pub const ACTOR_OPERATOR: &str = "OPERATOR";
pub const ACTOR_ADAPTIVE_SYSTEM: &str = "ADAPTIVE_SYSTEM";
pub const ACTOR_EMERGENCY_SYSTEM: &str = "EMERGENCY_SYSTEM";

// Chart output file names
pub const HOURLY_CHART_FILE: &str = "hourly_traffic.png";
pub const SENSOR_CHART_FILE: &str = "vehicles_by_sensor.png";
