// src/shared_data.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A map position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

/// Kind of mutation recorded in the control action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    LightChange,
    LightActivation,
    LightTimingUpdate,
    EmergencyOverride,
    EmergencyCleared,
    SignalCreated,
    SignalRemoved,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ActionType::LightChange => "LIGHT_CHANGE",
            ActionType::LightActivation => "LIGHT_ACTIVATION",
            ActionType::LightTimingUpdate => "LIGHT_TIMING_UPDATE",
            ActionType::EmergencyOverride => "EMERGENCY_OVERRIDE",
            ActionType::EmergencyCleared => "EMERGENCY_CLEARED",
            ActionType::SignalCreated => "SIGNAL_CREATED",
            ActionType::SignalRemoved => "SIGNAL_REMOVED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Executed,
}

/// One executed control action, as written to the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlActionRecord {
    pub id: u64,
    pub timestamp: u64,
    pub action_type: ActionType,
    pub target_id: String,
    /// JSON text with the old/new values of the mutation.
    pub details: String,
    pub status: ActionStatus,
    pub created_by: String,
}

pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
