use crate::shared_data::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The displayed state of a traffic light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LightState {
    Red,
    Yellow,
    Green,
    /// Incident indication. Reserved for display: no control action sets or clears it.
    Flashing,
}

impl LightState {
    /// States an operator may select by hand.
    pub const MANUAL: [LightState; 3] = [LightState::Red, LightState::Yellow, LightState::Green];

    pub fn is_manual(self) -> bool {
        !matches!(self, LightState::Flashing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LightState::Red => "RED",
            LightState::Yellow => "YELLOW",
            LightState::Green => "GREEN",
            LightState::Flashing => "FLASHING",
        }
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(LightState::Red),
            "YELLOW" => Ok(LightState::Yellow),
            "GREEN" => Ok(LightState::Green),
            "FLASHING" => Ok(LightState::Flashing),
            other => Err(format!("unknown light state '{}'", other)),
        }
    }
}

/// A controlled intersection light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    /// Stable identifier, e.g. `TL_001`.
    pub light_id: String,
    pub intersection_name: String,
    pub location: GeoPoint,
    pub current_state: LightState,
    /// Full signal cycle in seconds. Shown to operators; lights do not cycle on their own.
    pub cycle_duration_secs: u32,
    /// Inactive lights ignore manual state changes.
    pub is_active: bool,
}

impl TrafficLight {
    pub fn new(
        light_id: &str,
        intersection_name: &str,
        location: GeoPoint,
        current_state: LightState,
        cycle_duration_secs: u32,
        is_active: bool,
    ) -> Self {
        Self {
            light_id: light_id.to_string(),
            intersection_name: intersection_name.to_string(),
            location,
            current_state,
            cycle_duration_secs,
            is_active,
        }
    }
}

/// The session's seed list of lights.
pub fn create_traffic_lights() -> Vec<TrafficLight> {
    vec![
        TrafficLight::new(
            "TL_001",
            "Times Square",
            GeoPoint::new(40.7128, -74.0060),
            LightState::Green,
            120,
            true,
        ),
        TrafficLight::new(
            "TL_002",
            "Central Park South",
            GeoPoint::new(40.7589, -73.9851),
            LightState::Red,
            90,
            true,
        ),
        TrafficLight::new(
            "TL_003",
            "Herald Square",
            GeoPoint::new(40.7505, -73.9934),
            LightState::Green,
            110,
            true,
        ),
        TrafficLight::new(
            "TL_004",
            "Queens Plaza",
            GeoPoint::new(40.7282, -73.7949),
            LightState::Yellow,
            100,
            false,
        ),
        TrafficLight::new(
            "TL_005",
            "Brooklyn Bridge",
            GeoPoint::new(40.6892, -74.0445),
            LightState::Green,
            130,
            true,
        ),
    ]
}
