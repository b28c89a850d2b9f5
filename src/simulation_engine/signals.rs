use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Advisory message categories shown on roadside signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    SpeedLimit,
    LaneClosure,
    Reroute,
    Construction,
    Weather,
    EmergencyResponse,
}

impl SignalType {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalType::SpeedLimit => "SPEED_LIMIT",
            SignalType::LaneClosure => "LANE_CLOSURE",
            SignalType::Reroute => "REROUTE",
            SignalType::Construction => "CONSTRUCTION",
            SignalType::Weather => "WEATHER",
            SignalType::EmergencyResponse => "EMERGENCY_RESPONSE",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SPEED_LIMIT" => Ok(SignalType::SpeedLimit),
            "LANE_CLOSURE" => Ok(SignalType::LaneClosure),
            "REROUTE" => Ok(SignalType::Reroute),
            "CONSTRUCTION" => Ok(SignalType::Construction),
            "WEATHER" => Ok(SignalType::Weather),
            "EMERGENCY_RESPONSE" => Ok(SignalType::EmergencyResponse),
            other => Err(format!("unknown signal type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            "CRITICAL" => Ok(Priority::Critical),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// An advisory message currently posted to drivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: u32,
    pub signal_type: SignalType,
    pub message: String,
    pub priority: Priority,
    pub is_active: bool,
}

pub fn create_signals() -> Vec<Signal> {
    vec![
        Signal {
            id: 1,
            signal_type: SignalType::SpeedLimit,
            message: "Speed limit reduced to 25 mph due to construction".to_string(),
            priority: Priority::High,
            is_active: true,
        },
        Signal {
            id: 2,
            signal_type: SignalType::LaneClosure,
            message: "Right lane closed ahead - merge left".to_string(),
            priority: Priority::Medium,
            is_active: true,
        },
        Signal {
            id: 3,
            signal_type: SignalType::Reroute,
            message: "Alternative route recommended via Broadway".to_string(),
            priority: Priority::Low,
            is_active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_used_by_the_form() {
        assert_eq!("lane_closure".parse::<SignalType>(), Ok(SignalType::LaneClosure));
        assert_eq!("CRITICAL".parse::<Priority>(), Ok(Priority::Critical));
        assert!("".parse::<SignalType>().is_err());
        assert!("URGENT".parse::<Priority>().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert!(Priority::Critical > Priority::High);
    }
}
