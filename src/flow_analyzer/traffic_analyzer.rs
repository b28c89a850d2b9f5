// traffic_analyzer.rs

use serde::{Deserialize, Serialize};

use crate::simulation_engine::sensors::{CongestionLevel, HourlySample, Incident, SensorReading};
use crate::simulation_engine::traffic_lights::{LightState, TrafficLight};

/// Headline numbers shown on the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_vehicles: u32,
    /// Mean sensor speed in mph, one decimal.
    pub average_speed: f64,
    pub active_incidents: usize,
    /// Sensors currently reporting HIGH congestion.
    pub congestion_areas: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionShare {
    pub level: CongestionLevel,
    pub count: usize,
    /// Share of all sensors, 0.0 - 100.0.
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightSummary {
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
    pub flashing: usize,
    pub active: usize,
    pub average_cycle_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionAlert {
    pub sensor_id: String,
    pub message: String,
    pub recommended_action: String,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn summarize(sensors: &[SensorReading], incidents: &[Incident]) -> SummaryStats {
    let total_vehicles = sensors.iter().map(|s| s.vehicle_count).sum();
    let average_speed = if sensors.is_empty() {
        0.0
    } else {
        let total: f64 = sensors.iter().map(|s| s.average_speed).sum();
        round_one_decimal(total / sensors.len() as f64)
    };
    let congestion_areas = sensors
        .iter()
        .filter(|s| s.congestion_level == CongestionLevel::High)
        .count();

    SummaryStats {
        total_vehicles,
        average_speed,
        active_incidents: incidents.len(),
        congestion_areas,
    }
}

/// Sensor count per congestion level, always in LOW, MEDIUM, HIGH order.
pub fn congestion_distribution(sensors: &[SensorReading]) -> Vec<CongestionShare> {
    let total = sensors.len();
    CongestionLevel::ALL
        .iter()
        .map(|&level| {
            let count = sensors.iter().filter(|s| s.congestion_level == level).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            CongestionShare { level, count, percent }
        })
        .collect()
}

pub fn vehicles_by_sensor(sensors: &[SensorReading]) -> Vec<(String, u32)> {
    sensors
        .iter()
        .map(|s| (s.sensor_id.clone(), s.vehicle_count))
        .collect()
}

/// The busiest hour of the series, first one wins on ties.
pub fn peak_hour(samples: &[HourlySample]) -> Option<&HourlySample> {
    samples
        .iter()
        .reduce(|best, s| if s.vehicles > best.vehicles { s } else { best })
}

pub fn summarize_lights(lights: &[TrafficLight]) -> LightSummary {
    let mut summary = LightSummary::default();
    for light in lights {
        match light.current_state {
            LightState::Red => summary.red += 1,
            LightState::Yellow => summary.yellow += 1,
            LightState::Green => summary.green += 1,
            LightState::Flashing => summary.flashing += 1,
        }
        if light.is_active {
            summary.active += 1;
        }
    }
    if !lights.is_empty() {
        let total: u32 = lights.iter().map(|l| l.cycle_duration_secs).sum();
        summary.average_cycle_secs = round_one_decimal(total as f64 / lights.len() as f64);
    }
    summary
}

/// Congestion level for a fresh reading: HIGH when busy and slow, MEDIUM when
/// either busy or slow, LOW otherwise.
pub fn classify_congestion(vehicle_count: u32, average_speed: f64) -> CongestionLevel {
    if vehicle_count > 50 && average_speed < 30.0 {
        CongestionLevel::High
    } else if vehicle_count > 30 || average_speed < 50.0 {
        CongestionLevel::Medium
    } else {
        CongestionLevel::Low
    }
}

pub fn analyze_traffic(sensors: &[SensorReading]) -> Vec<CongestionAlert> {
    sensors
        .iter()
        .filter(|s| s.congestion_level == CongestionLevel::High)
        .map(|s| CongestionAlert {
            sensor_id: s.sensor_id.clone(),
            message: format!(
                "Sensor {} is heavily congested ({} vehicles at {:.0} mph)",
                s.sensor_id, s.vehicle_count, s.average_speed
            ),
            recommended_action: String::from("Run adaptive optimization or post a reroute signal."),
        })
        .collect()
}
