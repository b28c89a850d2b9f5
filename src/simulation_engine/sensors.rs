use crate::flow_analyzer::traffic_analyzer::classify_congestion;
use crate::shared_data::GeoPoint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed roadside sensor sites: id, latitude, longitude.
pub const SENSOR_SITES: [(&str, f64, f64); 5] = [
    ("SENSOR_001", 40.7128, -74.0060),
    ("SENSOR_002", 40.7589, -73.9851),
    ("SENSOR_003", 40.7505, -73.9934),
    ("SENSOR_004", 40.7282, -73.7949),
    ("SENSOR_005", 40.6892, -74.0445),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub const ALL: [CongestionLevel; 3] = [
        CongestionLevel::Low,
        CongestionLevel::Medium,
        CongestionLevel::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CongestionLevel::Low => "LOW",
            CongestionLevel::Medium => "MEDIUM",
            CongestionLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest reading from a roadside sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: String,
    pub location: GeoPoint,
    pub vehicle_count: u32,
    /// Average speed in mph.
    pub average_speed: f64,
    pub congestion_level: CongestionLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: u32,
    pub incident_type: String,
    pub location: GeoPoint,
    pub severity: CongestionLevel,
    pub description: String,
}

/// One point of the hourly traffic series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub hour: String,
    pub vehicles: u32,
    pub speed: f64,
}

/// Static metrics shown on the map and analytics views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsFixtures {
    pub sensors: Vec<SensorReading>,
    pub incidents: Vec<Incident>,
    pub hourly: Vec<HourlySample>,
}

impl MetricsFixtures {
    pub fn load() -> Self {
        Self {
            sensors: create_sensor_readings(),
            incidents: create_incidents(),
            hourly: create_hourly_samples(),
        }
    }

    /// Replaces each sensor's reading with the newest one for the same id.
    /// Readings for unknown sensors are appended.
    pub fn record_readings(&mut self, readings: &[SensorReading]) {
        for reading in readings {
            match self.sensors.iter_mut().find(|s| s.sensor_id == reading.sensor_id) {
                Some(existing) => *existing = reading.clone(),
                None => self.sensors.push(reading.clone()),
            }
        }
    }
}

/// Random readings at the known sensor sites, labelled with [`classify_congestion`].
pub fn simulate_readings<R: Rng>(count: usize, rng: &mut R) -> Vec<SensorReading> {
    (0..count)
        .map(|_| {
            let (sensor_id, lat, lng) = SENSOR_SITES[rng.random_range(0..SENSOR_SITES.len())];
            let vehicle_count = rng.random_range(10..=100);
            let average_speed = rng.random_range(20.0..80.0);
            reading(
                sensor_id,
                lat,
                lng,
                vehicle_count,
                average_speed,
                classify_congestion(vehicle_count, average_speed),
            )
        })
        .collect()
}

fn reading(
    sensor_id: &str,
    lat: f64,
    lng: f64,
    vehicle_count: u32,
    average_speed: f64,
    congestion_level: CongestionLevel,
) -> SensorReading {
    SensorReading {
        sensor_id: sensor_id.to_string(),
        location: GeoPoint::new(lat, lng),
        vehicle_count,
        average_speed,
        congestion_level,
    }
}

pub fn create_sensor_readings() -> Vec<SensorReading> {
    vec![
        reading("SENSOR_001", 40.7128, -74.0060, 45, 35.0, CongestionLevel::Medium),
        reading("SENSOR_002", 40.7589, -73.9851, 78, 22.0, CongestionLevel::High),
        reading("SENSOR_003", 40.7505, -73.9934, 32, 55.0, CongestionLevel::Low),
        reading("SENSOR_004", 40.7282, -73.7949, 56, 28.0, CongestionLevel::High),
        reading("SENSOR_005", 40.6892, -74.0445, 23, 62.0, CongestionLevel::Low),
    ]
}

pub fn create_incidents() -> Vec<Incident> {
    vec![
        Incident {
            id: 1,
            incident_type: "ACCIDENT".to_string(),
            location: GeoPoint::new(40.7589, -73.9851),
            severity: CongestionLevel::High,
            description: "Multi-vehicle accident blocking two lanes".to_string(),
        },
        Incident {
            id: 2,
            incident_type: "CONSTRUCTION".to_string(),
            location: GeoPoint::new(40.7282, -73.7949),
            severity: CongestionLevel::Medium,
            description: "Road construction reducing traffic to one lane".to_string(),
        },
    ]
}

pub fn create_hourly_samples() -> Vec<HourlySample> {
    [
        ("00:00", 15, 65.0),
        ("06:00", 45, 45.0),
        ("08:00", 85, 25.0),
        ("12:00", 65, 35.0),
        ("17:00", 95, 20.0),
        ("20:00", 55, 40.0),
        ("23:00", 25, 60.0),
    ]
    .into_iter()
    .map(|(hour, vehicles, speed)| HourlySample {
        hour: hour.to_string(),
        vehicles,
        speed,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn simulated_readings_are_labelled_by_the_classifier() {
        let mut rng = SmallRng::seed_from_u64(42);
        let readings = simulate_readings(50, &mut rng);
        assert_eq!(readings.len(), 50);
        for r in &readings {
            assert!(SENSOR_SITES.iter().any(|(id, _, _)| *id == r.sensor_id));
            assert!((10..=100).contains(&r.vehicle_count));
            assert!(r.average_speed >= 20.0 && r.average_speed < 80.0);
            assert_eq!(r.congestion_level, classify_congestion(r.vehicle_count, r.average_speed));
        }
    }

    #[test]
    fn newest_reading_replaces_the_sensor_entry() {
        let mut fixtures = MetricsFixtures::load();
        let update = reading("SENSOR_003", 40.7505, -73.9934, 88, 21.0, CongestionLevel::High);
        let extra = reading("SENSOR_099", 40.0, -74.0, 5, 70.0, CongestionLevel::Low);
        fixtures.record_readings(&[update.clone(), extra]);

        assert_eq!(fixtures.sensors.len(), 6);
        assert_eq!(fixtures.sensors[2], update);
        assert_eq!(fixtures.sensors[5].sensor_id, "SENSOR_099");
    }
}
