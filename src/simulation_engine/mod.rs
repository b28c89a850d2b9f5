// simulation_engine/mod.rs
pub mod sensors;
pub mod signals;
pub mod traffic_lights;

pub use sensors::{
    simulate_readings, CongestionLevel, HourlySample, Incident, MetricsFixtures, SensorReading,
};
pub use signals::{Priority, Signal, SignalType};
pub use traffic_lights::{LightState, TrafficLight};
