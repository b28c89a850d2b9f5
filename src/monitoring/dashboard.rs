use crate::control_system::state::ControlState;
use crate::flow_analyzer::traffic_analyzer::{
    analyze_traffic, congestion_distribution, peak_hour, summarize, summarize_lights,
    vehicles_by_sensor,
};
use crate::shared_data::GeoPoint;
use crate::simulation_engine::sensors::MetricsFixtures;
use std::fmt::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Analytics,
    Control,
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" | "map" => Ok(Tab::Overview),
            "analytics" | "stats" => Ok(Tab::Analytics),
            "control" => Ok(Tab::Control),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

/// A pin on the map view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPin {
    pub id: String,
    pub label: String,
    pub location: GeoPoint,
}

/// Ephemeral UI selection. Not part of the control state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub active_tab: Tab,
    pub selected_location: Option<String>,
}

impl DashboardView {
    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Selects a sensor or light pin by id. Unknown ids clear nothing and return false.
    pub fn select_location(&mut self, id: &str, pins: &[MapPin]) -> bool {
        if pins.iter().any(|p| p.id == id) {
            self.selected_location = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_location = None;
    }

    pub fn render(&self, state: &ControlState, fixtures: &MetricsFixtures) -> String {
        match self.active_tab {
            Tab::Overview => render_overview(state, fixtures, self.selected_location.as_deref()),
            Tab::Analytics => render_analytics(state, fixtures),
            Tab::Control => render_control(state),
        }
    }
}

pub fn map_pins(state: &ControlState, fixtures: &MetricsFixtures) -> Vec<MapPin> {
    let sensors = fixtures.sensors.iter().map(|s| MapPin {
        id: s.sensor_id.clone(),
        label: format!("{} ({} congestion)", s.sensor_id, s.congestion_level),
        location: s.location,
    });
    let lights = state.lights.iter().map(|l| MapPin {
        id: l.light_id.clone(),
        label: format!("{} {} [{}]", l.light_id, l.intersection_name, l.current_state),
        location: l.location,
    });
    sensors.chain(lights).collect()
}

fn render_selection(out: &mut String, id: &str, state: &ControlState, fixtures: &MetricsFixtures) {
    if let Some(sensor) = fixtures.sensors.iter().find(|s| s.sensor_id == id) {
        let _ = writeln!(out, "Selected sensor {} at {}", sensor.sensor_id, sensor.location);
        let _ = writeln!(out, "  Vehicles: {}", sensor.vehicle_count);
        let _ = writeln!(out, "  Average speed: {:.0} mph", sensor.average_speed);
        let _ = writeln!(out, "  Congestion: {}", sensor.congestion_level);
    } else if let Some(light) = state.light(id) {
        let _ = writeln!(out, "Selected light {} - {}", light.light_id, light.intersection_name);
        let _ = writeln!(out, "  State: {}", light.current_state);
        let _ = writeln!(out, "  Cycle: {}s", light.cycle_duration_secs);
        let _ = writeln!(out, "  Active: {}", if light.is_active { "yes" } else { "no" });
    }
}

pub fn render_overview(state: &ControlState, fixtures: &MetricsFixtures, selected: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Traffic Map ===");
    for pin in map_pins(state, fixtures) {
        let marker = if selected == Some(pin.id.as_str()) { '*' } else { ' ' };
        let _ = writeln!(out, "{} {} {}", marker, pin.location, pin.label);
    }
    if !fixtures.incidents.is_empty() {
        let _ = writeln!(out, "Incidents:");
        for incident in &fixtures.incidents {
            let _ = writeln!(
                out,
                "  [{}] {} at {}: {}",
                incident.severity, incident.incident_type, incident.location, incident.description
            );
        }
    }
    if let Some(id) = selected {
        render_selection(&mut out, id, state, fixtures);
    }
    out
}

pub fn render_analytics(state: &ControlState, fixtures: &MetricsFixtures) -> String {
    let mut out = String::new();
    let stats = summarize(&fixtures.sensors, &fixtures.incidents);
    let _ = writeln!(out, "=== Traffic Analytics ===");
    let _ = writeln!(out, "Total vehicles:   {}", stats.total_vehicles);
    let _ = writeln!(out, "Average speed:    {:.1} mph", stats.average_speed);
    let _ = writeln!(out, "Active incidents: {}", stats.active_incidents);
    let _ = writeln!(out, "Congestion areas: {}", stats.congestion_areas);

    let _ = writeln!(out, "Vehicle count by sensor:");
    for (sensor_id, vehicles) in vehicles_by_sensor(&fixtures.sensors) {
        let _ = writeln!(out, "  {:<12} {:>4} {}", sensor_id, vehicles, "#".repeat((vehicles / 5) as usize));
    }

    let _ = writeln!(out, "Congestion level distribution:");
    for share in congestion_distribution(&fixtures.sensors) {
        let _ = writeln!(out, "  {:<6} {} ({:.0}%)", share.level, share.count, share.percent);
    }

    let _ = writeln!(out, "Hourly traffic:");
    for sample in &fixtures.hourly {
        let _ = writeln!(out, "  {}  {:>4} vehicles  {:>3.0} mph", sample.hour, sample.vehicles, sample.speed);
    }
    if let Some(peak) = peak_hour(&fixtures.hourly) {
        let _ = writeln!(out, "Peak hour: {} ({} vehicles)", peak.hour, peak.vehicles);
    }

    let alerts = analyze_traffic(&fixtures.sensors);
    if !alerts.is_empty() {
        let _ = writeln!(out, "Congestion alerts:");
        for alert in alerts {
            let _ = writeln!(out, "  {} -> {}", alert.message, alert.recommended_action);
        }
    }

    let lights = summarize_lights(&state.lights);
    let _ = writeln!(
        out,
        "Lights: {} red, {} yellow, {} green, {} flashing; {} active; mean cycle {:.1}s",
        lights.red, lights.yellow, lights.green, lights.flashing, lights.active, lights.average_cycle_secs
    );
    out
}

pub fn render_control(state: &ControlState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Traffic Control Center ===");
    let _ = writeln!(
        out,
        "Adaptive control: {}",
        if state.adaptive_control { "ON" } else { "OFF" }
    );
    if state.emergency_mode {
        let _ = writeln!(out, "EMERGENCY MODE ACTIVE");
    }

    let _ = writeln!(out, "Traffic lights:");
    for light in &state.lights {
        let _ = writeln!(
            out,
            "  {} {:<20} {:<8} cycle {:>3}s {}",
            light.light_id,
            light.intersection_name,
            light.current_state,
            light.cycle_duration_secs,
            if light.is_active { "active" } else { "inactive" }
        );
    }

    let _ = writeln!(out, "Active signals:");
    if state.signals.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for signal in &state.signals {
        let _ = writeln!(
            out,
            "  #{} [{}] [{}] {}",
            signal.id, signal.signal_type, signal.priority, signal.message
        );
    }
    out
}
