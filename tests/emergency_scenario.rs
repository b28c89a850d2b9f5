use std::time::Duration;

use traffic_control_center::config::ControlConfig;
use traffic_control_center::control_system::{Action, Applied, ControlCenter, ControlState, Rejection};
use traffic_control_center::shared_data::{ActionType, GeoPoint};
use traffic_control_center::simulation_engine::{LightState, TrafficLight};

fn two_light_center() -> ControlCenter {
    let config = ControlConfig {
        rng_seed: Some(11),
        ..ControlConfig::default()
    };
    let lights = vec![
        TrafficLight::new("TL_001", "Times Square", GeoPoint::new(40.7128, -74.0060), LightState::Green, 120, true),
        TrafficLight::new("TL_002", "Central Park South", GeoPoint::new(40.7589, -73.9851), LightState::Red, 90, true),
    ];
    ControlCenter::with_state(ControlState::with_registries(lights, Vec::new(), &config), &config).unwrap()
}

fn state_of(center: &ControlCenter, light_id: &str) -> LightState {
    center.with_state_ref(|s| s.light(light_id).map(|l| l.current_state)).unwrap()
}

fn set_red(light_id: &str) -> Action {
    Action::SetState {
        light_id: light_id.to_string(),
        state: LightState::Red,
    }
}

#[tokio::test(start_paused = true)]
async fn emergency_blocks_changes_then_lapses_after_ten_seconds() {
    let center = two_light_center();

    assert_eq!(
        center.dispatch(Action::TriggerEmergency),
        Ok(Applied::EmergencyStarted { lights_forced: 2 })
    );
    assert!(center.is_emergency_active());
    assert_eq!(state_of(&center, "TL_001"), LightState::Green);
    assert_eq!(state_of(&center, "TL_002"), LightState::Green);

    assert_eq!(center.dispatch(set_red("TL_001")), Err(Rejection::EmergencyActive));
    assert_eq!(state_of(&center, "TL_001"), LightState::Green);
    assert_eq!(
        center.dispatch(Action::TriggerEmergency),
        Err(Rejection::AlreadyInEmergency)
    );

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert!(center.is_emergency_active());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!center.is_emergency_active());

    assert!(center.dispatch(set_red("TL_001")).is_ok());
    assert_eq!(state_of(&center, "TL_001"), LightState::Red);
    assert_eq!(state_of(&center, "TL_002"), LightState::Green);
}

#[tokio::test(start_paused = true)]
async fn emergency_can_be_triggered_again_after_lapse() {
    let center = two_light_center();
    center.dispatch(Action::TriggerEmergency).unwrap();
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(!center.is_emergency_active());

    center.dispatch(set_red("TL_002")).unwrap();
    center.dispatch(Action::TriggerEmergency).unwrap();
    assert_eq!(state_of(&center, "TL_002"), LightState::Green);
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(!center.is_emergency_active());

    let cleared = center.with_state_ref(|s| {
        s.action_log
            .records()
            .iter()
            .filter(|r| r.action_type == ActionType::EmergencyCleared)
            .count()
    });
    assert_eq!(cleared, 2);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_lapse() {
    let center = two_light_center();
    center.dispatch(Action::TriggerEmergency).unwrap();
    center.shutdown();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(center.is_emergency_active());
}

#[tokio::test(start_paused = true)]
async fn configured_duration_is_honoured() {
    let config = ControlConfig {
        emergency_duration_secs: 3,
        rng_seed: Some(5),
        ..ControlConfig::default()
    };
    let center = ControlCenter::new(&config).unwrap();
    center.dispatch(Action::TriggerEmergency).unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(center.is_emergency_active());
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!center.is_emergency_active());
}

#[test]
fn trigger_outside_runtime_keeps_emergency_on() {
    let center = two_light_center();
    assert!(center.dispatch(Action::TriggerEmergency).is_ok());
    assert!(center.is_emergency_active());
    assert_eq!(center.dispatch(Action::EmergencyLapsed), Ok(Applied::EmergencyCleared));
    assert!(!center.is_emergency_active());
}
