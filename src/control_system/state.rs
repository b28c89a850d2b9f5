use crate::config::{ControlConfig, CycleTiming};
use crate::control_system::action_log::ActionLog;
use crate::simulation_engine::signals::{create_signals, Priority, Signal};
use crate::simulation_engine::traffic_lights::{create_traffic_lights, LightState, TrafficLight};
use rand::Rng;
use thiserror::Error;

/// Everything the control panel can mutate, owned in one place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    pub lights: Vec<TrafficLight>,
    pub signals: Vec<Signal>,
    pub emergency_mode: bool,
    pub adaptive_control: bool,
    pub cycle_timing: CycleTiming,
    pub action_log: ActionLog,
}

impl ControlState {
    /// State at session start: seed lights and signals, emergency off.
    pub fn seeded(config: &ControlConfig) -> Self {
        Self::with_registries(create_traffic_lights(), create_signals(), config)
    }

    pub fn with_registries(lights: Vec<TrafficLight>, signals: Vec<Signal>, config: &ControlConfig) -> Self {
        Self {
            lights,
            signals,
            emergency_mode: false,
            adaptive_control: config.adaptive_control,
            cycle_timing: config.cycle_timing,
            action_log: ActionLog::new(),
        }
    }

    pub fn light(&self, light_id: &str) -> Option<&TrafficLight> {
        self.lights.iter().find(|l| l.light_id == light_id)
    }

    pub fn signal(&self, id: u32) -> Option<&Signal> {
        self.signals.iter().find(|s| s.id == id)
    }
}

/// Fields of the "create signal" form, unvalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSignal {
    pub signal_type: String,
    pub message: String,
    pub priority: Priority,
}

impl NewSignal {
    pub fn new(signal_type: &str, message: &str, priority: Priority) -> Self {
        Self {
            signal_type: signal_type.to_string(),
            message: message.to_string(),
            priority,
        }
    }
}

/// A user-triggered (or timer-triggered) control action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetState { light_id: String, state: LightState },
    SetActive { light_id: String, active: bool },
    SetAdaptiveControl(bool),
    RunAdaptiveOptimization,
    TriggerEmergency,
    /// Sent by the emergency timer when the override period is over.
    EmergencyLapsed,
    CreateSignal(NewSignal),
    RemoveSignal(u32),
}

/// What an accepted action changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    LightStateChanged { light_id: String, from: LightState, to: LightState },
    LightActivationChanged { light_id: String, active: bool },
    AdaptiveControlSet(bool),
    CyclesAdjusted { lights_changed: usize },
    EmergencyStarted { lights_forced: usize },
    EmergencyCleared,
    SignalCreated(u32),
    SignalRemoved(u32),
}

/// Why an action was ignored. A rejected action never mutates state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("no traffic light with id '{0}'")]
    LightNotFound(String),
    #[error("traffic light '{0}' is inactive")]
    LightInactive(String),
    #[error("emergency mode is active")]
    EmergencyActive,
    #[error("emergency mode is already active")]
    AlreadyInEmergency,
    #[error("emergency mode is not active")]
    NotInEmergency,
    #[error("{0} cannot be set manually")]
    ReservedState(LightState),
    #[error("adaptive control is disabled")]
    AdaptiveDisabled,
    #[error("signal type is required")]
    EmptySignalType,
    #[error("{0}")]
    UnknownSignalType(String),
    #[error("signal message is required")]
    EmptyMessage,
    #[error("no signal with id {0}")]
    SignalNotFound(u32),
}

pub type Outcome = Result<Applied, Rejection>;

/// Applies one action and returns the next state with its outcome.
pub fn reduce<R: Rng>(mut state: ControlState, action: &Action, rng: &mut R) -> (ControlState, Outcome) {
    let outcome = match action {
        Action::SetState { light_id, state: new_state } => state.set_light_state(light_id, *new_state),
        Action::SetActive { light_id, active } => state.set_light_active(light_id, *active),
        Action::SetAdaptiveControl(enabled) => {
            state.adaptive_control = *enabled;
            Ok(Applied::AdaptiveControlSet(*enabled))
        }
        Action::RunAdaptiveOptimization => state.run_adaptive_optimization(rng),
        Action::TriggerEmergency => state.trigger_emergency_response(),
        Action::EmergencyLapsed => state.clear_emergency(),
        Action::CreateSignal(new_signal) => state.create_signal(new_signal).map(Applied::SignalCreated),
        Action::RemoveSignal(id) => state.remove_signal(*id).map(|s| Applied::SignalRemoved(s.id)),
    };

    match &outcome {
        Ok(applied) => log::info!("[ControlCenter] {:?} -> {:?}", action, applied),
        Err(rejection) => log::warn!("[ControlCenter] {:?} ignored: {}", action, rejection),
    }
    (state, outcome)
}
