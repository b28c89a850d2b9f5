use crate::control_system::state::{Applied, ControlState, Outcome, Rejection};
use crate::global_variables::{ACTOR_ADAPTIVE_SYSTEM, ACTOR_EMERGENCY_SYSTEM, ACTOR_OPERATOR};
use crate::shared_data::ActionType;
use crate::simulation_engine::traffic_lights::{LightState, TrafficLight};
use rand::Rng;
use serde_json::json;

impl ControlState {
    fn light_mut(&mut self, light_id: &str) -> Result<&mut TrafficLight, Rejection> {
        self.lights
            .iter_mut()
            .find(|l| l.light_id == light_id)
            .ok_or_else(|| Rejection::LightNotFound(light_id.to_string()))
    }

    /// Manual colour override for one light.
    pub fn set_light_state(&mut self, light_id: &str, new_state: LightState) -> Outcome {
        if !new_state.is_manual() {
            return Err(Rejection::ReservedState(new_state));
        }
        let emergency = self.emergency_mode;
        let light = self.light_mut(light_id)?;
        if emergency {
            return Err(Rejection::EmergencyActive);
        }
        if !light.is_active {
            return Err(Rejection::LightInactive(light_id.to_string()));
        }

        let old_state = light.current_state;
        light.current_state = new_state;
        self.action_log.record(
            ActionType::LightChange,
            light_id,
            json!({ "old_state": old_state, "new_state": new_state, "reason": "Manual update" }),
            ACTOR_OPERATOR,
        );
        Ok(Applied::LightStateChanged {
            light_id: light_id.to_string(),
            from: old_state,
            to: new_state,
        })
    }

    pub fn set_light_active(&mut self, light_id: &str, active: bool) -> Outcome {
        let emergency = self.emergency_mode;
        let light = self.light_mut(light_id)?;
        if emergency {
            return Err(Rejection::EmergencyActive);
        }

        let was_active = light.is_active;
        light.is_active = active;
        self.action_log.record(
            ActionType::LightActivation,
            light_id,
            json!({ "was_active": was_active, "is_active": active }),
            ACTOR_OPERATOR,
        );
        Ok(Applied::LightActivationChanged {
            light_id: light_id.to_string(),
            active,
        })
    }

    /// Perturbs every light's cycle by a uniform jitter and clamps it to the configured bounds.
    pub fn run_adaptive_optimization<R: Rng>(&mut self, rng: &mut R) -> Outcome {
        if !self.adaptive_control {
            return Err(Rejection::AdaptiveDisabled);
        }

        let timing = self.cycle_timing;
        let mut lights_changed = 0;
        for light in self.lights.iter_mut() {
            let jitter = rng.random_range(-timing.jitter_secs..=timing.jitter_secs);
            let adjusted = (light.cycle_duration_secs as f64 + jitter)
                .round()
                .clamp(timing.min_secs as f64, timing.max_secs as f64) as u32;
            if adjusted == light.cycle_duration_secs {
                continue;
            }
            log::debug!(
                "Adjusting cycle for {} from {} to {} seconds",
                light.light_id,
                light.cycle_duration_secs,
                adjusted
            );
            self.action_log.record(
                ActionType::LightTimingUpdate,
                &light.light_id,
                json!({
                    "old_cycle_duration": light.cycle_duration_secs,
                    "new_cycle_duration": adjusted,
                }),
                ACTOR_ADAPTIVE_SYSTEM,
            );
            light.cycle_duration_secs = adjusted;
            lights_changed += 1;
        }
        Ok(Applied::CyclesAdjusted { lights_changed })
    }

    /// Forces every light to green and blocks manual control until cleared.
    pub fn trigger_emergency_response(&mut self) -> Outcome {
        if self.emergency_mode {
            return Err(Rejection::AlreadyInEmergency);
        }

        self.emergency_mode = true;
        for light in self.lights.iter_mut() {
            self.action_log.record(
                ActionType::EmergencyOverride,
                &light.light_id,
                json!({ "old_state": light.current_state, "new_state": LightState::Green }),
                ACTOR_EMERGENCY_SYSTEM,
            );
            light.current_state = LightState::Green;
        }
        Ok(Applied::EmergencyStarted {
            lights_forced: self.lights.len(),
        })
    }

    /// Ends the override. Lights keep the green they were forced to.
    pub fn clear_emergency(&mut self) -> Outcome {
        if !self.emergency_mode {
            return Err(Rejection::NotInEmergency);
        }
        self.emergency_mode = false;
        self.action_log.record(
            ActionType::EmergencyCleared,
            "ALL",
            json!({ "emergency_mode": false }),
            ACTOR_EMERGENCY_SYSTEM,
        );
        Ok(Applied::EmergencyCleared)
    }
}
