use crate::control_system::state::{ControlState, NewSignal, Rejection};
use crate::global_variables::ACTOR_OPERATOR;
use crate::shared_data::ActionType;
use crate::simulation_engine::signals::{Signal, SignalType};
use serde_json::json;

impl ControlState {
    /// Next free signal id: one past the largest id in use.
    pub fn next_signal_id(&self) -> u32 {
        self.signals.iter().map(|s| s.id).max().unwrap_or(0) + 1
    }

    /// Posts a new active signal and returns its id.
    pub fn create_signal(&mut self, new_signal: &NewSignal) -> Result<u32, Rejection> {
        if new_signal.signal_type.trim().is_empty() {
            return Err(Rejection::EmptySignalType);
        }
        let message = new_signal.message.trim();
        if message.is_empty() {
            return Err(Rejection::EmptyMessage);
        }
        let signal_type: SignalType = new_signal
            .signal_type
            .parse()
            .map_err(Rejection::UnknownSignalType)?;

        let id = self.next_signal_id();
        self.signals.push(Signal {
            id,
            signal_type,
            message: message.to_string(),
            priority: new_signal.priority,
            is_active: true,
        });
        self.action_log.record(
            ActionType::SignalCreated,
            &id.to_string(),
            json!({ "signal_type": signal_type, "priority": new_signal.priority, "message": message }),
            ACTOR_OPERATOR,
        );
        Ok(id)
    }

    pub fn remove_signal(&mut self, id: u32) -> Result<Signal, Rejection> {
        let index = self
            .signals
            .iter()
            .position(|s| s.id == id)
            .ok_or(Rejection::SignalNotFound(id))?;
        let removed = self.signals.remove(index);
        self.action_log.record(
            ActionType::SignalRemoved,
            &id.to_string(),
            json!({ "signal_type": removed.signal_type, "message": removed.message }),
            ACTOR_OPERATOR,
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlConfig;
    use crate::simulation_engine::signals::Priority;

    fn state() -> ControlState {
        ControlState::seeded(&ControlConfig::default())
    }

    #[test]
    fn empty_type_or_message_leaves_registry_unchanged() {
        let mut s = state();
        let before = s.signals.clone();
        assert_eq!(
            s.create_signal(&NewSignal::new("", "msg", Priority::Low)),
            Err(Rejection::EmptySignalType)
        );
        assert_eq!(
            s.create_signal(&NewSignal::new("SPEED_LIMIT", "", Priority::Low)),
            Err(Rejection::EmptyMessage)
        );
        assert_eq!(
            s.create_signal(&NewSignal::new("SPEED_LIMIT", "   ", Priority::Low)),
            Err(Rejection::EmptyMessage)
        );
        assert_eq!(s.signals, before);
        assert!(s.action_log.is_empty());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut s = state();
        assert!(matches!(
            s.create_signal(&NewSignal::new("FLOOD", "Road under water", Priority::High)),
            Err(Rejection::UnknownSignalType(_))
        ));
        assert_eq!(s.signals.len(), 3);
    }

    #[test]
    fn created_signal_is_active_with_fresh_id() {
        let mut s = state();
        let id = s
            .create_signal(&NewSignal::new("LANE_CLOSURE", "Right lane closed", Priority::High))
            .unwrap();

        assert_eq!(s.signals.len(), 4);
        assert_eq!(s.signals.iter().filter(|sig| sig.id == id).count(), 1);
        let created = s.signal(id).unwrap();
        assert!(created.is_active);
        assert_eq!(created.signal_type, SignalType::LaneClosure);
        assert_eq!(created.priority, Priority::High);
        assert_eq!(created.message, "Right lane closed");
    }

    #[test]
    fn ids_stay_unique_after_removal() {
        let mut s = state();
        s.remove_signal(2).unwrap();
        let id = s
            .create_signal(&NewSignal::new("WEATHER", "Fog advisory", Priority::Medium))
            .unwrap();
        assert_eq!(id, 4);
        s.remove_signal(3).unwrap();
        s.remove_signal(4).unwrap();
        let id = s
            .create_signal(&NewSignal::new("WEATHER", "Fog cleared", Priority::Low))
            .unwrap();
        assert_eq!(id, 2);
        let mut ids: Vec<u32> = s.signals.iter().map(|sig| sig.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), s.signals.len());
    }

    #[test]
    fn removing_drops_exactly_that_record() {
        let mut s = state();
        let removed = s.remove_signal(2).unwrap();
        assert_eq!(removed.signal_type, SignalType::LaneClosure);
        assert_eq!(s.signals.len(), 2);
        assert!(s.signal(2).is_none());
        assert!(s.signal(1).is_some() && s.signal(3).is_some());
    }

    #[test]
    fn removing_missing_id_is_a_noop() {
        let mut s = state();
        let before = s.signals.clone();
        assert_eq!(s.remove_signal(42), Err(Rejection::SignalNotFound(42)));
        assert_eq!(s.signals, before);
    }

    #[test]
    fn empty_registry_starts_at_one() {
        let mut s = ControlState::with_registries(Vec::new(), Vec::new(), &ControlConfig::default());
        assert_eq!(s.next_signal_id(), 1);
        let id = s
            .create_signal(&NewSignal::new("REROUTE", "Use 5th Ave", Priority::Low))
            .unwrap();
        assert_eq!(id, 1);
    }
}
