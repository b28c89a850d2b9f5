// control_system/mod.rs
pub mod action_log;
pub mod control_center;
pub mod emergency;
pub mod signal_controller;
pub mod state;
pub mod traffic_light_controller;

pub use action_log::ActionLog;
pub use control_center::ControlCenter;
pub use emergency::EmergencyTimer;
pub use state::{reduce, Action, Applied, ControlState, NewSignal, Outcome, Rejection};
