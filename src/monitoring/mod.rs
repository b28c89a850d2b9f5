pub mod charts;
pub mod dashboard;
pub mod traffic_monitoring_system;

pub use dashboard::{DashboardView, Tab};
pub use traffic_monitoring_system::{execute_command, parse_command, run_cli, Command, CommandOutcome};
