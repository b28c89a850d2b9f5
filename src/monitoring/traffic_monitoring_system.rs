use crate::control_system::control_center::ControlCenter;
use crate::control_system::state::{Action, NewSignal};
use crate::flow_analyzer::traffic_analyzer::analyze_traffic;
use crate::global_variables::{
    DEFAULT_RECENT_ACTIONS, DEFAULT_SIMULATED_READINGS, HOURLY_CHART_FILE, SENSOR_CHART_FILE,
};
use crate::monitoring::charts::{render_hourly_chart, render_sensor_chart};
use crate::monitoring::dashboard::{map_pins, DashboardView, Tab};
use crate::simulation_engine::sensors::{simulate_readings, MetricsFixtures};
use crate::simulation_engine::signals::Priority;
use crate::simulation_engine::traffic_lights::LightState;
use std::error::Error;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "\
Commands:
  lights | signals | stats | map         show a dashboard view
  tab <overview|analytics|control>       switch the active tab
  select <sensor or light id>            select a map pin
  set <light> <RED|YELLOW|GREEN>         change a light manually
  activate <light> | deactivate <light>  toggle a light
  adaptive <on|off>                      switch adaptive control
  optimize                               run adaptive optimization
  emergency                              trigger emergency response
  signal <TYPE> <PRIORITY> <message...>  post an advisory signal
  remove <signal id>                     remove a signal
  simulate [n]                           ingest n random sensor readings
  actions [n]                            show recent control actions
  export <file.csv>                      write the action log as CSV
  charts <dir>                           write analytics charts as PNG
  help | exit";

/// One parsed admin command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show(Tab),
    Select(String),
    Control(Action),
    RecentActions(usize),
    Simulate(usize),
    ExportActions(PathBuf),
    ExportCharts(PathBuf),
    Help,
    Exit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Continue(String),
    Exit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let keyword = words.next().ok_or_else(|| "empty command".to_string())?;
    let args: Vec<&str> = words.collect();

    let command = match (keyword.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("lights" | "signals" | "control", []) => Command::Show(Tab::Control),
        ("stats" | "analytics", []) => Command::Show(Tab::Analytics),
        ("map" | "overview", []) => Command::Show(Tab::Overview),
        ("tab", [tab]) => Command::Show(tab.parse()?),
        ("select", [id]) => Command::Select(id.to_string()),
        ("set", [light_id, state]) => Command::Control(Action::SetState {
            light_id: light_id.to_string(),
            state: state.parse::<LightState>()?,
        }),
        ("activate", [light_id]) => Command::Control(Action::SetActive {
            light_id: light_id.to_string(),
            active: true,
        }),
        ("deactivate", [light_id]) => Command::Control(Action::SetActive {
            light_id: light_id.to_string(),
            active: false,
        }),
        ("adaptive", [flag]) => match flag.to_ascii_lowercase().as_str() {
            "on" => Command::Control(Action::SetAdaptiveControl(true)),
            "off" => Command::Control(Action::SetAdaptiveControl(false)),
            other => return Err(format!("expected on or off, got '{}'", other)),
        },
        ("optimize", []) => Command::Control(Action::RunAdaptiveOptimization),
        ("emergency", []) => Command::Control(Action::TriggerEmergency),
        ("signal", [signal_type, priority, message @ ..]) => {
            Command::Control(Action::CreateSignal(NewSignal::new(
                signal_type,
                &message.join(" "),
                priority.parse::<Priority>()?,
            )))
        }
        ("remove", [id]) => Command::Control(Action::RemoveSignal(
            id.parse().map_err(|_| format!("invalid signal id '{}'", id))?,
        )),
        ("actions", []) => Command::RecentActions(DEFAULT_RECENT_ACTIONS),
        ("actions", [n]) => Command::RecentActions(n.parse().map_err(|_| format!("invalid count '{}'", n))?),
        ("simulate", []) => Command::Simulate(DEFAULT_SIMULATED_READINGS),
        ("simulate", [n]) => Command::Simulate(n.parse().map_err(|_| format!("invalid count '{}'", n))?),
        ("export", [path]) => Command::ExportActions(PathBuf::from(path)),
        ("charts", [dir]) => Command::ExportCharts(PathBuf::from(dir)),
        ("help", []) => Command::Help,
        ("exit" | "quit", []) => Command::Exit,
        _ => return Err(format!("unrecognised command '{}'", line.trim())),
    };
    Ok(command)
}

pub fn export_action_log(center: &ControlCenter, path: &Path) -> Result<usize, Box<dyn Error>> {
    let file = File::create(path)?;
    center.with_state_ref(|state| -> Result<usize, Box<dyn Error>> {
        state.action_log.write_csv(file)?;
        Ok(state.action_log.len())
    })
}

pub fn export_charts(fixtures: &MetricsFixtures, dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    render_hourly_chart(&fixtures.hourly, &dir.join(HOURLY_CHART_FILE))?;
    render_sensor_chart(&fixtures.sensors, &dir.join(SENSOR_CHART_FILE))?;
    Ok(())
}

/// Runs one command line against the control center and returns what to print.
pub fn execute_command(
    center: &ControlCenter,
    view: &mut DashboardView,
    fixtures: &mut MetricsFixtures,
    line: &str,
) -> CommandOutcome {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => return CommandOutcome::Continue(format!("{}\n{}", e, USAGE)),
    };

    let output = match command {
        Command::Show(tab) => {
            view.switch_tab(tab);
            center.with_state_ref(|state| view.render(state, fixtures))
        }
        Command::Select(id) => {
            let selected = center.with_state_ref(|state| view.select_location(&id, &map_pins(state, fixtures)));
            if selected {
                view.switch_tab(Tab::Overview);
                center.with_state_ref(|state| view.render(state, fixtures))
            } else {
                format!("No sensor or light with id '{}'", id)
            }
        }
        Command::Control(action) => match center.dispatch(action) {
            Ok(applied) => format!("Applied: {:?}", applied),
            Err(rejection) => format!("Ignored: {}", rejection),
        },
        Command::RecentActions(limit) => center.with_state_ref(|state| {
            let mut out = String::new();
            let recent = state.action_log.recent(limit);
            if recent.is_empty() {
                out.push_str("No control actions recorded.");
            }
            for record in recent {
                let _ = writeln!(
                    out,
                    "#{} {} {} by {} {}",
                    record.id, record.action_type, record.target_id, record.created_by, record.details
                );
            }
            out
        }),
        Command::Simulate(count) => {
            let readings = center.with_rng(|rng| simulate_readings(count, rng));
            fixtures.record_readings(&readings);
            let mut out = String::new();
            for r in &readings {
                let _ = writeln!(
                    out,
                    "{} {:>3} vehicles {:>4.1} mph {}",
                    r.sensor_id, r.vehicle_count, r.average_speed, r.congestion_level
                );
            }
            for alert in analyze_traffic(&fixtures.sensors) {
                let _ = writeln!(out, "ALERT {}: {}", alert.sensor_id, alert.message);
            }
            let _ = write!(out, "Ingested {} simulated readings", readings.len());
            out
        }
        Command::ExportActions(path) => match export_action_log(center, &path) {
            Ok(count) => format!("Wrote {} control actions to {}", count, path.display()),
            Err(e) => format!("Error exporting control actions: {}", e),
        },
        Command::ExportCharts(dir) => match export_charts(fixtures, &dir) {
            Ok(()) => format!("Charts saved to {}", dir.display()),
            Err(e) => format!("Error generating charts: {}", e),
        },
        Command::Help => USAGE.to_string(),
        Command::Exit => return CommandOutcome::Exit,
    };
    CommandOutcome::Continue(output)
}

/// Interactive admin loop on stdin/stdout.
pub async fn run_cli(center: &ControlCenter, fixtures: &mut MetricsFixtures) {
    let mut view = DashboardView::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("\nTraffic Control Center Admin CLI");
    println!("{}", USAGE);

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match execute_command(center, &mut view, fixtures, &line) {
            CommandOutcome::Continue(output) => println!("{}", output.trim_end()),
            CommandOutcome::Exit => {
                println!("Exiting CLI.");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ControlConfig;

    fn center() -> ControlCenter {
        ControlCenter::new(&ControlConfig {
            rng_seed: Some(1),
            ..ControlConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn parses_control_commands() {
        assert_eq!(
            parse_command("set TL_001 red"),
            Ok(Command::Control(Action::SetState {
                light_id: "TL_001".into(),
                state: LightState::Red
            }))
        );
        assert_eq!(
            parse_command("signal WEATHER high Black ice on ramp"),
            Ok(Command::Control(Action::CreateSignal(NewSignal::new(
                "WEATHER",
                "Black ice on ramp",
                Priority::High
            ))))
        );
        assert_eq!(parse_command("actions 3"), Ok(Command::RecentActions(3)));
        assert_eq!(parse_command("simulate"), Ok(Command::Simulate(DEFAULT_SIMULATED_READINGS)));
        assert_eq!(parse_command("simulate 25"), Ok(Command::Simulate(25)));
        assert_eq!(parse_command("tab control"), Ok(Command::Show(Tab::Control)));
    }

    #[test]
    fn malformed_commands_are_errors() {
        assert!(parse_command("").is_err());
        assert!(parse_command("set TL_001").is_err());
        assert!(parse_command("set TL_001 purple").is_err());
        assert!(parse_command("remove abc").is_err());
        assert!(parse_command("adaptive maybe").is_err());
        assert!(parse_command("simulate lots").is_err());
        assert!(parse_command("signal WEATHER URGENT icy").is_err());
    }

    #[test]
    fn signal_without_message_reaches_reducer_and_is_ignored() {
        let center = center();
        let mut view = DashboardView::default();
        let mut fixtures = MetricsFixtures::load();
        let out = execute_command(&center, &mut view, &mut fixtures, "signal SPEED_LIMIT LOW");
        assert_eq!(out, CommandOutcome::Continue("Ignored: signal message is required".into()));
        assert_eq!(center.snapshot().signals.len(), 3);
    }

    #[test]
    fn commands_mutate_through_the_center() {
        let center = center();
        let mut view = DashboardView::default();
        let mut fixtures = MetricsFixtures::load();

        let out = execute_command(&center, &mut view, &mut fixtures, "deactivate TL_001");
        assert!(matches!(out, CommandOutcome::Continue(ref s) if s.starts_with("Applied")));
        let out = execute_command(&center, &mut view, &mut fixtures, "set TL_001 RED");
        assert_eq!(out, CommandOutcome::Continue("Ignored: traffic light 'TL_001' is inactive".into()));

        execute_command(&center, &mut view, &mut fixtures, "remove 1");
        assert!(center.snapshot().signal(1).is_none());

        match execute_command(&center, &mut view, &mut fixtures, "actions") {
            CommandOutcome::Continue(text) => {
                assert!(text.starts_with("#2 SIGNAL_REMOVED 1 by OPERATOR"));
                assert!(text.contains("LIGHT_ACTIVATION TL_001"));
            }
            CommandOutcome::Exit => panic!("unexpected exit"),
        }
        assert_eq!(execute_command(&center, &mut view, &mut fixtures, "exit"), CommandOutcome::Exit);
    }

    #[test]
    fn select_switches_to_map() {
        let center = center();
        let mut view = DashboardView::default();
        view.switch_tab(Tab::Control);
        let mut fixtures = MetricsFixtures::load();
        let out = execute_command(&center, &mut view, &mut fixtures, "select TL_002");
        assert_eq!(view.active_tab, Tab::Overview);
        assert!(matches!(out, CommandOutcome::Continue(ref s) if s.contains("Selected light TL_002")));
        let out = execute_command(&center, &mut view, &mut fixtures, "select XYZ");
        assert_eq!(out, CommandOutcome::Continue("No sensor or light with id 'XYZ'".into()));
        assert_eq!(view.selected_location.as_deref(), Some("TL_002"));
    }

    #[test]
    fn simulate_updates_sensor_readings_without_touching_control_state() {
        let center = center();
        let mut view = DashboardView::default();
        let mut fixtures = MetricsFixtures::load();
        let before = center.snapshot();

        let out = execute_command(&center, &mut view, &mut fixtures, "simulate 40");
        let text = match out {
            CommandOutcome::Continue(text) => text,
            CommandOutcome::Exit => panic!("unexpected exit"),
        };
        assert!(text.ends_with("Ingested 40 simulated readings"));
        assert_eq!(fixtures.sensors.len(), 5);
        assert_ne!(fixtures.sensors, MetricsFixtures::load().sensors);
        let high = fixtures
            .sensors
            .iter()
            .filter(|s| s.congestion_level == crate::simulation_engine::CongestionLevel::High)
            .count();
        assert_eq!(text.matches("ALERT").count(), high);
        assert_eq!(center.snapshot(), before);
    }

    #[test]
    fn exports_charts_to_directory() {
        let fixtures = MetricsFixtures::load();
        let dir = std::env::temp_dir().join(format!("tcc_charts_{}", std::process::id()));
        export_charts(&fixtures, &dir).unwrap();
        let hourly = std::fs::metadata(dir.join(HOURLY_CHART_FILE)).unwrap();
        let sensors = std::fs::metadata(dir.join(SENSOR_CHART_FILE)).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(hourly.len() > 0);
        assert!(sensors.len() > 0);
    }

    #[test]
    fn exports_action_log_csv() {
        let center = center();
        center.dispatch(Action::RemoveSignal(1)).unwrap();
        center.dispatch(Action::RemoveSignal(2)).unwrap();
        let path = std::env::temp_dir().join(format!("tcc_actions_{}.csv", std::process::id()));
        let written = export_action_log(&center, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, 2);
        assert_eq!(text.lines().count(), 3);
    }
}
