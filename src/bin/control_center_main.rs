// control_center_main.rs
use traffic_control_center::config::ControlConfig;
use traffic_control_center::control_system::ControlCenter;
use traffic_control_center::monitoring::run_cli;
use traffic_control_center::simulation_engine::MetricsFixtures;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match ControlConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return;
            }
        },
        None => ControlConfig::default(),
    };
    log::info!("Starting traffic control center with {:?}", config);

    let center = match ControlCenter::new(&config) {
        Ok(center) => center,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };
    let mut fixtures = MetricsFixtures::load();
    run_cli(&center, &mut fixtures).await;
    center.shutdown();
}
