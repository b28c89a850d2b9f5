pub mod traffic_analyzer;

// Re-export the items from traffic_analyzer
pub use traffic_analyzer::{
    analyze_traffic, classify_congestion, congestion_distribution, peak_hour, summarize,
    summarize_lights, vehicles_by_sensor, CongestionAlert, CongestionShare, LightSummary,
    SummaryStats,
};
