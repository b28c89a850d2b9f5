use crate::simulation_engine::sensors::{HourlySample, SensorReading};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// Line chart of vehicles per hourly sample.
pub fn render_hourly_chart(samples: &[HourlySample], path: &Path) -> Result<(), Box<dyn Error>> {
    if samples.is_empty() {
        return Err("no hourly samples to plot".into());
    }
    let max_vehicles = samples.iter().map(|s| s.vehicles).max().unwrap_or(0);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Hourly Traffic Volume", ("sans-serif", 20))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..samples.len(), 0..max_vehicles + 10)?;

    chart
        .configure_mesh()
        .x_labels(samples.len())
        .x_label_formatter(&|i| samples.get(*i).map(|s| s.hour.clone()).unwrap_or_default())
        .y_desc("Vehicles")
        .draw()?;

    chart.draw_series(LineSeries::new(
        samples.iter().enumerate().map(|(i, s)| (i, s.vehicles)),
        &BLUE,
    ))?;
    chart.draw_series(
        samples
            .iter()
            .enumerate()
            .map(|(i, s)| Circle::new((i, s.vehicles), 4, BLUE.filled())),
    )?;

    root.present()?;
    log::info!("Hourly traffic chart saved to {}", path.display());
    Ok(())
}

/// Bar chart of vehicle count per sensor.
pub fn render_sensor_chart(sensors: &[SensorReading], path: &Path) -> Result<(), Box<dyn Error>> {
    if sensors.is_empty() {
        return Err("no sensor readings to plot".into());
    }
    let max_vehicles = sensors.iter().map(|s| s.vehicle_count).max().unwrap_or(0);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Vehicle Count by Sensor", ("sans-serif", 20))
        .margin(40)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((0..sensors.len()).into_segmented(), 0..max_vehicles + 10)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => sensors
                .get(*i)
                .map(|s| s.sensor_id.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .y_desc("Vehicles")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(59, 130, 246).filled())
            .margin(10)
            .data(sensors.iter().enumerate().map(|(i, s)| (i, s.vehicle_count))),
    )?;

    root.present()?;
    log::info!("Sensor chart saved to {}", path.display());
    Ok(())
}
