use crate::shared_data::{current_timestamp, ActionStatus, ActionType, ControlActionRecord};
use serde_json::Value;
use std::error::Error;
use std::io::Write;

/// Append-only audit trail of executed control actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    records: Vec<ControlActionRecord>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, action_type: ActionType, target_id: &str, details: Value, created_by: &str) {
        let id = self.records.last().map_or(1, |r| r.id + 1);
        let record = ControlActionRecord {
            id,
            timestamp: current_timestamp(),
            action_type,
            target_id: target_id.to_string(),
            details: details.to_string(),
            status: ActionStatus::Executed,
            created_by: created_by.to_string(),
        };
        log::debug!("[ActionLog] {:?}", record);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ControlActionRecord] {
        &self.records
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> Vec<&ControlActionRecord> {
        self.records.iter().rev().take(limit).collect()
    }

    /// Writes every record as CSV, header row included.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_increase_and_recent_is_newest_first() {
        let mut log = ActionLog::new();
        log.record(ActionType::LightChange, "TL_001", json!({"new_state": "RED"}), "OPERATOR");
        log.record(ActionType::SignalRemoved, "2", json!({}), "OPERATOR");

        let recent = log.recent(5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, 2);
        assert_eq!(recent[0].action_type, ActionType::SignalRemoved);
        assert_eq!(recent[1].id, 1);
        assert_eq!(log.recent(1).len(), 1);
    }

    #[test]
    fn csv_export_has_header_and_one_row_per_record() {
        let mut log = ActionLog::new();
        log.record(ActionType::EmergencyOverride, "TL_002", json!({"old_state": "RED"}), "EMERGENCY_SYSTEM");

        let mut buf = Vec::new();
        log.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("id,timestamp,action_type,target_id,details,status,created_by"));
        assert!(lines[1].contains("EMERGENCY_OVERRIDE"));
        assert!(lines[1].contains("EXECUTED"));
        assert!(lines[1].ends_with("EMERGENCY_SYSTEM"));
    }
}
