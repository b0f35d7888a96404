//! Daily wellness record schema
//!
//! One record per calendar date, with the spreadsheet's column order as a
//! first-class constant. Missing values are `None` and serialize to empty
//! cells, never zero; zone minutes default to zero when no qualifying
//! samples exist.

pub mod fetch;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::zones::ZONE_COUNT;

/// Spreadsheet column order. Writes must match the sheet's header row.
pub const FIELD_NAMES: [&str; 23] = [
    "date",
    "sleep_score",
    "sleep_duration_hours",
    "hrv_last_night_avg",
    "hrv_last_night_5min_high",
    "hrv_weekly_avg",
    "hrv_status",
    "resting_heart_rate",
    "max_heart_rate",
    "min_heart_rate",
    "zone_1_minutes",
    "zone_2_minutes",
    "zone_3_minutes",
    "zone_4_minutes",
    "zone_5_minutes",
    "avg_stress_level",
    "max_stress_level",
    "body_battery_charged",
    "body_battery_drained",
    "body_battery_highest",
    "body_battery_lowest",
    "vigorous_intensity_minutes",
    "moderate_intensity_minutes",
];

/// One day's metrics, keyed by calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub sleep_score: Option<i64>,
    pub sleep_duration_hours: Option<f64>,
    pub hrv_last_night_avg: Option<i64>,
    pub hrv_last_night_5min_high: Option<i64>,
    pub hrv_weekly_avg: Option<i64>,
    pub hrv_status: Option<String>,
    pub resting_heart_rate: Option<i64>,
    pub max_heart_rate: Option<i64>,
    pub min_heart_rate: Option<i64>,
    pub zone_minutes: [f64; ZONE_COUNT],
    pub avg_stress_level: Option<i64>,
    pub max_stress_level: Option<i64>,
    pub body_battery_charged: Option<i64>,
    pub body_battery_drained: Option<i64>,
    pub body_battery_highest: Option<i64>,
    pub body_battery_lowest: Option<i64>,
    pub vigorous_intensity_minutes: Option<i64>,
    pub moderate_intensity_minutes: Option<i64>,
}

impl DailyRecord {
    /// A record with every field absent and zone minutes at zero
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sleep_score: None,
            sleep_duration_hours: None,
            hrv_last_night_avg: None,
            hrv_last_night_5min_high: None,
            hrv_weekly_avg: None,
            hrv_status: None,
            resting_heart_rate: None,
            max_heart_rate: None,
            min_heart_rate: None,
            zone_minutes: [0.0; ZONE_COUNT],
            avg_stress_level: None,
            max_stress_level: None,
            body_battery_charged: None,
            body_battery_drained: None,
            body_battery_highest: None,
            body_battery_lowest: None,
            vigorous_intensity_minutes: None,
            moderate_intensity_minutes: None,
        }
    }

    /// Serialize to a spreadsheet row in [`FIELD_NAMES`] order.
    /// Absent values become empty cells; present values keep their
    /// native JSON type.
    pub fn to_row(&self) -> Vec<Value> {
        let mut row = Vec::with_capacity(FIELD_NAMES.len());
        row.push(json!(self.date.to_string()));
        row.push(opt_int(self.sleep_score));
        row.push(opt_float(self.sleep_duration_hours));
        row.push(opt_int(self.hrv_last_night_avg));
        row.push(opt_int(self.hrv_last_night_5min_high));
        row.push(opt_int(self.hrv_weekly_avg));
        row.push(opt_str(self.hrv_status.as_deref()));
        row.push(opt_int(self.resting_heart_rate));
        row.push(opt_int(self.max_heart_rate));
        row.push(opt_int(self.min_heart_rate));
        for minutes in self.zone_minutes {
            row.push(json!(minutes));
        }
        row.push(opt_int(self.avg_stress_level));
        row.push(opt_int(self.max_stress_level));
        row.push(opt_int(self.body_battery_charged));
        row.push(opt_int(self.body_battery_drained));
        row.push(opt_int(self.body_battery_highest));
        row.push(opt_int(self.body_battery_lowest));
        row.push(opt_int(self.vigorous_intensity_minutes));
        row.push(opt_int(self.moderate_intensity_minutes));
        row
    }
}

fn opt_int(value: Option<i64>) -> Value {
    value.map(Value::from).unwrap_or_else(|| json!(""))
}

fn opt_float(value: Option<f64>) -> Value {
    value.map(Value::from).unwrap_or_else(|| json!(""))
}

fn opt_str(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or_else(|| json!(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_new_record_is_absent_except_zones() {
        let record = DailyRecord::new(test_date());
        assert!(record.sleep_score.is_none());
        assert!(record.hrv_status.is_none());
        assert_eq!(record.zone_minutes, [0.0; ZONE_COUNT]);
    }

    #[test]
    fn test_row_matches_schema_width() {
        let record = DailyRecord::new(test_date());
        assert_eq!(record.to_row().len(), FIELD_NAMES.len());
    }

    #[test]
    fn test_row_field_order() {
        let mut record = DailyRecord::new(test_date());
        record.sleep_score = Some(82);
        record.zone_minutes = [1.0, 2.0, 3.0, 4.0, 5.0];
        record.moderate_intensity_minutes = Some(40);

        let row = record.to_row();
        assert_eq!(row[0], json!("2024-01-15"));
        assert_eq!(row[1], json!(82));
        assert_eq!(row[10], json!(1.0));
        assert_eq!(row[14], json!(5.0));
        assert_eq!(row[22], json!(40));
    }

    #[test]
    fn test_absent_fields_serialize_empty() {
        let record = DailyRecord::new(test_date());
        let row = record.to_row();
        assert_eq!(row[1], json!(""));
        assert_eq!(row[6], json!(""));
        // Zone minutes are zero, not absent
        assert_eq!(row[10], json!(0.0));
    }

    #[test]
    fn test_native_types_preserved() {
        let mut record = DailyRecord::new(test_date());
        record.sleep_duration_hours = Some(7.25);
        record.hrv_status = Some("BALANCED".to_string());
        record.resting_heart_rate = Some(48);

        let row = record.to_row();
        assert!(row[2].is_f64());
        assert!(row[6].is_string());
        assert!(row[7].is_i64());
    }
}
