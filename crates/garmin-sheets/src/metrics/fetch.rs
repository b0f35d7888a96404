//! Per-category metric fetching and daily aggregation
//!
//! Each of the six categories is fetched as an isolated operation whose
//! explicit result the aggregator merges into the day record: an `Ok`
//! payload fills the category's fields, an `Err` leaves them absent and is
//! reported without touching sibling categories or other dates.

use chrono::NaiveDate;
use serde_json::Value;

use crate::client::{GarminClient, SessionToken};
use crate::metrics::DailyRecord;
use crate::zones::{time_in_zones, HeartRateZones, RawSample};

/// Build the record for one date, fetching every category
pub async fn collect_day(
    client: &GarminClient,
    token: &SessionToken,
    zones: &HeartRateZones,
    date: NaiveDate,
) -> DailyRecord {
    let mut record = DailyRecord::new(date);

    match client.get_hrv_data(token, date).await {
        Ok(data) => apply_hrv(&mut record, &data),
        Err(e) => println!("  Error fetching HRV data: {}", e),
    }

    match client.get_sleep_data(token, date).await {
        Ok(data) => apply_sleep(&mut record, &data),
        Err(e) => println!("  Error fetching sleep data: {}", e),
    }

    match client.get_heart_rates(token, date).await {
        Ok(data) => apply_heart_rate(&mut record, &data, zones),
        Err(e) => println!("  Error fetching heart rate data: {}", e),
    }

    match client.get_daily_stats(token, date).await {
        Ok(data) => apply_daily_stats(&mut record, &data),
        Err(e) => println!("  Error fetching intensity minutes: {}", e),
    }

    match client.get_stress_data(token, date).await {
        Ok(data) => apply_stress(&mut record, &data),
        Err(e) => println!("  Error fetching stress data: {}", e),
    }

    match client.get_body_battery(token, date).await {
        Ok(data) => apply_body_battery(&mut record, &data),
        Err(e) => println!("  Error fetching body battery data: {}", e),
    }

    record
}

fn apply_hrv(record: &mut DailyRecord, data: &Value) {
    let summary = match data.get("hrvSummary") {
        Some(summary) => summary,
        None => return,
    };

    record.hrv_last_night_avg = summary.get("lastNightAvg").and_then(|v| v.as_i64());
    record.hrv_last_night_5min_high = summary.get("lastNight5MinHigh").and_then(|v| v.as_i64());
    record.hrv_weekly_avg = summary.get("weeklyAvg").and_then(|v| v.as_i64());
    record.hrv_status = summary
        .get("status")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
}

fn apply_sleep(record: &mut DailyRecord, data: &Value) {
    let dto = match data.get("dailySleepDTO") {
        Some(dto) => dto,
        None => return,
    };

    record.sleep_score = dto
        .get("sleepScores")
        .and_then(|v| v.get("overall"))
        .and_then(|v| v.get("value"))
        .and_then(|v| v.as_i64());

    if let Some(seconds) = dto.get("sleepTimeSeconds").and_then(|v| v.as_i64()) {
        if seconds > 0 {
            record.sleep_duration_hours = Some(round_hours(seconds as f64 / 3600.0));
        }
    }
}

fn apply_heart_rate(record: &mut DailyRecord, data: &Value, zones: &HeartRateZones) {
    record.resting_heart_rate = data.get("restingHeartRate").and_then(|v| v.as_i64());
    record.max_heart_rate = data.get("maxHeartRate").and_then(|v| v.as_i64());
    record.min_heart_rate = data.get("minHeartRate").and_then(|v| v.as_i64());

    if let Some(entries) = data.get("heartRateValues").and_then(|v| v.as_array()) {
        let samples: Vec<RawSample> = entries.iter().map(RawSample::from_value).collect();
        record.zone_minutes = time_in_zones(&samples, zones);
    }
}

fn apply_daily_stats(record: &mut DailyRecord, data: &Value) {
    record.vigorous_intensity_minutes = data
        .get("vigorousIntensityMinutes")
        .and_then(|v| v.as_i64());
    record.moderate_intensity_minutes = data
        .get("moderateIntensityMinutes")
        .and_then(|v| v.as_i64());
}

fn apply_stress(record: &mut DailyRecord, data: &Value) {
    record.avg_stress_level = data.get("avgStressLevel").and_then(|v| v.as_i64());
    record.max_stress_level = data.get("maxStressLevel").and_then(|v| v.as_i64());
}

fn apply_body_battery(record: &mut DailyRecord, data: &Value) {
    // Body battery returns an array of daily reports
    let day = match data.as_array().and_then(|arr| arr.first()) {
        Some(day) => day,
        None => return,
    };

    record.body_battery_charged = day.get("charged").and_then(|v| v.as_i64());
    record.body_battery_drained = day.get("drained").and_then(|v| v.as_i64());

    if let Some(entries) = day.get("bodyBatteryValuesArray").and_then(|v| v.as_array()) {
        let levels: Vec<i64> = entries.iter().filter_map(extract_battery_level).collect();
        record.body_battery_highest = levels.iter().max().copied();
        record.body_battery_lowest = levels.iter().min().copied();
    }
}

/// Battery entries arrive as [timestamp, level] pairs or keyed objects;
/// anything else is skipped
fn extract_battery_level(entry: &Value) -> Option<i64> {
    if let Some(pair) = entry.as_array() {
        if pair.len() >= 2 {
            return pair[1]
                .as_i64()
                .or_else(|| pair[1].as_f64().map(|f| f as i64));
        }
        return None;
    }

    entry
        .get("value")
        .and_then(|v| v.as_i64())
        .or_else(|| entry.get("bodyBatteryValue").and_then(|v| v.as_i64()))
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
