//! Heart-rate zone model and time-in-zone classification
//!
//! Zones are five ordered half-open intervals derived from a maximum heart
//! rate. The raw series is irregularly sampled, so zone counts are converted
//! to minutes using a cadence estimated from the leading timestamp deltas.

use serde_json::Value;

use crate::error::{Result, SheetSyncError};

/// Fractions of max HR where zones 2 through 5 begin. Policy constants,
/// not user-configurable.
const ZONE_THRESHOLDS: [f64; 4] = [0.60, 0.70, 0.80, 0.90];

/// Cadence assumed when the series is too short or degenerate to estimate
pub const FALLBACK_SAMPLES_PER_MINUTE: f64 = 12.0;

/// Number of leading timestamp deltas used for cadence estimation
const RATE_ESTIMATE_WINDOW: usize = 9;

pub const ZONE_COUNT: usize = 5;

const ZONE_NAMES: [&str; ZONE_COUNT] = [
    "zone_1_rest",
    "zone_2_easy",
    "zone_3_aerobic",
    "zone_4_threshold",
    "zone_5_max",
];

/// A half-open interval [lower, upper) of heart-rate values.
/// The highest zone has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneBoundary {
    pub name: &'static str,
    pub lower: u32,
    pub upper: Option<u32>,
}

impl ZoneBoundary {
    fn contains(&self, value: f64) -> bool {
        value >= self.lower as f64 && self.upper.map_or(true, |upper| value < upper as f64)
    }
}

/// The five zone intervals in ascending order.
///
/// Classification scans in order and the first containing interval wins;
/// the intervals are disjoint, so the first match is also the only match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartRateZones {
    boundaries: [ZoneBoundary; ZONE_COUNT],
}

impl HeartRateZones {
    /// Derive the zone intervals from a maximum heart rate.
    /// Boundary values are truncated to whole bpm.
    pub fn from_max_hr(max_hr: u32) -> Result<Self> {
        if max_hr == 0 {
            return Err(SheetSyncError::config(
                "Max heart rate must be positive; check USER_AGE or USER_MAX_HR",
            ));
        }

        let cut = |threshold: f64| (max_hr as f64 * threshold) as u32;
        let cuts = [
            cut(ZONE_THRESHOLDS[0]),
            cut(ZONE_THRESHOLDS[1]),
            cut(ZONE_THRESHOLDS[2]),
            cut(ZONE_THRESHOLDS[3]),
        ];

        Ok(Self {
            boundaries: [
                ZoneBoundary { name: ZONE_NAMES[0], lower: 0, upper: Some(cuts[0]) },
                ZoneBoundary { name: ZONE_NAMES[1], lower: cuts[0], upper: Some(cuts[1]) },
                ZoneBoundary { name: ZONE_NAMES[2], lower: cuts[1], upper: Some(cuts[2]) },
                ZoneBoundary { name: ZONE_NAMES[3], lower: cuts[2], upper: Some(cuts[3]) },
                ZoneBoundary { name: ZONE_NAMES[4], lower: cuts[3], upper: None },
            ],
        })
    }

    pub fn boundaries(&self) -> &[ZoneBoundary; ZONE_COUNT] {
        &self.boundaries
    }

    /// Index of the zone containing the value, scanning ascending
    pub fn classify(&self, value: f64) -> Option<usize> {
        self.boundaries.iter().position(|zone| zone.contains(value))
    }
}

/// One reading from the raw heart-rate series. Either part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawSample {
    /// Epoch millis
    pub timestamp: Option<i64>,
    pub value: Option<f64>,
}

impl RawSample {
    /// Parse one element of the raw series. Entries arrive as
    /// [timestamp, value] pairs, keyed objects, or bare numbers.
    pub fn from_value(entry: &Value) -> Self {
        if let Some(pair) = entry.as_array() {
            if pair.len() >= 2 {
                return Self {
                    timestamp: pair[0].as_i64(),
                    value: pair[1].as_f64(),
                };
            }
            return Self::default();
        }

        if entry.is_object() {
            let timestamp = entry.get("timestamp").and_then(|v| v.as_i64());
            let value = entry
                .get("value")
                .and_then(|v| v.as_f64())
                .or_else(|| entry.get("heartRate").and_then(|v| v.as_f64()));
            return Self { timestamp, value };
        }

        Self {
            timestamp: None,
            value: entry.as_f64(),
        }
    }
}

/// Estimate sampling cadence from the leading timestamp deltas.
///
/// Cadence is assumed locally uniform near the start of the series; a
/// full-series average would be biased by later gaps (device removed).
/// Non-positive deltas are discarded.
pub fn estimate_samples_per_minute(timestamps: &[i64]) -> f64 {
    if timestamps.len() < 2 {
        return FALLBACK_SAMPLES_PER_MINUTE;
    }

    let mut intervals = Vec::new();
    for i in 1..timestamps.len().min(RATE_ESTIMATE_WINDOW + 1) {
        let delta_seconds = (timestamps[i] - timestamps[i - 1]) as f64 / 1000.0;
        if delta_seconds > 0.0 {
            intervals.push(delta_seconds);
        }
    }

    if intervals.is_empty() {
        return FALLBACK_SAMPLES_PER_MINUTE;
    }

    let avg_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    60.0 / avg_interval
}

/// Minutes spent in each zone, rounded to one decimal.
///
/// Only samples with a positive numeric value classify; malformed entries
/// are skipped, not errors. An empty series yields zero minutes in every
/// zone, never absent.
pub fn time_in_zones(samples: &[RawSample], zones: &HeartRateZones) -> [f64; ZONE_COUNT] {
    let timestamps: Vec<i64> = samples
        .iter()
        .filter_map(|sample| sample.timestamp)
        .filter(|&t| t > 0)
        .collect();
    let samples_per_minute = estimate_samples_per_minute(&timestamps);

    let mut counts = [0u32; ZONE_COUNT];
    for sample in samples {
        let value = match sample.value {
            Some(v) if v > 0.0 => v,
            _ => continue,
        };
        if let Some(zone) = zones.classify(value) {
            counts[zone] += 1;
        }
    }

    counts.map(|count| round_minutes(count as f64 / samples_per_minute))
}

fn round_minutes(minutes: f64) -> f64 {
    (minutes * 10.0).round() / 10.0
}
