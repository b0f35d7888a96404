//! Run configuration for garmin-sheets
//!
//! One immutable [`Config`] is built at startup from environment-style
//! lookups and passed into every component that needs it.

use crate::error::{Result, SheetSyncError};

/// Sheet tab used when SHEET_NAME is not set
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Age used for the 220 - age estimate when USER_AGE is not set
pub const DEFAULT_USER_AGE: u32 = 38;

/// Trailing window covered by one run
pub const DEFAULT_DAYS_TO_FETCH: u32 = 7;

/// Immutable run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Garmin Connect account name
    pub garmin_username: String,
    /// Garmin Connect account password
    pub garmin_password: String,
    /// Target spreadsheet ID
    pub spreadsheet_id: String,
    /// Sheet tab holding the daily rows
    pub sheet_name: String,
    /// Google service-account key JSON, kept opaque until the Sheets client parses it
    pub sheets_credentials: String,
    /// Age used to estimate max heart rate
    pub user_age: u32,
    /// Explicit max heart rate, overriding the age estimate
    pub max_hr_override: Option<u32>,
    /// Number of trailing days fetched per run
    pub days_to_fetch: u32,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let garmin_username = require(&lookup, "GARMIN_USERNAME")?;
        let garmin_password = require(&lookup, "GARMIN_PASSWORD")?;
        let spreadsheet_id = require(&lookup, "SPREADSHEET_ID")?;
        let sheets_credentials = require(&lookup, "GOOGLE_SHEETS_CREDENTIALS")?;

        let sheet_name = lookup("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());

        let user_age = match lookup("USER_AGE") {
            Some(raw) => parse_number(&raw, "USER_AGE")?,
            None => DEFAULT_USER_AGE,
        };

        let max_hr_override = match lookup("USER_MAX_HR") {
            Some(raw) => Some(parse_number(&raw, "USER_MAX_HR")?),
            None => None,
        };

        let days_to_fetch = match lookup("DAYS_TO_FETCH") {
            Some(raw) => parse_number(&raw, "DAYS_TO_FETCH")?,
            None => DEFAULT_DAYS_TO_FETCH,
        };

        Ok(Self {
            garmin_username,
            garmin_password,
            spreadsheet_id,
            sheet_name,
            sheets_credentials,
            user_age,
            max_hr_override,
            days_to_fetch,
        })
    }

    /// Maximum heart rate: the explicit override, or the 220 - age estimate
    pub fn max_hr(&self) -> u32 {
        self.max_hr_override
            .unwrap_or_else(|| 220u32.saturating_sub(self.user_age))
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SheetSyncError::config(format!("{} must be set", key))),
    }
}

fn parse_number(raw: &str, key: &str) -> Result<u32> {
    raw.parse().map_err(|_| {
        SheetSyncError::config(format!("{} must be a number, got '{}'", key, raw))
    })
}
