//! Garmin Connect API client for authenticated wellness requests
//!
//! This module provides a client for the by-date wellness capability
//! surface: HRV, sleep, heart rate, daily stats, stress, and body battery.
//! Payloads are loosely structured and returned as `serde_json::Value`.

use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::tokens::SessionToken;
use crate::error::{Result, SheetSyncError};

/// User agent for Connect API requests
const API_USER_AGENT: &str = "GCM-iOS-5.7.2.1";

/// Garmin Connect API client
pub struct GarminClient {
    client: Client,
    base_url: String,
}

impl GarminClient {
    /// Create a new API client for the given domain
    pub fn new(domain: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: format!("https://connectapi.{}", domain),
        }
    }

    /// Create a new API client with a custom base URL (for testing)
    #[doc(hidden)]
    pub fn new_with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build headers with authorization
    fn build_headers(&self, token: &SessionToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(API_USER_AGENT));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token.authorization_header())
                .map_err(|_| SheetSyncError::auth("Session token is not header-safe"))?,
        );
        Ok(headers)
    }

    /// Exchange account credentials for a session token
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionToken> {
        let url = self.build_url("/auth-service/login");
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self
            .client
            .post(&url)
            .header(USER_AGENT, API_USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(SheetSyncError::Http)?;

        let status = response.status();
        match status {
            StatusCode::OK => response.json().await.map_err(|e| {
                SheetSyncError::invalid_response(format!("Failed to parse login response: {}", e))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SheetSyncError::auth("Invalid Garmin credentials"))
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SheetSyncError::auth(format!(
                    "Login failed ({}): {}",
                    status, body
                )))
            }
        }
    }

    /// Make an authenticated GET request and return the response
    pub async fn get(&self, token: &SessionToken, path: &str) -> Result<Response> {
        let url = self.build_url(path);
        let headers = self.build_headers(token)?;

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(SheetSyncError::Http)?;

        self.handle_response_status(response).await
    }

    /// Make an authenticated GET request and deserialize JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &SessionToken,
        path: &str,
    ) -> Result<T> {
        let response = self.get(token, path).await?;
        response.json().await.map_err(|e| {
            SheetSyncError::invalid_response(format!("Failed to parse JSON response: {}", e))
        })
    }

    /// HRV summary for a date
    pub async fn get_hrv_data(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        self.get_json(token, &format!("/hrv-service/hrv/{}", date)).await
    }

    /// Sleep summary for a date
    pub async fn get_sleep_data(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        let path = format!(
            "/wellness-service/wellness/dailySleepData?date={}&nonSleepBufferMinutes=60",
            date
        );
        self.get_json(token, &path).await
    }

    /// Heart-rate extremes and the raw timestamped series for a date
    pub async fn get_heart_rates(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        let path = format!("/wellness-service/wellness/dailyHeartRate?date={}", date);
        self.get_json(token, &path).await
    }

    /// Daily activity stats (intensity minutes) for a date
    pub async fn get_daily_stats(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        let path = format!(
            "/usersummary-service/usersummary/daily?calendarDate={}",
            date
        );
        self.get_json(token, &path).await
    }

    /// Stress summary for a date
    pub async fn get_stress_data(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        let path = format!("/wellness-service/wellness/dailyStress/{}", date);
        self.get_json(token, &path).await
    }

    /// Body-battery report for a date
    pub async fn get_body_battery(&self, token: &SessionToken, date: NaiveDate) -> Result<Value> {
        let path = format!(
            "/wellness-service/wellness/bodyBattery/reports/daily?startDate={}&endDate={}",
            date, date
        );
        self.get_json(token, &path).await
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
                Ok(response)
            }
            StatusCode::UNAUTHORIZED => Err(SheetSyncError::auth("Session expired or invalid")),
            StatusCode::TOO_MANY_REQUESTS => Err(SheetSyncError::RateLimited),
            StatusCode::NOT_FOUND => Err(SheetSyncError::invalid_response("Resource not found")),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SheetSyncError::invalid_response(format!(
                    "API error {}: {}",
                    status, body
                )))
            }
        }
    }
}
