//! Google Sheets API client for the spreadsheet store
//!
//! Capability surface used by the synchronizer: read every row (including
//! the header), overwrite a row in place, append a row at the end. Cell
//! values are written with their native JSON types; the USER_ENTERED input
//! option lets the sheet parse them the way a typing user would.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SheetSyncError};
use crate::sheets::auth::{fetch_access_token, ServiceAccountKey};

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

/// Google Sheets API client bound to one spreadsheet tab
pub struct SheetsClient {
    client: Client,
    base_url: String,
    access_token: String,
    spreadsheet_id: String,
    sheet_name: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsClient {
    /// Authenticate with a service-account key and bind to a spreadsheet tab
    pub async fn connect(
        credentials_json: &str,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Self> {
        let key = ServiceAccountKey::from_json(credentials_json)?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(SheetSyncError::Http)?;
        let access_token = fetch_access_token(&client, &key).await?;

        Ok(Self {
            client,
            base_url: SHEETS_BASE_URL.to_string(),
            access_token,
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
        })
    }

    /// Create a client with a fixed token and base URL (for testing)
    #[doc(hidden)]
    pub fn new_with_base_url(
        base_url: &str,
        access_token: &str,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            access_token: access_token.to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            sheet_name: sheet_name.to_string(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    /// Read every row in the sheet, including the header row.
    /// Cells come back as formatted strings; a missing `values` field
    /// (entirely empty sheet) comes back as an empty vec.
    pub async fn read_all_values(&self) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&self.sheet_name);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(SheetSyncError::Http)?;
        let response = self.handle_response_status(response).await?;

        let body: ValueRange = response.json().await.map_err(|e| {
            SheetSyncError::invalid_response(format!("Failed to parse sheet values: {}", e))
        })?;

        Ok(body.values)
    }

    /// Overwrite the row at the given 1-indexed position, in column order
    /// starting at column A
    pub async fn update_row(&self, row_number: usize, values: &[Value]) -> Result<()> {
        let range = format!("{}!A{}", self.sheet_name, row_number);
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&range)
        );
        let body = serde_json::json!({ "values": [values] });

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(SheetSyncError::Http)?;
        self.handle_response_status(response).await?;

        Ok(())
    }

    /// Append a new row after the last data row of the sheet
    pub async fn append_row(&self, values: &[Value]) -> Result<()> {
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED",
            self.values_url(&self.sheet_name)
        );
        let body = serde_json::json!({ "values": [values] });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(SheetSyncError::Http)?;
        self.handle_response_status(response).await?;

        Ok(())
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SheetSyncError::auth("Sheets access denied"))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(SheetSyncError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(SheetSyncError::sheet(format!(
                    "API error {}: {}",
                    status, body
                )))
            }
        }
    }
}
