//! Sync command for garmin-sheets

use chrono::{Duration, Local};

use crate::client::GarminClient;
use crate::config::Config;
use crate::error::Result;
use crate::metrics::fetch::collect_day;
use crate::sheets::SheetsClient;
use crate::sync::{reconcile, SheetIndex};
use crate::zones::HeartRateZones;

use super::zones::print_zone_table;

/// Run the full fetch-and-upsert pipeline
pub async fn run(days: Option<u32>) -> Result<()> {
    let config = Config::from_env()?;
    let days = days.unwrap_or(config.days_to_fetch);

    let max_hr = config.max_hr();
    let zones = HeartRateZones::from_max_hr(max_hr)?;

    println!("Using Max HR: {} bpm", max_hr);
    println!("Heart Rate Zones:");
    print_zone_table(&zones);
    println!();

    println!("Connecting to Garmin Connect...");
    let client = GarminClient::new("garmin.com");
    let token = client
        .login(&config.garmin_username, &config.garmin_password)
        .await?;
    println!("Successfully connected to Garmin Connect");

    println!("Connecting to Google Sheets...");
    let sheets = SheetsClient::connect(
        &config.sheets_credentials,
        &config.spreadsheet_id,
        &config.sheet_name,
    )
    .await?;
    println!("Successfully connected to spreadsheet: {}", config.spreadsheet_id);
    println!("Using sheet: {}", config.sheet_name);

    println!();
    println!("Fetching data for the past {} days...", days);
    let today = Local::now().date_naive();
    let mut records = Vec::with_capacity(days as usize);
    for offset in 0..days {
        let date = today - Duration::days(offset as i64);
        println!("Fetching data for {}...", date);
        records.push(collect_day(&client, &token, &zones, date).await);
    }

    println!();
    println!("Updating Google Sheets...");
    let index = SheetIndex::from_rows(&sheets.read_all_values().await?)?;
    println!("Found {} existing rows in spreadsheet", index.len());

    let stats = reconcile(&sheets, &index, &records).await?;

    println!();
    println!("Sync complete!");
    println!("  {}", stats);
    println!("  Total processed: {} days", records.len());

    Ok(())
}
