//! Zone table command for garmin-sheets

use crate::error::Result;
use crate::zones::HeartRateZones;

/// Print the heart-rate zone table for an age or explicit max HR
pub async fn show(age: u32, max_hr_override: Option<u32>) -> Result<()> {
    let max_hr = max_hr_override.unwrap_or_else(|| 220u32.saturating_sub(age));
    let zones = HeartRateZones::from_max_hr(max_hr)?;

    println!("Using Max HR: {} bpm", max_hr);
    println!("Heart Rate Zones:");
    print_zone_table(&zones);

    Ok(())
}

/// Print one line per zone in ascending order
pub fn print_zone_table(zones: &HeartRateZones) {
    for zone in zones.boundaries() {
        match zone.upper {
            Some(upper) => println!("  {}: {}-{} bpm", zone.name, zone.lower, upper),
            None => println!("  {}: {}+ bpm", zone.name, zone.lower),
        }
    }
}
