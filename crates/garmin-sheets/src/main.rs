use clap::{Parser, Subcommand};
use garmin_sheets::cli::commands;

#[derive(Parser)]
#[command(name = "garmin-sheets")]
#[command(author, version, about = "Sync Garmin Connect wellness metrics to Google Sheets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the trailing window and upsert it into the spreadsheet
    Sync {
        /// Number of trailing days to fetch, overriding DAYS_TO_FETCH
        #[arg(long)]
        days: Option<u32>,
    },
    /// Print the heart-rate zone table
    Zones {
        /// Age used for the 220 - age estimate
        #[arg(long, env = "USER_AGE", default_value = "38")]
        age: u32,
        /// Explicit max heart rate override
        #[arg(long, env = "USER_MAX_HR")]
        max_hr: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> garmin_sheets::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Sync { days } => commands::sync_run(days).await,
        Commands::Zones { age, max_hr } => commands::show_zones(age, max_hr).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
