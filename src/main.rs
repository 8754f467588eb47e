use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use launchcast::cache::ResponseCache;
use launchcast::paragliding::summary::{
    ceiling_text, day_label, soaring_label, thermal_label, weekly_score, wind_text,
};
use launchcast::paragliding::{find_site, launch_sites, rank_sites};
use launchcast::{
    ForecastConfig, ForecastError, ForecastFetcher, OpenMeteoClient, RequestSpacer, SiteForecast,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Flyability forecasts for paragliding launch sites
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every catalog site and write the forecast JSON
    Fetch {
        /// Output file, overrides the configured path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print the forecast for one site
    Site {
        /// Site id, see `sites`
        id: String,
    },
    /// List the launch site catalog
    Sites,
}

/// Batch job output document
#[derive(Serialize)]
struct ForecastReport<'a> {
    generated: DateTime<Utc>,
    forecasts: &'a [SiteForecast],
}

fn init_logging(config: &ForecastConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

fn today(config: &ForecastConfig) -> Result<NaiveDate> {
    let tz = config.timezone()?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

fn write_report(path: &Path, forecasts: &[SiteForecast]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let report = ForecastReport {
        generated: Utc::now(),
        forecasts,
    };
    let json = serde_json::to_string_pretty(&report).map_err(ForecastError::from)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write forecast to {}", path.display()))?;
    Ok(())
}

async fn run_fetch(config: &ForecastConfig, output: Option<PathBuf>) -> Result<()> {
    let sites = launch_sites();
    info!("Fetching data for {} sites", sites.len());

    let client = OpenMeteoClient::new(&config.weather)?;
    let spacer = RequestSpacer::new(Duration::from_millis(config.weather.min_request_interval_ms));
    let mut cache = ResponseCache::new(config.cache_ttl());
    let mut fetcher = ForecastFetcher::new(client, spacer, &mut cache);

    let forecasts = fetcher
        .forecast_all(&sites, today(config)?, config.horizon())
        .await;

    let path = output.unwrap_or_else(|| PathBuf::from(&config.output.path));
    write_report(&path, &forecasts)?;
    println!(
        "Written {} forecasts to {}",
        forecasts.len(),
        path.display()
    );

    let mut ranked = forecasts;
    rank_sites(&mut ranked);
    for forecast in ranked.iter().take(5) {
        println!(
            "  {:<16} {:>2}/14",
            forecast.site.name,
            weekly_score(forecast)
        );
    }
    Ok(())
}

async fn run_site(config: &ForecastConfig, id: &str) -> Result<()> {
    let site = find_site(id)
        .ok_or_else(|| ForecastError::validation(format!("Unknown site '{id}'")))?;

    let client = OpenMeteoClient::new(&config.weather)?;
    let spacer = RequestSpacer::new(Duration::from_millis(config.weather.min_request_interval_ms));
    let mut cache = ResponseCache::new(config.cache_ttl());
    let mut fetcher = ForecastFetcher::new(client, spacer, &mut cache);

    let forecast = fetcher
        .forecast_site(&site, today(config)?, config.horizon())
        .await;

    println!(
        "{} · {}ft · {} · max {}mph · {}",
        site.name, site.elevation, site.orientation, site.max_wind, site.site_type
    );
    for (index, day) in forecast.forecast.iter().enumerate() {
        println!(
            "{:<10} {:<8} S:{:<7} T:{:<8} {:<24} top {:<6} launch {:<8} XC {} ({})",
            day_label(index, day.date),
            day.flyability.to_string(),
            soaring_label(&site, day).to_string(),
            thermal_label(day.thermal_flyability),
            wind_text(day),
            ceiling_text(day.top_of_lift),
            day.launch_time,
            day.xc_potential,
            day.xc_reason,
        );
        println!("           {}", day.conditions);
        if let Some(rain) = &day.rain_info {
            println!("           {rain}");
        }
    }
    Ok(())
}

fn run_sites() {
    for site in launch_sites() {
        println!(
            "{:<14} {:<16} {:>5}ft {:<8} max {:>2}mph {}",
            site.id, site.name, site.elevation, site.orientation, site.max_wind, site.site_type
        );
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ForecastConfig::load_from_path(cli.config)?;
    init_logging(&config, cli.verbose)?;

    match cli.command {
        Command::Fetch { output } => run_fetch(&config, output).await,
        Command::Site { id } => run_site(&config, &id).await,
        Command::Sites => {
            run_sites();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ForecastError>() {
                Some(error) => eprintln!("{}", error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_logging_installs_once() {
        let config = ForecastConfig::default();
        assert!(init_logging(&config, false).is_ok());

        let err = init_logging(&config, true).unwrap_err();
        assert!(err.to_string().starts_with("Failed to initialize logging"));
    }
}
