use anyhow::Context;
use fight_ratings::config::{RatingConfig, SystemConfig};
use fight_ratings::data_processing::{LogOrder, arrange, read_match_log, write_slice_to_file};
use fight_ratings::engine::RatingEngine;
use fight_ratings::summary::{log_extremes, make_top_leaderboard, print_ratings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const TOP_N: usize = 50;

fn get_config_from_args(args: &[String]) -> anyhow::Result<RatingConfig> {
    if args[1] == "file:" {
        return RatingConfig::from_file(&args[2]).context("Failed to load config");
    }
    Ok(RatingConfig {
        match_log: PathBuf::from(&args[2]),
        log_order: LogOrder::AsIs,
        output_dir: args
            .get(3)
            .map_or_else(|| PathBuf::from("data/output"), PathBuf::from),
        system: SystemConfig::from_name(&args[1]).map_err(anyhow::Error::msg)?,
    })
}

/// Rates an entire match log and writes current, peak, top-50 and per-bout tables
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        tracing::error!(
            "Usage: {0} system_name match_log.csv [output_dir]\n       {0} file: config.json5",
            args[0]
        );
        return Ok(());
    }
    let config = get_config_from_args(&args)?;

    let mut bouts = read_match_log(&config.match_log)
        .with_context(|| format!("Failed to read match log {:?}", config.match_log))?;
    arrange(&mut bouts, config.log_order);

    let report = RatingEngine::new(config.system.build()).run(&bouts)?;
    tracing::info!("Finished in {:.3} seconds", report.secs_elapsed);
    log_extremes(&report.players, TOP_N);

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Could not create {:?}", config.output_dir))?;
    print_ratings(&report.players, &report.history, &config.output_dir)?;
    write_slice_to_file(
        &make_top_leaderboard(&report.players, TOP_N),
        config.output_dir.join(format!("top_{}_fighters.csv", TOP_N)),
    )?;
    Ok(())
}
