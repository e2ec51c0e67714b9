// Rates a match log, then reads fighter names from stdin (one per line,
// followed by "DONE") and prints each one's rating and bout history.
use anyhow::Context;
use fight_ratings::config::RatingConfig;
use fight_ratings::data_processing::{arrange, read_match_log};
use fight_ratings::engine::RatingEngine;
use fight_ratings::summary::competitor_history;
use io::{BufRead, Write};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        tracing::error!("Usage: {} config.json5", args[0]);
        return Ok(());
    }

    let config = RatingConfig::from_file(&args[1]).context("Failed to load config")?;
    let mut bouts = read_match_log(&config.match_log)?;
    arrange(&mut bouts, config.log_order);
    let report = RatingEngine::new(config.system.build()).run(&bouts)?;

    println!("Type some fighter names on separate lines, followed by \"DONE\":");

    let (stdin, stdout) = (io::stdin(), io::stdout());
    let mut out = io::BufWriter::new(stdout.lock());
    for name in stdin.lock().lines() {
        let name = name.context("Failed stdin read")?;
        let name = name.trim();
        if name == "DONE" {
            break;
        }
        let Some(fighter) = competitor_history(&report.players, &report.history, name) else {
            writeln!(out, "{} has no recorded bouts.", name)?;
            continue;
        };
        writeln!(
            out,
            "{}: rating {:.2}, peak {:.2}",
            name, fighter.rating.rating, fighter.rating.peak_rating
        )?;
        if let Some(u) = fighter.rating.uncertainty {
            writeln!(out, "  deviation {:.1}, volatility {:.4}", u.deviation, u.volatility)?;
        }
        for bout in fighter.bouts {
            let (start, end) = if bout.fighter_1 == name {
                (bout.fighter_1_rating_start, bout.fighter_1_rating_end)
            } else {
                (bout.fighter_2_rating_start, bout.fighter_2_rating_end)
            };
            writeln!(
                out,
                "  #{:<6} {:<28} {} vs {} ({:?}) {:.2} -> {:.2}",
                bout.bout_index, bout.event, bout.fighter_1, bout.fighter_2, bout.result, start, end
            )?;
        }
        out.flush()?;
    }
    Ok(())
}
