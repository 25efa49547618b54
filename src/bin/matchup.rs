use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchup::{
    export_comparisons, ComparisonRequest, ComparisonTable, Config, League, MatchupClient,
    Orchestrator, SessionCache, COLUMNS,
};

/// Compare football teams side by side.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// League the teams play in.
    #[arg(short, long, default_value = "Premier League")]
    league: String,

    /// A fixture as HOME:AWAY. Repeat for several comparisons.
    #[arg(short, long = "pair", value_parser = parse_pair)]
    pairs: Vec<(String, String)>,

    /// Write the comparisons to this .xlsx file.
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the league's teams and exit.
    #[arg(long)]
    list_teams: bool,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((home, away)) if !home.trim().is_empty() && !away.trim().is_empty() => {
            Ok((home.trim().to_string(), away.trim().to_string()))
        }
        _ => Err(format!("expected HOME:AWAY, got {s:?}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if League::find(&args.league).is_none() {
        let known = League::all().iter().map(|l| l.name).collect::<Vec<_>>();
        bail!("unknown league {:?}; known leagues: {}", args.league, known.join(", "));
    }

    let client = MatchupClient::new(Config::from_env()?)?;
    let orchestrator = Orchestrator::new(client, Arc::new(SessionCache::new()));

    let bundle = orchestrator.ensure_league_data(&args.league).await;
    if args.list_teams {
        for team in bundle.teams {
            println!("{team}");
        }
        return Ok(());
    }
    if !bundle.is_complete() {
        eprintln!("warning: some league data could not be fetched; affected cells are blank");
    }

    let mut tables = Vec::with_capacity(args.pairs.len());
    for (home, away) in &args.pairs {
        let request = ComparisonRequest::new(args.league.as_str(), home.as_str(), away.as_str());
        let result = orchestrator
            .ensure_comparison_data(&request)
            .await
            .with_context(|| format!("cannot compare {home} and {away}"))?;
        if let Some(result) = result {
            tables.push(result.table());
        }
    }

    for (i, table) in tables.iter().enumerate() {
        print_table(i + 1, table);
    }

    if let Some(path) = args.export {
        export_comparisons(&path, &tables)
            .with_context(|| format!("failed writing {}", path.display()))?;
        println!("exported {} comparisons to {}", tables.len(), path.display());
    }

    Ok(())
}

fn print_table(number: usize, table: &ComparisonTable) {
    println!("Match {number}");
    for row in table.rows() {
        for (column, cell) in COLUMNS.iter().zip(row.cells()) {
            if !cell.is_empty() {
                println!("  {column}: {cell}");
            }
        }
        println!();
    }
}
