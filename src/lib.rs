//! Session-cached data for comparing two football teams.
//!
//! The [`Orchestrator`] fetches league standings, recent form and team pages
//! on demand, keeps them in a [`SessionCache`] and hands back a
//! [`ComparisonResult`] that formats into a nine-column [`ComparisonTable`].
//!
//! ```no_run
//! # async fn example() -> matchup::Result<()> {
//! use std::sync::Arc;
//!
//! use matchup::{ComparisonRequest, Config, MatchupClient, Orchestrator, SessionCache};
//!
//! let client = MatchupClient::new(Config::from_env()?)?;
//! let orchestrator = Orchestrator::new(client, Arc::new(SessionCache::new()));
//!
//! let bundle = orchestrator.ensure_league_data("Premier League").await;
//! println!("{} teams", bundle.teams.len());
//!
//! let request = ComparisonRequest::new("Premier League", "Arsenal", "Liverpool");
//! if let Some(result) = orchestrator.ensure_comparison_data(&request).await? {
//!     println!("{:#?}", result.table());
//! }
//! # Ok(())
//! # }
//! ```

pub use cache::{CacheValue, Category, SessionCache};
pub use client::MatchupClient;
pub use comparison::{ComparisonResult, TeamView};
pub use config::Config;
pub use error::{MatchupError, Result};
pub use export::{comparison_rows, export_comparisons};
pub use fetch::Fetcher;
pub use model::*;
pub use orchestrator::{LeagueBundle, Orchestrator};
pub use resolve::SlugTable;
pub use crate::scraper::team_page::{
    extract_coach, extract_recent_fixtures, RECENT_FIXTURE_DAYS,
};
pub use table::{ComparisonRow, ComparisonTable, COLUMNS, EDITABLE_COLUMNS};

mod cache;
mod claims;
mod client;
mod comparison;
mod config;
mod error;
mod export;
mod fetch;
mod model;
mod orchestrator;
mod resolve;
mod scraper;
mod table;
