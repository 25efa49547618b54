use async_trait::async_trait;

use crate::error::Result;
use crate::model::{FormTable, League, StandingsKind, StandingsTable, TeamPage};

/// The network-facing sources the orchestrator pulls from.
///
/// Every method is one round trip. Implementations report transport failures
/// (see [`crate::MatchupError::is_transport`]) separately from parse failures.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_overall_standings(&self, league: &League) -> Result<StandingsTable>;
    async fn fetch_home_standings(&self, league: &League) -> Result<StandingsTable>;
    async fn fetch_away_standings(&self, league: &League) -> Result<StandingsTable>;
    async fn fetch_recent_form(&self, league: &League) -> Result<FormTable>;
    async fn fetch_team_page(&self, source_id: &str) -> Result<TeamPage>;

    async fn fetch_standings(
        &self,
        league: &League,
        kind: StandingsKind,
    ) -> Result<StandingsTable> {
        match kind {
            StandingsKind::Overall => self.fetch_overall_standings(league).await,
            StandingsKind::Home => self.fetch_home_standings(league).await,
            StandingsKind::Away => self.fetch_away_standings(league).await,
        }
    }
}
