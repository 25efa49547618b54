use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{MatchupError, Result};
use crate::model::{StandingsEntry, StandingsKind, StandingsTable};
use crate::scraper;

#[derive(Debug, Deserialize)]
struct StandingsResponse {
    standings: Vec<StandingsGroup>,
}

#[derive(Debug, Deserialize)]
struct StandingsGroup {
    rows: Vec<StandingsRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingsRow {
    team: TeamName,
    position: u32,
    matches: u32,
    wins: u32,
    draws: u32,
    losses: u32,
    scores_for: u32,
    scores_against: u32,
    points: u32,
}

#[derive(Debug, Deserialize)]
struct TeamName {
    name: String,
}

#[instrument(skip(client))]
pub(crate) async fn get_standings(
    client: &reqwest::Client,
    url: &str,
    kind: StandingsKind,
) -> Result<StandingsTable> {
    let body = scraper::get_body(client, url).await?;
    let table = parse_standings(&body, kind, url)?;
    debug!(count = table.entries.len(), %kind, "parsed standings");
    Ok(table)
}

pub(crate) fn parse_standings(
    body: &str,
    kind: StandingsKind,
    url: &str,
) -> Result<StandingsTable> {
    let response: StandingsResponse =
        serde_json::from_str(body).map_err(|source| MatchupError::Json {
            url: url.to_owned(),
            source,
        })?;

    // The first group is the whole league; later groups are split tables.
    let group = response
        .standings
        .into_iter()
        .next()
        .ok_or(MatchupError::ElementNotFound {
            context: "standings group",
        })?;

    let entries = group
        .rows
        .into_iter()
        .map(|row| StandingsEntry {
            team: row.team.name,
            position: (kind == StandingsKind::Overall).then_some(row.position),
            matches: row.matches,
            wins: row.wins,
            draws: row.draws,
            losses: row.losses,
            goals_for: row.scores_for,
            goals_against: row.scores_against,
            points: row.points,
        })
        .collect();

    Ok(StandingsTable { kind, entries })
}
