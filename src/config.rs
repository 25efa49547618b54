use std::env;
use std::time::Duration;

use tracing::debug;

use crate::error::{MatchupError, Result};

/// Placeholder replaced by a league's slug in standings and form URLs.
pub const LEAGUE_PLACEHOLDER: &str = "$LEAGUE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

const TIMEOUT_VAR: &str = "MATCHUP_TIMEOUT_SECS";

/// Where each source lives and how patient the HTTP client is.
///
/// Standings and form URLs are templates containing [`LEAGUE_PLACEHOLDER`].
/// The team URL is a base that the team's slug is appended to.
#[derive(Debug, Clone)]
pub struct Config {
    pub total_url: String,
    pub home_url: String,
    pub away_url: String,
    pub league_url: String,
    pub team_url: String,
    /// Sent as `origin` and `referer`; the stats API rejects requests without them.
    pub origin: Option<String>,
    pub timeout: Duration,
}

impl Config {
    /// Read the configuration from `MATCHUP_*` environment variables,
    /// loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }

        let timeout = parse_timeout(env::var(TIMEOUT_VAR).ok().as_deref())?;

        Ok(Self {
            total_url: required("MATCHUP_TOTAL_URL")?,
            home_url: required("MATCHUP_HOME_URL")?,
            away_url: required("MATCHUP_AWAY_URL")?,
            league_url: required("MATCHUP_LEAGUE_URL")?,
            team_url: required("MATCHUP_TEAM_URL")?,
            origin: env::var("MATCHUP_ORIGIN").ok(),
            timeout,
        })
    }

    /// A configuration whose every source lives under `base`.
    ///
    /// Used to point the client at a local mock server.
    pub fn with_base_url(base: &str) -> Self {
        Self {
            total_url: format!("{base}/standings/{LEAGUE_PLACEHOLDER}/total"),
            home_url: format!("{base}/standings/{LEAGUE_PLACEHOLDER}/home"),
            away_url: format!("{base}/standings/{LEAGUE_PLACEHOLDER}/away"),
            league_url: format!("{base}/competition/{LEAGUE_PLACEHOLDER}"),
            team_url: format!("{base}/team/"),
            origin: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn required(var: &'static str) -> Result<String> {
    env::var(var).map_err(|source| MatchupError::EnvVar { var, source })
}

/// Whole seconds, at least one. Unset means the default.
fn parse_timeout(value: Option<&str>) -> Result<Duration> {
    let Some(value) = value else {
        return Ok(DEFAULT_TIMEOUT);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(MatchupError::InvalidEnvVar {
            var: TIMEOUT_VAR,
            value: value.to_owned(),
        }),
    }
}
