use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{instrument, warn};

use crate::config::Config;
use crate::error::{MatchupError, Result};
use crate::fetch::Fetcher;
use crate::model::*;
use crate::scraper;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// HTTP implementation of [`Fetcher`] against the configured sites.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> matchup::Result<()> {
/// use matchup::{Config, Fetcher, League, MatchupClient};
///
/// let client = MatchupClient::new(Config::from_env()?)?;
/// let league = League::find("Premier League").unwrap();
/// let table = client.fetch_overall_standings(league).await?;
/// println!("{} teams", table.entries.len());
/// # Ok(())
/// # }
/// ```
pub struct MatchupClient {
    http: reqwest::Client,
    config: Config,
}

impl MatchupClient {
    /// Create a client with browser-like headers and the configured timeout.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers(&config))
            .timeout(config.timeout)
            .build()
            .map_err(MatchupError::ClientBuild)?;
        Ok(Self { http, config })
    }
}

fn default_headers(config: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("accept", HeaderValue::from_static("*/*"));
    headers.insert(
        "accept-language",
        HeaderValue::from_static("en-GB,en;q=0.9,sv;q=0.8"),
    );
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    if let Some(origin) = &config.origin {
        match HeaderValue::from_str(origin) {
            Ok(value) => {
                headers.insert("origin", value.clone());
                headers.insert("referer", value);
            }
            Err(_) => warn!(origin = %origin, "ignoring origin that is not a valid header value"),
        }
    }
    headers
}

#[async_trait]
impl Fetcher for MatchupClient {
    #[instrument(skip(self, league), fields(league = league.name))]
    async fn fetch_overall_standings(&self, league: &League) -> Result<StandingsTable> {
        let url = scraper::league_url(&self.config.total_url, league.slug);
        scraper::standings::get_standings(&self.http, &url, StandingsKind::Overall).await
    }

    #[instrument(skip(self, league), fields(league = league.name))]
    async fn fetch_home_standings(&self, league: &League) -> Result<StandingsTable> {
        let url = scraper::league_url(&self.config.home_url, league.slug);
        scraper::standings::get_standings(&self.http, &url, StandingsKind::Home).await
    }

    #[instrument(skip(self, league), fields(league = league.name))]
    async fn fetch_away_standings(&self, league: &League) -> Result<StandingsTable> {
        let url = scraper::league_url(&self.config.away_url, league.slug);
        scraper::standings::get_standings(&self.http, &url, StandingsKind::Away).await
    }

    #[instrument(skip(self, league), fields(league = league.name))]
    async fn fetch_recent_form(&self, league: &League) -> Result<FormTable> {
        let url = scraper::league_url(&self.config.league_url, league.slug);
        scraper::form::get_recent_form(&self.http, &url).await
    }

    #[instrument(skip(self))]
    async fn fetch_team_page(&self, source_id: &str) -> Result<TeamPage> {
        scraper::team_page::get_team_page(&self.http, &self.config.team_url, source_id).await
    }
}
