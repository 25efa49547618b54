pub(crate) mod form;
pub(crate) mod standings;
pub(crate) mod team_page;

use ::scraper::{ElementRef, Selector};
use tracing::debug;

use crate::config::LEAGUE_PLACEHOLDER;
use crate::error::{MatchupError, Result};

/// Fetch a URL and return the response body, failing on non-success statuses.
pub(crate) async fn get_body(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| MatchupError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(MatchupError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| MatchupError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}

/// Substitute a league slug into a URL template.
pub(crate) fn league_url(template: &str, league_slug: &str) -> String {
    template.replace(LEAGUE_PLACEHOLDER, league_slug)
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .and_then(|d| d.text().map(|t| t.trim()).find(|t| !t.is_empty()))
        .unwrap_or_default()
        .trim()
        .replace(['\n', '\t'], "")
        .to_string()
}
