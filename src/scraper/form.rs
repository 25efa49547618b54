use ::scraper::{Html, Selector};
use tracing::{debug, instrument, warn};

use crate::error::{MatchupError, Result};
use crate::model::{FormTable, Outcome, RecentForm};
use crate::scraper::{self, select_text};

#[instrument(skip(client))]
pub(crate) async fn get_recent_form(client: &reqwest::Client, url: &str) -> Result<FormTable> {
    let body = scraper::get_body(client, url).await?;
    let form = parse_recent_form(&body)?;
    debug!(count = form.len(), "parsed recent form");
    Ok(form)
}

pub(crate) fn parse_recent_form(body: &str) -> Result<FormTable> {
    let document = Html::parse_document(body);

    let table_selector = Selector::parse("table.table")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(MatchupError::ElementNotFound {
            context: "league table",
        })?;

    let row_selector = Selector::parse("td.name")?;
    let team_selector = Selector::parse("span.team-name")?;
    let result_selector = Selector::parse("span.bg-match-res")?;

    let mut form = FormTable::new();
    for row in table.select(&row_selector) {
        let team = select_text(&row, &team_selector);
        if team.is_empty() {
            continue;
        }

        // The outcome is the last class on each result badge.
        let outcomes = row
            .select(&result_selector)
            .filter_map(|span| {
                let class = span.value().attr("class")?.split_whitespace().last()?;
                match class.parse::<Outcome>() {
                    Ok(outcome) => Some(outcome),
                    Err(_) => {
                        warn!(team = %team, class, "skipping unknown match result");
                        None
                    }
                }
            })
            .collect();

        form.insert(team, RecentForm::new(outcomes));
    }

    Ok(form)
}
