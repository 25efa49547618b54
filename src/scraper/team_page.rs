use ::scraper::{Html, Selector};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use tracing::{debug, instrument, warn};

use crate::error::{MatchupError, Result};
use crate::model::{CoachRecord, RecentFixtures, TeamPage};
use crate::scraper::{self, select_text};

/// Fixtures older than this many days are not part of a team's recent fixtures.
pub const RECENT_FIXTURE_DAYS: i64 = 7;

const FIXTURE_DATE_FORMAT: &str = "%d %b. %Y";

#[instrument(skip(client))]
pub(crate) async fn get_team_page(
    client: &reqwest::Client,
    base_url: &str,
    source_id: &str,
) -> Result<TeamPage> {
    let url = format!("{base_url}{source_id}");
    let body = scraper::get_body(client, &url).await?;
    debug!(source_id, bytes = body.len(), "fetched team page");
    Ok(TeamPage {
        source_id: source_id.to_owned(),
        body,
    })
}

/// Extract the current coach and their record from a team page.
pub fn extract_coach(page: &TeamPage) -> Result<CoachRecord> {
    let document = Html::parse_document(&page.body);

    let stats_selector = Selector::parse("div#mod_coachStats")?;
    let stats = document
        .select(&stats_selector)
        .next()
        .ok_or(MatchupError::ElementNotFound {
            context: "coach stats",
        })?;

    let name_selector = Selector::parse("p.mb5")?;
    let name = select_text(&stats, &name_selector);
    if name.is_empty() {
        return Err(MatchupError::ElementNotFound {
            context: "coach name",
        });
    }

    // Matches, wins, draws and losses, in that order.
    let line_selector = Selector::parse("div.main-line.mt10.mb5")?;
    let (matches, wins, draws, losses) = stats
        .select(&line_selector)
        .map(|line| line.text().collect::<String>().trim().parse::<u32>())
        .take(4)
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .collect_tuple::<(u32, u32, u32, u32)>()
        .ok_or(MatchupError::ElementNotFound {
            context: "coach record",
        })?;

    Ok(CoachRecord {
        name,
        matches,
        wins,
        draws,
        losses,
    })
}

/// Extract the dates of fixtures played in the [`RECENT_FIXTURE_DAYS`] before `today`.
///
/// The page prints dates without a year; a date is placed in the current year
/// unless that would put it after `today`, in which case it belongs to last year.
pub fn extract_recent_fixtures(page: &TeamPage, today: NaiveDate) -> Result<RecentFixtures> {
    let document = Html::parse_document(&page.body);

    let spree_selector = Selector::parse("div.spree-content")?;
    let spree = document
        .select(&spree_selector)
        .next()
        .ok_or(MatchupError::ElementNotFound {
            context: "fixture list",
        })?;

    let date_selector = Selector::parse("div.date.color-grey2")?;
    let dates = spree
        .select(&date_selector)
        .filter_map(|div| {
            let text = div.text().collect::<String>();
            let text = text.trim();
            match parse_fixture_date(text, today) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(error = %e, text, "skipping unparsable fixture date");
                    None
                }
            }
        })
        .filter(|date| is_recent(*date, today))
        .collect();

    Ok(dates)
}

fn parse_fixture_date(text: &str, today: NaiveDate) -> Result<NaiveDate> {
    let year = today.year();
    let date = NaiveDate::parse_from_str(&format!("{text} {year}"), FIXTURE_DATE_FORMAT)?;
    if date > today {
        return Ok(NaiveDate::parse_from_str(
            &format!("{text} {}", year - 1),
            FIXTURE_DATE_FORMAT,
        )?);
    }
    Ok(date)
}

fn is_recent(date: NaiveDate, today: NaiveDate) -> bool {
    let age = (today - date).num_days();
    (0..RECENT_FIXTURE_DAYS).contains(&age)
}
