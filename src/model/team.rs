use chrono::NaiveDate;
use serde::Serialize;

/// The current coach of a team and their record at the club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachRecord {
    pub name: String,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

/// Dates of the fixtures a team played in the trailing week.
pub type RecentFixtures = Vec<NaiveDate>;

/// Raw body of a team's page.
///
/// Kept unparsed so it can cross await points; the coach record and the
/// recent fixtures are both extracted from the same page.
#[derive(Debug, Clone)]
pub struct TeamPage {
    pub source_id: String,
    pub body: String,
}
