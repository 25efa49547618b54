use serde::Serialize;

/// A requested head-to-head comparison.
///
/// Any empty field makes the request incomplete, which is a no-op rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ComparisonRequest {
    pub league: String,
    pub home: String,
    pub away: String,
}

impl ComparisonRequest {
    pub fn new(
        league: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
    ) -> Self {
        Self {
            league: league.into(),
            home: home.into(),
            away: away.into(),
        }
    }

    /// Whether the request names a league and two distinct teams.
    pub fn is_actionable(&self) -> bool {
        !self.league.is_empty()
            && !self.home.is_empty()
            && !self.away.is_empty()
            && self.home != self.away
    }
}

/// Which side of the fixture a team is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum Side {
    Home,
    Away,
}
