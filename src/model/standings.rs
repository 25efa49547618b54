use serde::Serialize;

/// Which slice of the season a standings table covers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum StandingsKind {
    Overall,
    Home,
    Away,
}

/// One team's row in a standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub team: String,
    /// League position; only present in the overall table.
    pub position: Option<u32>,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

/// A league's standings of one [`StandingsKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandingsTable {
    pub kind: StandingsKind,
    pub entries: Vec<StandingsEntry>,
}

impl StandingsTable {
    pub fn entry(&self, team: &str) -> Option<&StandingsEntry> {
        self.entries.iter().find(|e| e.team == team)
    }
}
