use std::collections::HashMap;

use serde::Serialize;

/// Number of past matches kept in a team's form.
pub const FORM_LENGTH: usize = 5;

/// Result of a single match from one team's point of view.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Lose,
}

/// The last [`FORM_LENGTH`] outcomes for a team, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecentForm(Vec<Outcome>);

impl RecentForm {
    /// Keeps only the newest [`FORM_LENGTH`] outcomes.
    pub fn new(mut outcomes: Vec<Outcome>) -> Self {
        if outcomes.len() > FORM_LENGTH {
            outcomes.drain(..outcomes.len() - FORM_LENGTH);
        }
        Self(outcomes)
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.0
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.0.iter().filter(|o| **o == outcome).count()
    }
}

/// Recent form for every team in a league, keyed by team name.
pub type FormTable = HashMap<String, RecentForm>;
