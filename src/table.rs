use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::comparison::{ComparisonResult, TeamView};
use crate::model::Outcome;

/// Column headers, in display order.
pub const COLUMNS: [&str; 9] = [
    "Team",
    "Position, points, goals",
    "Home/away record, goals",
    "Form, last 5",
    "Missing key players",
    "Coach",
    "Head to head, last 3",
    "Matches in the last 7 days",
    "Other comments",
];

/// Columns the user fills in by hand.
pub const EDITABLE_COLUMNS: [usize; 3] = [4, 6, 8];

const FIXTURE_DISPLAY_FORMAT: &str = "%d %b. %y";

/// One team's row of the comparison table. Missing data renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub team: String,
    pub standing: String,
    pub venue_record: String,
    pub form: String,
    pub key_absences: String,
    pub coach: String,
    pub head_to_head: String,
    pub recent_fixtures: String,
    pub comments: String,
}

impl ComparisonRow {
    fn from_view(view: &TeamView<'_>) -> Self {
        Self {
            team: format!("{}: {}", view.side(), view.name()),
            standing: view
                .standing()
                .map(|e| {
                    let position = e.position.map(|p| p.to_string()).unwrap_or_default();
                    format!(
                        "{position}, {}p, {}:{}",
                        e.points, e.goals_for, e.goals_against
                    )
                })
                .unwrap_or_default(),
            venue_record: view
                .venue_record()
                .map(|e| {
                    format!(
                        "{}-{}-{}, {}p, {}:{}",
                        e.wins, e.draws, e.losses, e.points, e.goals_for, e.goals_against
                    )
                })
                .unwrap_or_default(),
            form: view
                .form()
                .map(|form| {
                    format!(
                        "{}-{}-{}",
                        form.count(Outcome::Win),
                        form.count(Outcome::Draw),
                        form.count(Outcome::Lose)
                    )
                })
                .unwrap_or_default(),
            key_absences: String::new(),
            coach: view
                .coach()
                .map(|c| format!("{}, {}-{}-{}", c.name, c.wins, c.draws, c.losses))
                .unwrap_or_default(),
            head_to_head: String::new(),
            recent_fixtures: view
                .recent_fixtures()
                .map(|dates| format_dates(&dates))
                .unwrap_or_default(),
            comments: String::new(),
        }
    }

    /// Cell values in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 9] {
        [
            self.team.as_str(),
            self.standing.as_str(),
            self.venue_record.as_str(),
            self.form.as_str(),
            self.key_absences.as_str(),
            self.coach.as_str(),
            self.head_to_head.as_str(),
            self.recent_fixtures.as_str(),
            self.comments.as_str(),
        ]
    }

    /// Mutable access to a user-editable cell; `None` for computed columns.
    pub fn editable_cell_mut(&mut self, column: usize) -> Option<&mut String> {
        match column {
            4 => Some(&mut self.key_absences),
            6 => Some(&mut self.head_to_head),
            8 => Some(&mut self.comments),
            _ => None,
        }
    }
}

/// The two-row table for one comparison, home first.
///
/// Unlike [`ComparisonResult`] this is a snapshot, so hand-written cells
/// survive until export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonTable {
    pub home: ComparisonRow,
    pub away: ComparisonRow,
}

impl ComparisonTable {
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self {
            home: ComparisonRow::from_view(&result.home()),
            away: ComparisonRow::from_view(&result.away()),
        }
    }

    pub fn rows(&self) -> [&ComparisonRow; 2] {
        [&self.home, &self.away]
    }
}

fn format_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format(FIXTURE_DISPLAY_FORMAT))
        .join(", ")
}
