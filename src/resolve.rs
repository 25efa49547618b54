use std::collections::HashMap;

use crate::error::{MatchupError, Result};

/// Maps team display names to the team page's source identifier.
///
/// Several display names can map to the same identifier, since the standings
/// API and the league pages do not agree on short names.
#[derive(Debug, Clone)]
pub struct SlugTable {
    slugs: HashMap<String, String>,
}

impl SlugTable {
    pub fn new(slugs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            slugs: slugs.into_iter().collect(),
        }
    }

    /// Add or replace a mapping.
    pub fn insert(&mut self, team: impl Into<String>, source_id: impl Into<String>) {
        self.slugs.insert(team.into(), source_id.into());
    }

    /// Resolve a team name to its source identifier.
    ///
    /// There is no fallback slug: an unmapped team is an error the caller
    /// has to surface.
    pub fn resolve_source_id(&self, team: &str) -> Result<&str> {
        self.slugs
            .get(team)
            .map(String::as_str)
            .ok_or_else(|| MatchupError::NameResolution {
                team: team.to_owned(),
            })
    }

    /// Every display name that resolves to `source_id`.
    pub fn aliases<'a>(&'a self, source_id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.slugs
            .iter()
            .filter(move |(_, id)| *id == source_id)
            .map(|(team, _)| team.as_str())
    }
}

impl Default for SlugTable {
    fn default() -> Self {
        Self::new(
            BUILTIN_SLUGS
                .iter()
                .map(|(team, slug)| (team.to_string(), slug.to_string())),
        )
    }
}

static BUILTIN_SLUGS: &[(&str, &str)] = &[
    // Premier League
    ("Arsenal", "arsenal"),
    ("Liverpool", "liverpool"),
    ("Manchester City", "manchester-city-fc"),
    ("Tottenham Hotspur", "tottenham-hotspur-fc"),
    ("Tottenham", "tottenham-hotspur-fc"),
    ("Aston Villa", "aston-villa-fc"),
    ("Manchester United", "manchester-united-fc"),
    ("West Ham", "west-ham-united"),
    ("Newcastle", "newcastle-united-fc"),
    ("Brighton & Hove Albion", "brighton-amp-hov"),
    ("Brighton", "brighton-amp-hov"),
    ("Wolves", "wolverhampton"),
    ("Wolverhampton", "wolverhampton"),
    ("AFC Bournemouth", "afc-bournemouth"),
    ("Chelsea", "chelsea-fc"),
    ("Fulham", "fulham"),
    ("Crystal Palace", "crystal-palace-fc"),
    ("Brentford", "brentford"),
    ("Everton", "everton-fc"),
    ("Nottingham Forest", "nottingham-forest-fc"),
    ("Luton Town", "luton-town-fc"),
    ("Burnley", "burnley-fc"),
    ("Sheffield United", "sheffield-united"),
    // Championship
    ("Leicester", "leicester-city-fc"),
    ("Leicester City", "leicester-city-fc"),
    ("Leeds United", "leeds-united-afc"),
    ("Ipswich Town", "ipswich-town-fc"),
    ("Southampton", "southampton-fc"),
    ("West Bromwich Albion", "west-bromwich"),
    ("Norwich City", "norwich-city-fc"),
    ("Hull City", "hull-city"),
    ("Coventry City", "coventry-city"),
    ("Middlesbrough", "middlesbrough-fc"),
    ("Preston North End", "preston-north-end"),
    ("Cardiff City", "cardiff-city-fc"),
    ("Bristol City", "bristol-city-fc"),
    ("Sunderland", "sunderland-afc"),
    ("Swansea City", "swansea-city-afc"),
    ("Watford", "watford-fc"),
    ("Millwall", "millwall-fc"),
    ("Stoke City", "stoke-city"),
    ("Queens Park Rangers", "queens-park-rangers-fc"),
    ("Blackburn Rovers", "blackburn-rovers-fc"),
    ("Plymouth Argyle", "plymouth-argyle"),
    ("Sheffield Wednesday", "sheffield-wednesday-fc"),
    ("Birmingham City", "birmingham-city-fc"),
    ("Huddersfield Town", "huddersfield-town-fc"),
    ("Rotherham United", "rotherham-united"),
];
