use serde::Serialize;

/// A competition with a fixed roster of teams for the season.
#[derive(Debug, Clone, Serialize)]
pub struct League {
    pub name: &'static str,
    /// Identifier substituted into the standings and form URLs.
    pub slug: &'static str,
    pub teams: &'static [&'static str],
}

impl League {
    /// Look up a built-in league by its display name.
    pub fn find(name: &str) -> Option<&'static League> {
        LEAGUES.iter().find(|league| league.name == name)
    }

    /// All built-in leagues, in display order.
    pub fn all() -> &'static [League] {
        LEAGUES
    }

    pub fn contains(&self, team: &str) -> bool {
        self.teams.contains(&team)
    }
}

static LEAGUES: &[League] = &[
    League {
        name: "Premier League",
        slug: "premier_league",
        teams: &[
            "Arsenal",
            "Liverpool",
            "Manchester City",
            "Tottenham Hotspur",
            "Aston Villa",
            "Manchester United",
            "West Ham",
            "Newcastle",
            "Chelsea",
            "Brighton & Hove Albion",
            "Wolverhampton",
            "AFC Bournemouth",
            "Fulham",
            "Crystal Palace",
            "Brentford",
            "Everton",
            "Nottingham Forest",
            "Luton Town",
            "Burnley",
            "Sheffield United",
        ],
    },
    League {
        name: "Championship",
        slug: "championship",
        teams: &[
            "Leicester City",
            "Leeds United",
            "Ipswich Town",
            "Southampton",
            "West Bromwich Albion",
            "Norwich City",
            "Hull City",
            "Coventry City",
            "Middlesbrough",
            "Preston North End",
            "Cardiff City",
            "Bristol City",
            "Sunderland",
            "Swansea City",
            "Watford",
            "Millwall",
            "Stoke City",
            "Queens Park Rangers",
            "Blackburn Rovers",
            "Plymouth Argyle",
            "Sheffield Wednesday",
            "Birmingham City",
            "Huddersfield Town",
            "Rotherham United",
        ],
    },
];
