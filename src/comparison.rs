use std::sync::Arc;

use crate::cache::SessionCache;
use crate::model::{
    CoachRecord, ComparisonRequest, RecentFixtures, RecentForm, Side, StandingsEntry,
    StandingsKind,
};
use crate::table::ComparisonTable;

/// A read-only view over the session cache for one comparison.
///
/// Nothing is copied out of the cache when the result is built; every
/// accessor reads the cache as it is at call time.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    cache: Arc<SessionCache>,
    request: ComparisonRequest,
}

impl ComparisonResult {
    pub(crate) fn new(cache: Arc<SessionCache>, request: ComparisonRequest) -> Self {
        Self { cache, request }
    }

    pub fn request(&self) -> &ComparisonRequest {
        &self.request
    }

    pub fn home(&self) -> TeamView<'_> {
        self.team(Side::Home)
    }

    pub fn away(&self) -> TeamView<'_> {
        self.team(Side::Away)
    }

    pub fn team(&self, side: Side) -> TeamView<'_> {
        let name = match side {
            Side::Home => &self.request.home,
            Side::Away => &self.request.away,
        };
        TeamView {
            side,
            name,
            league: &self.request.league,
            cache: &self.cache,
        }
    }

    /// Format the current cache state into the presentation table.
    pub fn table(&self) -> ComparisonTable {
        ComparisonTable::from_result(self)
    }
}

/// One team's slice of a [`ComparisonResult`].
#[derive(Debug, Clone, Copy)]
pub struct TeamView<'a> {
    side: Side,
    name: &'a str,
    league: &'a str,
    cache: &'a SessionCache,
}

impl<'a> TeamView<'a> {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The team's row in the overall table.
    pub fn standing(&self) -> Option<StandingsEntry> {
        self.entry(StandingsKind::Overall)
    }

    /// The home table for the home side, the away table for the away side.
    pub fn venue_record(&self) -> Option<StandingsEntry> {
        match self.side {
            Side::Home => self.entry(StandingsKind::Home),
            Side::Away => self.entry(StandingsKind::Away),
        }
    }

    pub fn form(&self) -> Option<RecentForm> {
        self.cache.recent_form(self.league)?.get(self.name).cloned()
    }

    pub fn coach(&self) -> Option<Arc<CoachRecord>> {
        self.cache.coach(self.name)
    }

    pub fn recent_fixtures(&self) -> Option<Arc<RecentFixtures>> {
        self.cache.recent_fixtures(self.name)
    }

    fn entry(&self, kind: StandingsKind) -> Option<StandingsEntry> {
        self.cache
            .standings(self.league, kind)?
            .entry(self.name)
            .cloned()
    }
}
