use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::model::{CoachRecord, FormTable, RecentFixtures, StandingsKind, StandingsTable};

/// What kind of data a cache entry holds.
///
/// League-scoped categories are keyed by league name, team-scoped ones by team name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Standings(StandingsKind),
    RecentForm,
    Coach,
    RecentFixtures,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Standings(kind) => write!(f, "{kind} standings"),
            Category::RecentForm => write!(f, "recent form"),
            Category::Coach => write!(f, "coach"),
            Category::RecentFixtures => write!(f, "recent fixtures"),
        }
    }
}

/// A cached value. The variant determines the [`Category`] it is stored under.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    Standings(Arc<StandingsTable>),
    RecentForm(Arc<FormTable>),
    Coach(Arc<CoachRecord>),
    RecentFixtures(Arc<RecentFixtures>),
}

impl CacheValue {
    pub fn category(&self) -> Category {
        match self {
            CacheValue::Standings(table) => Category::Standings(table.kind),
            CacheValue::RecentForm(_) => Category::RecentForm,
            CacheValue::Coach(_) => Category::Coach,
            CacheValue::RecentFixtures(_) => Category::RecentFixtures,
        }
    }
}

/// Everything fetched during one session.
///
/// Entries are never evicted; the league and team sets are small. Values are
/// handed out as `Arc`s so readers never hold a shard lock while formatting.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: DashMap<Category, HashMap<String, CacheValue>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, category: Category, key: &str) -> bool {
        self.entries
            .get(&category)
            .is_some_and(|slot| slot.contains_key(key))
    }

    pub fn get(&self, category: Category, key: &str) -> Option<CacheValue> {
        self.entries.get(&category)?.get(key).cloned()
    }

    /// Insert or overwrite the entry for `key` under the value's category.
    pub fn put(&self, key: impl Into<String>, value: CacheValue) {
        let key = key.into();
        let category = value.category();
        debug!(%category, key = %key, "caching entry");
        self.entries
            .entry(category)
            .or_default()
            .insert(key, value);
    }

    pub fn standings(&self, league: &str, kind: StandingsKind) -> Option<Arc<StandingsTable>> {
        match self.get(Category::Standings(kind), league)? {
            CacheValue::Standings(table) => Some(table),
            _ => None,
        }
    }

    pub fn recent_form(&self, league: &str) -> Option<Arc<FormTable>> {
        match self.get(Category::RecentForm, league)? {
            CacheValue::RecentForm(form) => Some(form),
            _ => None,
        }
    }

    pub fn coach(&self, team: &str) -> Option<Arc<CoachRecord>> {
        match self.get(Category::Coach, team)? {
            CacheValue::Coach(coach) => Some(coach),
            _ => None,
        }
    }

    pub fn recent_fixtures(&self, team: &str) -> Option<Arc<RecentFixtures>> {
        match self.get(Category::RecentFixtures, team)? {
            CacheValue::RecentFixtures(fixtures) => Some(fixtures),
            _ => None,
        }
    }

    /// Number of entries across all categories.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|slot| slot.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
