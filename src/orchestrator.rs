use std::future::Future;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

use crate::cache::{CacheValue, Category, SessionCache};
use crate::claims::{FetchClaims, FetchKey};
use crate::comparison::ComparisonResult;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::{ComparisonRequest, League, StandingsKind};
use crate::resolve::SlugTable;
use crate::scraper::team_page::{extract_coach, extract_recent_fixtures};

/// What [`Orchestrator::ensure_league_data`] left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueBundle {
    /// The league's roster, for populating team pickers. Empty for a no-op.
    pub teams: &'static [&'static str],
    /// League-scoped categories present in the cache after the call.
    pub populated: Vec<Category>,
}

impl LeagueBundle {
    /// Whether every league-scoped category is cached.
    pub fn is_complete(&self) -> bool {
        self.populated.len() == LEAGUE_CATEGORIES
    }
}

/// Standings of every kind plus recent form.
const LEAGUE_CATEGORIES: usize = 4;

/// Fills the session cache on demand.
///
/// One orchestrator serves one session. Its methods take `&self`, so it can be
/// shared behind an `Arc` by several panels; concurrent requests for the same
/// entry wait for the first fetch instead of repeating it.
pub struct Orchestrator<F> {
    fetcher: F,
    cache: Arc<SessionCache>,
    slugs: SlugTable,
    claims: FetchClaims,
    today: fn() -> NaiveDate,
}

impl<F: Fetcher> Orchestrator<F> {
    pub fn new(fetcher: F, cache: Arc<SessionCache>) -> Self {
        Self {
            fetcher,
            cache,
            slugs: SlugTable::default(),
            claims: FetchClaims::default(),
            today: || Local::now().date_naive(),
        }
    }

    /// Replace the built-in team name to slug mapping.
    pub fn with_slugs(mut self, slugs: SlugTable) -> Self {
        self.slugs = slugs;
        self
    }

    /// Replace the clock used to decide which fixtures are recent.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn cache(&self) -> &Arc<SessionCache> {
        &self.cache
    }

    /// Make sure the league's standings and form are cached.
    ///
    /// An empty or unknown league is a no-op. Each category is fetched
    /// independently; one that fails stays absent and is retried next call.
    #[instrument(skip(self))]
    pub async fn ensure_league_data(&self, league: &str) -> LeagueBundle {
        if league.is_empty() {
            return LeagueBundle::default();
        }
        let Some(league) = League::find(league) else {
            warn!("unknown league");
            return LeagueBundle::default();
        };

        let (overall, home, away, form) = tokio::join!(
            self.ensure_standings(league, StandingsKind::Overall),
            self.ensure_standings(league, StandingsKind::Home),
            self.ensure_standings(league, StandingsKind::Away),
            self.ensure_recent_form(league),
        );

        let populated = StandingsKind::iter()
            .map(Category::Standings)
            .zip([overall, home, away])
            .chain([(Category::RecentForm, form)])
            .filter_map(|(category, present)| present.then_some(category))
            .collect();

        LeagueBundle {
            teams: league.teams,
            populated,
        }
    }

    /// Make sure both teams' coach records and recent fixtures are cached and
    /// return a live view over the comparison.
    ///
    /// Returns `Ok(None)` for an incomplete request. The only error is a team
    /// without a source identifier, raised before anything is fetched. Failed
    /// fetches leave the affected fields absent.
    #[instrument(
        skip(self, request),
        fields(league = %request.league, home = %request.home, away = %request.away)
    )]
    pub async fn ensure_comparison_data(
        &self,
        request: &ComparisonRequest,
    ) -> Result<Option<ComparisonResult>> {
        if !request.is_actionable() {
            debug!("incomplete comparison request");
            return Ok(None);
        }

        let home_id = self.slugs.resolve_source_id(&request.home)?;
        let away_id = self.slugs.resolve_source_id(&request.away)?;

        match League::find(&request.league) {
            Some(league) => {
                for team in [&request.home, &request.away] {
                    if !league.contains(team) {
                        warn!(team = %team, "team is not in the league roster");
                    }
                }
            }
            None => warn!("unknown league"),
        }

        tokio::join!(
            self.ensure_team_data(&request.home, home_id),
            self.ensure_team_data(&request.away, away_id),
        );

        Ok(Some(ComparisonResult::new(Arc::clone(&self.cache), request.clone())))
    }

    async fn ensure_standings(&self, league: &'static League, kind: StandingsKind) -> bool {
        self.ensure_league_entry(Category::Standings(kind), league, || async move {
            let table = self.fetcher.fetch_standings(league, kind).await?;
            Ok(CacheValue::Standings(Arc::new(table)))
        })
        .await
    }

    async fn ensure_recent_form(&self, league: &'static League) -> bool {
        self.ensure_league_entry(Category::RecentForm, league, || async move {
            let form = self.fetcher.fetch_recent_form(league).await?;
            Ok(CacheValue::RecentForm(Arc::new(form)))
        })
        .await
    }

    /// Fetch a league-scoped entry unless it is cached. Returns whether it is
    /// cached afterwards.
    async fn ensure_league_entry<Fut>(
        &self,
        category: Category,
        league: &League,
        fetch: impl FnOnce() -> Fut,
    ) -> bool
    where
        Fut: Future<Output = Result<CacheValue>>,
    {
        if self.cache.has(category, league.name) {
            return true;
        }

        let _claim = self
            .claims
            .claim(FetchKey::League(category, league.name.to_owned()))
            .await;
        if self.cache.has(category, league.name) {
            debug!(%category, "filled by a concurrent request");
            return true;
        }

        match fetch().await {
            Ok(value) => {
                self.cache.put(league.name, value);
                true
            }
            Err(e) => {
                warn!(%category, error = %e, transport = e.is_transport(), "fetch failed");
                false
            }
        }
    }

    /// Fetch the team page at most once and extract whichever of the coach
    /// record and recent fixtures is missing.
    async fn ensure_team_data(&self, team: &str, source_id: &str) {
        if self.team_data_cached(team) {
            return;
        }

        let _claim = self
            .claims
            .claim(FetchKey::TeamPage(source_id.to_owned()))
            .await;
        self.adopt_alias_entries(team, source_id);
        let need_coach = !self.cache.has(Category::Coach, team);
        let need_fixtures = !self.cache.has(Category::RecentFixtures, team);
        if !need_coach && !need_fixtures {
            debug!(team, "filled by a concurrent request");
            return;
        }

        let page = match self.fetcher.fetch_team_page(source_id).await {
            Ok(page) => page,
            Err(e) => {
                warn!(team, error = %e, transport = e.is_transport(), "team page fetch failed");
                return;
            }
        };

        if need_coach {
            match extract_coach(&page) {
                Ok(coach) => self.cache.put(team, CacheValue::Coach(Arc::new(coach))),
                Err(e) => warn!(team, error = %e, "no coach record on team page"),
            }
        }

        if need_fixtures {
            match extract_recent_fixtures(&page, (self.today)()) {
                Ok(fixtures) => {
                    let fixtures = CacheValue::RecentFixtures(Arc::new(fixtures));
                    self.cache.put(team, fixtures);
                }
                Err(e) => warn!(team, error = %e, "no fixture list on team page"),
            }
        }
    }

    /// Copy team entries already cached under another name for the same page.
    fn adopt_alias_entries(&self, team: &str, source_id: &str) {
        for category in [Category::Coach, Category::RecentFixtures] {
            if self.cache.has(category, team) {
                continue;
            }
            let cached = self
                .slugs
                .aliases(source_id)
                .filter(|alias| *alias != team)
                .find_map(|alias| self.cache.get(category, alias));
            if let Some(value) = cached {
                debug!(team, %category, "reusing entry cached under an alias");
                self.cache.put(team, value);
            }
        }
    }

    fn team_data_cached(&self, team: &str) -> bool {
        self.cache.has(Category::Coach, team) && self.cache.has(Category::RecentFixtures, team)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::error::MatchupError;
    use crate::model::*;

    const PREMIER_LEAGUE: &str = "Premier League";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    const ARSENAL_PAGE: &str = r#"
        <div class="spree-content">
          <div class="date color-grey2">10 Mar.</div>
          <div class="date color-grey2">02 Mar.</div>
        </div>
        <div id="mod_coachStats">
          <p class="mb5">Mikel Arteta</p>
          <div class="main-line mt10 mb5">230</div>
          <div class="main-line mt10 mb5">140</div>
          <div class="main-line mt10 mb5">40</div>
          <div class="main-line mt10 mb5">50</div>
        </div>
    "#;

    const LIVERPOOL_PAGE: &str = r#"
        <div class="spree-content">
          <div class="date color-grey2">11 Mar.</div>
          <div class="date color-grey2">07 Mar.</div>
        </div>
        <div id="mod_coachStats">
          <p class="mb5">Jurgen Klopp</p>
          <div class="main-line mt10 mb5">480</div>
          <div class="main-line mt10 mb5">290</div>
          <div class="main-line mt10 mb5">110</div>
          <div class="main-line mt10 mb5">80</div>
        </div>
    "#;

    /// In-memory sources that record every call.
    #[derive(Default)]
    struct FakeFetcher {
        calls: Mutex<Vec<String>>,
        failing: Mutex<HashSet<String>>,
        pages: HashMap<&'static str, &'static str>,
        delay: Duration,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                pages: HashMap::from([("arsenal", ARSENAL_PAGE), ("liverpool", LIVERPOOL_PAGE)]),
                ..Default::default()
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn fail(&self, call: &str) {
            self.failing.lock().unwrap().insert(call.to_string());
        }

        fn recover(&self, call: &str) {
            self.failing.lock().unwrap().remove(call);
        }

        fn calls(&self, call: &str) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
        }

        fn total_calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        async fn record(&self, call: String) -> Result<()> {
            tokio::time::sleep(self.delay).await;
            self.calls.lock().unwrap().push(call.clone());
            if self.failing.lock().unwrap().contains(&call) {
                return Err(MatchupError::UnexpectedStatus {
                    url: call,
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            Ok(())
        }

        fn standings(kind: StandingsKind) -> StandingsTable {
            let entry = |team: &str, position: u32, points: u32| StandingsEntry {
                team: team.to_string(),
                position: (kind == StandingsKind::Overall).then_some(position),
                matches: 24,
                wins: 16,
                draws: 2,
                losses: 6,
                goals_for: 53,
                goals_against: 20,
                points,
            };
            StandingsTable {
                kind,
                entries: vec![entry("Arsenal", 1, 50), entry("Liverpool", 2, 49)],
            }
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch_overall_standings(&self, league: &League) -> Result<StandingsTable> {
            self.record(format!("overall:{}", league.name)).await?;
            Ok(Self::standings(StandingsKind::Overall))
        }

        async fn fetch_home_standings(&self, league: &League) -> Result<StandingsTable> {
            self.record(format!("home:{}", league.name)).await?;
            Ok(Self::standings(StandingsKind::Home))
        }

        async fn fetch_away_standings(&self, league: &League) -> Result<StandingsTable> {
            self.record(format!("away:{}", league.name)).await?;
            Ok(Self::standings(StandingsKind::Away))
        }

        async fn fetch_recent_form(&self, league: &League) -> Result<FormTable> {
            self.record(format!("form:{}", league.name)).await?;
            let mut form = FormTable::new();
            form.insert(
                "Arsenal".to_string(),
                RecentForm::new(vec![Outcome::Win, Outcome::Draw, Outcome::Win]),
            );
            Ok(form)
        }

        async fn fetch_team_page(&self, source_id: &str) -> Result<TeamPage> {
            self.record(format!("team:{source_id}")).await?;
            Ok(TeamPage {
                source_id: source_id.to_string(),
                body: self.pages.get(source_id).copied().unwrap_or_default().to_string(),
            })
        }
    }

    fn orchestrator(fetcher: FakeFetcher) -> Orchestrator<FakeFetcher> {
        Orchestrator::new(fetcher, Arc::new(SessionCache::new())).with_today(today)
    }

    fn arsenal_liverpool() -> ComparisonRequest {
        ComparisonRequest::new(PREMIER_LEAGUE, "Arsenal", "Liverpool")
    }

    #[tokio::test]
    async fn test_league_data_populates_cache() {
        let orchestrator = orchestrator(FakeFetcher::new());

        let bundle = orchestrator.ensure_league_data(PREMIER_LEAGUE).await;

        assert_eq!(bundle.teams.len(), 20);
        assert!(bundle.teams.contains(&"Arsenal"));
        assert!(bundle.is_complete());

        let overall = orchestrator
            .cache()
            .standings(PREMIER_LEAGUE, StandingsKind::Overall)
            .unwrap();
        let arsenal = overall.entry("Arsenal").unwrap();
        assert_eq!(arsenal.position, Some(1));
        assert_eq!(arsenal.points, 50);
    }

    #[tokio::test]
    async fn test_league_data_is_idempotent() {
        let orchestrator = orchestrator(FakeFetcher::new());

        let first = orchestrator.ensure_league_data(PREMIER_LEAGUE).await;
        let second = orchestrator.ensure_league_data(PREMIER_LEAGUE).await;

        assert_eq!(first, second);
        for call in ["overall", "home", "away", "form"] {
            assert_eq!(
                orchestrator
                    .fetcher
                    .calls(&format!("{call}:{PREMIER_LEAGUE}")),
                1,
                "{call} fetched more than once"
            );
        }
    }

    #[tokio::test]
    async fn test_empty_or_unknown_league_is_noop() {
        let orchestrator = orchestrator(FakeFetcher::new());

        assert_eq!(
            orchestrator.ensure_league_data("").await,
            LeagueBundle::default()
        );
        assert_eq!(
            orchestrator.ensure_league_data("Eredivisie").await,
            LeagueBundle::default()
        );
        assert_eq!(orchestrator.fetcher.total_calls(), 0);
        assert!(orchestrator.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failed_category_is_retried_alone() {
        let orchestrator = orchestrator(FakeFetcher::new());
        orchestrator.fetcher.fail("form:Premier League");

        let bundle = orchestrator.ensure_league_data(PREMIER_LEAGUE).await;
        assert!(!bundle.is_complete());
        assert_eq!(bundle.populated.len(), 3);
        assert!(!bundle.populated.contains(&Category::RecentForm));
        assert!(orchestrator.cache().recent_form(PREMIER_LEAGUE).is_none());

        orchestrator.fetcher.recover("form:Premier League");
        let bundle = orchestrator.ensure_league_data(PREMIER_LEAGUE).await;
        assert!(bundle.is_complete());
        assert_eq!(orchestrator.fetcher.calls("form:Premier League"), 2);
        assert_eq!(orchestrator.fetcher.calls("overall:Premier League"), 1);
    }

    #[tokio::test]
    async fn test_comparison_fetches_each_team_page_once() {
        let orchestrator = orchestrator(FakeFetcher::new());
        orchestrator.ensure_league_data(PREMIER_LEAGUE).await;

        let result = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(orchestrator.fetcher.calls("team:arsenal"), 1);
        assert_eq!(orchestrator.fetcher.calls("team:liverpool"), 1);

        let cache = orchestrator.cache();
        assert_eq!(cache.coach("Arsenal").unwrap().name, "Mikel Arteta");
        assert_eq!(
            *cache.recent_fixtures("Liverpool").unwrap(),
            vec![
                NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            ]
        );

        let table = result.table();
        assert_eq!(table.home.standing, "1, 50p, 53:20");
        assert_eq!(table.home.form, "2-1-0");
        assert_eq!(table.home.coach, "Mikel Arteta, 140-40-50");
        assert_eq!(table.home.recent_fixtures, "10 Mar. 24");
        assert_eq!(table.away.coach, "Jurgen Klopp, 290-110-80");
        assert_eq!(table.away.form, "");
    }

    #[tokio::test]
    async fn test_warm_comparison_makes_no_calls() {
        let orchestrator = orchestrator(FakeFetcher::new());
        orchestrator.ensure_league_data(PREMIER_LEAGUE).await;
        let first = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap();
        let calls = orchestrator.fetcher.total_calls();

        let second = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(orchestrator.fetcher.total_calls(), calls);
        assert_eq!(first.table(), second.table());
    }

    #[tokio::test]
    async fn test_unmapped_team_fails_before_fetching() {
        let orchestrator = orchestrator(FakeFetcher::new());
        let request = ComparisonRequest::new(PREMIER_LEAGUE, "Arsenal", "Real Madrid");

        let err = orchestrator
            .ensure_comparison_data(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, MatchupError::NameResolution { ref team } if team == "Real Madrid"));
        assert_eq!(orchestrator.fetcher.total_calls(), 0);
        assert!(orchestrator.cache().is_empty());
    }

    #[tokio::test]
    async fn test_incomplete_request_is_noop() {
        let orchestrator = orchestrator(FakeFetcher::new());

        for request in [
            ComparisonRequest::new(PREMIER_LEAGUE, "", "Liverpool"),
            ComparisonRequest::new(PREMIER_LEAGUE, "Arsenal", ""),
            ComparisonRequest::new("", "Arsenal", "Liverpool"),
            ComparisonRequest::new(PREMIER_LEAGUE, "Arsenal", "Arsenal"),
        ] {
            let result = orchestrator.ensure_comparison_data(&request).await.unwrap();
            assert!(result.is_none(), "{request:?} was not a no-op");
        }
        assert_eq!(orchestrator.fetcher.total_calls(), 0);
        assert!(orchestrator.cache().is_empty());
    }

    #[tokio::test]
    async fn test_team_page_failure_renders_blanks() {
        let orchestrator = orchestrator(FakeFetcher::new());
        orchestrator.ensure_league_data(PREMIER_LEAGUE).await;
        orchestrator.fetcher.fail("team:liverpool");

        let result = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap();

        let table = result.table();
        assert_eq!(table.away.coach, "");
        assert_eq!(table.away.recent_fixtures, "");
        assert_eq!(table.away.standing, "2, 49p, 53:20");
        assert_eq!(table.home.coach, "Mikel Arteta, 140-40-50");

        orchestrator.fetcher.recover("team:liverpool");
        orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap();
        assert_eq!(orchestrator.fetcher.calls("team:liverpool"), 2);
        assert_eq!(orchestrator.fetcher.calls("team:arsenal"), 1);
        assert_eq!(result.table().away.coach, "Jurgen Klopp, 290-110-80");
    }

    #[tokio::test]
    async fn test_page_without_coach_keeps_fixtures() {
        let mut fetcher = FakeFetcher::new();
        fetcher.pages.insert(
            "arsenal",
            r#"<div class="spree-content"><div class="date color-grey2">10 Mar.</div></div>"#,
        );
        let orchestrator = orchestrator(fetcher);

        let result = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap();

        assert!(result.home().coach().is_none());
        assert_eq!(result.home().recent_fixtures().unwrap().len(), 1);

        // Only the coach is missing, so the next request fetches the page for it alone.
        orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap();
        assert_eq!(orchestrator.fetcher.calls("team:arsenal"), 2);
        assert_eq!(orchestrator.fetcher.calls("team:liverpool"), 1);
    }

    #[tokio::test]
    async fn test_comparison_without_league_data_is_partial() {
        let orchestrator = orchestrator(FakeFetcher::new());

        let table = orchestrator
            .ensure_comparison_data(&arsenal_liverpool())
            .await
            .unwrap()
            .unwrap()
            .table();

        assert_eq!(table.home.standing, "");
        assert_eq!(table.home.venue_record, "");
        assert_eq!(table.home.coach, "Mikel Arteta, 140-40-50");
    }

    #[tokio::test]
    async fn test_concurrent_league_requests_share_fetches() {
        let orchestrator = Arc::new(orchestrator(
            FakeFetcher::new().with_delay(Duration::from_millis(30)),
        ));

        let panels = (0..3).map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.ensure_league_data(PREMIER_LEAGUE).await })
        });
        for panel in panels.collect::<Vec<_>>() {
            assert!(panel.await.unwrap().is_complete());
        }

        assert_eq!(orchestrator.fetcher.total_calls(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_comparisons_share_team_pages() {
        let orchestrator = Arc::new(orchestrator(
            FakeFetcher::new().with_delay(Duration::from_millis(30)),
        ));

        let first = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                orchestrator
                    .ensure_comparison_data(&arsenal_liverpool())
                    .await
                    .map(|r| r.is_some())
            })
        };
        let second = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                let request = ComparisonRequest::new(PREMIER_LEAGUE, "Liverpool", "Arsenal");
                orchestrator
                    .ensure_comparison_data(&request)
                    .await
                    .map(|r| r.is_some())
            })
        };

        assert!(first.await.unwrap().unwrap());
        assert!(second.await.unwrap().unwrap());
        assert_eq!(orchestrator.fetcher.calls("team:arsenal"), 1);
        assert_eq!(orchestrator.fetcher.calls("team:liverpool"), 1);
    }

    #[tokio::test]
    async fn test_aliases_share_one_team_page() {
        let mut fetcher = FakeFetcher::new().with_delay(Duration::from_millis(30));
        fetcher.pages.insert("leicester-city-fc", ARSENAL_PAGE);
        fetcher.pages.insert("leeds-united-afc", LIVERPOOL_PAGE);
        let orchestrator = Arc::new(orchestrator(fetcher));

        let requests = [
            ComparisonRequest::new("Championship", "Leicester", "Leeds United"),
            ComparisonRequest::new("Championship", "Leicester City", "Leeds United"),
        ];
        let handles: Vec<_> = requests
            .into_iter()
            .map(|request| {
                let orchestrator = Arc::clone(&orchestrator);
                tokio::spawn(async move {
                    orchestrator
                        .ensure_comparison_data(&request)
                        .await
                        .map(|r| r.is_some())
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap());
        }

        assert_eq!(orchestrator.fetcher.calls("team:leicester-city-fc"), 1);
        assert_eq!(orchestrator.fetcher.calls("team:leeds-united-afc"), 1);
        let cache = orchestrator.cache();
        for name in ["Leicester", "Leicester City"] {
            assert_eq!(cache.coach(name).unwrap().name, "Mikel Arteta");
            assert!(cache.recent_fixtures(name).is_some());
        }
    }
}
