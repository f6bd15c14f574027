//! Generic selector: one domain's pools, load state, roll sessions and
//! published results.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use riftroll_domain::{CandidateCatalog, Catalog};
use tokio::sync::watch;

use crate::infrastructure::ports::{CatalogError, CatalogPort, RandomPort};
use crate::roll::{Animation, RollAnimator, RollOutcome, RollReport, RollSession, RollStatus};

/// What a selector rolls: how pools are derived and how a result is drawn.
pub trait RollDomain: Send + Sync + 'static {
    /// Name used in logs and step reports.
    const NAME: &'static str;

    type Context: Clone + Default + fmt::Debug + Send + Sync + 'static;
    type Pools: Send + Sync + 'static;
    type Output: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static;

    fn build_pools(&self, catalog: &CandidateCatalog, context: &Self::Context) -> Self::Pools;

    fn draw(&self, pools: &Self::Pools, pick: &mut dyn FnMut(usize) -> usize) -> Self::Output;
}

/// Catalog lifecycle of a selector. Only `Ready` selectors roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

struct SelectorState<D: RollDomain> {
    load: LoadState,
    catalog: Option<Arc<CandidateCatalog>>,
    context: D::Context,
    pools: Option<Arc<D::Pools>>,
    session: Option<RollSession>,
    sessions_started: u64,
}

pub struct Selector<D: RollDomain> {
    domain: D,
    random: Arc<dyn RandomPort>,
    animator: RollAnimator,
    state: Mutex<SelectorState<D>>,
    status: watch::Sender<RollStatus>,
    preview: watch::Sender<D::Output>,
    committed: watch::Sender<D::Output>,
}

impl<D: RollDomain> Selector<D> {
    pub fn new(domain: D, random: Arc<dyn RandomPort>, animator: RollAnimator) -> Self {
        Self {
            domain,
            random,
            animator,
            state: Mutex::new(SelectorState {
                load: LoadState::Unloaded,
                catalog: None,
                context: D::Context::default(),
                pools: None,
                session: None,
                sessions_started: 0,
            }),
            status: watch::Sender::new(RollStatus::Idle),
            preview: watch::Sender::new(D::Output::default()),
            committed: watch::Sender::new(D::Output::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SelectorState<D>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn domain(&self) -> &D {
        &self.domain
    }

    // Load lifecycle

    pub fn load_state(&self) -> LoadState {
        self.lock().load.clone()
    }

    pub fn mark_loading(&self) {
        self.lock().load = LoadState::Loading;
    }

    pub fn mark_failed(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(selector = D::NAME, reason = %reason, "Catalog load failed");
        self.lock().load = LoadState::Failed(reason);
    }

    /// Install a converted catalog and derive pools for the current context.
    pub fn load(&self, catalog: Arc<CandidateCatalog>) {
        let mut state = self.lock();
        let pools = self.domain.build_pools(&catalog, &state.context);
        state.pools = Some(Arc::new(pools));
        state.catalog = Some(catalog);
        state.load = LoadState::Ready;
        tracing::debug!(selector = D::NAME, "Selector ready");
    }

    /// Fetch, convert and install a catalog. Failures leave the selector
    /// `Failed` and are returned.
    pub async fn load_from(&self, port: &dyn CatalogPort) -> Result<(), CatalogError> {
        self.mark_loading();
        let converted = port
            .fetch_catalog()
            .await
            .and_then(|catalog: Catalog| catalog.into_candidates().map_err(CatalogError::from));
        match converted {
            Ok(catalog) => {
                self.load(Arc::new(catalog));
                Ok(())
            }
            Err(e) => {
                self.mark_failed(e.to_string());
                Err(e)
            }
        }
    }

    // Context

    pub fn context(&self) -> D::Context {
        self.lock().context.clone()
    }

    /// Replace the context and derive pools again. Rolls already running keep
    /// the pools they started with.
    pub fn set_context(&self, context: D::Context) {
        let mut state = self.lock();
        if let Some(catalog) = state.catalog.clone() {
            state.pools = Some(Arc::new(self.domain.build_pools(&catalog, &context)));
            tracing::debug!(selector = D::NAME, context = ?context, "Pools rebuilt");
        }
        state.context = context;
    }

    pub fn pools(&self) -> Option<Arc<D::Pools>> {
        self.lock().pools.clone()
    }

    // Observation

    /// Last committed result, or the sentinel before the first roll.
    pub fn current(&self) -> D::Output {
        self.committed.borrow().clone()
    }

    /// Latest intermediate or final draw.
    pub fn preview(&self) -> D::Output {
        self.preview.borrow().clone()
    }

    pub fn status(&self) -> RollStatus {
        *self.status.borrow()
    }

    pub fn subscribe_preview(&self) -> watch::Receiver<D::Output> {
        self.preview.subscribe()
    }

    pub fn subscribe_committed(&self) -> watch::Receiver<D::Output> {
        self.committed.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<RollStatus> {
        self.status.subscribe()
    }

    // Rolling

    /// One draw, committed immediately.
    pub fn randomize_instant(&self) -> RollOutcome<D::Output> {
        let Some((session, pools)) = self.begin(None) else {
            return RollOutcome::NotReady;
        };
        let result = self.draw_from(&pools);
        if !self.commit(&session, result.clone()) {
            return RollOutcome::Superseded;
        }
        RollOutcome::Settled(RollReport { result, previews: 0 })
    }

    /// Animated roll. Resolves once the final draw is committed, or with
    /// `Superseded` if another roll on this selector started first.
    pub async fn randomize_animated(&self) -> RollOutcome<D::Output> {
        let total = self.animator.draw_duration(self.random.as_ref());
        let deadline = tokio::time::Instant::now() + total;
        let Some((session, pools)) = self.begin(Some(deadline)) else {
            return RollOutcome::NotReady;
        };
        let _active = ActiveRoll {
            selector: self,
            session: session.clone(),
        };

        let animation = self
            .animator
            .animate(
                total,
                session.token(),
                || self.draw_from(&pools),
                |value| self.publish_preview(&session, value),
            )
            .await;

        let Animation::Finished { last, previews } = animation else {
            tracing::debug!(selector = D::NAME, session = session.id(), "Roll superseded");
            return RollOutcome::Superseded;
        };
        if !self.commit(&session, last.clone()) {
            tracing::debug!(selector = D::NAME, session = session.id(), "Roll superseded");
            return RollOutcome::Superseded;
        }

        tracing::debug!(
            selector = D::NAME,
            session = session.id(),
            previews,
            "Roll settled"
        );
        RollOutcome::Settled(RollReport {
            result: last,
            previews,
        })
    }

    /// Wait until no roll is in flight, then return the committed result.
    ///
    /// A roll that was superseded uses this to pick up whatever the
    /// superseding roll commits.
    pub async fn settled(&self) -> D::Output {
        let mut status = self.status.subscribe();
        // The sender lives as long as `self`, so the wait cannot fail here.
        let _ = status.wait_for(|s| *s == RollStatus::Idle).await;
        self.current()
    }

    /// When the running roll makes its final draw. `None` when idle or for
    /// instant rolls.
    pub fn roll_deadline(&self) -> Option<tokio::time::Instant> {
        self.lock().session.as_ref().and_then(RollSession::deadline)
    }

    fn draw_from(&self, pools: &D::Pools) -> D::Output {
        let random = &self.random;
        self.domain.draw(pools, &mut |len| random.gen_index(len))
    }

    /// Register a new session, cancelling the one it replaces.
    fn begin(
        &self,
        deadline: Option<tokio::time::Instant>,
    ) -> Option<(RollSession, Arc<D::Pools>)> {
        let mut state = self.lock();
        if !state.load.is_ready() {
            tracing::debug!(selector = D::NAME, load = ?state.load, "Roll requested before ready");
            return None;
        }
        let pools = state.pools.clone()?;

        if let Some(previous) = state.session.take() {
            previous.cancel();
        }
        state.sessions_started += 1;
        let mut session = RollSession::new(state.sessions_started);
        if let Some(deadline) = deadline {
            session = session.with_deadline(deadline);
        }
        state.session = Some(session.clone());
        self.status.send_replace(RollStatus::Rolling);
        Some((session, pools))
    }

    fn is_current(state: &SelectorState<D>, session: &RollSession) -> bool {
        !session.is_cancelled()
            && state.session.as_ref().map(RollSession::id) == Some(session.id())
    }

    fn publish_preview(&self, session: &RollSession, value: D::Output) -> bool {
        let state = self.lock();
        if !Self::is_current(&state, session) {
            return false;
        }
        self.preview.send_replace(value);
        true
    }

    /// Drop a session that ends without committing. Only the registered
    /// session returns the selector to `Idle`.
    fn release(&self, session: &RollSession) {
        session.cancel();
        let mut state = self.lock();
        if state.session.as_ref().map(RollSession::id) == Some(session.id()) {
            state.session = None;
            self.status.send_replace(RollStatus::Idle);
            tracing::debug!(selector = D::NAME, session = session.id(), "Roll abandoned");
        }
    }

    fn commit(&self, session: &RollSession, value: D::Output) -> bool {
        let mut state = self.lock();
        if !Self::is_current(&state, session) {
            return false;
        }
        self.preview.send_replace(value.clone());
        self.committed.send_replace(value);
        state.session = None;
        self.status.send_replace(RollStatus::Idle);
        true
    }
}

/// Releases an animated roll's session however its future ends.
struct ActiveRoll<'a, D: RollDomain> {
    selector: &'a Selector<D>,
    session: RollSession,
}

impl<D: RollDomain> Drop for ActiveRoll<'_, D> {
    fn drop(&mut self) {
        self.selector.release(&self.session);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::entities::{AbilitiesDomain, ChampionDomain};
    use crate::infrastructure::app_settings::RollSettings;
    use crate::infrastructure::catalog_file::StaticCatalog;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::MockCatalogPort;
    use crate::infrastructure::ticker::{ImmediateTicker, TokioTicker};
    use crate::test_fixtures::{candidate_catalog, ready_selector, sample_catalog, selector};
    use riftroll_domain::rules::abilities::is_smite_like;
    use riftroll_domain::{AbilityContext, CatalogEntry, ChampionPick, RoleMode};

    fn unloaded() -> Selector<ChampionDomain> {
        selector(
            ChampionDomain,
            Arc::new(FixedRandom::constant(0)),
            Arc::new(ImmediateTicker),
            RollSettings::default(),
        )
    }

    #[tokio::test]
    async fn instant_roll_commits_without_previews() {
        let selector = ready_selector(ChampionDomain, FixedRandom::constant(1), RollSettings::default());
        let mut committed = selector.subscribe_committed();
        let mut preview = selector.subscribe_preview();

        let RollOutcome::Settled(report) = selector.randomize_instant() else {
            panic!("instant roll on a ready selector must settle");
        };
        assert_eq!(report.previews, 0);
        assert_eq!(report.result.champion.as_ref().unwrap().id().as_str(), "Garen");
        assert_eq!(selector.current(), report.result);
        assert_eq!(selector.status(), RollStatus::Idle);
        assert!(committed.has_changed().unwrap());

        // The only preview update is the committed draw itself.
        assert!(preview.has_changed().unwrap());
        assert_eq!(*preview.borrow_and_update(), report.result);
        assert!(!preview.has_changed().unwrap());
        assert_eq!(selector.roll_deadline(), None);
    }

    #[tokio::test]
    async fn animated_roll_previews_every_tick_then_commits_once() {
        let selector = ready_selector(
            ChampionDomain,
            FixedRandom::cycling(vec![0, 1, 2, 3]),
            RollSettings::new(100, 1000, 1000),
        );
        let mut committed = selector.subscribe_committed();

        let RollOutcome::Settled(report) = selector.randomize_animated().await else {
            panic!("animated roll on a ready selector must settle");
        };
        assert_eq!(report.previews, 9);
        assert_eq!(selector.current(), report.result);
        assert_eq!(selector.preview(), report.result);
        assert_eq!(selector.status(), RollStatus::Idle);

        assert!(committed.has_changed().unwrap());
        assert_eq!(*committed.borrow_and_update(), report.result);
        assert!(!committed.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_roll_supersedes_the_running_one() {
        let selector = Arc::new(selector(
            ChampionDomain,
            Arc::new(FixedRandom::cycling(vec![0, 1, 2, 3])),
            Arc::new(TokioTicker),
            RollSettings::new(100, 1000, 1000),
        ));
        selector.load(candidate_catalog());

        let started = tokio::time::Instant::now();
        let first = {
            let selector = selector.clone();
            tokio::spawn(async move { selector.randomize_animated().await })
        };
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(selector.status(), RollStatus::Rolling);
        assert_eq!(
            selector.roll_deadline(),
            Some(started + Duration::from_millis(1000))
        );

        let second = selector.randomize_animated().await;
        assert_eq!(first.await.unwrap(), RollOutcome::Superseded);

        let RollOutcome::Settled(report) = second else {
            panic!("the newest roll must settle");
        };
        assert_eq!(selector.current(), report.result);
        assert_eq!(selector.status(), RollStatus::Idle);
        assert_eq!(selector.roll_deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_roll_returns_the_selector_to_idle() {
        let selector = selector(
            ChampionDomain,
            Arc::new(FixedRandom::cycling(vec![0, 1, 2, 3])),
            Arc::new(TokioTicker),
            RollSettings::new(100, 1000, 1000),
        );
        selector.load(candidate_catalog());

        let timed_out =
            tokio::time::timeout(Duration::from_millis(250), selector.randomize_animated()).await;
        assert!(timed_out.is_err());
        assert_eq!(selector.status(), RollStatus::Idle);
        assert_eq!(selector.roll_deadline(), None);
        assert_eq!(selector.current(), ChampionPick::default());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(selector.status(), RollStatus::Idle);
        assert_eq!(selector.current(), ChampionPick::default());

        assert!(selector.randomize_animated().await.is_settled());
        assert_eq!(selector.status(), RollStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_waits_for_the_roll_in_flight() {
        let selector = Arc::new(selector(
            ChampionDomain,
            Arc::new(FixedRandom::cycling(vec![0, 1, 2, 3])),
            Arc::new(TokioTicker),
            RollSettings::new(100, 1000, 1000),
        ));
        selector.load(candidate_catalog());
        assert_eq!(selector.settled().await, ChampionPick::default());

        let rolling = {
            let selector = selector.clone();
            tokio::spawn(async move { selector.randomize_animated().await })
        };
        tokio::time::sleep(Duration::from_millis(250)).await;

        let settled = selector.settled().await;
        let RollOutcome::Settled(report) = rolling.await.unwrap() else {
            panic!("an uncontested roll must settle");
        };
        assert_eq!(settled, report.result);
    }

    #[tokio::test]
    async fn unloaded_selector_is_not_ready() {
        let selector = unloaded();
        assert_eq!(selector.load_state(), LoadState::Unloaded);
        assert_eq!(selector.randomize_instant(), RollOutcome::NotReady);
        assert_eq!(selector.randomize_animated().await, RollOutcome::NotReady);
        assert_eq!(selector.current(), ChampionPick::default());
    }

    #[tokio::test]
    async fn failed_load_reports_not_ready() {
        let mut port = MockCatalogPort::new();
        port.expect_fetch_catalog()
            .times(1)
            .returning(|| Err(CatalogError::io("connection refused")));

        let selector = unloaded();
        let err = selector.load_from(&port).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(matches!(selector.load_state(), LoadState::Failed(_)));
        assert_eq!(selector.randomize_instant(), RollOutcome::NotReady);
    }

    #[tokio::test]
    async fn invalid_catalog_entries_fail_the_load() {
        let mut catalog = sample_catalog();
        catalog.champions.push(CatalogEntry::new("", "Nameless"));

        let selector = unloaded();
        let err = selector
            .load_from(&StaticCatalog::new(catalog))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));
        assert!(!selector.load_state().is_ready());
    }

    #[tokio::test]
    async fn load_from_port_makes_selector_ready() {
        let selector = unloaded();
        selector
            .load_from(&StaticCatalog::new(sample_catalog()))
            .await
            .unwrap();
        assert!(selector.load_state().is_ready());
        assert!(selector.randomize_instant().is_settled());
    }

    #[test]
    fn set_context_rebuilds_pools() {
        let selector = ready_selector(AbilitiesDomain, FixedRandom::constant(0), RollSettings::default());
        let before = selector.pools().unwrap();
        assert!(before.first().candidates().iter().any(is_smite_like));

        selector.set_context(AbilityContext::new(RoleMode::Lane));
        let after = selector.pools().unwrap();
        assert!(!after.first().candidates().iter().any(is_smite_like));
        assert_eq!(selector.context().role, RoleMode::Lane);

        // Snapshots taken earlier are untouched.
        assert!(before.first().candidates().iter().any(is_smite_like));
    }
}
