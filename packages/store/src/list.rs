//! # Elevator list controller
//!
//! [`ElevatorList`] owns everything behind the elevator table: the load state
//! machine, the 120-second collection cache, the in-flight guard, the filter
//! inputs and the mutation flow. Views hold a clone of the controller (all
//! clones share state) and receive a fresh [`ListView`] through the listener
//! after every transition.
//!
//! ## States
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready ──refresh / mutation──▶ Loading
//!                   │                                            │
//!                   └──err──▶ Error ──retry──▶ Loading ◀─────────┘
//! ```
//!
//! - A `load` while a fetch is in flight is dropped ([`LoadOutcome::Suppressed`]).
//! - A failed fetch keeps the previous rows so the user can retry in context.
//! - Create, update and delete never touch local rows: on success the cache
//!   is invalidated and the collection is re-read; on failure nothing changes.
//! - If the cache is invalidated while a fetch is in flight, that fetch's
//!   result is discarded and the read is repeated, so a write is never hidden
//!   by a read that started before it. This holds until the building names
//!   have arrived, not only the rows.
//! - [`ElevatorList::reset`] tears the list down. A fetch started before the
//!   reset keeps the guard until it lands, then drops its result.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::Backend;
use crate::cache::TtlCache;
use crate::clock::{Clock, SystemClock};
use crate::error::BackendError;
use crate::filter::{apply_filters, StatusFilter};
use crate::models::{Building, Elevator, ElevatorInput, ElevatorStatus, Profile};

/// Load state of a remote collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// What a call to [`ElevatorList::load`] ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// Served from the cache without a remote call.
    Cached,
    Fetched,
    /// Another fetch was already in flight.
    Suppressed,
    Failed(BackendError),
}

/// Counters for cache behaviour, exposed for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListStats {
    pub fetches: usize,
    pub cache_hits: usize,
    pub invalidations: usize,
}

/// Render-ready snapshot of the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListView {
    pub phase: Phase,
    /// Filtered rows in collection order.
    pub rows: Vec<Elevator>,
    /// Size of the unfiltered collection.
    pub total: usize,
    pub buildings: Vec<Building>,
    pub search: String,
    pub status: StatusFilter,
    /// Per-status totals over the unfiltered collection.
    pub counts: BTreeMap<&'static str, usize>,
}

impl ListView {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn building_name(&self, building_id: Option<&str>) -> Option<&str> {
        let id = building_id?;
        self.buildings
            .iter()
            .find(|b| b.id == id)
            .map(|b| b.name.as_str())
    }

    pub fn status_count(&self, status: ElevatorStatus) -> usize {
        self.counts.get(status.as_str()).copied().unwrap_or(0)
    }
}

#[derive(Debug)]
struct ListState {
    phase: Phase,
    cache: TtlCache<Vec<Elevator>>,
    data: Option<Arc<Vec<Elevator>>>,
    buildings: Vec<Building>,
    scope: Option<String>,
    search: String,
    status: StatusFilter,
    in_flight: bool,
    generation: u64,
    resets: u64,
    stats: ListStats,
}

impl ListState {
    fn new(ttl: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            cache: TtlCache::new(ttl),
            data: None,
            buildings: Vec::new(),
            scope: None,
            search: String::new(),
            status: StatusFilter::All,
            in_flight: false,
            generation: 0,
            resets: 0,
            stats: ListStats::default(),
        }
    }

    fn view(&self) -> ListView {
        let collection: &[Elevator] = self.data.as_deref().map_or(&[], Vec::as_slice);
        let mut counts = BTreeMap::new();
        for e in collection {
            *counts.entry(e.status.as_str()).or_insert(0) += 1;
        }
        ListView {
            phase: self.phase.clone(),
            rows: apply_filters(collection, &self.search, self.status),
            total: collection.len(),
            buildings: self.buildings.clone(),
            search: self.search.clone(),
            status: self.status,
            counts,
        }
    }
}

type Listener = Rc<dyn Fn(ListView)>;

/// Controller for the tenant-scoped elevator collection.
#[derive(Clone)]
pub struct ElevatorList<B, C = SystemClock> {
    backend: B,
    clock: C,
    state: Rc<RefCell<ListState>>,
    listener: Option<Listener>,
    refresh_on_resume: bool,
}

impl<B: Backend> ElevatorList<B, SystemClock> {
    pub fn new(backend: B, ttl: Duration) -> Self {
        Self::with_clock(backend, ttl, SystemClock)
    }
}

impl<B: Backend, C: Clock> ElevatorList<B, C> {
    pub fn with_clock(backend: B, ttl: Duration, clock: C) -> Self {
        Self {
            backend,
            clock,
            state: Rc::new(RefCell::new(ListState::new(ttl))),
            listener: None,
            refresh_on_resume: true,
        }
    }

    /// Called with a new snapshot after every state change.
    pub fn with_listener(mut self, listener: impl Fn(ListView) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn with_refresh_on_resume(mut self, enabled: bool) -> Self {
        self.refresh_on_resume = enabled;
        self
    }

    /// Company hint for the fetch: the caller's company for company roles,
    /// nothing for everyone else.
    pub fn scope_for(profile: &Profile) -> Option<String> {
        match profile.role {
            Some(role) if role.is_company_scoped() => profile.company_id.clone(),
            _ => None,
        }
    }

    pub fn set_scope(&self, scope: Option<String>) {
        self.state.borrow_mut().scope = scope;
    }

    pub fn view(&self) -> ListView {
        self.state.borrow().view()
    }

    pub fn stats(&self) -> ListStats {
        self.state.borrow().stats
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(self.view());
        }
    }

    /// Show the collection, from cache when fresh, otherwise from the backend.
    pub async fn load(&self) -> LoadOutcome {
        let now = self.clock.now_millis();
        let (scope, mut generation, resets) = {
            let mut st = self.state.borrow_mut();
            if st.in_flight {
                tracing::debug!("elevator fetch already in flight, dropping request");
                return LoadOutcome::Suppressed;
            }
            if let Some(hit) = st.cache.get(now) {
                tracing::debug!(rows = hit.len(), "elevator cache hit");
                st.data = Some(hit);
                st.phase = Phase::Ready;
                st.stats.cache_hits += 1;
                drop(st);
                self.notify();
                return LoadOutcome::Cached;
            }
            st.in_flight = true;
            st.phase = Phase::Loading;
            (st.scope.clone(), st.generation, st.resets)
        };
        self.notify();

        let outcome = loop {
            self.state.borrow_mut().stats.fetches += 1;
            let result = self.backend.get_elevators(scope.as_deref()).await;
            if self.was_reset(resets) {
                break LoadOutcome::Suppressed;
            }
            if self.superseded(&mut generation) {
                continue;
            }

            match result {
                Ok(rows) => {
                    let buildings = self.fetch_buildings(&rows).await;
                    if self.was_reset(resets) {
                        break LoadOutcome::Suppressed;
                    }
                    if self.superseded(&mut generation) {
                        continue;
                    }
                    let mut st = self.state.borrow_mut();
                    let now = self.clock.now_millis();
                    tracing::info!(rows = rows.len(), "elevators loaded");
                    st.data = Some(st.cache.store(rows, now));
                    if let Some(buildings) = buildings {
                        st.buildings = buildings;
                    }
                    st.phase = Phase::Ready;
                    break LoadOutcome::Fetched;
                }
                Err(err) => {
                    tracing::error!("Failed to load elevators: {}", err);
                    self.state.borrow_mut().phase = Phase::Error(err.user_message());
                    break LoadOutcome::Failed(err);
                }
            }
        };

        self.state.borrow_mut().in_flight = false;
        self.notify();
        outcome
    }

    /// True when the cache was invalidated since `generation`, which is then
    /// moved forward so the caller can read again.
    fn superseded(&self, generation: &mut u64) -> bool {
        let current = self.state.borrow().generation;
        if current == *generation {
            return false;
        }
        tracing::debug!("elevator cache invalidated during fetch, reading again");
        *generation = current;
        true
    }

    fn was_reset(&self, resets: u64) -> bool {
        let reset = self.state.borrow().resets != resets;
        if reset {
            tracing::debug!("elevator list reset during fetch, dropping result");
        }
        reset
    }

    /// Buildings are secondary: a failure keeps the previous names.
    async fn fetch_buildings(&self, rows: &[Elevator]) -> Option<Vec<Building>> {
        let ids: Vec<String> = rows
            .iter()
            .filter(|e| e.building_id.is_some())
            .map(|e| e.id.clone())
            .collect();
        if ids.is_empty() {
            return Some(Vec::new());
        }
        match self.backend.get_buildings_for_elevators(&ids).await {
            Ok(buildings) => Some(buildings),
            Err(err) => {
                tracing::warn!("Failed to load buildings: {}", err);
                None
            }
        }
    }

    /// Drop the cached collection so the next load goes to the backend.
    pub fn invalidate(&self) {
        let mut st = self.state.borrow_mut();
        st.cache.invalidate();
        st.generation += 1;
        st.stats.invalidations += 1;
    }

    /// Explicit refresh: bypass the cache.
    pub async fn refresh(&self) -> LoadOutcome {
        self.invalidate();
        self.load().await
    }

    /// Refresh-on-resume policy, triggered when the page becomes visible
    /// again. Only applies once the list has loaded (or failed) at least once.
    pub async fn resume(&self) -> Option<LoadOutcome> {
        if !self.refresh_on_resume {
            return None;
        }
        let phase = self.state.borrow().phase.clone();
        match phase {
            Phase::Ready | Phase::Error(_) => Some(self.refresh().await),
            Phase::Idle | Phase::Loading => None,
        }
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.state.borrow_mut().search = term.into();
        self.notify();
    }

    pub fn set_status(&self, status: StatusFilter) {
        self.state.borrow_mut().status = status;
        self.notify();
    }

    /// Forget rows, cache and filters. Called when the list view unmounts,
    /// which happens on sign-out since the view is keyed on the session.
    pub fn reset(&self) {
        {
            let mut st = self.state.borrow_mut();
            let fresh = ListState {
                in_flight: st.in_flight,
                generation: st.generation + 1,
                resets: st.resets + 1,
                ..ListState::new(st.cache.ttl())
            };
            *st = fresh;
        }
        self.notify();
    }

    /// Invalidate and re-read after a successful write.
    async fn after_write(&self) {
        self.invalidate();
        self.load().await;
    }

    pub async fn create(&self, input: &ElevatorInput) -> Result<Elevator, BackendError> {
        let scope = self.state.borrow().scope.clone();
        let created = self.backend.create_elevator(scope.as_deref(), input).await?;
        tracing::info!(id = %created.id, "elevator created");
        self.after_write().await;
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: &ElevatorInput) -> Result<(), BackendError> {
        self.backend.update_elevator(id, input).await?;
        tracing::info!(id, "elevator updated");
        self.after_write().await;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.backend.delete_elevator(id).await?;
        tracing::info!(id, "elevator deleted");
        self.after_write().await;
        Ok(())
    }
}
