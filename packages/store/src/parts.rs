//! Parts of a single elevator, shown in the nested parts modal.
//!
//! Unlike [`crate::ElevatorList`] there is no cache: every [`PartsList::open`]
//! reads from the backend, and every successful write reads again.
//!
//! Each read carries a token. Only the most recent read may apply its
//! result, so switching elevators or closing the modal while a read is
//! pending leaves the late result unused.

use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::Backend;
use crate::error::BackendError;
use crate::list::{LoadOutcome, Phase};
use crate::models::{ElevatorPart, PartInput};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartsView {
    pub elevator_id: Option<String>,
    pub phase: Phase,
    pub parts: Vec<ElevatorPart>,
}

impl PartsView {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct PendingRead {
    token: u64,
    elevator_id: String,
}

#[derive(Debug, Default)]
struct PartsState {
    view: PartsView,
    pending: Option<PendingRead>,
    next_token: u64,
}

type Listener = Rc<dyn Fn(PartsView)>;

#[derive(Clone)]
pub struct PartsList<B> {
    backend: B,
    state: Rc<RefCell<PartsState>>,
    listener: Option<Listener>,
}

impl<B: Backend> PartsList<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: Rc::new(RefCell::new(PartsState::default())),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl Fn(PartsView) + 'static) -> Self {
        self.listener = Some(Rc::new(listener));
        self
    }

    pub fn view(&self) -> PartsView {
        self.state.borrow().view.clone()
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener(self.view());
        }
    }

    /// Select `elevator_id` and read its parts. Rows from a different
    /// elevator are cleared first so they never flash under the wrong header.
    pub async fn open(&self, elevator_id: &str) -> LoadOutcome {
        {
            let mut st = self.state.borrow_mut();
            if st.view.elevator_id.as_deref() != Some(elevator_id) {
                st.view = PartsView {
                    elevator_id: Some(elevator_id.to_string()),
                    ..PartsView::default()
                };
            }
        }
        self.fetch(false).await
    }

    /// Read the parts of the selected elevator again, superseding any read
    /// still pending.
    pub async fn reload(&self) -> LoadOutcome {
        self.fetch(true).await
    }

    async fn fetch(&self, supersede: bool) -> LoadOutcome {
        let (elevator_id, token) = {
            let mut st = self.state.borrow_mut();
            let Some(id) = st.view.elevator_id.clone() else {
                return LoadOutcome::Suppressed;
            };
            if !supersede && st.pending.as_ref().is_some_and(|p| p.elevator_id == id) {
                tracing::debug!(elevator_id = %id, "parts fetch already in flight");
                return LoadOutcome::Suppressed;
            }
            st.next_token += 1;
            let token = st.next_token;
            st.pending = Some(PendingRead {
                token,
                elevator_id: id.clone(),
            });
            st.view.phase = Phase::Loading;
            (id, token)
        };
        self.notify();

        let result = self.backend.get_elevator_parts(&elevator_id).await;
        let outcome = {
            let mut st = self.state.borrow_mut();
            if st.pending.as_ref().map(|p| p.token) != Some(token) {
                tracing::debug!(elevator_id = %elevator_id, "parts read superseded, dropping result");
                return LoadOutcome::Suppressed;
            }
            st.pending = None;
            if st.view.elevator_id.as_deref() != Some(elevator_id.as_str()) {
                return LoadOutcome::Suppressed;
            }
            match result {
                Ok(parts) => {
                    tracing::info!(elevator_id = %elevator_id, parts = parts.len(), "parts loaded");
                    st.view.parts = parts;
                    st.view.phase = Phase::Ready;
                    LoadOutcome::Fetched
                }
                Err(err) => {
                    tracing::error!("Failed to load parts: {}", err);
                    st.view.phase = Phase::Error(err.user_message());
                    LoadOutcome::Failed(err)
                }
            }
        };
        self.notify();
        outcome
    }

    pub fn close(&self) {
        {
            let mut st = self.state.borrow_mut();
            st.view = PartsView::default();
            st.pending = None;
        }
        self.notify();
    }

    fn selected(&self) -> Result<String, BackendError> {
        self.state
            .borrow()
            .view
            .elevator_id
            .clone()
            .ok_or_else(|| BackendError::NotFound("Elevator".into()))
    }

    pub async fn add(&self, input: &PartInput) -> Result<(), BackendError> {
        let elevator_id = self.selected()?;
        self.backend.add_elevator_part(&elevator_id, input).await?;
        tracing::info!(elevator_id = %elevator_id, "part added");
        self.reload().await;
        Ok(())
    }

    pub async fn update(&self, part_id: &str, input: &PartInput) -> Result<(), BackendError> {
        self.backend.update_elevator_part(part_id, input).await?;
        tracing::info!(part_id, "part updated");
        self.reload().await;
        Ok(())
    }

    pub async fn delete(&self, part_id: &str) -> Result<(), BackendError> {
        self.backend.delete_elevator_part(part_id).await?;
        tracing::info!(part_id, "part deleted");
        self.reload().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use crate::models::{ElevatorInput, ElevatorStatus, PartStatus};

    fn part_input(name: &str) -> PartInput {
        PartInput {
            name: name.into(),
            part_number: format!("{name}-001"),
            manufacturer: Some("Kone".into()),
            installation_date: None,
            last_maintenance_date: None,
            status: PartStatus::Operational,
            description: None,
        }
    }

    async fn backend_with_elevator() -> (MemoryBackend, String) {
        let backend = MemoryBackend::new();
        let e = backend
            .create_elevator(
                None,
                &ElevatorInput {
                    serial_number: "A120".into(),
                    model: "Gen2".into(),
                    capacity: 630,
                    status: ElevatorStatus::Operational,
                    building_id: None,
                    last_inspection: None,
                    next_inspection: None,
                },
            )
            .await
            .unwrap();
        (backend, e.id)
    }

    #[tokio::test]
    async fn test_every_open_reads_from_backend() {
        let (backend, id) = backend_with_elevator().await;
        let parts = PartsList::new(backend.clone());

        parts.open(&id).await;
        parts.close();
        parts.open(&id).await;
        assert_eq!(backend.calls("get_elevator_parts"), 2);
        assert_eq!(parts.view().phase, Phase::Ready);
    }

    #[tokio::test]
    async fn test_add_update_delete_reload_the_list() {
        let (backend, id) = backend_with_elevator().await;
        let parts = PartsList::new(backend.clone());
        parts.open(&id).await;

        parts.add(&part_input("Rope")).await.unwrap();
        let view = parts.view();
        assert_eq!(view.parts.len(), 1);
        let part_id = view.parts[0].id.clone();

        let mut changed = part_input("Rope");
        changed.status = PartStatus::NeedsMaintenance;
        parts.update(&part_id, &changed).await.unwrap();
        assert_eq!(parts.view().parts[0].status, PartStatus::NeedsMaintenance);

        parts.delete(&part_id).await.unwrap();
        assert!(parts.view().parts.is_empty());
        assert_eq!(backend.calls("get_elevator_parts"), 4);
    }

    #[tokio::test]
    async fn test_failed_delete_changes_nothing() {
        let (backend, id) = backend_with_elevator().await;
        let parts = PartsList::new(backend.clone());
        parts.open(&id).await;
        parts.add(&part_input("Sheave")).await.unwrap();
        let reads = backend.calls("get_elevator_parts");

        backend.fail_next(BackendError::Remote("part is referenced by a work order".into()));
        let part_id = parts.view().parts[0].id.clone();
        let err = parts.delete(&part_id).await.unwrap_err();
        assert_eq!(err.user_message(), "part is referenced by a work order");
        assert_eq!(parts.view().parts.len(), 1);
        assert_eq!(backend.calls("get_elevator_parts"), reads);
    }

    #[tokio::test]
    async fn test_switching_elevator_clears_rows() {
        let (backend, id) = backend_with_elevator().await;
        let parts = PartsList::new(backend.clone());
        parts.open(&id).await;
        parts.add(&part_input("Rope")).await.unwrap();

        parts.open("other").await;
        let view = parts.view();
        assert_eq!(view.elevator_id.as_deref(), Some("other"));
        assert!(view.parts.is_empty());
    }

    #[tokio::test]
    async fn test_add_without_selection_is_rejected() {
        let parts = PartsList::new(MemoryBackend::new());
        assert!(parts.add(&part_input("Rope")).await.is_err());
    }

    async fn two_elevators() -> (MemoryBackend, String, String) {
        let (backend, a) = backend_with_elevator().await;
        let b = backend
            .create_elevator(
                None,
                &ElevatorInput {
                    serial_number: "B200".into(),
                    model: "Gen2".into(),
                    capacity: 1000,
                    status: ElevatorStatus::Operational,
                    building_id: None,
                    last_inspection: None,
                    next_inspection: None,
                },
            )
            .await
            .unwrap();
        backend.add_elevator_part(&a, &part_input("Rope")).await.unwrap();
        backend.add_elevator_part(&b.id, &part_input("Door motor")).await.unwrap();
        (backend, a, b.id)
    }

    #[tokio::test]
    async fn test_switching_while_a_read_is_pending_loads_the_new_elevator() {
        let (backend, a, b) = two_elevators().await;
        backend.stall("get_elevator_parts", 2);
        let parts = PartsList::new(backend.clone());

        let (first, second) = tokio::join!(parts.open(&a), parts.open(&b));
        assert_eq!(first, LoadOutcome::Suppressed);
        assert_eq!(second, LoadOutcome::Fetched);

        let view = parts.view();
        assert_eq!(view.elevator_id.as_deref(), Some(b.as_str()));
        assert_eq!(view.phase, Phase::Ready);
        assert_eq!(view.parts.len(), 1);
        assert_eq!(view.parts[0].name, "Door motor");
        assert_eq!(backend.calls("get_elevator_parts"), 2);
    }

    #[tokio::test]
    async fn test_reopening_the_same_elevator_shares_the_pending_read() {
        let (backend, a, _b) = two_elevators().await;
        let parts = PartsList::new(backend.clone());

        let (first, second) = tokio::join!(parts.open(&a), parts.open(&a));
        assert_eq!(first, LoadOutcome::Fetched);
        assert_eq!(second, LoadOutcome::Suppressed);
        assert_eq!(backend.calls("get_elevator_parts"), 1);
    }

    #[tokio::test]
    async fn test_close_during_a_read_discards_it() {
        let (backend, a, b) = two_elevators().await;
        backend.stall("get_elevator_parts", 3);
        let parts = PartsList::new(backend.clone());

        let (late, ()) = tokio::join!(parts.open(&a), async {
            tokio::task::yield_now().await;
            parts.close();
            assert!(parts.state.borrow().pending.is_none());
        });
        assert_eq!(late, LoadOutcome::Suppressed);
        assert_eq!(parts.view(), PartsView::default());

        // A later read is not blocked by the discarded one.
        assert_eq!(parts.open(&b).await, LoadOutcome::Fetched);
        assert_eq!(parts.view().parts[0].name, "Door motor");
    }
}
