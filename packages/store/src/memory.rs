use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use crate::backend::{Backend, BackendResult};
use crate::error::BackendError;
use crate::models::{Building, Elevator, ElevatorInput, ElevatorPart, PartInput};

#[derive(Debug, Default)]
struct State {
    elevators: Vec<Elevator>,
    parts: Vec<ElevatorPart>,
    buildings: Vec<Building>,
    calls: HashMap<&'static str, usize>,
    fail_next: Option<BackendError>,
    stalls: HashMap<&'static str, usize>,
    next_id: u64,
}

/// In-memory Backend for tests and offline previews.
///
/// Records how many times each operation was called and can be told to fail
/// the next call, which is how the controller tests observe re-fetches and
/// error states. [`MemoryBackend::stall`] holds an operation open for a few
/// scheduler turns so tests can interleave calls deterministically.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic in another clone while holding the lock leaves the data as
    /// it was, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Suspend every future call to `op` for `turns` extra polls.
    pub fn stall(&self, op: &'static str, turns: usize) {
        self.lock().stalls.insert(op, turns);
    }

    /// Reads always yield once so they are observably in flight.
    async fn pause(&self, op: &'static str, base: usize) {
        let turns = base + self.lock().stalls.get(op).copied().unwrap_or(0);
        YieldNow { remaining: turns }.await;
    }

    pub fn with_elevators(elevators: Vec<Elevator>) -> Self {
        let backend = Self::new();
        backend.lock().elevators = elevators;
        backend
    }

    pub fn add_building(&self, building: Building) {
        self.lock().buildings.push(building);
    }

    pub fn add_part(&self, part: ElevatorPart) {
        self.lock().parts.push(part);
    }

    /// Make the next backend call (of any kind) fail with `error`.
    pub fn fail_next(&self, error: BackendError) {
        self.lock().fail_next = Some(error);
    }

    /// Number of times `op` was invoked, e.g. `"get_elevators"`.
    pub fn calls(&self, op: &str) -> usize {
        self.lock().calls.get(op).copied().unwrap_or(0)
    }

    pub fn elevators(&self) -> Vec<Elevator> {
        self.lock().elevators.clone()
    }

    /// Count the call and consume a pending injected failure.
    fn enter(&self, op: &'static str) -> BackendResult<()> {
        let mut state = self.lock();
        *state.calls.entry(op).or_default() += 1;
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut state = self.lock();
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }
}

impl Backend for MemoryBackend {
    async fn get_elevators(&self, company_id: Option<&str>) -> BackendResult<Vec<Elevator>> {
        self.pause("get_elevators", 1).await;
        self.enter("get_elevators")?;
        let state = self.lock();
        Ok(state
            .elevators
            .iter()
            .filter(|e| company_id.is_none() || e.company_id.as_deref() == company_id)
            .cloned()
            .collect())
    }

    async fn create_elevator(
        &self,
        company_id: Option<&str>,
        input: &ElevatorInput,
    ) -> BackendResult<Elevator> {
        self.pause("create_elevator", 0).await;
        self.enter("create_elevator")?;
        let id = self.next_id("elevator");
        let mut state = self.lock();
        if state
            .elevators
            .iter()
            .any(|e| e.serial_number == input.serial_number)
        {
            return Err(BackendError::Remote(format!(
                "Serial number {} already exists",
                input.serial_number
            )));
        }
        let elevator = input.clone().into_elevator(id, company_id.map(str::to_string));
        state.elevators.push(elevator.clone());
        Ok(elevator)
    }

    async fn update_elevator(&self, id: &str, input: &ElevatorInput) -> BackendResult<()> {
        self.pause("update_elevator", 0).await;
        self.enter("update_elevator")?;
        let mut state = self.lock();
        let Some(slot) = state.elevators.iter_mut().find(|e| e.id == id) else {
            return Err(BackendError::NotFound("Elevator".into()));
        };
        let company_id = slot.company_id.clone();
        *slot = input.clone().into_elevator(id.to_string(), company_id);
        Ok(())
    }

    async fn delete_elevator(&self, id: &str) -> BackendResult<()> {
        self.pause("delete_elevator", 0).await;
        self.enter("delete_elevator")?;
        let mut state = self.lock();
        let before = state.elevators.len();
        state.elevators.retain(|e| e.id != id);
        if state.elevators.len() == before {
            return Err(BackendError::NotFound("Elevator".into()));
        }
        state.parts.retain(|p| p.elevator_id != id);
        Ok(())
    }

    async fn get_buildings_for_elevators(&self, elevator_ids: &[String]) -> BackendResult<Vec<Building>> {
        self.pause("get_buildings_for_elevators", 0).await;
        self.enter("get_buildings_for_elevators")?;
        let state = self.lock();
        let wanted: Vec<&str> = state
            .elevators
            .iter()
            .filter(|e| elevator_ids.contains(&e.id))
            .filter_map(|e| e.building_id.as_deref())
            .collect();
        Ok(state
            .buildings
            .iter()
            .filter(|b| wanted.contains(&b.id.as_str()))
            .cloned()
            .collect())
    }

    async fn get_elevator_parts(&self, elevator_id: &str) -> BackendResult<Vec<ElevatorPart>> {
        self.pause("get_elevator_parts", 1).await;
        self.enter("get_elevator_parts")?;
        let state = self.lock();
        Ok(state
            .parts
            .iter()
            .filter(|p| p.elevator_id == elevator_id)
            .cloned()
            .collect())
    }

    async fn add_elevator_part(&self, elevator_id: &str, input: &PartInput) -> BackendResult<()> {
        self.pause("add_elevator_part", 0).await;
        self.enter("add_elevator_part")?;
        let id = self.next_id("part");
        let mut state = self.lock();
        if !state.elevators.iter().any(|e| e.id == elevator_id) {
            return Err(BackendError::NotFound("Elevator".into()));
        }
        state
            .parts
            .push(input.clone().into_part(id, elevator_id.to_string()));
        Ok(())
    }

    async fn update_elevator_part(&self, part_id: &str, input: &PartInput) -> BackendResult<()> {
        self.pause("update_elevator_part", 0).await;
        self.enter("update_elevator_part")?;
        let mut state = self.lock();
        let Some(slot) = state.parts.iter_mut().find(|p| p.id == part_id) else {
            return Err(BackendError::NotFound("Part".into()));
        };
        let elevator_id = slot.elevator_id.clone();
        *slot = input.clone().into_part(part_id.to_string(), elevator_id);
        Ok(())
    }

    async fn delete_elevator_part(&self, part_id: &str) -> BackendResult<()> {
        self.pause("delete_elevator_part", 0).await;
        self.enter("delete_elevator_part")?;
        let mut state = self.lock();
        let before = state.parts.len();
        state.parts.retain(|p| p.id != part_id);
        if state.parts.len() == before {
            return Err(BackendError::NotFound("Part".into()));
        }
        Ok(())
    }
}

/// Returns `Pending` `remaining` times, waking itself each time.
struct YieldNow {
    remaining: usize,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.remaining == 0 {
            return Poll::Ready(());
        }
        self.remaining -= 1;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElevatorStatus, PartStatus};

    fn input(serial: &str) -> ElevatorInput {
        ElevatorInput {
            serial_number: serial.into(),
            model: "Gen2".into(),
            capacity: 800,
            status: ElevatorStatus::Operational,
            building_id: None,
            last_inspection: None,
            next_inspection: None,
        }
    }

    #[tokio::test]
    async fn test_scoped_listing() {
        let backend = MemoryBackend::new();
        backend.create_elevator(Some("c1"), &input("A1")).await.unwrap();
        backend.create_elevator(Some("c2"), &input("B1")).await.unwrap();

        assert_eq!(backend.get_elevators(Some("c1")).await.unwrap().len(), 1);
        assert_eq!(backend.get_elevators(None).await.unwrap().len(), 2);
        assert_eq!(backend.calls("get_elevators"), 2);
    }

    #[tokio::test]
    async fn test_duplicate_serial_is_rejected_with_message() {
        let backend = MemoryBackend::new();
        backend.create_elevator(None, &input("A1")).await.unwrap();
        let err = backend.create_elevator(None, &input("A1")).await.unwrap_err();
        assert_eq!(err.user_message(), "Serial number A1 already exists");
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(BackendError::Transport("offline".into()));
        assert!(backend.get_elevators(None).await.is_err());
        assert!(backend.get_elevators(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_deleting_elevator_drops_its_parts() {
        let backend = MemoryBackend::new();
        let e = backend.create_elevator(None, &input("A1")).await.unwrap();
        backend
            .add_elevator_part(
                &e.id,
                &PartInput {
                    name: "Door motor".into(),
                    part_number: "DM-1".into(),
                    manufacturer: None,
                    installation_date: None,
                    last_maintenance_date: None,
                    status: PartStatus::Operational,
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(backend.get_elevator_parts(&e.id).await.unwrap().len(), 1);

        backend.delete_elevator(&e.id).await.unwrap();
        assert!(backend.get_elevator_parts(&e.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_poisoned_lock_is_recovered() {
        let backend = MemoryBackend::new();
        let held = backend.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = held.state.lock().unwrap();
            panic!("writer crashed");
        })
        .join();
        assert!(crashed.is_err());
        assert!(backend.state.is_poisoned());

        backend.create_elevator(None, &input("A1")).await.unwrap();
        assert_eq!(backend.elevators().len(), 1);
        assert_eq!(backend.calls("create_elevator"), 1);
    }

    #[tokio::test]
    async fn test_stalled_write_lands_after_the_read() {
        let backend = MemoryBackend::new();
        backend.stall("create_elevator", 3);
        let a1 = input("A1");
        let (rows, created) = tokio::join!(backend.get_elevators(None), backend.create_elevator(None, &a1));
        assert!(rows.unwrap().is_empty());
        assert!(created.is_ok());
        assert_eq!(backend.elevators().len(), 1);
    }
}
