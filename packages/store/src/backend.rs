//! # Backend: async interface to the remote data service
//!
//! Every read and write the list controllers perform goes through the
//! [`Backend`] trait, so the same controller logic runs against the hosted
//! backend (`api::RemoteClient`) or the in-memory [`crate::MemoryBackend`]
//! used in tests.
//!
//! | Method | Remote operation |
//! |--------|------------------|
//! | [`get_elevators`](Backend::get_elevators) | RPC `get_elevators`, scoped by an optional company id |
//! | [`create_elevator`](Backend::create_elevator) | insert into `elevators` |
//! | [`update_elevator`](Backend::update_elevator) | update one `elevators` row |
//! | [`delete_elevator`](Backend::delete_elevator) | delete one `elevators` row |
//! | [`get_buildings_for_elevators`](Backend::get_buildings_for_elevators) | RPC `get_buildings_for_elevators` |
//! | [`get_elevator_parts`](Backend::get_elevator_parts) | RPC `get_elevator_parts` |
//! | [`add_elevator_part`](Backend::add_elevator_part) | RPC `add_elevator_part` |
//! | [`update_elevator_part`](Backend::update_elevator_part) | RPC `update_elevator_part` |
//! | [`delete_elevator_part`](Backend::delete_elevator_part) | RPC `delete_elevator_part` |
//!
//! Authorization is enforced by the service; the client only supplies the
//! scoping hint.

use std::future::Future;

use crate::error::BackendError;
use crate::models::{Building, Elevator, ElevatorInput, ElevatorPart, PartInput};

pub type BackendResult<T> = Result<T, BackendError>;

/// Async data operations used by the elevator and parts controllers.
pub trait Backend {
    fn get_elevators(
        &self,
        company_id: Option<&str>,
    ) -> impl Future<Output = BackendResult<Vec<Elevator>>>;

    fn create_elevator(
        &self,
        company_id: Option<&str>,
        input: &ElevatorInput,
    ) -> impl Future<Output = BackendResult<Elevator>>;

    fn update_elevator(
        &self,
        id: &str,
        input: &ElevatorInput,
    ) -> impl Future<Output = BackendResult<()>>;

    fn delete_elevator(&self, id: &str) -> impl Future<Output = BackendResult<()>>;

    fn get_buildings_for_elevators(
        &self,
        elevator_ids: &[String],
    ) -> impl Future<Output = BackendResult<Vec<Building>>>;

    fn get_elevator_parts(
        &self,
        elevator_id: &str,
    ) -> impl Future<Output = BackendResult<Vec<ElevatorPart>>>;

    fn add_elevator_part(
        &self,
        elevator_id: &str,
        input: &PartInput,
    ) -> impl Future<Output = BackendResult<()>>;

    fn update_elevator_part(
        &self,
        part_id: &str,
        input: &PartInput,
    ) -> impl Future<Output = BackendResult<()>>;

    fn delete_elevator_part(&self, part_id: &str) -> impl Future<Output = BackendResult<()>>;
}
