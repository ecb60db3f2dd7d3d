//! Local filtering of the elevator collection.
//!
//! Pure and synchronous: re-deriving the visible rows never touches the
//! backend. Order of the input is preserved.

use crate::models::{Elevator, ElevatorStatus};

/// Value of the status selector. `All` disables the status predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ElevatorStatus),
}

impl StatusFilter {
    pub const ALL_SENTINEL: &'static str = "all";

    /// Parse a selector value. `"all"` and anything unrecognised mean `All`.
    pub fn parse(value: &str) -> Self {
        ElevatorStatus::parse(value).map_or(StatusFilter::All, StatusFilter::Only)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => Self::ALL_SENTINEL,
            StatusFilter::Only(s) => s.as_str(),
        }
    }

    pub fn matches(&self, status: ElevatorStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

/// Case-insensitive substring match on serial number or model.
/// An empty (or blank) term matches everything.
pub fn matches_search(elevator: &Elevator, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    elevator.serial_number.to_lowercase().contains(&needle)
        || elevator.model.to_lowercase().contains(&needle)
}

/// Stable filter of `collection` by search term and status.
pub fn apply_filters(collection: &[Elevator], search_term: &str, status: StatusFilter) -> Vec<Elevator> {
    collection
        .iter()
        .filter(|e| status.matches(e.status) && matches_search(e, search_term))
        .cloned()
        .collect()
}
