pub mod backend;
pub mod cache;
pub mod clock;
pub mod config;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod forms;
pub mod list;
pub mod models;
pub mod parts;
pub mod session;

mod memory;
pub use memory::MemoryBackend;

pub use backend::{Backend, BackendResult};
pub use cache::{TtlCache, DEFAULT_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use confirm::DeleteConfirmation;
pub use error::BackendError;
pub use filter::{apply_filters, StatusFilter};
pub use forms::FieldErrors;
pub use list::{ElevatorList, ListView, LoadOutcome, Phase};
pub use models::{
    Building, Elevator, ElevatorInput, ElevatorPart, ElevatorStatus, PartInput, PartStatus,
    Profile, ProfileUpdate, Role, RoleDetails, RpcResult,
};
pub use parts::{PartsList, PartsView};
pub use session::{platform_session_store, MemorySessionStore, SessionStore};
