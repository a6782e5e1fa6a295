//! # StudyFlow Core Library
//!
//! Core business logic for the StudyFlow study-planning assistant. The CLI
//! binary is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Scheduler**: pure day-scheduling engine (window splitting, deadline
//!   ordering, capacity capping)
//! - **Profile**: scheduling preferences plus the capacity adaptation rule
//! - **Storage**: `StateStore` abstraction with in-memory and SQLite
//!   implementations, plus TOML configuration
//! - **Narrative**: Gemini-backed text generation with deterministic local
//!   fallbacks
//! - **Planner / Reflection**: the two request flows, wired over injected
//!   store and narrator collaborators
//!
//! ## Key Components
//!
//! - [`schedule_day`]: the day-scheduling algorithm
//! - [`adapt_max_blocks`]: the capacity adaptation rule
//! - [`StateStore`]: per-user state collaborator
//! - [`Narrator`]: narrative text collaborator

pub mod error;
pub mod memory;
pub mod narrative;
pub mod planner;
pub mod profile;
pub mod reflection;
pub mod scheduler;
pub mod state;
pub mod storage;
pub mod task;

pub use error::{ConfigError, CoreError, NarrativeError, ParseError, StorageError};
pub use memory::{MemoryService, ProfileSummary, StatusReport};
pub use narrative::{GeminiNarrator, NarrativeText, Narrator, OfflineNarrator};
pub use planner::{PlanResponse, Planner};
pub use profile::{adapt_max_blocks, Profile, ProfileOverrides};
pub use reflection::{ReflectResponse, ReflectionService};
pub use scheduler::{
    parse_date, parse_time, schedule_day, split_into_blocks, StudyBlock, TimeWindow, WindowSpec,
};
pub use state::{HistoryEntry, SessionInfo, UserState};
pub use storage::{Config, MemoryStore, StateStore, UserDb};
pub use task::{Course, Task, TaskStatus};
