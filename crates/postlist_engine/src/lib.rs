//! Post list engine: IO and effect execution for the post list core.
mod api;
mod engine;
mod memory;
mod persist;
mod types;

pub use api::{ApiSettings, PostsApi, ReqwestPostsApi};
pub use engine::EngineHandle;
pub use memory::MemoryPostsApi;
pub use persist::{ensure_state_dir, PersistError, StateFile};
pub use types::{ApiError, EngineEvent, FailureKind};
