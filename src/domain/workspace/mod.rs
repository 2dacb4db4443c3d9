//! Workspace - caller-owned dashboard state.
//!
//! Everything here is mutated only by the caller, after it receives a
//! result from the content service.

mod app_state;
mod charity;
mod errors;
mod infrastructure;
mod mission_board;
mod tag_pool;
mod transcript;
mod user;

pub use app_state::{AppState, BOOK_GUIDE_REWARD};
pub use charity::CharityProject;
pub use errors::{TranscriptError, WorkspaceError};
pub use infrastructure::{
    InfrastructureTask, InfrastructureTrack, ToggleOutcome, TRACK_COMPLETION_BONUS,
};
pub use mission_board::MissionBoard;
pub use tag_pool::TagPool;
pub use transcript::{ChatMessage, ChatRole, ChatTranscript, ASSISTANT_GREETING};
pub use user::{CollectionItem, ItemKind, Rarity, UserState};
