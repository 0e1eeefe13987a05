//! Client side of the TalentMatch job-matching platform: a typed client for
//! the matching backend, a demo session store, interview video rooms, and
//! the list filters and summaries the candidate and recruiter views use.

pub mod cli;
pub mod core;
pub mod dashboard;
pub mod email;
pub mod error;
pub mod filters;
pub mod insights;
pub mod session;
pub mod types;
pub mod uploads;
pub mod utils;
pub mod video;

pub use crate::core::{ApiClient, ConfigManager};
pub use error::{ApiError, UploadError};
pub use session::{Role, Session, SessionStore};
pub use video::{RoomProvider, VideoRoom};
