// src/types/mod.rs
//! Record shapes exchanged with the matching backend

pub mod entities;
pub mod response;

pub use entities::{
    Application, ApplicationStatus, Candidate, Interview, InterviewDraft, InterviewStatus,
    InterviewType, Job, Score,
};

use serde::{Deserialize, Deserializer};

/// The backend sends `null` for text columns it never filled.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
