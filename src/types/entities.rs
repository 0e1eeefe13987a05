// src/types/entities.rs
//! Candidate, job, score, application and interview records

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::null_as_empty;

// ===== Candidates & Jobs =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub linkedin: String,
    /// Comma-joined list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qualifications: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: String,
}

impl Candidate {
    /// Text columns in the order the backend returns them.
    pub fn text_fields(&self) -> [&str; 8] {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.linkedin,
            &self.skills,
            &self.qualifications,
            &self.projects,
            &self.experience,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    /// Comma-joined list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub required_skills: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub qualifications: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub responsibilities: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub benefits: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub other_details: String,
}

// ===== Scores =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub score_id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    #[serde(default)]
    pub skill_score: f64,
    #[serde(default)]
    pub education_score: f64,
    #[serde(default)]
    pub project_relevance_score: f64,
    #[serde(default)]
    pub experience_score: f64,
    pub eligibility_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<String>,
}

// ===== Applications =====

/// Lifecycle: Pending -> Reviewing -> Interview -> Rejected | Offered.
/// Unknown values from the backend are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Interview,
    Rejected,
    Offered,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Reviewing => "Reviewing",
            Self::Interview => "Interview",
            Self::Rejected => "Rejected",
            Self::Offered => "Offered",
            Self::Other(s) => s,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Reviewing)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Rejected | Self::Offered)
    }
}

impl From<&str> for ApplicationStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Reviewing" => Self::Reviewing,
            "Interview" => Self::Interview,
            "Rejected" => Self::Rejected,
            "Offered" => Self::Offered,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub application_id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub application_date: String,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
}

// ===== Interviews =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewType {
    Video,
    InPerson,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl InterviewType {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewType::Video => "video",
            InterviewType::InPerson => "in-person",
            InterviewType::Phone => "phone",
        }
    }
}

impl InterviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub interview_id: i64,
    pub application_id: i64,
    pub candidate_id: i64,
    pub job_id: i64,
    #[serde(default)]
    pub recruiter_id: Option<i64>,
    pub date: String,
    pub time: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: InterviewType,
    pub status: InterviewStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub meeting_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub recruiter_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Partial interview body for create and update calls; unset fields are
/// left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InterviewType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InterviewStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
