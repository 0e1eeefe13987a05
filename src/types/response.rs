use serde::{Deserialize, Serialize};

use super::entities::{Application, Candidate, Interview, Job, Score};

// ===== Response envelopes, returned to callers as-is =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<Candidate>,
}

/// The backend answers lookups with `{"candidate": null}` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    #[serde(default)]
    pub candidate: Option<Candidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub job: Job,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Score>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub top_matches: Vec<Score>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsResponse {
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCreated {
    pub application_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewsResponse {
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    pub interview: Interview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewCreated {
    pub interview_id: i64,
}

// ===== Upload Responses =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeUploadResponse {
    pub message: String,
    pub candidate_id: i64,
    #[serde(default)]
    pub parsed_data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobUploadResponse {
    pub message: String,
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub parsed_data: serde_json::Value,
}

// ===== Request Bodies =====

#[derive(Debug, Serialize)]
pub(crate) struct NewApplication {
    pub candidate_id: i64,
    pub job_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobDescriptionUpload<'a> {
    pub job_title: &'a str,
    pub job_description: &'a str,
}
