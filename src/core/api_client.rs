// src/core/api_client.rs
//! Thin JSON client for the matching backend: one method per endpoint, no
//! retries, no caching. Non-2xx answers become `ApiError::Status`.

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::types::response::{
    ApplicationCreated, ApplicationsResponse, CandidateResponse, CandidatesResponse,
    InterviewCreated, InterviewResponse, InterviewsResponse, JobDescriptionUpload, JobResponse,
    JobUploadResponse, JobsResponse, MatchesResponse, NewApplication, ResumeUploadResponse,
    TopMatchesResponse,
};
use crate::types::InterviewDraft;
use crate::uploads::{self, UploadFile};

pub const DEFAULT_TOP_MATCHES: u32 = 5;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create new API client. `timeout` of `None` means requests never time out.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {}", base_url);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ===== Candidates =====

    pub async fn get_candidates(&self) -> Result<CandidatesResponse> {
        self.get(&["candidates"], "fetch candidates").await
    }

    pub async fn get_candidate(&self, id: i64) -> Result<CandidateResponse> {
        self.get(&["candidates", id.to_string().as_str()], "fetch candidate")
            .await
    }

    pub async fn get_candidate_by_email(&self, email: &str) -> Result<CandidateResponse> {
        self.get(&["candidates", "email", email], "fetch candidate")
            .await
    }

    // ===== Jobs =====

    pub async fn get_jobs(&self) -> Result<JobsResponse> {
        self.get(&["jobs"], "fetch jobs").await
    }

    pub async fn get_job(&self, id: i64) -> Result<JobResponse> {
        self.get(&["jobs", id.to_string().as_str()], "fetch job").await
    }

    pub async fn get_job_applicants(&self, job_id: i64) -> Result<ApplicationsResponse> {
        self.get(
            &["jobs", job_id.to_string().as_str(), "applications"],
            "fetch job applicants",
        )
        .await
    }

    // ===== Uploads =====

    /// Resume upload; the backend parses the PDF and creates the candidate.
    pub async fn upload_resume(&self, path: &Path) -> Result<ResumeUploadResponse> {
        let file = uploads::load_resume(path).await?;
        self.post_file(&["upload", "resume"], file, "upload resume")
            .await
    }

    pub async fn upload_job_description(
        &self,
        job_title: &str,
        job_description: &str,
    ) -> Result<JobUploadResponse> {
        let payload = JobDescriptionUpload {
            job_title,
            job_description,
        };
        self.send_json(
            Method::POST,
            &["upload", "job-description"],
            &payload,
            "upload job description",
        )
        .await
    }

    pub async fn upload_job_csv(&self, path: &Path) -> Result<JobUploadResponse> {
        let file = uploads::load_job_csv(path).await?;
        self.post_file(&["upload", "job-description"], file, "upload job CSV")
            .await
    }

    // ===== Matches =====

    pub async fn get_candidate_matches(&self, candidate_id: i64) -> Result<MatchesResponse> {
        self.get(
            &["match", candidate_id.to_string().as_str()],
            "fetch candidate matches",
        )
        .await
    }

    pub async fn get_top_matches(
        &self,
        candidate_id: i64,
        limit: u32,
    ) -> Result<TopMatchesResponse> {
        let mut url = self.endpoint(&["match", "top", candidate_id.to_string().as_str()])?;
        url.query_pairs_mut()
            .append_pair("limit", limit.to_string().as_str());
        self.execute(self.client.get(url), "fetch top matches")
            .await
    }

    // ===== Applications =====

    pub async fn create_application(
        &self,
        candidate_id: i64,
        job_id: i64,
    ) -> Result<ApplicationCreated> {
        let payload = NewApplication {
            candidate_id,
            job_id,
        };
        self.send_json(
            Method::POST,
            &["applications"],
            &payload,
            "create application",
        )
        .await
    }

    pub async fn get_candidate_applications(
        &self,
        candidate_id: i64,
    ) -> Result<ApplicationsResponse> {
        self.get(
            &["applications", candidate_id.to_string().as_str()],
            "fetch candidate applications",
        )
        .await
    }

    pub async fn get_candidate_applications_by_email(
        &self,
        email: &str,
    ) -> Result<ApplicationsResponse> {
        let candidate_id = self.require_candidate_id(email).await?;
        self.get_candidate_applications(candidate_id).await
    }

    pub async fn get_candidate_matches_by_email(&self, email: &str) -> Result<MatchesResponse> {
        let candidate_id = self.require_candidate_id(email).await?;
        self.get_candidate_matches(candidate_id).await
    }

    // ===== Interviews =====

    pub async fn create_interview(&self, draft: &InterviewDraft) -> Result<InterviewCreated> {
        self.send_json(Method::POST, &["interviews"], draft, "create interview")
            .await
    }

    pub async fn get_interviews(&self) -> Result<InterviewsResponse> {
        self.get(&["interviews"], "fetch interviews").await
    }

    pub async fn get_interview(&self, id: i64) -> Result<InterviewResponse> {
        self.get(&["interviews", id.to_string().as_str()], "fetch interview")
            .await
    }

    pub async fn update_interview(
        &self,
        id: i64,
        draft: &InterviewDraft,
    ) -> Result<InterviewResponse> {
        self.send_json(
            Method::PUT,
            &["interviews", id.to_string().as_str()],
            draft,
            "update interview",
        )
        .await
    }

    pub async fn get_candidate_interviews(&self, candidate_id: i64) -> Result<InterviewsResponse> {
        self.get(
            &["interviews", "candidate", candidate_id.to_string().as_str()],
            "fetch candidate interviews",
        )
        .await
    }

    pub async fn get_recruiter_interviews(&self, recruiter_id: i64) -> Result<InterviewsResponse> {
        self.get(
            &["interviews", "recruiter", recruiter_id.to_string().as_str()],
            "fetch recruiter interviews",
        )
        .await
    }

    // ===== Plumbing =====

    async fn require_candidate_id(&self, email: &str) -> Result<i64> {
        let response = self.get_candidate_by_email(email).await?;
        match response.candidate {
            Some(candidate) => Ok(candidate.candidate_id),
            None => Err(ApiError::CandidateNotFound.into()),
        }
    }

    /// Base URL plus percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("API base URL cannot carry a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<R>(&self, segments: &[&str], action: &'static str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(self.client.get(url), action).await
    }

    async fn send_json<T, R>(
        &self,
        method: Method,
        segments: &[&str],
        payload: &T,
        action: &'static str,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(self.client.request(method, url).json(payload), action)
            .await
    }

    async fn post_file<R>(
        &self,
        segments: &[&str],
        file: UploadFile,
        action: &'static str,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        info!(
            "Uploading {} ({:.2} MB) to {}",
            file.file_name,
            file.size_mb(),
            url
        );

        let form = Form::new().part(
            UPLOAD_FIELD,
            Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(file.mime)
                .context("Failed to create multipart")?,
        );

        self.execute(self.client.post(url).multipart(form), action)
            .await
    }

    async fn execute<R>(&self, request: reqwest::RequestBuilder, action: &'static str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let request = request.build().context("Failed to build request")?;
        let target = format!("{} {}", request.method(), request.url());
        debug!("Calling backend: {}", target);

        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("HTTP request failed: {}", target))?;

        Self::parse_response(response, action).await
    }

    async fn parse_response<R>(response: Response, action: &'static str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        debug!("Response status: {}", status);

        if status.is_success() {
            response
                .json::<R>()
                .await
                .with_context(|| format!("Failed to parse response to {}", action))
        } else {
            let body = response.text().await.unwrap_or_default();
            error!("Backend error on {} ({}): {}", action, status, body);

            Err(ApiError::Status {
                action,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::new("http://localhost:5000/api", None).unwrap();
        let url = client.endpoint(&["match", "top", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/match/top/7");

        let slashed = ApiClient::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(
            slashed.endpoint(&["jobs"]).unwrap().as_str(),
            "http://localhost:5000/api/jobs"
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ApiClient::new("http://localhost:5000/api", None).unwrap();
        let url = client
            .endpoint(&["candidates", "email", "a b/c@example.com"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/candidates/email/a%20b%2Fc@example.com"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(ApiClient::new("not a url", None).is_err());
        assert!(ApiClient::new("mailto:someone@example.com", None).is_err());
    }
}
