// src/dashboard.rs
//! Page-level views: the sequential fetches each dashboard performs and the
//! summaries built from them.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::core::api_client::{ApiClient, DEFAULT_TOP_MATCHES};
use crate::error::ApiError;
use crate::filters::upcoming_interview_applications;
use crate::insights::{
    average_sub_scores, missing_skills, profile_completeness, skill_universe, ApplicationStats,
    ScoreDistribution, SubScoreAverages, ANALYTICS_SKILL_LIMIT,
};
use crate::types::{Candidate, Score};

/// Either the requested view, or the "complete your profile" screen shown
/// when the signed-in candidate has no record yet.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ProfileView<T> {
    NeedsProfile,
    Ready(T),
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateDashboard {
    pub name: String,
    pub profile_completion: u8,
    pub matched_jobs: usize,
    pub applications: usize,
    pub interviews: usize,
    pub top_matches: Vec<Score>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateAnalytics {
    pub profile_strength: u8,
    pub application_stats: ApplicationStats,
    pub score_distribution: ScoreDistribution,
    pub skills: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub average_scores: Option<SubScoreAverages>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecruiterOverview {
    pub jobs: usize,
    pub candidates: usize,
    pub interviews: usize,
    pub interviews_by_status: BTreeMap<String, usize>,
}

/// Look the candidate up by email. Not-found (404 or an empty envelope)
/// maps to `None`; any other failure propagates.
pub async fn find_candidate(api: &ApiClient, email: &str) -> Result<Option<Candidate>> {
    match api.get_candidate_by_email(email).await {
        Ok(response) => Ok(response.candidate),
        Err(e) if ApiError::find(&e).is_some_and(ApiError::is_not_found) => {
            debug!("No candidate record for {}", email);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub async fn candidate_dashboard(
    api: &ApiClient,
    email: &str,
    fallback_name: &str,
) -> Result<ProfileView<CandidateDashboard>> {
    let Some(candidate) = find_candidate(api, email).await? else {
        return Ok(ProfileView::NeedsProfile);
    };
    let candidate_id = candidate.candidate_id;
    info!("Loading dashboard for candidate {}", candidate_id);

    let top_matches = api
        .get_top_matches(candidate_id, DEFAULT_TOP_MATCHES)
        .await?
        .top_matches;
    let applications = api
        .get_candidate_applications(candidate_id)
        .await?
        .applications;

    let name = if candidate.name.is_empty() {
        fallback_name.to_string()
    } else {
        candidate.name.clone()
    };

    Ok(ProfileView::Ready(CandidateDashboard {
        name,
        profile_completion: profile_completeness(&candidate),
        matched_jobs: top_matches.len(),
        applications: applications.len(),
        interviews: upcoming_interview_applications(&applications).len(),
        top_matches,
    }))
}

pub async fn candidate_analytics(
    api: &ApiClient,
    email: &str,
) -> Result<ProfileView<CandidateAnalytics>> {
    let Some(candidate) = find_candidate(api, email).await? else {
        return Ok(ProfileView::NeedsProfile);
    };
    let candidate_id = candidate.candidate_id;
    info!("Loading analytics for candidate {}", candidate_id);

    let matches = api.get_candidate_matches(candidate_id).await?.matches;
    let applications = api
        .get_candidate_applications(candidate_id)
        .await?
        .applications;

    Ok(ProfileView::Ready(CandidateAnalytics {
        profile_strength: profile_completeness(&candidate),
        application_stats: ApplicationStats::from_applications(&applications),
        score_distribution: ScoreDistribution::from_scores(
            matches.iter().map(|m| m.eligibility_score),
        ),
        skills: skill_universe(&candidate, &matches, ANALYTICS_SKILL_LIMIT),
        skill_gaps: missing_skills(&candidate, &matches),
        average_scores: average_sub_scores(&matches),
    }))
}

pub async fn recruiter_overview(api: &ApiClient) -> Result<RecruiterOverview> {
    let jobs = api.get_jobs().await?.jobs;
    let candidates = api.get_candidates().await?.candidates;
    let interviews = api.get_interviews().await?.interviews;

    let mut interviews_by_status = BTreeMap::new();
    for interview in &interviews {
        *interviews_by_status
            .entry(interview.status.as_str().to_string())
            .or_insert(0) += 1;
    }

    Ok(RecruiterOverview {
        jobs: jobs.len(),
        candidates: candidates.len(),
        interviews: interviews.len(),
        interviews_by_status,
    })
}
