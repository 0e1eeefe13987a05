// src/filters.rs
//! Tab and search filters applied to fetched lists before display.

use clap::ValueEnum;

use crate::types::{Application, ApplicationStatus, Score};
use crate::utils::contains_ci;

pub const HIGH_MATCH_THRESHOLD: f64 = 80.0;
pub const MEDIUM_MATCH_THRESHOLD: f64 = 60.0;

/// Match quality bands on the eligibility score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchTier {
    #[default]
    All,
    /// 80 and above
    High,
    /// 60 to 79
    Medium,
    /// below 60
    Low,
}

impl MatchTier {
    pub fn contains(self, score: f64) -> bool {
        match self {
            MatchTier::All => true,
            MatchTier::High => score >= HIGH_MATCH_THRESHOLD,
            MatchTier::Medium => (MEDIUM_MATCH_THRESHOLD..HIGH_MATCH_THRESHOLD).contains(&score),
            MatchTier::Low => score < MEDIUM_MATCH_THRESHOLD,
        }
    }

    pub fn of(score: f64) -> MatchTier {
        if score >= HIGH_MATCH_THRESHOLD {
            MatchTier::High
        } else if score >= MEDIUM_MATCH_THRESHOLD {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }
}

/// Tabs on the candidate's applications page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CandidateTab {
    #[default]
    All,
    /// Pending or Reviewing
    Active,
    Interview,
    /// Rejected or Offered
    Completed,
}

impl CandidateTab {
    pub fn contains(self, status: &ApplicationStatus) -> bool {
        match self {
            CandidateTab::All => true,
            CandidateTab::Active => status.is_active(),
            CandidateTab::Interview => *status == ApplicationStatus::Interview,
            CandidateTab::Completed => status.is_completed(),
        }
    }
}

/// Tabs on the recruiter's applications page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RecruiterTab {
    #[default]
    All,
    Pending,
    Reviewing,
    Interview,
    /// Rejected or Offered
    Completed,
}

impl RecruiterTab {
    pub fn contains(self, status: &ApplicationStatus) -> bool {
        match self {
            RecruiterTab::All => true,
            RecruiterTab::Pending => *status == ApplicationStatus::Pending,
            RecruiterTab::Reviewing => *status == ApplicationStatus::Reviewing,
            RecruiterTab::Interview => *status == ApplicationStatus::Interview,
            RecruiterTab::Completed => status.is_completed(),
        }
    }
}

fn any_field_matches(fields: &[Option<&str>], search: &str) -> bool {
    search.is_empty()
        || fields
            .iter()
            .flatten()
            .any(|field| contains_ci(field, search))
}

/// Matches in `tier` whose title, company or required skills contain `search`.
pub fn filter_matches<'a>(matches: &'a [Score], tier: MatchTier, search: &str) -> Vec<&'a Score> {
    matches
        .iter()
        .filter(|m| {
            let fields = [
                m.job_title.as_deref(),
                m.company.as_deref(),
                m.required_skills.as_deref(),
            ];
            any_field_matches(&fields, search) && tier.contains(m.eligibility_score)
        })
        .collect()
}

pub fn filter_candidate_applications(
    applications: &[Application],
    tab: CandidateTab,
) -> Vec<&Application> {
    applications
        .iter()
        .filter(|a| tab.contains(&a.status))
        .collect()
}

/// Recruiter view: tab plus a search over candidate name, job title and company.
pub fn filter_recruiter_applications<'a>(
    applications: &'a [Application],
    tab: RecruiterTab,
    search: &str,
) -> Vec<&'a Application> {
    applications
        .iter()
        .filter(|a| {
            let fields = [
                a.candidate_name.as_deref(),
                a.job_title.as_deref(),
                a.company.as_deref(),
            ];
            any_field_matches(&fields, search) && tab.contains(&a.status)
        })
        .collect()
}

/// Applications that reached the interview stage.
pub fn upcoming_interview_applications(applications: &[Application]) -> Vec<&Application> {
    filter_candidate_applications(applications, CandidateTab::Interview)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(job_id: i64, eligibility: f64, title: &str, skills: &str) -> Score {
        Score {
            job_id,
            eligibility_score: eligibility,
            job_title: Some(title.to_string()),
            company: Some("Acme".to_string()),
            required_skills: Some(skills.to_string()),
            ..Default::default()
        }
    }

    fn application(id: i64, status: &str, candidate: &str, title: &str) -> Application {
        Application {
            application_id: id,
            candidate_id: 1,
            job_id: id,
            application_date: "2024-05-01".to_string(),
            status: ApplicationStatus::from(status),
            job_title: Some(title.to_string()),
            company: Some("Globex".to_string()),
            location: None,
            candidate_name: Some(candidate.to_string()),
        }
    }

    fn ids(scores: Vec<&Score>) -> Vec<i64> {
        scores.into_iter().map(|s| s.job_id).collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert!(MatchTier::High.contains(80.0));
        assert!(!MatchTier::High.contains(79.99));
        assert!(MatchTier::Medium.contains(60.0));
        assert!(MatchTier::Medium.contains(79.5));
        assert!(!MatchTier::Medium.contains(80.0));
        assert!(MatchTier::Low.contains(59.9));
        assert!(!MatchTier::Low.contains(60.0));
        assert_eq!(MatchTier::of(85.0), MatchTier::High);
        assert_eq!(MatchTier::of(60.0), MatchTier::Medium);
        assert_eq!(MatchTier::of(12.0), MatchTier::Low);
    }

    #[test]
    fn test_tiers_partition_matches() {
        let matches = vec![
            score(1, 92.0, "Rust Engineer", "Rust, Tokio"),
            score(2, 80.0, "Backend Developer", "Go"),
            score(3, 65.0, "Data Analyst", "SQL"),
            score(4, 59.0, "Designer", "Figma"),
        ];

        assert_eq!(ids(filter_matches(&matches, MatchTier::All, "")), vec![1, 2, 3, 4]);
        assert_eq!(ids(filter_matches(&matches, MatchTier::High, "")), vec![1, 2]);
        assert_eq!(ids(filter_matches(&matches, MatchTier::Medium, "")), vec![3]);
        assert_eq!(ids(filter_matches(&matches, MatchTier::Low, "")), vec![4]);
    }

    #[test]
    fn test_match_search() {
        let mut matches = vec![
            score(1, 92.0, "Rust Engineer", "Rust, Tokio"),
            score(2, 70.0, "Platform Engineer", "Kubernetes, rust"),
            score(3, 65.0, "Data Analyst", "SQL"),
        ];
        matches[2].company = None;

        assert_eq!(ids(filter_matches(&matches, MatchTier::All, "RUST")), vec![1, 2]);
        assert_eq!(ids(filter_matches(&matches, MatchTier::Medium, "rust")), vec![2]);
        assert_eq!(ids(filter_matches(&matches, MatchTier::All, "acme")), vec![1, 2]);
    }

    #[test]
    fn test_candidate_tabs() {
        let apps = vec![
            application(1, "Pending", "Ada", "Engineer"),
            application(2, "Reviewing", "Ada", "Engineer"),
            application(3, "Interview", "Ada", "Engineer"),
            application(4, "Rejected", "Ada", "Engineer"),
            application(5, "Offered", "Ada", "Engineer"),
        ];
        let pick = |tab| {
            filter_candidate_applications(&apps, tab)
                .into_iter()
                .map(|a| a.application_id)
                .collect::<Vec<_>>()
        };

        assert_eq!(pick(CandidateTab::All), vec![1, 2, 3, 4, 5]);
        assert_eq!(pick(CandidateTab::Active), vec![1, 2]);
        assert_eq!(pick(CandidateTab::Interview), vec![3]);
        assert_eq!(pick(CandidateTab::Completed), vec![4, 5]);
        assert_eq!(upcoming_interview_applications(&apps).len(), 1);
    }

    #[test]
    fn test_recruiter_tabs_and_search() {
        let apps = vec![
            application(1, "Pending", "Ada Lovelace", "Engineer"),
            application(2, "Reviewing", "Grace Hopper", "Compiler Engineer"),
            application(3, "Offered", "Alan Turing", "Researcher"),
            application(4, "Withdrawn", "Ada Byron", "Analyst"),
        ];
        let pick = |tab, search| {
            filter_recruiter_applications(&apps, tab, search)
                .into_iter()
                .map(|a| a.application_id)
                .collect::<Vec<_>>()
        };

        assert_eq!(pick(RecruiterTab::All, "ada"), vec![1, 4]);
        assert_eq!(pick(RecruiterTab::All, "engineer"), vec![1, 2]);
        assert_eq!(pick(RecruiterTab::Reviewing, ""), vec![2]);
        assert_eq!(pick(RecruiterTab::Completed, ""), vec![3]);
        assert_eq!(pick(RecruiterTab::Pending, "grace"), Vec::<i64>::new());
        assert_eq!(pick(RecruiterTab::All, "globex").len(), 4);
    }
}
