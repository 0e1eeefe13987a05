// src/insights.rs
//! Aggregates shown on the dashboards, computed from fetched records only.

use serde::Serialize;
use std::collections::HashSet;

use crate::types::{Application, ApplicationStatus, Candidate, Score};
use crate::utils::{is_filled, split_comma_list};

pub const ANALYTICS_SKILL_LIMIT: usize = 8;

/// Share of filled candidate fields, 0-100. The id counts as a field.
pub fn profile_completeness(candidate: &Candidate) -> u8 {
    let text = candidate.text_fields();
    let total = text.len() + 1;
    let filled = text.iter().filter(|value| is_filled(value)).count()
        + usize::from(candidate.candidate_id != 0);

    ((filled as f64 / total as f64) * 100.0).round() as u8
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub reviewing: usize,
    pub interview: usize,
    pub rejected: usize,
    pub offered: usize,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        let mut stats = ApplicationStats {
            total: applications.len(),
            ..Default::default()
        };
        for application in applications {
            match application.status {
                ApplicationStatus::Pending => stats.pending += 1,
                ApplicationStatus::Reviewing => stats.reviewing += 1,
                ApplicationStatus::Interview => stats.interview += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
                ApplicationStatus::Offered => stats.offered += 1,
                ApplicationStatus::Other(_) => {}
            }
        }
        stats
    }
}

/// Eligibility scores bucketed the way the analytics chart groups them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub from_90: usize,
    pub from_80: usize,
    pub from_70: usize,
    pub from_60: usize,
    pub below_60: usize,
}

impl ScoreDistribution {
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut dist = ScoreDistribution::default();
        for score in scores {
            match score {
                s if s >= 90.0 => dist.from_90 += 1,
                s if s >= 80.0 => dist.from_80 += 1,
                s if s >= 70.0 => dist.from_70 += 1,
                s if s >= 60.0 => dist.from_60 += 1,
                _ => dist.below_60 += 1,
            }
        }
        dist
    }

    /// (label, count) pairs in chart order.
    pub fn buckets(&self) -> [(&'static str, usize); 5] {
        [
            ("90-100%", self.from_90),
            ("80-89%", self.from_80),
            ("70-79%", self.from_70),
            ("60-69%", self.from_60),
            ("Below 60%", self.below_60),
        ]
    }
}

/// Mean sub-scores across a candidate's matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubScoreAverages {
    pub skill: f64,
    pub education: f64,
    pub project_relevance: f64,
    pub experience: f64,
    pub eligibility: f64,
}

pub fn average_sub_scores(matches: &[Score]) -> Option<SubScoreAverages> {
    if matches.is_empty() {
        return None;
    }
    let n = matches.len() as f64;
    let mean = |f: fn(&Score) -> f64| matches.iter().map(f).sum::<f64>() / n;

    Some(SubScoreAverages {
        skill: mean(|m| m.skill_score),
        education: mean(|m| m.education_score),
        project_relevance: mean(|m| m.project_relevance_score),
        experience: mean(|m| m.experience_score),
        eligibility: mean(|m| m.eligibility_score),
    })
}

/// Skills column as a list: comma separated, trimmed, empties dropped.
pub fn split_skills(text: &str) -> Vec<String> {
    split_comma_list(text)
}

/// The candidate's skills followed by those the matched jobs require,
/// first occurrence wins, capped at `limit`.
pub fn skill_universe(candidate: &Candidate, matches: &[Score], limit: usize) -> Vec<String> {
    let job_skills = matches
        .iter()
        .filter_map(|m| m.required_skills.as_deref())
        .flat_map(split_skills);

    let mut seen = HashSet::new();
    split_skills(&candidate.skills)
        .into_iter()
        .chain(job_skills)
        .filter(|skill| seen.insert(skill.clone()))
        .take(limit)
        .collect()
}

/// Required skills of the matched jobs the candidate does not list,
/// compared case-insensitively.
pub fn missing_skills(candidate: &Candidate, matches: &[Score]) -> Vec<String> {
    let have: HashSet<String> = split_skills(&candidate.skills)
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect();

    let mut seen = HashSet::new();
    matches
        .iter()
        .filter_map(|m| m.required_skills.as_deref())
        .flat_map(split_skills)
        .filter(|skill| {
            let key = skill.to_lowercase();
            !have.contains(&key) && seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(skills: &str) -> Candidate {
        Candidate {
            candidate_id: 4,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "None".into(),
            linkedin: String::new(),
            skills: skills.into(),
            qualifications: "BSc".into(),
            projects: "None".into(),
            experience: "3 years".into(),
        }
    }

    fn scored(eligibility: f64, skills: &str) -> Score {
        Score {
            eligibility_score: eligibility,
            skill_score: eligibility / 2.0,
            required_skills: Some(skills.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_profile_completeness() {
        // id, name, email, skills, qualifications, experience are filled: 6 of 9
        assert_eq!(profile_completeness(&candidate("Rust")), 67);

        let empty = Candidate::default();
        assert_eq!(profile_completeness(&empty), 0);
    }

    #[test]
    fn test_application_stats() {
        let apps: Vec<Application> = ["Pending", "Pending", "Interview", "Offered", "Archived"]
            .iter()
            .enumerate()
            .map(|(i, status)| Application {
                application_id: i as i64,
                candidate_id: 1,
                job_id: 1,
                application_date: String::new(),
                status: ApplicationStatus::from(*status),
                job_title: None,
                company: None,
                location: None,
                candidate_name: None,
            })
            .collect();

        let stats = ApplicationStats::from_applications(&apps);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.interview, 1);
        assert_eq!(stats.offered, 1);
        assert_eq!(stats.rejected, 0);
    }

    #[test]
    fn test_score_distribution() {
        let dist = ScoreDistribution::from_scores([95.0, 90.0, 89.9, 75.0, 60.0, 59.9, 10.0]);
        assert_eq!(
            dist.buckets(),
            [
                ("90-100%", 2),
                ("80-89%", 1),
                ("70-79%", 1),
                ("60-69%", 1),
                ("Below 60%", 2)
            ]
        );
    }

    #[test]
    fn test_average_sub_scores() {
        assert!(average_sub_scores(&[]).is_none());
        let avg = average_sub_scores(&[scored(80.0, ""), scored(60.0, "")]).unwrap();
        assert_eq!(avg.eligibility, 70.0);
        assert_eq!(avg.skill, 35.0);
    }

    #[test]
    fn test_skill_universe_and_gaps() {
        let me = candidate("Rust, SQL");
        let matches = vec![scored(90.0, "Rust, Docker"), scored(70.0, "sql, Kubernetes, Docker")];

        assert_eq!(
            skill_universe(&me, &matches, ANALYTICS_SKILL_LIMIT),
            vec!["Rust", "SQL", "Docker", "sql", "Kubernetes"]
        );
        assert_eq!(skill_universe(&me, &matches, 3), vec!["Rust", "SQL", "Docker"]);
        assert_eq!(missing_skills(&me, &matches), vec!["Docker", "Kubernetes"]);
        assert_eq!(split_skills("a, b,,c"), vec!["a", "b", "c"]);
    }
}
