// src/session.rs
//! Demo session store. The session lives in memory and is mirrored to one
//! JSON file; there is no credential check, token or expiry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::{ApiClient, FsOps};
use crate::utils::email_local_part;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Role::Candidate => "candidate",
            Role::Recruiter => "recruiter",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub is_authenticated: bool,
}

struct DemoUser {
    id: i64,
    name: &'static str,
    email: &'static str,
    role: Role,
}

const DEMO_USERS: [DemoUser; 2] = [
    DemoUser {
        id: 1,
        name: "John Doe",
        email: "candidate@example.com",
        role: Role::Candidate,
    },
    DemoUser {
        id: 2,
        name: "Jane Smith",
        email: "recruiter@example.com",
        role: Role::Recruiter,
    },
];

pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Open the store, restoring a session persisted by an earlier run.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let current = if path.exists() {
            let raw = FsOps::read_file_safe(&path).await?;
            match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Session of the given role, or an error telling the user to sign in.
    pub fn require_role(&self, role: Role) -> Result<&Session> {
        match &self.current {
            Some(session) if session.is_authenticated && session.role == role => Ok(session),
            Some(session) => anyhow::bail!(
                "Signed in as {} ({}); this needs a {} account",
                session.email,
                session.role,
                role
            ),
            None => anyhow::bail!("Not signed in. Run `talentmatch login` first"),
        }
    }

    /// Demo login: any password is accepted for the built-in users.
    pub async fn login(&mut self, email: &str, _password: &str) -> Result<Session> {
        let user = DEMO_USERS
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .ok_or_else(|| anyhow::anyhow!("Invalid email or password"))?;

        let session = Session {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.to_string(),
            role: user.role,
            is_authenticated: true,
        };
        self.store(session).await
    }

    /// Login backed by the candidate directory. Candidates adopt the id and
    /// name the backend knows them by; anyone else gets a fabricated id.
    pub async fn login_with_directory(
        &mut self,
        api: &ApiClient,
        email: &str,
        role: Role,
    ) -> Result<Session> {
        let email = email.trim();
        validate_email(email)?;

        let known = match role {
            Role::Candidate => match api.get_candidate_by_email(email).await {
                Ok(response) => response.candidate,
                Err(e) => {
                    warn!("Candidate lookup failed for {}: {:#}", email, e);
                    None
                }
            },
            Role::Recruiter => None,
        };

        let session = match known {
            Some(candidate) => Session {
                id: candidate.candidate_id,
                name: if candidate.name.is_empty() {
                    email_local_part(email).to_string()
                } else {
                    candidate.name
                },
                email: email.to_string(),
                role,
                is_authenticated: true,
            },
            None => Session {
                id: fabricate_id(),
                email: email.to_string(),
                name: email_local_part(email).to_string(),
                role,
                is_authenticated: true,
            },
        };

        self.store(session).await
    }

    pub async fn register(&mut self, name: &str, email: &str, role: Role) -> Result<Session> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            anyhow::bail!("Name is required");
        }
        validate_email(email)?;

        let session = Session {
            id: fabricate_id(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            is_authenticated: true,
        };
        self.store(session).await
    }

    /// Clear the in-memory session and the persisted copy.
    pub async fn logout(&mut self) -> Result<()> {
        self.current = None;
        if self.path.exists() {
            tokio::fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session file: {}", self.path.display()))?;
        }
        info!("Signed out");
        Ok(())
    }

    async fn store(&mut self, session: Session) -> Result<Session> {
        let raw = serde_json::to_string_pretty(&session).context("Failed to serialize session")?;
        FsOps::write_file_safe(&self.path, &raw).await?;

        info!("Signed in as {} ({})", session.email, session.role);
        self.current = Some(session.clone());
        Ok(session)
    }
}

fn validate_email(email: &str) -> Result<()> {
    email
        .parse::<lettre::Address>()
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("Invalid email address: {} ({})", email, e))
}

fn fabricate_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_login_demo_users() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::open(dir.path().join("session.json"))
            .await
            .unwrap();

        let session = store.login("Recruiter@Example.com", "whatever").await.unwrap();
        assert_eq!(session.role, Role::Recruiter);
        assert_eq!(session.name, "Jane Smith");
        assert!(session.is_authenticated);

        let session = store.login("candidate@example.com", "").await.unwrap();
        assert_eq!(session.role, Role::Candidate);
        assert_eq!(session.id, 1);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::open(dir.path().join("session.json"))
            .await
            .unwrap();

        let err = store.login("stranger@example.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_session_persists_and_logout_clears() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::open(&path).await.unwrap();
        store.login("candidate@example.com", "pw").await.unwrap();
        assert!(path.exists());

        let mut reopened = SessionStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.current().map(|s| s.email.as_str()),
            Some("candidate@example.com")
        );

        reopened.logout().await.unwrap();
        assert!(reopened.current().is_none());
        assert!(!path.exists());

        let after = SessionStore::open(&path).await.unwrap();
        assert!(after.current().is_none());
    }

    #[tokio::test]
    async fn test_register_and_require_role() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::open(dir.path().join("session.json"))
            .await
            .unwrap();

        assert!(store.require_role(Role::Candidate).is_err());
        assert!(store.register("", "a@b.co", Role::Candidate).await.is_err());
        assert!(store.register("Ana", "not-an-email", Role::Candidate).await.is_err());

        let session = store
            .register("Ana Lima", "ana@example.com", Role::Recruiter)
            .await
            .unwrap();
        assert_eq!(session.name, "Ana Lima");
        assert!(store.require_role(Role::Recruiter).is_ok());
        assert!(store.require_role(Role::Candidate).is_err());
    }

    #[tokio::test]
    async fn test_corrupt_session_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open(&path).await.unwrap();
        assert!(store.current().is_none());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.lima+jobs@mail.example.org").is_ok());
        for bad in ["", "ana", "@example.com", "ana@", "ana lima@example.com"] {
            let err = validate_email(bad).unwrap_err();
            assert!(err.to_string().starts_with("Invalid email address"), "{}", bad);
        }
    }

    #[test]
    fn test_role_display_pads() {
        assert_eq!(format!("[{:<10}]", Role::Candidate), "[candidate ]");
        assert_eq!(Role::Recruiter.to_string(), "recruiter");
    }

    #[test]
    fn test_session_serializes_like_local_storage() {
        let session = Session {
            id: 1,
            email: "candidate@example.com".into(),
            name: "John Doe".into(),
            role: Role::Candidate,
            is_authenticated: true,
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["role"], "candidate");
        assert_eq!(value["isAuthenticated"], true);
    }
}
