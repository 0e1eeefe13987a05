// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::api_client::{ApiClient, DEFAULT_TOP_MATCHES};
use crate::core::{ConfigManager, FsOps};
use crate::dashboard::{self, ProfileView};
use crate::email::{self, Mailer};
use crate::error::ApiError;
use crate::filters::{self, CandidateTab, MatchTier, RecruiterTab};
use crate::insights::profile_completeness;
use crate::session::{Role, Session, SessionStore};
use crate::types::{Application, Interview, InterviewDraft, InterviewStatus, InterviewType, Score};
use crate::uploads;
use crate::video::{
    self, CreateRoomOptions, DailyClient, JitsiRoomOptions, RoomProperties, RoomProvider,
    VideoRoom,
};

const NEEDS_PROFILE: &str =
    "No candidate profile found. Upload your resume with `talentmatch upload resume <file.pdf>` to complete your profile.";

#[derive(Parser)]
#[command(name = "talentmatch")]
#[command(about = "Candidate and recruiter client for the TalentMatch matching service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: TalentCommand,

    /// Backend base URL, overriding TALENTMATCH_API_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum TalentCommand {
    /// Sign in as a demo user, or through the candidate directory
    Login {
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Resolve the account against the backend instead of the demo users
        #[arg(long)]
        directory: bool,
        #[arg(long, value_enum, default_value_t = Role::Candidate)]
        role: Role,
    },
    /// Create a local account
    Register {
        name: String,
        email: String,
        #[arg(long, value_enum)]
        role: Role,
    },
    Logout,
    /// Show the signed-in account
    Whoami,
    #[command(subcommand)]
    Candidates(CandidatesCommand),
    #[command(subcommand)]
    Jobs(JobsCommand),
    /// Scored job matches for a candidate
    Matches {
        #[arg(long, value_enum, default_value_t)]
        tier: MatchTier,
        #[arg(long, default_value = "")]
        search: String,
        /// Candidate id; defaults to the signed-in candidate
        #[arg(long)]
        candidate: Option<i64>,
    },
    /// Best matches for a candidate
    TopMatches {
        #[arg(long, default_value_t = DEFAULT_TOP_MATCHES)]
        limit: u32,
        #[arg(long)]
        candidate: Option<i64>,
    },
    /// Apply to a job as the signed-in candidate
    Apply {
        job_id: i64,
        /// Email a confirmation to the candidate
        #[arg(long)]
        notify: bool,
    },
    /// A candidate's applications
    Applications {
        #[arg(long, value_enum, default_value_t)]
        tab: CandidateTab,
        #[arg(long)]
        candidate: Option<i64>,
    },
    /// Applications received for a job (recruiter view)
    JobApplications {
        job_id: i64,
        #[arg(long, value_enum, default_value_t)]
        tab: RecruiterTab,
        #[arg(long, default_value = "")]
        search: String,
    },
    #[command(subcommand)]
    Interviews(InterviewsCommand),
    #[command(subcommand)]
    Upload(UploadCommand),
    /// Write the job CSV template
    CsvTemplate {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    #[command(subcommand)]
    Room(RoomCommand),
    /// Create a room for an interview and email the invitation
    Invite {
        interview_id: i64,
        #[arg(long)]
        to: String,
        #[arg(long, value_enum, default_value_t = Provider::Jitsi)]
        provider: Provider,
    },
    /// Candidate dashboard summary
    Dashboard,
    /// Candidate analytics
    Analytics,
    /// Recruiter overview
    Overview,
}

#[derive(Subcommand)]
pub enum CandidatesCommand {
    List,
    Show { id: i64 },
    Find { email: String },
}

#[derive(Subcommand)]
pub enum JobsCommand {
    List,
    Show { id: i64 },
    Applicants { id: i64 },
}

#[derive(Subcommand)]
pub enum InterviewsCommand {
    List {
        #[arg(long, value_enum)]
        status: Option<InterviewStatus>,
    },
    Show {
        id: i64,
    },
    /// Interviews of the signed-in candidate or recruiter
    Mine,
    Schedule {
        #[arg(long)]
        application: i64,
        #[arg(long)]
        candidate: i64,
        #[arg(long)]
        job: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long, default_value = "45 minutes")]
        duration: String,
        #[arg(long = "type", value_enum, default_value_t = InterviewType::Video)]
        kind: InterviewType,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Attach a video room from this provider
        #[arg(long, value_enum)]
        room: Option<Provider>,
    },
    Update {
        id: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long, value_enum)]
        status: Option<InterviewStatus>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        meeting_url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum UploadCommand {
    /// Upload a PDF resume for parsing
    Resume { path: PathBuf },
    /// Upload a CSV of job descriptions
    JobCsv {
        path: PathBuf,
        /// Only list the rows that would be created
        #[arg(long)]
        dry_run: bool,
    },
    /// Upload a single job description
    JobDescription {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum RoomCommand {
    Daily {
        #[arg(long)]
        name: Option<String>,
        /// Minutes until the room expires
        #[arg(long)]
        expires_in: Option<u32>,
        #[arg(long)]
        audio_off: bool,
        #[arg(long)]
        video_off: bool,
        #[arg(long)]
        no_chat: bool,
        #[arg(long)]
        no_screenshare: bool,
        #[arg(long)]
        record: bool,
        /// Print the embed properties for the room frame
        #[arg(long)]
        embed: bool,
    },
    Jitsi {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        audio_muted: Option<bool>,
        #[arg(long)]
        video_muted: Option<bool>,
        #[arg(long)]
        close_page: Option<bool>,
        /// Print the embed properties for the room frame
        #[arg(long)]
        embed: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Daily,
    Jitsi,
}

struct App {
    api: ApiClient,
    config: ConfigManager,
    sessions: SessionStore,
    json: bool,
}

pub async fn run(cli: Cli, config: ConfigManager) -> Result<()> {
    let api = ApiClient::new(&config.api.base_url, config.api.timeout())?;
    let sessions = SessionStore::open(&config.session_path).await?;
    let mut ctx = App {
        api,
        config,
        sessions,
        json: cli.json,
    };

    dispatch(&mut ctx, cli.command)
        .await
        .map_err(user_facing_error)
}

/// Backend failures collapse into one "try again" line; the response body
/// was already logged by the client. Everything else keeps its chain.
fn user_facing_error(err: anyhow::Error) -> anyhow::Error {
    match ApiError::find(&err) {
        Some(api_error) => anyhow::anyhow!("Something went wrong: {}. Try again.", api_error),
        None => err,
    }
}

async fn dispatch(ctx: &mut App, command: TalentCommand) -> Result<()> {
    match command {
        TalentCommand::Login {
            email,
            password,
            directory,
            role,
        } => {
            let session = if directory {
                ctx.sessions
                    .login_with_directory(&ctx.api, &email, role)
                    .await?
            } else {
                ctx.sessions.login(&email, &password).await?
            };
            println!("✅ Signed in as {} <{}> ({})", session.name, session.email, session.role);
        }

        TalentCommand::Register { name, email, role } => {
            let session = ctx.sessions.register(&name, &email, role).await?;
            println!("✅ Registered {} <{}> as {}", session.name, session.email, session.role);
        }

        TalentCommand::Logout => {
            ctx.sessions.logout().await?;
            println!("Signed out");
        }

        TalentCommand::Whoami => match ctx.sessions.current() {
            Some(session) => ctx.output(session, |s| {
                println!("{} <{}>", s.name, s.email);
                println!("  Role: {}", s.role);
                println!("  ID:   {}", s.id);
            })?,
            None => println!("Not signed in"),
        },

        TalentCommand::Candidates(cmd) => candidates(ctx, cmd).await?,
        TalentCommand::Jobs(cmd) => jobs(ctx, cmd).await?,

        TalentCommand::Matches {
            tier,
            search,
            candidate,
        } => {
            let Some(candidate_id) = ctx.candidate_id(candidate).await? else {
                println!("{}", NEEDS_PROFILE);
                return Ok(());
            };
            let matches = ctx.api.get_candidate_matches(candidate_id).await?.matches;
            let filtered: Vec<Score> = filters::filter_matches(&matches, tier, &search)
                .into_iter()
                .cloned()
                .collect();
            ctx.output(&filtered, |m| print_matches(m))?;
        }

        TalentCommand::TopMatches { limit, candidate } => {
            let Some(candidate_id) = ctx.candidate_id(candidate).await? else {
                println!("{}", NEEDS_PROFILE);
                return Ok(());
            };
            let top = ctx.api.get_top_matches(candidate_id, limit).await?;
            ctx.output(&top.top_matches, |m| print_matches(m))?;
        }

        TalentCommand::Apply { job_id, notify } => {
            let session = ctx.sessions.require_role(Role::Candidate)?.clone();
            let Some(candidate) = dashboard::find_candidate(&ctx.api, &session.email).await? else {
                println!("{}", NEEDS_PROFILE);
                return Ok(());
            };

            let created = ctx
                .api
                .create_application(candidate.candidate_id, job_id)
                .await?;
            println!("✅ Application {} submitted", created.application_id);

            if notify {
                let job = ctx.api.get_job(job_id).await?.job;
                let html = email::application_confirmation_email(
                    &candidate.name,
                    &job.job_title,
                    &job.company,
                );
                Mailer::from_config(ctx.config.smtp.clone())
                    .send(&session.email, "Application Confirmation", &html)
                    .await?;
                println!("📧 Confirmation sent to {}", session.email);
            }
        }

        TalentCommand::Applications { tab, candidate } => {
            let Some(candidate_id) = ctx.candidate_id(candidate).await? else {
                println!("{}", NEEDS_PROFILE);
                return Ok(());
            };
            let applications = ctx
                .api
                .get_candidate_applications(candidate_id)
                .await?
                .applications;
            let filtered: Vec<Application> =
                filters::filter_candidate_applications(&applications, tab)
                    .into_iter()
                    .cloned()
                    .collect();
            ctx.output(&filtered, |a| print_applications(a))?;
        }

        TalentCommand::JobApplications {
            job_id,
            tab,
            search,
        } => {
            let applications = ctx.api.get_job_applicants(job_id).await?.applications;
            let filtered: Vec<Application> =
                filters::filter_recruiter_applications(&applications, tab, &search)
                    .into_iter()
                    .cloned()
                    .collect();
            ctx.output(&filtered, |a| print_applications(a))?;
        }

        TalentCommand::Interviews(cmd) => interviews(ctx, cmd).await?,
        TalentCommand::Upload(cmd) => upload(ctx, cmd).await?,

        TalentCommand::CsvTemplate { output } => match output {
            Some(path) => {
                FsOps::write_file_safe(&path, uploads::job_csv_template()).await?;
                println!("✅ Template written to {}", path.display());
            }
            None => println!("{}", uploads::job_csv_template()),
        },

        TalentCommand::Room(cmd) => room(ctx, cmd).await?,

        TalentCommand::Invite {
            interview_id,
            to,
            provider,
        } => invite(ctx, interview_id, &to, provider).await?,

        TalentCommand::Dashboard => {
            let session = ctx.sessions.require_role(Role::Candidate)?.clone();
            match dashboard::candidate_dashboard(&ctx.api, &session.email, &session.name).await? {
                ProfileView::NeedsProfile => println!("{}", NEEDS_PROFILE),
                ProfileView::Ready(view) => ctx.output(&view, |d| {
                    println!("Welcome back, {}", d.name);
                    println!("  Profile completion: {}%", d.profile_completion);
                    println!("  Matched jobs:       {}", d.matched_jobs);
                    println!("  Applications:       {}", d.applications);
                    println!("  Interviews:         {}", d.interviews);
                    println!();
                    print_matches(&d.top_matches);
                })?,
            }
        }

        TalentCommand::Analytics => {
            let session = ctx.sessions.require_role(Role::Candidate)?.clone();
            match dashboard::candidate_analytics(&ctx.api, &session.email).await? {
                ProfileView::NeedsProfile => println!("{}", NEEDS_PROFILE),
                ProfileView::Ready(view) => ctx.output(&view, |a| {
                    println!("Profile strength: {}%", a.profile_strength);
                    let s = &a.application_stats;
                    println!(
                        "Applications: {} total, {} pending, {} reviewing, {} interview, {} rejected, {} offered",
                        s.total, s.pending, s.reviewing, s.interview, s.rejected, s.offered
                    );
                    println!("Match scores:");
                    for (label, count) in a.score_distribution.buckets() {
                        println!("  {:<10} {}", label, count);
                    }
                    if let Some(avg) = &a.average_scores {
                        println!(
                            "Average sub-scores: skill {:.1}, education {:.1}, projects {:.1}, experience {:.1}",
                            avg.skill, avg.education, avg.project_relevance, avg.experience
                        );
                    }
                    println!("Skills: {}", a.skills.join(", "));
                    if !a.skill_gaps.is_empty() {
                        println!("Skills to develop: {}", a.skill_gaps.join(", "));
                    }
                })?,
            }
        }

        TalentCommand::Overview => {
            ctx.sessions.require_role(Role::Recruiter)?;
            let overview = dashboard::recruiter_overview(&ctx.api).await?;
            ctx.output(&overview, |o| {
                println!("Jobs:       {}", o.jobs);
                println!("Candidates: {}", o.candidates);
                println!("Interviews: {}", o.interviews);
                for (status, count) in &o.interviews_by_status {
                    println!("  {:<10} {}", status, count);
                }
            })?;
        }
    }

    Ok(())
}

async fn candidates(ctx: &mut App, cmd: CandidatesCommand) -> Result<()> {
    match cmd {
        CandidatesCommand::List => {
            let response = ctx.api.get_candidates().await?;
            ctx.output(&response.candidates, |candidates| {
                if candidates.is_empty() {
                    println!("No candidates found.");
                    return;
                }
                println!("{:<6} {:<25} {:<30} {:<8}", "ID", "Name", "Email", "Profile");
                println!("{}", "-".repeat(72));
                for c in candidates {
                    println!(
                        "{:<6} {:<25} {:<30} {:>6}%",
                        c.candidate_id,
                        c.name,
                        c.email,
                        profile_completeness(c)
                    );
                }
            })
        }
        CandidatesCommand::Show { id } => {
            let response = ctx.api.get_candidate(id).await?;
            match response.candidate {
                Some(candidate) => ctx.output(&candidate, |c| {
                    println!("{} <{}>", c.name, c.email);
                    println!("  Phone:          {}", c.phone);
                    println!("  LinkedIn:       {}", c.linkedin);
                    println!("  Skills:         {}", c.skills);
                    println!("  Qualifications: {}", c.qualifications);
                    println!("  Projects:       {}", c.projects);
                    println!("  Experience:     {}", c.experience);
                }),
                None => {
                    println!("❌ Candidate {} not found", id);
                    Ok(())
                }
            }
        }
        CandidatesCommand::Find { email } => {
            match dashboard::find_candidate(&ctx.api, &email).await? {
                Some(candidate) => ctx.output(&candidate, |c| {
                    println!("{:<6} {} <{}>", c.candidate_id, c.name, c.email)
                }),
                None => {
                    println!("❌ No candidate with email {}", email);
                    Ok(())
                }
            }
        }
    }
}

async fn jobs(ctx: &mut App, cmd: JobsCommand) -> Result<()> {
    match cmd {
        JobsCommand::List => {
            let response = ctx.api.get_jobs().await?;
            ctx.output(&response.jobs, |jobs| {
                if jobs.is_empty() {
                    println!("No jobs found.");
                    return;
                }
                println!("{:<6} {:<30} {:<20} {:<20}", "ID", "Title", "Company", "Location");
                println!("{}", "-".repeat(78));
                for j in jobs {
                    println!(
                        "{:<6} {:<30} {:<20} {:<20}",
                        j.job_id, j.job_title, j.company, j.location
                    );
                }
            })
        }
        JobsCommand::Show { id } => {
            let job = ctx.api.get_job(id).await?.job;
            ctx.output(&job, |j| {
                println!("{} at {} ({})", j.job_title, j.company, j.location);
                println!("  Required skills:  {}", j.required_skills);
                println!("  Experience:       {}", j.experience);
                println!("  Qualifications:   {}", j.qualifications);
                println!("  Responsibilities: {}", j.responsibilities);
                println!("  Benefits:         {}", j.benefits);
                if !j.other_details.is_empty() {
                    println!("  Other details:    {}", j.other_details);
                }
            })
        }
        JobsCommand::Applicants { id } => {
            let applications = ctx.api.get_job_applicants(id).await?.applications;
            ctx.output(&applications, |a| print_applications(a))
        }
    }
}

async fn interviews(ctx: &mut App, cmd: InterviewsCommand) -> Result<()> {
    match cmd {
        InterviewsCommand::List { status } => {
            let mut interviews = ctx.api.get_interviews().await?.interviews;
            if let Some(status) = status {
                interviews.retain(|i| i.status == status);
            }
            ctx.output(&interviews, |i| print_interviews(i))
        }
        InterviewsCommand::Show { id } => {
            let interview = ctx.api.get_interview(id).await?.interview;
            ctx.output(&interview, |i| {
                print_interviews(std::slice::from_ref(i));
                if let Some(url) = &i.meeting_url {
                    println!("  Meeting: {}", url);
                }
                if let Some(notes) = &i.notes {
                    println!("  Notes:   {}", notes);
                }
            })
        }
        InterviewsCommand::Mine => {
            let session = ctx
                .sessions
                .current()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Not signed in. Run `talentmatch login` first"))?;
            let response = match session.role {
                Role::Recruiter => ctx.api.get_recruiter_interviews(session.id).await?,
                Role::Candidate => {
                    let Some(candidate_id) = ctx.candidate_id(None).await? else {
                        println!("{}", NEEDS_PROFILE);
                        return Ok(());
                    };
                    ctx.api.get_candidate_interviews(candidate_id).await?
                }
            };
            ctx.output(&response.interviews, |i| print_interviews(i))
        }
        InterviewsCommand::Schedule {
            application,
            candidate,
            job,
            date,
            time,
            duration,
            kind,
            location,
            notes,
            room,
        } => {
            let recruiter_id = ctx.sessions.require_role(Role::Recruiter)?.id;
            let draft = InterviewDraft {
                application_id: Some(application),
                candidate_id: Some(candidate),
                job_id: Some(job),
                recruiter_id: Some(recruiter_id),
                date: Some(date),
                time: Some(time),
                duration: Some(duration),
                kind: Some(kind),
                status: Some(InterviewStatus::Scheduled),
                location,
                notes,
                meeting_url: None,
            };
            let created = ctx.api.create_interview(&draft).await?;
            println!("✅ Interview {} scheduled", created.interview_id);

            if let Some(provider) = room {
                let room = ctx
                    .room_provider(provider)?
                    .interview_room(created.interview_id)
                    .await?;
                let patch = InterviewDraft {
                    meeting_url: Some(room.url.clone()),
                    ..Default::default()
                };
                ctx.api.update_interview(created.interview_id, &patch).await?;
                println!("🎥 Room: {}", room.url);
            }
            Ok(())
        }
        InterviewsCommand::Update {
            id,
            date,
            time,
            status,
            notes,
            meeting_url,
        } => {
            let patch = InterviewDraft {
                date,
                time,
                status,
                notes,
                meeting_url,
                ..Default::default()
            };
            if patch == InterviewDraft::default() {
                anyhow::bail!("Nothing to update");
            }
            let updated = ctx.api.update_interview(id, &patch).await?.interview;
            ctx.output(&updated, |i| print_interviews(std::slice::from_ref(i)))
        }
    }
}

async fn upload(ctx: &mut App, cmd: UploadCommand) -> Result<()> {
    match cmd {
        UploadCommand::Resume { path } => {
            let response = ctx.api.upload_resume(&path).await?;
            println!("✅ {}", response.message);
            println!("   Candidate ID: {}", response.candidate_id);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&response.parsed_data)?);
            }
        }
        UploadCommand::JobCsv { path, dry_run } => {
            if dry_run {
                let file = uploads::load_job_csv(&path).await?;
                let rows = uploads::preview_job_csv(&file.bytes)?;
                println!("{} job(s) would be created from {}:", rows.len(), file.file_name);
                for row in rows {
                    println!("  • {}", row.job_title);
                }
                return Ok(());
            }
            let response = ctx.api.upload_job_csv(&path).await?;
            println!("✅ {}", response.message);
        }
        UploadCommand::JobDescription { title, description } => {
            let response = ctx.api.upload_job_description(&title, &description).await?;
            println!("✅ {}", response.message);
            if let Some(job_id) = response.job_id {
                println!("   Job ID: {}", job_id);
            }
        }
    }
    Ok(())
}

async fn room(ctx: &mut App, cmd: RoomCommand) -> Result<()> {
    match cmd {
        RoomCommand::Daily {
            name,
            expires_in,
            audio_off,
            video_off,
            no_chat,
            no_screenshare,
            record,
            embed,
        } => {
            let client = ctx.daily_client()?;
            let room = client
                .create_room(CreateRoomOptions {
                    name,
                    expires_in_minutes: expires_in,
                    properties: RoomProperties {
                        start_audio_off: audio_off,
                        start_video_off: video_off,
                        enable_chat: !no_chat,
                        enable_screenshare: !no_screenshare,
                        enable_recording: record,
                    },
                })
                .await?;
            if embed {
                return ctx.output(&video::daily::iframe_props(&room.url), |p| {
                    println!("{}", p.url)
                });
            }
            ctx.print_room(&room)
        }
        RoomCommand::Jitsi {
            name,
            audio_muted,
            video_muted,
            close_page,
            embed,
        } => {
            let room = video::jitsi::build_room(
                &ctx.config.video.jitsi_base_url,
                &JitsiRoomOptions {
                    room_name: name,
                    start_with_audio_muted: audio_muted,
                    start_with_video_muted: video_muted,
                    enable_close_page: close_page,
                },
            )?;
            if embed {
                return ctx.output(&video::jitsi::iframe_props(&room.url), |p| {
                    println!("{}", p.url);
                    println!("allow=\"{}\"", p.allow);
                });
            }
            ctx.print_room(&room)
        }
    }
}

async fn invite(ctx: &mut App, interview_id: i64, to: &str, provider: Provider) -> Result<()> {
    ctx.sessions.require_role(Role::Recruiter)?;
    let interview = ctx.api.get_interview(interview_id).await?.interview;
    let rooms = ctx.room_provider(provider)?;
    let link = interview_meeting_url(&ctx.api, &interview, &rooms).await?;

    let job_title = interview.job_title.clone().unwrap_or_default();
    let company = interview.company.clone().unwrap_or_default();
    let html = email::interview_invitation_email(
        interview.candidate_name.as_deref().unwrap_or("there"),
        &job_title,
        &company,
        &email::format_interview_date(&interview.date),
        &interview.time,
        &link,
    );

    Mailer::from_config(ctx.config.smtp.clone())
        .send(
            to,
            &email::interview_invitation_subject(&job_title, &company),
            &html,
        )
        .await?;

    info!("Invitation for interview {} sent to {}", interview_id, to);
    println!("📧 Interview invitation sent to {}", to);
    println!("🎥 {}", link);
    Ok(())
}

/// The interview's stored meeting URL, or a fresh room saved back onto the
/// interview. A failed save is logged and the new URL is still returned.
async fn interview_meeting_url(
    api: &ApiClient,
    interview: &Interview,
    rooms: &RoomProvider,
) -> Result<String> {
    if let Some(url) = interview.meeting_url.as_deref().filter(|url| !url.is_empty()) {
        return Ok(url.to_string());
    }

    let room = rooms.interview_room(interview.interview_id).await?;
    let patch = InterviewDraft {
        meeting_url: Some(room.url.clone()),
        ..Default::default()
    };
    if let Err(e) = api.update_interview(interview.interview_id, &patch).await {
        warn!(
            "Could not save meeting URL on interview {}: {:#}",
            interview.interview_id, e
        );
    }
    Ok(room.url)
}

impl App {
    /// Explicit id, or the signed-in candidate's record. `None` means the
    /// candidate has no profile yet.
    async fn candidate_id(&self, explicit: Option<i64>) -> Result<Option<i64>> {
        if let Some(id) = explicit {
            return Ok(Some(id));
        }
        let session: &Session = self.sessions.require_role(Role::Candidate)?;
        Ok(dashboard::find_candidate(&self.api, &session.email)
            .await?
            .map(|c| c.candidate_id))
    }

    fn daily_client(&self) -> Result<DailyClient> {
        DailyClient::new(
            self.config.video.daily_api_key.clone(),
            self.config.video.daily_api_url.clone(),
            self.config.api.timeout(),
        )
    }

    fn room_provider(&self, provider: Provider) -> Result<RoomProvider> {
        Ok(match provider {
            Provider::Daily => RoomProvider::Daily(self.daily_client()?),
            Provider::Jitsi => RoomProvider::Jitsi {
                base_url: self.config.video.jitsi_base_url.clone(),
            },
        })
    }

    fn print_room(&self, room: &VideoRoom) -> Result<()> {
        self.output(room, |r| {
            println!("🎥 {}", r.url);
            println!("   Room: {}", r.room_name);
        })
    }

    /// JSON when `--json` was given, otherwise the human-readable printer.
    fn output<T: Serialize + ?Sized>(&self, value: &T, print: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(value).context("Failed to serialize output")?
            );
        } else {
            print(value);
        }
        Ok(())
    }
}

fn print_matches(matches: &[Score]) {
    if matches.is_empty() {
        println!("No matches found.");
        return;
    }
    println!(
        "{:<6} {:<30} {:<20} {:>6} {:<7}",
        "Job", "Title", "Company", "Score", "Tier"
    );
    println!("{}", "-".repeat(74));
    for m in matches {
        println!(
            "{:<6} {:<30} {:<20} {:>6.1} {:<7}",
            m.job_id,
            m.job_title.as_deref().unwrap_or("-"),
            m.company.as_deref().unwrap_or("-"),
            m.eligibility_score,
            MatchTier::of(m.eligibility_score)
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default()
        );
    }
}

fn print_applications(applications: &[Application]) {
    if applications.is_empty() {
        println!("No applications found.");
        return;
    }
    println!(
        "{:<6} {:<20} {:<28} {:<18} {:<12} {:<10}",
        "ID", "Candidate", "Job", "Company", "Applied", "Status"
    );
    println!("{}", "-".repeat(98));
    for a in applications {
        println!(
            "{:<6} {:<20} {:<28} {:<18} {:<12} {:<10}",
            a.application_id,
            a.candidate_name.as_deref().unwrap_or("-"),
            a.job_title.as_deref().unwrap_or("-"),
            a.company.as_deref().unwrap_or("-"),
            a.application_date,
            a.status
        );
    }
}

fn print_interviews(interviews: &[Interview]) {
    if interviews.is_empty() {
        println!("No interviews found.");
        return;
    }
    println!(
        "{:<6} {:<20} {:<24} {:<12} {:<6} {:<10} {:<10}",
        "ID", "Candidate", "Job", "Date", "Time", "Type", "Status"
    );
    println!("{}", "-".repeat(94));
    for i in interviews {
        println!(
            "{:<6} {:<20} {:<24} {:<12} {:<6} {:<10} {:<10}",
            i.interview_id,
            i.candidate_name.as_deref().unwrap_or("-"),
            i.job_title.as_deref().unwrap_or("-"),
            i.date,
            i.time,
            i.kind.as_str(),
            i.status.as_str()
        );
    }
}
