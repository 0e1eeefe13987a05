// src/email.rs
//! Candidate notifications: HTML bodies and SMTP delivery.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{error, info};

use crate::core::config_manager::SmtpConfig;

/// Escape text interpolated into the HTML templates.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn application_confirmation_email(candidate_name: &str, job_title: &str, company: &str) -> String {
    format!(
        r#"
    <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
      <h2>Application Confirmation</h2>
      <p>Hello {name},</p>
      <p>Your application for the <strong>{title}</strong> position at <strong>{company}</strong> has been successfully submitted.</p>
      <p>The recruiter will review your application and get back to you soon.</p>
      <p>You can track the status of your application in your TalentMatch dashboard.</p>
      <p>Best regards,<br>The TalentMatch Team</p>
    </div>
  "#,
        name = escape_html(candidate_name),
        title = escape_html(job_title),
        company = escape_html(company),
    )
}

pub fn interview_invitation_email(
    candidate_name: &str,
    job_title: &str,
    company: &str,
    interview_date: &str,
    interview_time: &str,
    video_link: &str,
) -> String {
    format!(
        r#"
    <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
      <h2>Interview Invitation</h2>
      <p>Hello {name},</p>
      <p>We're pleased to invite you to an interview for the <strong>{title}</strong> position at <strong>{company}</strong>.</p>
      <p><strong>Date:</strong> {date}</p>
      <p><strong>Time:</strong> {time}</p>
      <p>The interview will be conducted via video conference. Please click the link below at the scheduled time:</p>
      <p><a href="{link}" style="display: inline-block; background-color: #4f46e5; color: white; padding: 10px 20px; text-decoration: none; border-radius: 4px;">Join Interview</a></p>
      <p>If you have any questions or need to reschedule, please contact us.</p>
      <p>Best regards,<br>The TalentMatch Team</p>
    </div>
  "#,
        name = escape_html(candidate_name),
        title = escape_html(job_title),
        company = escape_html(company),
        date = escape_html(interview_date),
        time = escape_html(interview_time),
        link = escape_html(video_link),
    )
}

/// "2024-06-03" becomes "Monday, June 3, 2024"; anything else is kept as is.
pub fn format_interview_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub fn interview_invitation_subject(job_title: &str, company: &str) -> String {
    format!("Interview Invitation: {} at {}", job_title, company)
}

pub struct Mailer {
    config: SmtpConfig,
}

impl Mailer {
    pub fn from_config(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Send one HTML message. SMTP is blocking, so it runs off the runtime.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        let message = self.build_message(to, subject, html)?;
        let transport = self.transport()?;

        let result = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .context("Email task failed to execute")?;

        match result {
            Ok(_) => {
                info!("Email sent to {}", to);
                Ok(())
            }
            Err(e) => {
                error!("Error sending email to {}: {}", to, e);
                Err(anyhow::Error::new(e).context("Failed to send email"))
            }
        }
    }

    fn build_message(&self, to: &str, subject: &str, html: &str) -> Result<Message> {
        Message::builder()
            .from(
                self.config
                    .from
                    .parse::<Mailbox>()
                    .with_context(|| format!("Invalid sender address: {}", self.config.from))?,
            )
            .to(to
                .parse::<Mailbox>()
                .with_context(|| format!("Invalid recipient address: {}", to))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .context("Failed to build email")
    }

    fn transport(&self) -> Result<SmtpTransport> {
        let builder = if self.config.secure {
            SmtpTransport::relay(&self.config.host)
        } else {
            SmtpTransport::starttls_relay(&self.config.host)
        }
        .with_context(|| format!("Invalid SMTP host: {}", self.config.host))?;

        let credentials = Credentials::new(self.config.user.clone(), self.config.password.clone());
        Ok(builder
            .port(self.config.port)
            .credentials(credentials)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            secure: false,
            user: "user@example.com".into(),
            password: "password".into(),
            from: "TalentMatch <noreply@talentmatch.com>".into(),
        }
    }

    #[test]
    fn test_confirmation_escapes_values() {
        let html = application_confirmation_email("Ada <script>", "Rust & Go Engineer", "Acme");
        assert!(html.contains("Hello Ada &lt;script&gt;,"));
        assert!(html.contains("<strong>Rust &amp; Go Engineer</strong>"));
        assert!(html.contains("<strong>Acme</strong>"));
    }

    #[test]
    fn test_invitation_contains_link_and_schedule() {
        let html = interview_invitation_email(
            "Ada",
            "Engineer",
            "Acme",
            "Monday, June 3, 2024",
            "10:00",
            "https://meet.jit.si/interview-1#config.prejoinPageEnabled=false&config.disableDeepLinking=true",
        );
        assert!(html.contains("<strong>Date:</strong> Monday, June 3, 2024"));
        assert!(html.contains(
            r#"href="https://meet.jit.si/interview-1#config.prejoinPageEnabled=false&amp;config.disableDeepLinking=true""#
        ));
        assert_eq!(
            interview_invitation_subject("Engineer", "Acme"),
            "Interview Invitation: Engineer at Acme"
        );
    }

    #[test]
    fn test_format_interview_date() {
        assert_eq!(format_interview_date("2024-06-03"), "Monday, June 3, 2024");
        assert_eq!(format_interview_date("next week"), "next week");
    }

    #[test]
    fn test_message_building() {
        let mailer = Mailer::from_config(smtp());
        assert!(mailer.build_message("ada@example.com", "Hi", "<p>x</p>").is_ok());
        assert!(mailer.build_message("not an address", "Hi", "<p>x</p>").is_err());
        assert!(mailer.transport().is_ok());
    }
}
