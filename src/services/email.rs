use std::sync::Arc;
use futures_util::future::BoxFuture;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::email::{EmailProvider, EmailSettings};
use crate::errors::AppError;
use crate::models::plan::Exercise;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Email request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Email provider rejected the message with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<EmailError> for AppError {
    fn from(e: EmailError) -> Self {
        AppError::Dependency(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_content: String,
}

/// Outbound mail transport.
pub trait EmailSender: Send + Sync {
    fn send<'a>(&'a self, message: &'a EmailMessage) -> BoxFuture<'a, Result<(), EmailError>>;
}

/// Picks the transport configured for this environment.
pub fn email_sender_from_settings(settings: &EmailSettings) -> Result<Arc<dyn EmailSender>, EmailError> {
    match settings.provider {
        EmailProvider::Log => Ok(Arc::new(LogEmailSender)),
        EmailProvider::Brevo => Ok(Arc::new(BrevoEmailSender::new(settings)?)),
    }
}

/// Writes messages to the log. Used for local development.
pub struct LogEmailSender;

impl EmailSender for LogEmailSender {
    fn send<'a>(&'a self, message: &'a EmailMessage) -> BoxFuture<'a, Result<(), EmailError>> {
        Box::pin(async move {
            tracing::info!(
                to = %message.to,
                subject = %message.subject,
                "Email delivery disabled, message logged instead"
            );
            Ok(())
        })
    }
}

pub struct BrevoEmailSender {
    client: Client,
    base_url: String,
    api_key: SecretString,
    sender: BrevoContact,
}

#[derive(Debug, Clone, Serialize)]
struct BrevoContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoRequest<'a> {
    sender: &'a BrevoContact,
    to: Vec<BrevoContact>,
    subject: &'a str,
    html_content: &'a str,
}

impl BrevoEmailSender {
    pub fn new(settings: &EmailSettings) -> Result<Self, EmailError> {
        let client = Client::builder().timeout(settings.timeout()).build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            sender: BrevoContact {
                name: Some(settings.sender_name.clone()),
                email: settings.sender_email.clone(),
            },
        })
    }
}

impl EmailSender for BrevoEmailSender {
    fn send<'a>(&'a self, message: &'a EmailMessage) -> BoxFuture<'a, Result<(), EmailError>> {
        Box::pin(async move {
            let body = BrevoRequest {
                sender: &self.sender,
                to: vec![BrevoContact { name: None, email: message.to.clone() }],
                subject: &message.subject,
                html_content: &message.html_content,
            };

            tracing::debug!("Sending email via Brevo to {}", message.to);
            let response = self
                .client
                .post(format!("{}/v3/smtp/email", self.base_url))
                .header("api-key", self.api_key.expose_secret())
                .header("accept", "application/json")
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(EmailError::Rejected { status, body });
            }

            tracing::info!("Email sent via Brevo to {}", message.to);
            Ok(())
        })
    }
}

pub fn otp_email(to: &str, code: &str, ttl_minutes: i64) -> EmailMessage {
    let html_content = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 500px; margin: 0 auto; text-align: center;">
    <h1>Email Verification</h1>
    <p>Your LimitBreaker verification code is:</p>
    <p style="font-size: 36px; font-weight: bold; letter-spacing: 10px;">{code}</p>
    <p>This code expires in <strong>{ttl_minutes} minutes</strong>.</p>
    <p style="color: #888;">If you didn't request this, you can ignore this email.</p>
</div>"#
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("🔐 Your Verification Code: {}", code),
        html_content,
    }
}

/// Figures shown in the progress report email.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    pub name: String,
    pub power_level: i32,
    pub title: String,
    pub streak: i32,
    pub bmi: f64,
    pub bmi_status: &'static str,
    pub todays_workout: Option<Vec<Exercise>>,
}

/// Escapes text interpolated into email HTML.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn progress_report_email(to: &str, snapshot: &ProgressSnapshot) -> EmailMessage {
    let workout = match &snapshot.todays_workout {
        Some(exercises) if !exercises.is_empty() => {
            let items: String = exercises
                .iter()
                .map(|e| format!("<li><strong>{}</strong>: {}x{}</li>", escape_html(&e.name), e.sets, escape_html(&e.reps)))
                .collect();
            format!("<h3>Today's Workout</h3><ul>{}</ul>", items)
        }
        _ => "<p>No workout planned for today.</p>".to_string(),
    };

    let html_content = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h1>LimitBreaker</h1>
    <h2>Hi {name},</h2>
    <p>Here is your latest fitness snapshot. Keep up the great work!</p>
    <p><strong>Power Level:</strong> {level}</p>
    <p><strong>Title:</strong> {title}</p>
    <p><strong>Streak:</strong> {streak} Days</p>
    <p><strong>BMI:</strong> {bmi:.1} ({status})</p>
    {workout}
</div>"#,
        name = escape_html(&snapshot.name),
        level = snapshot.power_level,
        title = escape_html(&snapshot.title),
        streak = snapshot.streak,
        bmi = snapshot.bmi,
        status = snapshot.bmi_status,
        workout = workout,
    );

    EmailMessage {
        to: to.to_string(),
        subject: format!("🚀 Progress Update: {} Day Streak!", snapshot.streak),
        html_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_email_carries_the_code_in_subject_and_body() {
        let message = otp_email("ada@example.com", "123456", 10);
        assert_eq!(message.to, "ada@example.com");
        assert_eq!(message.subject, "🔐 Your Verification Code: 123456");
        assert!(message.html_content.contains("123456"));
        assert!(message.html_content.contains("10 minutes"));
    }

    #[test]
    fn progress_email_lists_todays_exercises() {
        let snapshot = ProgressSnapshot {
            name: "Ada".into(),
            power_level: 3,
            title: "Rookie".into(),
            streak: 4,
            bmi: 22.857,
            bmi_status: "Normal",
            todays_workout: Some(vec![Exercise {
                name: "Plank".into(),
                sets: 3,
                reps: "30-45 seconds".into(),
                instructions: "Hold plank position".into(),
            }]),
        };
        let message = progress_report_email("ada@example.com", &snapshot);

        assert_eq!(message.subject, "🚀 Progress Update: 4 Day Streak!");
        assert!(message.html_content.contains("<strong>Plank</strong>: 3x30-45 seconds"));
        assert!(message.html_content.contains("22.9 (Normal)"));
    }

    #[test]
    fn progress_email_escapes_user_text() {
        let snapshot = ProgressSnapshot {
            name: "<script>alert(\"x\")</script>".into(),
            power_level: 1,
            title: "Rookie".into(),
            streak: 0,
            bmi: 20.0,
            bmi_status: "Normal",
            todays_workout: Some(vec![Exercise {
                name: "Push & <b>Pull</b>".into(),
                sets: 2,
                reps: "10".into(),
                instructions: String::new(),
            }]),
        };
        let html = progress_report_email("ada@example.com", &snapshot).html_content;

        assert!(!html.contains("<script>"));
        assert!(html.contains("Hi &lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;,"));
        assert!(html.contains("<strong>Push &amp; &lt;b&gt;Pull&lt;/b&gt;</strong>: 2x10"));
    }

    #[test]
    fn brevo_payload_uses_camel_case() {
        let sender = BrevoContact { name: Some("LimitBreaker".into()), email: "noreply@limitbreaker.app".into() };
        let body = BrevoRequest {
            sender: &sender,
            to: vec![BrevoContact { name: None, email: "ada@example.com".into() }],
            subject: "Hi",
            html_content: "<p>Hi</p>",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["htmlContent"], "<p>Hi</p>");
        assert_eq!(value["to"][0]["email"], "ada@example.com");
        assert!(value["to"][0].get("name").is_none());
    }
}
