//! Email service for workspace invitations and first-view alerts via SMTP.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use zloom_core::models::FirstView;
use zloom_core::{AppError, Config};

use crate::constants::{FIRST_VIEW_SUBJECT, INVITATION_SUBJECT};

/// Sends transactional emails. Absent (not constructed) when SMTP is not configured.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl EmailService {
    /// Create email service from config. Returns `None` if SMTP is not configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>, AppError> {
        let (Some(host), Some(from)) = (config.smtp_host.as_deref(), config.smtp_from.as_deref())
        else {
            tracing::debug!("SMTP not configured, emails disabled");
            return Ok(None);
        };

        let from: Mailbox = from
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid SMTP_FROM: {}", e)))?;
        let port = config.smtp_port;

        let builder = if config.smtp_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| AppError::Mail(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        }
        .port(port);

        let builder = match (config.smtp_user.as_deref(), config.smtp_password.as_deref()) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.to_string(), password.to_string()))
            }
            _ => builder,
        };

        tracing::info!(
            host = %host,
            port = port,
            tls = config.smtp_tls,
            "Email service initialized"
        );

        Ok(Some(Self {
            mailer: Arc::new(builder.build()),
            from,
        }))
    }

    pub async fn send_invitation(
        &self,
        to: &str,
        receiver_first_name: Option<&str>,
        accept_url: &str,
    ) -> Result<(), AppError> {
        let email = invitation_message(self.from.clone(), to, receiver_first_name, accept_url)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;
        tracing::info!("Invitation email sent");
        Ok(())
    }

    pub async fn send_first_view(&self, first_view: &FirstView) -> Result<(), AppError> {
        let email = first_view_message(self.from.clone(), first_view)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::Mail(e.to_string()))?;
        tracing::info!(video_id = %first_view.video_id, "First view email sent");
        Ok(())
    }
}

fn parse_recipient(to: &str) -> Result<Mailbox, AppError> {
    to.parse()
        .map_err(|e| AppError::Mail(format!("Invalid recipient address: {}", e)))
}

fn invitation_message(
    from: Mailbox,
    to: &str,
    receiver_first_name: Option<&str>,
    accept_url: &str,
) -> Result<Message, AppError> {
    let to = parse_recipient(to)?;
    let (plain, html) = invitation_body(receiver_first_name, accept_url);

    Message::builder()
        .from(from)
        .to(to)
        .subject(INVITATION_SUBJECT)
        .multipart(MultiPart::alternative_plain_html(plain, html))
        .map_err(|e| AppError::Mail(e.to_string()))
}

fn invitation_body(receiver_first_name: Option<&str>, accept_url: &str) -> (String, String) {
    let greeting = match receiver_first_name.map(str::trim) {
        Some(name) if !name.is_empty() => format!("Hey {}", name),
        _ => "Hey".to_string(),
    };
    let plain = format!(
        "{} join my workspace at Zloom and let's record some moments. Click accept to confirm: {}",
        greeting, accept_url
    );
    let html = format!(
        "<p>{} join my workspace at Zloom and let's record some moments.</p>\
         <p><a href=\"{}\" style=\"background-color:#000;color:#fff;padding:8px 16px;border-radius:6px;text-decoration:none\">Accept Invite</a></p>",
        html_escape(&greeting),
        html_escape(accept_url)
    );
    (plain, html)
}

fn first_view_message(from: Mailbox, first_view: &FirstView) -> Result<Message, AppError> {
    let to = parse_recipient(&first_view.author_email)?;
    let plain = first_view.message();
    let html = format!("<p>{}</p>", html_escape(&plain));

    Message::builder()
        .from(from)
        .to(to)
        .subject(FIRST_VIEW_SUBJECT)
        .multipart(MultiPart::alternative_plain_html(plain, html))
        .map_err(|e| AppError::Mail(e.to_string()))
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_body_contains_accept_link() {
        let (plain, html) = invitation_body(Some("Grace"), "http://localhost:3000/invite/abc");
        assert!(plain.starts_with("Hey Grace join my workspace"));
        assert!(plain.ends_with("http://localhost:3000/invite/abc"));
        assert!(html.contains("href=\"http://localhost:3000/invite/abc\""));
    }

    #[test]
    fn test_invitation_body_escapes_names() {
        let (_, html) = invitation_body(Some("<b>Eve</b>"), "http://x/invite/1");
        assert!(html.contains("Hey &lt;b&gt;Eve&lt;/b&gt;"));

        let (plain, _) = invitation_body(None, "http://x/invite/1");
        assert!(plain.starts_with("Hey join"));
    }

    #[test]
    fn test_invitation_message_rejects_bad_recipient() {
        let from: Mailbox = "Zloom <noreply@zloom.dev>".parse().unwrap();
        let err = invitation_message(from.clone(), "not-an-address", None, "http://x").unwrap_err();
        assert!(matches!(err, AppError::Mail(_)));

        assert!(invitation_message(from, "grace@zloom.dev", None, "http://x").is_ok());
    }

    #[test]
    fn test_first_view_message_addresses_author() {
        let from: Mailbox = "Zloom <noreply@zloom.dev>".parse().unwrap();
        let mut first_view = FirstView {
            video_id: uuid::Uuid::new_v4(),
            title: Some("Q3 <demo>".to_string()),
            author_id: uuid::Uuid::new_v4(),
            author_email: "ada@zloom.dev".to_string(),
        };

        let message = first_view_message(from.clone(), &first_view).unwrap();
        let headers = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(headers.contains("To: ada@zloom.dev"));
        assert!(headers.contains("Subject: Zloom - You've got a viewer"));

        first_view.author_email = "nobody".to_string();
        assert!(matches!(
            first_view_message(from, &first_view).unwrap_err(),
            AppError::Mail(_)
        ));
    }

    #[test]
    fn test_from_config_without_smtp_is_none() {
        let config = Config {
            server_port: 4000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            database_url: "postgresql://localhost/zloom".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            jwt_secret: "test-secret-key-min-32-characters-long".to_string(),
            smtp_host: None,
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            smtp_from: None,
            smtp_tls: true,
            frontend_url: "http://localhost:3000".to_string(),
        };
        assert!(EmailService::from_config(&config).unwrap().is_none());
    }
}
