use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contact_dispatcher::{
    app::App,
    config::{ApplicationSettings, EmailClientSettings, Environment, Settings},
    email::{MailTransport, OutgoingMail, TransportError},
    telemetry::get_subscriber,
};
use once_cell::sync::Lazy;
use secrecy::Secret;
use serde_json::Value;
use tracing_subscriber::util::SubscriberInitExt;

pub const SENDER: &str = "studio@satvikyoga.nl";
pub const ADMIN: &str = "owner@satvikyoga.nl";

static TRACING: Lazy<()> = Lazy::new(|| {
    let env_filter = "contact_dispatcher=trace,tower_http=trace,axum::rejection=trace";

    if std::env::var("TEST_LOG").is_ok() {
        get_subscriber(env_filter, std::io::stdout).init();
    } else {
        get_subscriber(env_filter, std::io::sink).init();
    };
});

/// In-memory transport recording every delivery attempt.
#[derive(Default)]
pub struct RecordingTransport {
    attempts: Mutex<Vec<OutgoingMail>>,
    fail_on: Option<usize>,
}

impl RecordingTransport {
    pub fn attempts(&self) -> Vec<OutgoingMail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), TransportError> {
        let mut attempts = self.attempts.lock().unwrap();
        let attempt = attempts.len();
        attempts.push(mail.clone());

        if self.fail_on == Some(attempt) {
            return Err(TransportError::Other(
                "Invalid login: 535-5.7.8 Username and Password not accepted".into(),
            ));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub addr: String,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    pub async fn post_send_email(&self, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/api/send-email", &self.addr))
            .json(&serde_json::from_str::<Value>(body).unwrap())
            .send()
            .await
            .expect("The request should succeed.")
    }

    pub async fn get_with_origin(&self, origin: &str) -> reqwest::Response {
        reqwest::Client::new()
            .get(format!("{}/", &self.addr))
            .header("Origin", origin)
            .send()
            .await
            .expect("The request should succeed.")
    }
}

fn test_settings(environment: Environment) -> Settings {
    Settings {
        application: ApplicationSettings {
            host: "127.0.0.1".into(),
            port: 0,
            environment,
        },
        email_client: EmailClientSettings {
            smtp_host: "smtp.invalid".into(),
            username: SENDER.into(),
            password: Secret::new("password".into()),
            admin_email: Some(ADMIN.into()),
        },
        log_level: "info".into(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Environment::Development, None).await
}

pub async fn spawn_production_app() -> TestApp {
    spawn_app_with(Environment::Production, None).await
}

/// Spawns an app whose transport fails on the given zero-based delivery attempt.
pub async fn spawn_app_failing_on(attempt: usize) -> TestApp {
    spawn_app_with(Environment::Development, Some(attempt)).await
}

async fn spawn_app_with(environment: Environment, fail_on: Option<usize>) -> TestApp {
    Lazy::force(&TRACING);

    let transport = Arc::new(RecordingTransport {
        fail_on,
        ..Default::default()
    });
    let app = App::with_transport(test_settings(environment), transport.clone())
        .await
        .expect("The app should be built.");

    let test_app = TestApp {
        addr: format!("http://127.0.0.1:{}", app.port().unwrap()),
        transport,
    };

    let _ = tokio::spawn(async move {
        app.serve()
            .await
            .expect("The server should be running")
    });

    test_app
}
