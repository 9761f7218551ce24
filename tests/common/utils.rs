#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use once_cell::sync::Lazy;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use uuid::Uuid;

use limitbreaker_backend::config::settings::{get_config, DatabaseSettings};
use limitbreaker_backend::models::coach::ChatTurn;
use limitbreaker_backend::services::email::{EmailError, EmailMessage, EmailSender};
use limitbreaker_backend::services::generative_model::{GenerativeModel, ModelError};
use limitbreaker_backend::services::identity::{IdentityError, IdentityVerifier, VerifiedIdentity};
use limitbreaker_backend::telemetry::{get_subscriber, init_subscriber};
use limitbreaker_backend::{run, Collaborators};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

/// Keeps every message instead of sending it.
#[derive(Default)]
pub struct CapturingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
    failing: AtomicBool,
}

impl CapturingEmailSender {
    pub fn fail_deliveries(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent_to(&self, email: &str) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == email)
            .cloned()
            .collect()
    }

    /// The code from the latest verification email sent to `email`.
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent_to(email)
            .iter()
            .rev()
            .find(|m| m.subject.contains("Verification Code"))
            .and_then(|m| m.subject.rsplit(' ').next().map(str::to_string))
    }
}

impl EmailSender for CapturingEmailSender {
    fn send<'a>(&'a self, message: &'a EmailMessage) -> BoxFuture<'a, Result<(), EmailError>> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(EmailError::Rejected { status: 503, body: "mailbox unavailable".to_string() });
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        })
    }
}

/// Accepts exactly the tokens registered on it.
#[derive(Default)]
pub struct FakeIdentityVerifier {
    identities: Mutex<HashMap<String, VerifiedIdentity>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeIdentityVerifier {
    pub fn register(&self, token: &str, identity: VerifiedIdentity) {
        self.identities.lock().unwrap().insert(token.to_string(), identity);
    }

    /// Makes every verification take `delay`, like a slow key fetch.
    pub fn respond_after(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }
}

impl IdentityVerifier for FakeIdentityVerifier {
    fn verify<'a>(&'a self, id_token: &'a str) -> BoxFuture<'a, Result<VerifiedIdentity, IdentityError>> {
        Box::pin(async move {
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.identities
                .lock()
                .unwrap()
                .get(id_token)
                .cloned()
                .ok_or_else(|| IdentityError::InvalidToken("unknown test token".to_string()))
        })
    }
}

/// Answers with queued replies and remembers every conversation it saw.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    conversations: Mutex<Vec<Vec<ChatTurn>>>,
    failing: AtomicBool,
}

impl ScriptedModel {
    pub fn reply_with(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn conversations(&self) -> Vec<Vec<ChatTurn>> {
        self.conversations.lock().unwrap().clone()
    }

    /// Text of the final turn sent in the latest request.
    pub fn last_prompt(&self) -> String {
        self.conversations()
            .last()
            .and_then(|turns| turns.last())
            .map(|turn| turn.text.clone())
            .expect("The model was never called")
    }
}

impl GenerativeModel for ScriptedModel {
    fn generate<'a>(&'a self, turns: &'a [ChatTurn]) -> BoxFuture<'a, Result<String, ModelError>> {
        Box::pin(async move {
            self.conversations.lock().unwrap().push(turns.to_vec());
            if self.failing.load(Ordering::SeqCst) {
                return Err(ModelError::Unavailable("model offline".to_string()));
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ModelError::InvalidResponse("no scripted reply".to_string()))
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub emails: Arc<CapturingEmailSender>,
    pub identities: Arc<FakeIdentityVerifier>,
    pub model: Arc<ScriptedModel>,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    configuration.database.db_url = None;
    let connection_pool = configure_db(&configuration.database).await;

    let emails = Arc::new(CapturingEmailSender::default());
    let identities = Arc::new(FakeIdentityVerifier::default());
    let model = Arc::new(ScriptedModel::default());

    let server = run(
        listener,
        connection_pool.clone(),
        &configuration,
        Collaborators {
            email_sender: emails.clone(),
            identity_verifier: identities.clone(),
            generative_model: model.clone(),
        },
    )
    .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        emails,
        identities,
        model,
    }
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// Addresses that stay on the leaderboard (no "test" or "warrior" in them).
pub fn unique_email(prefix: &str) -> String {
    format!("{}.{}@example.com", prefix, Uuid::new_v4().simple())
}

pub fn registration_body(email: &str, goal: &str) -> Value {
    json!({
        "name": "Ada",
        "age": 30,
        "gender": "female",
        "height": 170.0,
        "weight": 65.0,
        "goal": goal,
        "email": email,
        "password": "correct horse battery"
    })
}

pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Runs send-otp and verify-otp for a fresh password account.
pub async fn register_user(app: &TestApp, goal: &str) -> RegisteredUser {
    let client = Client::new();
    let email = unique_email("ada");

    let response = client
        .post(&format!("{}/auth/send-otp", &app.address))
        .json(&registration_body(&email, goal))
        .send()
        .await
        .expect("Failed to execute send-otp.");
    assert_eq!(response.status().as_u16(), 200, "send-otp failed: {:?}", response.text().await);

    let code = app.emails.last_code_for(&email).expect("No verification email captured");

    let response = client
        .post(&format!("{}/auth/verify-otp", &app.address))
        .json(&json!({ "email": email, "otp": code }))
        .send()
        .await
        .expect("Failed to execute verify-otp.");
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.expect("Failed to parse verify-otp response");
    RegisteredUser {
        id: body["user"]["id"].as_str().unwrap().parse().unwrap(),
        email,
        token: body["token"].as_str().expect("No token in response").to_string(),
    }
}

pub async fn get_authed(app: &TestApp, token: &str, path: &str) -> reqwest::Response {
    Client::new()
        .get(&format!("{}{}", &app.address, path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn post_authed(app: &TestApp, token: &str, path: &str, body: Value) -> reqwest::Response {
    Client::new()
        .post(&format!("{}{}", &app.address, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn patch_authed(app: &TestApp, token: &str, path: &str, body: Value) -> reqwest::Response {
    Client::new()
        .patch(&format!("{}{}", &app.address, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
}

pub async fn put_authed(app: &TestApp, token: &str, path: &str, body: Value) -> reqwest::Response {
    Client::new()
        .put(&format!("{}{}", &app.address, path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request.")
}
