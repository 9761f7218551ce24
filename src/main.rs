use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use limitbreaker_backend::config::settings::get_config;
use limitbreaker_backend::services::email::email_sender_from_settings;
use limitbreaker_backend::services::generative_model::generative_model_from_settings;
use limitbreaker_backend::services::identity::FirebaseIdentityVerifier;
use limitbreaker_backend::telemetry::{get_subscriber, init_subscriber};
use limitbreaker_backend::{run, Collaborators};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "limitbreaker-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let email_sender = email_sender_from_settings(&config.email)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let identity_verifier = FirebaseIdentityVerifier::new(&config.firebase)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let generative_model = generative_model_from_settings(&config.generative_model)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    tracing::info!("Email provider: {:?}", config.email.provider);
    tracing::info!("Generative model: {:?} {}", config.generative_model.provider, config.generative_model.model_name);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(16)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            &config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        &config,
        Collaborators {
            email_sender,
            identity_verifier: Arc::new(identity_verifier),
            generative_model,
        },
    )?.await
}
