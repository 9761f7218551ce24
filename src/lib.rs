use actix_web::{http, web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use actix_cors::Cors;

pub mod auth;
pub mod coach;
pub mod config;
pub mod db;
pub mod errors;
pub mod game;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;
pub mod workout;

use crate::config::settings::{get_jwt_settings, Settings};
use crate::errors::AppError;
use crate::routes::init_routes;
use crate::services::{
    AccountService, ActivityLog, CoachService, DailyChallengeService, EmailSender, GenerativeModel, IdentityVerifier,
    OtpStore, PlanService, ProgressionLedger,
};

/// External collaborators the server talks to. Tests swap in fakes.
pub struct Collaborators {
    pub email_sender: Arc<dyn EmailSender>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub generative_model: Arc<dyn GenerativeModel>,
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    settings: &Settings,
    collaborators: Collaborators,
) -> Result<Server, std::io::Error> {
    let otp_store = Arc::new(OtpStore::new(
        db_pool.clone(),
        collaborators.email_sender.clone(),
        &settings.otp,
    ));
    let account_service = web::Data::new(AccountService::new(
        db_pool.clone(),
        otp_store.clone(),
        collaborators.identity_verifier,
        get_jwt_settings(settings),
    ));

    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool.clone());
    let jwt_settings = web::Data::new(get_jwt_settings(settings));
    let otp_store = web::Data::from(otp_store);
    let email_sender: web::Data<dyn EmailSender> = web::Data::from(collaborators.email_sender);
    let plan_service = web::Data::new(PlanService::new(db_pool.clone()));
    let activity_log = web::Data::new(ActivityLog::new(db_pool.clone()));
    let ledger = web::Data::new(ProgressionLedger::new(db_pool.clone()));
    let coach_service = web::Data::new(CoachService::new(db_pool.clone(), collaborators.generative_model));
    let challenge_service = web::Data::new(DailyChallengeService::new(db_pool));
    let allowed_origins = settings.application.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        // Malformed bodies and path segments answer with the usual {error} body
        let json_config = web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into());
        let path_config = web::PathConfig::default()
            .error_handler(|err, _req| AppError::Validation(err.to_string()).into());

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(json_config)
            .app_data(path_config)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(otp_store.clone())
            .app_data(email_sender.clone())
            .app_data(account_service.clone())
            .app_data(plan_service.clone())
            .app_data(activity_log.clone())
            .app_data(ledger.clone())
            .app_data(challenge_service.clone())
            .app_data(coach_service.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
