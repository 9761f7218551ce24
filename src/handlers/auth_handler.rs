use actix_web::{web, HttpResponse};
use secrecy::ExposeSecret;

use crate::errors::AppError;
use crate::models::auth::{GoogleLoginRequest, LoginRequest};
use crate::services::account_service::{AccountService, GoogleLogin};

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, account_service),
    fields(email = ?login_form.email)
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    let email = login_form.email.as_deref().map(str::trim).unwrap_or_default();
    let password = login_form
        .password
        .as_ref()
        .map(|p| p.expose_secret().to_string())
        .unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation("Email and password are required".to_string()));
    }

    let response = account_service.login(email, password).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[tracing::instrument(name = "Google login attempt", skip(login_form, account_service))]
pub async fn google_login_user(
    login_form: web::Json<GoogleLoginRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    let token = match login_form.token.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AppError::Validation("Token is required".to_string())),
    };

    match account_service.google_login(token).await? {
        GoogleLogin::Existing(response) => Ok(HttpResponse::Ok().json(response)),
        GoogleLogin::NewUser(response) => {
            tracing::info!("Google sign-in for an unregistered email");
            Ok(HttpResponse::Ok().json(response))
        }
    }
}
