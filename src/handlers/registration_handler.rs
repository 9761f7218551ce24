use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::auth::{
    MessageResponse, RegistrationForm, ResendOtpRequest, SendOtpRequest, SendOtpResponse, VerifyOtpRequest,
};
use crate::services::account_service::AccountService;
use crate::services::otp_store::OtpStore;

fn required_field(value: &Option<String>, message: &str) -> Result<String, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(message.to_string())),
    }
}

#[tracing::instrument(
    name = "Send registration code",
    skip(registration_form, account_service, otp_store),
    fields(request = %registration_form)
)]
pub async fn send_otp(
    registration_form: web::Json<SendOtpRequest>,
    account_service: web::Data<AccountService>,
    otp_store: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    let form = RegistrationForm::try_from(registration_form.into_inner())?;
    let email = form.email.clone();

    account_service.start_registration(form).await?;

    Ok(HttpResponse::Ok().json(SendOtpResponse {
        message: "OTP sent to your email".to_string(),
        email,
        expires_in: otp_store.ttl().num_seconds(),
    }))
}

#[tracing::instrument(
    name = "Verify registration code",
    skip(verify_form, account_service),
    fields(email = ?verify_form.email)
)]
pub async fn verify_otp(
    verify_form: web::Json<VerifyOtpRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    let email = required_field(&verify_form.email, "Email and OTP are required")?.to_lowercase();
    let otp = required_field(&verify_form.otp, "Email and OTP are required")?;

    let response = account_service.complete_registration(&email, &otp).await?;
    Ok(HttpResponse::Created().json(response))
}

#[tracing::instrument(
    name = "Resend registration code",
    skip(resend_form, otp_store),
    fields(email = ?resend_form.email)
)]
pub async fn resend_otp(
    resend_form: web::Json<ResendOtpRequest>,
    otp_store: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    let email = required_field(&resend_form.email, "Email is required")?.to_lowercase();

    otp_store.resend(&email).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("New OTP sent successfully")))
}
