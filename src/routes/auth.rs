use actix_web::{post, web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::auth_handler::{google_login_user, login_user};
use crate::handlers::registration_handler;
use crate::models::auth::{GoogleLoginRequest, LoginRequest, ResendOtpRequest, SendOtpRequest, VerifyOtpRequest};
use crate::services::{AccountService, OtpStore};

#[post("/send-otp")]
async fn send_otp(
    registration_form: web::Json<SendOtpRequest>,
    account_service: web::Data<AccountService>,
    otp_store: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    registration_handler::send_otp(registration_form, account_service, otp_store).await
}

#[post("/verify-otp")]
async fn verify_otp(
    verify_form: web::Json<VerifyOtpRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    registration_handler::verify_otp(verify_form, account_service).await
}

#[post("/resend-otp")]
async fn resend_otp(
    resend_form: web::Json<ResendOtpRequest>,
    otp_store: web::Data<OtpStore>,
) -> Result<HttpResponse, AppError> {
    registration_handler::resend_otp(resend_form, otp_store).await
}

#[post("/login")]
async fn login(
    login_form: web::Json<LoginRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    login_user(login_form, account_service).await
}

#[post("/google-login")]
async fn google_login(
    login_form: web::Json<GoogleLoginRequest>,
    account_service: web::Data<AccountService>,
) -> Result<HttpResponse, AppError> {
    google_login_user(login_form, account_service).await
}
