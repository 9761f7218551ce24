use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::game::streak::local_today;
use crate::middleware::auth::Claims;
use crate::models::auth::MessageResponse;
use crate::models::plan::PlanDay;
use crate::services::account_service::AccountService;
use crate::services::email::{progress_report_email, EmailSender, ProgressSnapshot};
use crate::services::plan_service::PlanService;
use crate::utils::health_calculations::{bmi_status, calc_bmi};

#[tracing::instrument(
    name = "Email progress report",
    skip(account_service, plan_service, email_sender, claims),
    fields(user_id = %claims.sub)
)]
pub async fn email_progress_report(
    account_service: web::Data<AccountService>,
    plan_service: web::Data<PlanService>,
    email_sender: web::Data<dyn EmailSender>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;
    let account = account_service.profile(account_id).await?;

    let todays_workout = match plan_service.day(account_id, PlanDay::for_date(local_today())).await {
        Ok(plan) => Some(plan.exercises),
        Err(AppError::NotFound(_)) => None,
        Err(e) => return Err(e),
    };

    let bmi = calc_bmi(account.weight, account.height);
    let snapshot = ProgressSnapshot {
        name: account.name.clone(),
        power_level: account.power_level,
        title: account.title.clone(),
        streak: account.streak_count,
        bmi,
        bmi_status: bmi_status(bmi).as_str(),
        todays_workout,
    };

    email_sender
        .send(&progress_report_email(&account.email, &snapshot))
        .await?;

    tracing::info!("Progress report sent");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Progress report sent to your email")))
}
