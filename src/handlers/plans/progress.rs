use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::services::account_service::AccountService;
use crate::workout::progress_stats::progress_report;

#[tracing::instrument(
    name = "Get weekly progress",
    skip(account_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_weekly_progress(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let plans = account_service.weekly_plans(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(progress_report(&plans)))
}
