use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::services::activity_log::ActivityLog;

/// Raw per-day rows for the last year, oldest first.
#[tracing::instrument(
    name = "Get activity log",
    skip(activity_log, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_activity_log(
    activity_log: web::Data<ActivityLog>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let entries = activity_log.last_year(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(entries))
}
