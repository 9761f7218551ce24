use actix_web::{get, web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::plans::progress::get_weekly_progress;
use crate::middleware::auth::Claims;
use crate::services::AccountService;

#[get("")]
async fn weekly_progress(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    get_weekly_progress(account_service, claims).await
}
