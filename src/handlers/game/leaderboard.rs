use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::db::accounts;
use crate::errors::AppError;
use crate::game::leaderboard::rank_entries;
use crate::middleware::auth::Claims;
use crate::models::game::LeaderboardResponse;

#[tracing::instrument(name = "Get leaderboard", skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn get_leaderboard(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let account_id = claims.account_id()?;

    let rows = accounts::leaderboard(pool.get_ref()).await?;
    let current_user_rank = accounts::leaderboard_rank(pool.get_ref(), account_id).await?;

    Ok(HttpResponse::Ok().json(LeaderboardResponse {
        leaderboard: rank_entries(rows, account_id),
        current_user_rank,
    }))
}
