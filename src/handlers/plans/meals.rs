use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::middleware::auth::Claims;
use crate::models::plan::{CompletionResponse, GroceryListResponse, MealSlot, PlanDay, ToggleRequest};
use crate::services::account_service::AccountService;
use crate::services::plan_service::PlanService;
use crate::workout::grocery_list::grocery_list;

#[tracing::instrument(
    name = "List meal plans",
    skip(account_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn list_meal_plans(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let plans = account_service.weekly_plans(claims.account_id()?).await?;
    Ok(HttpResponse::Ok().json(plans))
}

#[tracing::instrument(
    name = "Get day meal plan",
    skip(plan_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_day_meals(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let day: PlanDay = day.parse()?;
    let plan = plan_service.day(claims.account_id()?, day).await?;
    Ok(HttpResponse::Ok().json(plan))
}

#[tracing::instrument(
    name = "Toggle meal completion",
    skip(plan_service, claims, request),
    fields(user_id = %claims.sub)
)]
pub async fn toggle_meal(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    path: web::Path<(String, String)>,
    request: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    let (day, meal_type) = path.into_inner();
    let day: PlanDay = day.parse()?;
    let completed = request.completed()?;
    let slot = MealSlot::parse(&meal_type, request.snack_index)?;

    let completed_status = plan_service
        .toggle_meal(claims.account_id()?, day, slot, completed)
        .await?;

    Ok(HttpResponse::Ok().json(CompletionResponse {
        message: "Meal status updated".to_string(),
        completed_status,
    }))
}

#[tracing::instrument(
    name = "Get grocery list",
    skip(plan_service, claims),
    fields(user_id = %claims.sub)
)]
pub async fn get_grocery_list(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let day: PlanDay = day.parse()?;
    let plan = plan_service.day(claims.account_id()?, day).await?;

    Ok(HttpResponse::Ok().json(GroceryListResponse {
        day: day.to_string(),
        grocery_list: grocery_list(day.as_str(), &plan.meals),
    }))
}
