use actix_web::{get, patch, web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::plans::meals::{get_day_meals, get_grocery_list, list_meal_plans, toggle_meal};
use crate::middleware::auth::Claims;
use crate::models::plan::ToggleRequest;
use crate::services::{AccountService, PlanService};

#[get("")]
async fn list_meals(
    account_service: web::Data<AccountService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    list_meal_plans(account_service, claims).await
}

#[get("/{day}")]
async fn get_meals(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    get_day_meals(plan_service, claims, day).await
}

#[patch("/{day}/meals/{meal_type}")]
async fn update_meal_status(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    path: web::Path<(String, String)>,
    request: web::Json<ToggleRequest>,
) -> Result<HttpResponse, AppError> {
    toggle_meal(plan_service, claims, path, request).await
}

#[get("/{day}/grocery-list")]
async fn grocery_list(
    plan_service: web::Data<PlanService>,
    claims: web::ReqData<Claims>,
    day: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    get_grocery_list(plan_service, claims, day).await
}
