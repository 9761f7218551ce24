use actix_web::web;

pub mod ai;
pub mod auth;
pub mod backend_health;
pub mod game;
pub mod meals;
pub mod profile;
pub mod progress;
pub mod workouts;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/auth")
            .service(auth::send_otp)
            .service(auth::verify_otp)
            .service(auth::resend_otp)
            .service(auth::login)
            .service(auth::google_login)
    );
    // Everything below requires a bearer token
    cfg.service(
        web::scope("/profile")
            .wrap(AuthMiddleware)
            .service(profile::get_profile)
            .service(profile::update_profile)
            .service(profile::update_fatigue)
            .service(profile::activity_heatmap)
            .service(profile::email_progress)
    );
    cfg.service(
        web::scope("/workouts")
            .wrap(AuthMiddleware)
            .service(workouts::list_workouts)
            .service(workouts::get_workout)
            .service(workouts::replace_workout)
            .service(workouts::update_exercise_status)
    );
    cfg.service(
        web::scope("/meals")
            .wrap(AuthMiddleware)
            .service(meals::list_meals)
            .service(meals::grocery_list)
            .service(meals::update_meal_status)
            .service(meals::get_meals)
    );
    cfg.service(
        web::scope("/progress")
            .wrap(AuthMiddleware)
            .service(progress::weekly_progress)
    );
    cfg.service(
        web::scope("/game")
            .wrap(AuthMiddleware)
            .service(game::get_power_level)
            .service(game::add_xp)
            .service(game::get_achievements)
            .service(game::unlock_achievement)
            .service(game::get_daily_challenge)
            .service(game::complete_daily_challenge)
            .service(game::get_water)
            .service(game::add_water)
            .service(game::reset_water)
            .service(game::log_weight)
            .service(game::get_weight_history)
            .service(game::get_leaderboard)
    );
    cfg.service(
        web::scope("/ai")
            .wrap(AuthMiddleware)
            .service(ai::generate_workout)
            .service(ai::generate_meal)
            .service(ai::swap_meal)
            .service(ai::chat)
            .service(ai::analysis)
    );
}
