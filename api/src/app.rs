//! Route table

use actix_web::{web, HttpResponse};

use crate::response;
use crate::routes::auth;
use crate::state::AppState;
use crate::validation::json_config;

/// Attach the shared state and the JSON body config
pub fn app_data(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state)).app_data(json_config());
    }
}

/// Register every route; shared by the server and the route tests
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/signup/phone/exist", web::post().to(auth::is_phone_exist))
                    .route("/signup/email/exist", web::post().to(auth::is_email_exist))
                    .route("/verify-codes/captcha", web::post().to(auth::show_captcha))
                    .route("/verify-codes/phone", web::post().to(auth::send_using_phone))
                    .route("/verify-codes/check", web::post().to(auth::check_code)),
            ),
        )
        .default_service(web::route().to(not_found));
}

async fn health_check() -> HttpResponse {
    response::json(&serde_json::json!({
        "status": "healthy",
        "service": "gohub",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn not_found() -> HttpResponse {
    response::abort404(None)
}
