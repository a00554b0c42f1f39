use actix_web::{HttpResponse, Responder};
use serde_json::json;

/// `GET /api` confirmation ping for the frontend.
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "Backend del Hotel (MySQL) funcionando!" }))
}
