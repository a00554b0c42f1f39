use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::MySqlPool;

use crate::models::registration::RegisterForm;

const DUPLICATE_MESSAGE: &str = "Este correo electrónico ya está registrado.";

pub async fn submit(pool: web::Data<MySqlPool>, body: web::Json<RegisterForm>) -> impl Responder {
    let registration = match body.into_inner().validate() {
        Ok(registration) => registration,
        Err(errors) => return HttpResponse::BadRequest().json(json!({ "errors": errors })),
    };

    let existing = sqlx::query("SELECT id FROM registrations WHERE email = ?")
        .bind(&registration.email)
        .fetch_optional(pool.get_ref())
        .await;

    match existing {
        Ok(Some(_)) => {
            return HttpResponse::Conflict().json(json!({
                "success": false,
                "message": DUPLICATE_MESSAGE
            }))
        }
        Ok(None) => {}
        Err(err) => {
            log::error!("Failed to check for existing registration: {err}");
            return HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error del servidor al procesar el registro."
            }));
        }
    }

    let inserted =
        sqlx::query("INSERT INTO registrations (email, full_name, accepts_promos) VALUES (?, ?, ?)")
            .bind(&registration.email)
            .bind(&registration.full_name)
            .bind(registration.accepts_promos)
            .execute(pool.get_ref())
            .await;

    match inserted {
        Ok(result) => {
            log::info!("User registered, id {}", result.last_insert_id());
            HttpResponse::Created().json(json!({
                "success": true,
                "message": "Registro exitoso.",
                "data": { "id": result.last_insert_id(), "email": registration.email }
            }))
        }
        Err(err) => {
            // The pre-check races against concurrent inserts; the UNIQUE
            // constraint is the second line of defence and must surface as
            // the same conflict response.
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": DUPLICATE_MESSAGE
                    }));
                }
            }
            log::error!("Failed to register user: {err}");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error del servidor al procesar el registro."
            }))
        }
    }
}
