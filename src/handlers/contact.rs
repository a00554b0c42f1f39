use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::MySqlPool;

use crate::models::contact::ContactForm;

pub async fn submit(pool: web::Data<MySqlPool>, body: web::Json<ContactForm>) -> impl Responder {
    let contact = match body.into_inner().validate() {
        Ok(contact) => contact,
        Err(errors) => return HttpResponse::BadRequest().json(json!({ "errors": errors })),
    };

    let inserted = sqlx::query("INSERT INTO contacts (name, email, message) VALUES (?, ?, ?)")
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .execute(pool.get_ref())
        .await;

    match inserted {
        Ok(result) => {
            log::info!("Contact message stored, id {}", result.last_insert_id());
            HttpResponse::Created().json(json!({
                "success": true,
                "message": "Mensaje enviado con éxito.",
                "data": { "id": result.last_insert_id() }
            }))
        }
        Err(err) => {
            log::error!("Failed to store contact message: {err}");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error del servidor al procesar el mensaje."
            }))
        }
    }
}
