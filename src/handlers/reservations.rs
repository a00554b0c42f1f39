use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::MySqlPool;

use crate::models::reservation::{
    generate_reservation_number, LookupForm, Reservation, ReservationForm,
};

pub async fn create(
    pool: web::Data<MySqlPool>,
    body: web::Json<ReservationForm>,
) -> impl Responder {
    // Validar inputs básicos
    let reservation = match body.into_inner().validate() {
        Ok(reservation) => reservation,
        Err(errors) => {
            log::warn!("Reservation rejected: {errors:?}");
            return HttpResponse::BadRequest().json(json!({ "errors": errors }));
        }
    };

    let reservation_number = generate_reservation_number();

    let inserted = sqlx::query(
        "INSERT INTO reservations (first_name, last_name, email, check_in_date, check_out_date, room_type, reservation_number) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&reservation.first_name)
    .bind(&reservation.last_name)
    .bind(&reservation.email)
    .bind(reservation.check_in)
    .bind(reservation.check_out)
    .bind(&reservation.room_type)
    .bind(&reservation_number)
    .execute(pool.get_ref())
    .await;

    match inserted {
        Ok(result) => {
            log::info!("Reservation created, id {}", result.last_insert_id());
            HttpResponse::Created().json(json!({
                "success": true,
                "message": "Reserva realizada con éxito.",
                "data": {
                    "id": result.last_insert_id(),
                    "reservation_number": reservation_number,
                    "room_type": reservation.room_type,
                    "check_in_date": reservation.check_in,
                    "check_out_date": reservation.check_out
                }
            }))
        }
        Err(err) => {
            log::error!("Failed to create reservation: {err}");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error del servidor al crear la reserva."
            }))
        }
    }
}

pub async fn lookup(pool: web::Data<MySqlPool>, body: web::Json<LookupForm>) -> impl Responder {
    let query = match body.into_inner().validate() {
        Ok(query) => query,
        Err(errors) => return HttpResponse::BadRequest().json(json!({ "errors": errors })),
    };

    if query.number.is_none() && query.email.is_none() {
        return HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Debes proporcionar el número de reserva o el correo electrónico."
        }));
    }

    let mut conditions = Vec::new();
    if query.number.is_some() {
        conditions.push("reservation_number = ?");
    }
    if query.email.is_some() {
        conditions.push("email = ?");
    }
    let sql = format!(
        "SELECT id, reservation_number, first_name, last_name, email, check_in_date, check_out_date, room_type, created_at \
         FROM reservations WHERE {} ORDER BY check_in_date DESC",
        conditions.join(" OR ")
    );
    log::debug!("Lookup query: {sql}");

    let mut rows = sqlx::query_as::<_, Reservation>(&sql);
    if let Some(number) = &query.number {
        rows = rows.bind(number);
    }
    if let Some(email) = &query.email {
        rows = rows.bind(email);
    }

    match rows.fetch_all(pool.get_ref()).await {
        Ok(reservations) if reservations.is_empty() => HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "No se encontró ninguna reserva con los datos proporcionados."
        })),
        Ok(reservations) => HttpResponse::Ok().json(json!({
            "success": true,
            "data": reservations
        })),
        Err(err) => {
            log::error!("Failed to look up reservations: {err}");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Error del servidor al buscar la reserva."
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use actix_web::dev::ServiceResponse;
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use serde_json::{json, Value};

    async fn post(uri: &str, body: Value) -> ServiceResponse {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(db::test_pool()))
                .route("/api/reservations", web::post().to(create))
                .route("/api/reservations/lookup", web::post().to(lookup)),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        actix_test::call_service(&app, req).await
    }

    fn valid_reservation() -> Value {
        json!({
            "nombreReserva": "Ana",
            "apellidoReserva": "García",
            "emailReserva": "ana@example.com",
            "checkInDate": "2025-07-10",
            "checkOutDate": "2025-07-12",
            "roomType": "doble"
        })
    }

    #[actix_web::test]
    async fn rejects_check_out_before_check_in() {
        let mut body = valid_reservation();
        body["checkInDate"] = json!("2025-07-10");
        body["checkOutDate"] = json!("2025-07-09");

        let res = post("/api/reservations", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        let errors = payload["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["param"], "checkOutDate");
        assert_eq!(
            errors[0]["msg"],
            "La fecha de salida debe ser posterior a la fecha de entrada."
        );
    }

    #[actix_web::test]
    async fn rejects_equal_check_in_and_check_out() {
        let mut body = valid_reservation();
        body["checkOutDate"] = json!("2025-07-10");

        let res = post("/api/reservations", body).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn lists_every_missing_reservation_field() {
        let res = post("/api/reservations", json!({})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(payload["errors"].as_array().unwrap().len(), 6);
    }

    #[actix_web::test]
    async fn creation_reports_store_failures_generically() {
        let res = post("/api/reservations", valid_reservation()).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(payload["message"], "Error del servidor al crear la reserva.");
    }

    #[actix_web::test]
    async fn lookup_requires_at_least_one_field() {
        let res = post("/api/reservations/lookup", json!({ "otra": "cosa" })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(
            payload["message"],
            "Debes proporcionar el número de reserva o el correo electrónico."
        );
    }

    #[actix_web::test]
    async fn lookup_rejects_a_blank_reservation_number() {
        let res = post("/api/reservations/lookup", json!({ "numero": "   " })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(payload["errors"][0]["param"], "numero");
    }

    #[actix_web::test]
    async fn lookup_rejects_a_malformed_email() {
        let res = post(
            "/api/reservations/lookup",
            json!({ "emailReserva": "not-an-email" }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let payload: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(payload["errors"][0]["param"], "emailReserva");
    }
}
