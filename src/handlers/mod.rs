pub mod contact;
pub mod health;
pub mod register;
pub mod reservations;

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{error, HttpRequest, HttpResponse};
use serde_json::json;

/// Unparseable request bodies answer 400 instead of actix's default error
/// rendering, so the frontend always receives JSON it can display.
pub fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    log::warn!("Rejected request body: {err}");
    let response = HttpResponse::BadRequest().json(json!({
        "success": false,
        "message": "El cuerpo de la petición no es JSON válido."
    }));
    error::InternalError::from_response(err, response).into()
}

/// Last-resort trap for server errors nobody answered deliberately.
/// Handlers build their own JSON 500s; those pass through untouched.
/// Anything else gets the internal detail logged and replaced with a
/// generic plain-text body.
pub fn render_server_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let handler_built = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if handler_built {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    log::error!("Unhandled server error on {}", res.request().path());
    let (req, _) = res.into_parts();
    let res = HttpResponse::InternalServerError()
        .content_type(header::ContentType::plaintext())
        .body("¡Algo salió mal en el servidor!");
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res)
            .map_into_boxed_body()
            .map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::middleware::ErrorHandlers;
    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn bare_server_errors_become_generic_plain_text() {
        let app = actix_test::init_service(
            App::new()
                .wrap(
                    ErrorHandlers::new()
                        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_server_error),
                )
                .route(
                    "/boom",
                    web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
                ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/boom").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_test::read_body(res).await;
        assert_eq!(&body[..], "¡Algo salió mal en el servidor!".as_bytes());
    }

    #[actix_web::test]
    async fn json_server_errors_pass_through_unchanged() {
        let app = actix_test::init_service(
            App::new()
                .wrap(
                    ErrorHandlers::new()
                        .handler(StatusCode::INTERNAL_SERVER_ERROR, render_server_error),
                )
                .route(
                    "/boom",
                    web::get().to(|| async {
                        HttpResponse::InternalServerError()
                            .json(json!({ "success": false, "message": "Error del servidor." }))
                    }),
                ),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/boom").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(body["message"], "Error del servidor.");
    }

    #[actix_web::test]
    async fn malformed_json_bodies_answer_400() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error))
                .route(
                    "/echo",
                    web::post().to(|_body: web::Json<Value>| async { HttpResponse::Ok().finish() }),
                ),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/echo")
            .insert_header(header::ContentType::json())
            .set_payload("{ not json")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&actix_test::read_body(res).await).unwrap();
        assert_eq!(body["success"], Value::Bool(false));
    }
}
