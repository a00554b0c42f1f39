use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::validation::{self, FieldError};

/// A stored reservation row, as returned by lookups. `NaiveDate` keeps the
/// date columns free of any time-of-day or timezone component, so a stored
/// `2025-06-01` serialises back as exactly `"2025-06-01"`.
#[derive(Debug, Serialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    pub reservation_number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub room_type: String,
    pub created_at: DateTime<Utc>,
}

/// Raw body of `POST /api/reservations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    pub nombre_reserva: Option<String>,
    pub apellido_reserva: Option<String>,
    pub email_reserva: Option<String>,
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
    pub room_type: Option<String>,
}

/// A reservation ready to be stored.
#[derive(Debug)]
pub struct NewReservation {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_type: String,
}

impl ReservationForm {
    pub fn validate(self) -> Result<NewReservation, Vec<FieldError>> {
        let first_name = validation::required_text(
            "nombreReserva",
            self.nombre_reserva.as_deref(),
            "El nombre es requerido",
        );
        let last_name = validation::required_text(
            "apellidoReserva",
            self.apellido_reserva.as_deref(),
            "El apellido es requerido",
        );
        let email = validation::email(
            "emailReserva",
            self.email_reserva.as_deref(),
            "Ingresa un correo electrónico válido",
        );
        let check_in = validation::date(
            "checkInDate",
            self.check_in_date.as_deref(),
            "La fecha de entrada es requerida y debe ser válida",
        );
        let mut check_out = validation::date(
            "checkOutDate",
            self.check_out_date.as_deref(),
            "La fecha de salida es requerida y debe ser válida",
        );
        // Cross-field rule, only checkable once both dates parsed.
        if let (Ok(start), Ok(end)) = (&check_in, &check_out) {
            if end <= start {
                check_out = Err(FieldError::new(
                    "checkOutDate",
                    "La fecha de salida debe ser posterior a la fecha de entrada.",
                ));
            }
        }
        let room_type = validation::required_text(
            "roomType",
            self.room_type.as_deref(),
            "El tipo de habitación es requerido",
        );

        match (first_name, last_name, email, check_in, check_out, room_type) {
            (
                Ok(first_name),
                Ok(last_name),
                Ok(email),
                Ok(check_in),
                Ok(check_out),
                Ok(room_type),
            ) => Ok(NewReservation {
                first_name,
                last_name,
                email,
                check_in,
                check_out,
                room_type,
            }),
            (first_name, last_name, email, check_in, check_out, room_type) => Err([
                first_name.err(),
                last_name.err(),
                email.err(),
                check_in.err(),
                check_out.err(),
                room_type.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }
}

/// Raw body of `POST /api/reservations/lookup`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupForm {
    pub numero: Option<String>,
    pub email_reserva: Option<String>,
}

/// Lookup criteria. Each field is optional on its own; the handler rejects
/// requests where neither is present.
#[derive(Debug)]
pub struct LookupQuery {
    pub number: Option<String>,
    pub email: Option<String>,
}

impl LookupForm {
    pub fn validate(self) -> Result<LookupQuery, Vec<FieldError>> {
        let mut errors = Vec::new();

        let number = self.numero.as_deref().and_then(|raw| {
            match validation::required_text(
                "numero",
                Some(raw),
                "El número de reserva no puede estar vacío si se proporciona",
            ) {
                Ok(value) => Some(value),
                Err(err) => {
                    errors.push(err);
                    None
                }
            }
        });
        let email = self.email_reserva.as_deref().and_then(|raw| {
            match validation::email(
                "emailReserva",
                Some(raw),
                "Ingresa un correo electrónico válido si se proporciona",
            ) {
                Ok(value) => Some(value),
                Err(err) => {
                    errors.push(err);
                    None
                }
            }
        });

        if errors.is_empty() {
            Ok(LookupQuery { number, email })
        } else {
            Err(errors)
        }
    }
}

const SUFFIX_LEN: usize = 5;
const SUFFIX_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Builds the guest-facing reservation number: millisecond timestamp plus a
/// short random suffix. Collisions are possible in principle; nothing in
/// the store enforces uniqueness of this value.
pub fn generate_reservation_number() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())] as char)
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}
