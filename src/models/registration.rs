use serde::Deserialize;
use serde_json::Value;

use crate::validation::{self, FieldError};

/// Raw body of `POST /api/register`. `promos` arrives in whatever shape the
/// frontend sends it, so it is coerced rather than strictly typed.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub promos: Option<Value>,
}

/// A registration ready to be stored.
#[derive(Debug)]
pub struct NewRegistration {
    pub email: String,
    pub full_name: Option<String>,
    pub accepts_promos: bool,
}

impl RegisterForm {
    pub fn validate(self) -> Result<NewRegistration, Vec<FieldError>> {
        let email = validation::email(
            "email",
            self.email.as_deref(),
            "Ingresa un correo electrónico válido",
        );
        let promos = validation::boolean("promos", self.promos.as_ref(), "Invalid value");
        let full_name = validation::optional_text(self.nombre.as_deref());

        match (email, promos) {
            (Ok(email), Ok(accepts_promos)) => Ok(NewRegistration {
                email,
                full_name,
                accepts_promos,
            }),
            (email, promos) => Err([email.err(), promos.err()].into_iter().flatten().collect()),
        }
    }
}
