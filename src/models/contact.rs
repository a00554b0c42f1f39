use serde::Deserialize;

use crate::validation::{self, FieldError};

/// Raw body of `POST /api/contact`.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub mensaje: Option<String>,
}

/// A contact message ready to be stored.
#[derive(Debug)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(self) -> Result<NewContact, Vec<FieldError>> {
        let name = validation::required_text("nombre", self.nombre.as_deref(), "El nombre es requerido");
        let email = validation::email(
            "email",
            self.email.as_deref(),
            "Ingresa un correo electrónico válido",
        );
        let message = validation::required_text(
            "mensaje",
            self.mensaje.as_deref(),
            "El mensaje es requerido",
        );

        match (name, email, message) {
            (Ok(name), Ok(email), Ok(message)) => Ok(NewContact {
                name,
                email,
                message,
            }),
            (name, email, message) => Err([name.err(), email.err(), message.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}
