pub mod contact;
pub mod registration;
pub mod reservation;
