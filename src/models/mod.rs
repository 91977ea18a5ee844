pub mod country;
pub mod registration;

pub use country::{Country, CountryDto, format_thousands};
pub use registration::{
    BookError, Registration, RegistrationBook, RegistrationDraft, ValidationError, is_valid_matric,
};
