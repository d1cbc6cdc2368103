//! Form domain layer
//!
//! Type-safe field values and the story entry form.

mod field;
mod form_state;

pub use field::{capitalize, FormField};
pub use form_state::{Form, FormInput, GenerateForm};
