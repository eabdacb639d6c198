//! Validation of product submissions
//!
//! Raw form input is checked field by field before anything reaches the store.
//! Validators live in [`validators`]; the form type that drives them lives in
//! [`form`].

pub mod form;
pub mod validators;

pub use form::{FormErrors, ProductForm};
