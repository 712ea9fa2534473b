//! Imputation of optional attributes.
//!
//! Absent optional fields are filled from the schema's fixed [`Defaults`]
//! table. Nothing is learned from data.
//!
//! [`Defaults`]: crate::preprocessing::schema::Defaults

mod constant;

pub use constant::Imputer;
