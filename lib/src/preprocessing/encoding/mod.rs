//! Categorical feature encoding.
//!
//! # Available Encoders
//!
//! ## CategoryCodec
//! Ordinal codes for property type, building state and energy label. The
//! tables are fixed constants versioned with the trained model; they are never
//! learned from data.
//!
//! ```ignore
//! CategoryCodec::encode_label::<BuildingState>("GOOD")  // Ok(3)
//! CategoryCodec::encode_label::<BuildingState>("RUIN")  // Err(UnknownCategory)
//! ```
//!
//! ## One-hot
//! Expands a closed category (the region) into one `0/1` flag per variant.

mod one_hot;
mod ordinal;

pub use one_hot::one_hot;
pub use ordinal::{BuildingState, CategoryCodec, EnergyLabel, OrdinalCategory, PropertyType};
