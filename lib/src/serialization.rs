//! Serialization of model parameters.
//!
//! Parameter structs hold plain numerical data only, so any serde type can be
//! stored as compact bytes through the blanket impl below.

use std::error::Error;

/// A parameter representation that can be serialized to and from bytes.
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Params {
        weights: Vec<f64>,
        bias: f64,
    }

    #[test]
    fn test_bytes_round_trip() {
        let params = Params {
            weights: vec![0.5, -1.25],
            bias: 12.0,
        };
        let bytes = params.to_bytes().unwrap();
        assert_eq!(Params::from_bytes(&bytes).unwrap(), params);
    }

    #[test]
    fn test_truncated_bytes_fail() {
        let params = Params {
            weights: vec![0.5, -1.25],
            bias: 12.0,
        };
        let bytes = params.to_bytes().unwrap();
        assert!(Params::from_bytes(&bytes[..bytes.len() - 3]).is_err());
    }
}
