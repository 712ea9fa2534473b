//! Core trait for pipeline stages.
//!
//! Every stage between the raw record and the feature vector is a
//! [`RecordTransformer`]. Stages hold only immutable configuration, so a single
//! instance can serve concurrent requests.

use crate::error::PipelineError;

/// A stateless, fallible step from one record representation to the next.
///
/// # Example
/// ```ignore
/// let validated = InputValidator::new().transform(&raw)?;
/// let complete = Imputer::new(Defaults::default()).transform(&validated)?;
/// ```
pub trait RecordTransformer: Send + Sync {
    /// Representation consumed by this stage.
    type Input;
    /// Representation produced by this stage.
    type Output;

    /// Transform one record.
    ///
    /// # Errors
    /// Returns [`PipelineError`] on the first failed check; no partial output
    /// is produced.
    fn transform(&self, input: &Self::Input) -> Result<Self::Output, PipelineError>;
}
