//! Recoverable failures when turning user or URL input into applied filters.

use crate::filter_catalog::FilterValueType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// The id is not in the filter catalog, e.g. a stale bookmarked URL.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    #[error("could not decode value for filter {id}: {reason}")]
    Decode { id: String, reason: String },

    #[error("filter {id} expects a {expected:?} value")]
    ValueTypeMismatch { id: String, expected: FilterValueType },
}
