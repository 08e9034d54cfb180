//! Result type alias for pipeline operations.

use super::studio_error::StudioError;

/// Type alias for Results using StudioError.
///
/// # Example
///
/// ```ignore
/// use studio_stream::error::StudioResult;
///
/// fn validate(input: &str) -> StudioResult<&str> {
///     if input.trim().is_empty() {
///         return Err(StudioError::EmptyInput);
///     }
///     Ok(input)
/// }
/// ```
pub type StudioResult<T> = Result<T, StudioError>;
