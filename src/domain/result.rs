//! Result type alias for Carta
//!
//! This module provides a convenient Result type alias that uses CartaError
//! as the error type.

use super::errors::CartaError;

/// Result type alias for Carta operations
///
/// This is a convenience type alias that uses `CartaError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use carta::domain::result::Result;
/// use carta::domain::errors::CartaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CartaError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CartaError>;
