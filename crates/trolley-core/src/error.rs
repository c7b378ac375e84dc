//! Error types for trolley.

use crate::ids::{CartId, TrackingId};
use crate::validate::Violation;

/// Result type for trolley operations.
pub type Result<T> = std::result::Result<T, CartError>;

/// Errors that can occur in trolley operations.
///
/// All of these are local and non-fatal to the process. The evicting
/// validation failures are fatal only to the cart entity: the triggering
/// call still gets a normal error back reporting why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Cart not found.
    #[error("cart not found: {cart_id}")]
    CartNotFound {
        /// The cart id that was not found.
        cart_id: CartId,
    },

    /// Tracking record not found.
    #[error("tracking record not found: {tracking_id}")]
    TrackingNotFound {
        /// The tracking id that was not found.
        tracking_id: TrackingId,
    },

    /// The user already has an active cart.
    #[error("user already has an active cart: {user_id}")]
    DuplicateCart {
        /// The user id with the existing cart.
        user_id: String,
    },

    /// Malformed input (empty user id, empty or malformed item list).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The cart failed validation.
    #[error("{0}")]
    Validation(#[from] Violation),
}

impl CartError {
    /// Whether this error deleted the cart as a side effect.
    #[must_use]
    pub fn evicted_cart(&self) -> bool {
        matches!(self, Self::Validation(violation) if violation.evicts())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_displays_the_reason_verbatim() {
        let err = CartError::from(Violation::InsufficientStock);
        assert_eq!(err.to_string(), "insufficient stock");
        let err = CartError::from(Violation::InactivityTimeout);
        assert_eq!(err.to_string(), "inactivity timeout");
    }

    #[test]
    fn only_evicting_violations_report_eviction() {
        assert!(CartError::from(Violation::OperationLimitExceeded).evicted_cart());
        assert!(CartError::from(Violation::InactivityTimeout).evicted_cart());
        assert!(!CartError::from(Violation::TooManyItems).evicted_cart());
        assert!(!CartError::CartNotFound {
            cart_id: crate::ids::CartId::new(1)
        }
        .evicted_cart());
    }
}
