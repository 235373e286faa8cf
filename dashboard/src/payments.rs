//! Validated construction of payments.
//!
//! The reducer accepts any payment it is given. Callers that want the
//! one-payment-per-project policy build payments through [`record_payment`]
//! and dispatch the result as [`AppAction::AddPayment`](crate::AppAction::AddPayment).

use crate::types::{Money, Payment, ProjectId};
use clientdesk_core::environment::Clock;
use thiserror::Error;

/// Reasons a payment cannot be recorded
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Amount was zero or negative
    #[error("Payment amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Money,
    },

    /// The project already has a payment
    #[error("Payment already exists for project {project_id}")]
    AlreadyRecorded {
        /// The project that was already paid
        project_id: ProjectId,
    },
}

/// Builds a payment for `project_id` stamped with the clock's current time
///
/// # Errors
///
/// - [`PaymentError::NonPositiveAmount`] when `amount <= 0`
/// - [`PaymentError::AlreadyRecorded`] when `existing` already holds a payment
///   for the same project
pub fn record_payment(
    project_id: &ProjectId,
    amount: Money,
    existing: &[Payment],
    clock: &dyn Clock,
) -> Result<Payment, PaymentError> {
    if !amount.is_positive() {
        return Err(PaymentError::NonPositiveAmount { amount });
    }

    if existing.iter().any(|p| &p.project_id == project_id) {
        return Err(PaymentError::AlreadyRecorded {
            project_id: project_id.clone(),
        });
    }

    Ok(Payment::new(project_id.clone(), amount, clock.now()))
}
