//! Fixed starting data for a fresh dashboard.

use crate::types::{AppState, Client, Money, Payment, PaymentStatus, Project, ProjectStatus};
use chrono::{DateTime, Utc};

/// 2024-01-15T00:00:00Z
const SEED_PAYMENT_TIMESTAMP: i64 = 1_705_276_800;

impl AppState {
    /// The demo data every new process starts from
    ///
    /// Two clients, one project each, and a single payment covering the
    /// second project.
    #[must_use]
    pub fn seed() -> Self {
        let payment_date =
            DateTime::<Utc>::from_timestamp(SEED_PAYMENT_TIMESTAMP, 0).unwrap_or_default();

        Self {
            clients: vec![
                Client::new("1", "Acme Corp", "USA").with_email("contact@acme.com"),
                Client::new("2", "Global Tech", "UK").with_email("info@globaltech.com"),
            ],
            projects: vec![
                Project::new("1", "1", "E-commerce Website", Money::from_units(5_000))
                    .with_status(ProjectStatus::InProgress),
                Project::new("2", "2", "Mobile App", Money::from_units(8_000))
                    .with_status(ProjectStatus::Completed)
                    .with_payment_status(PaymentStatus::Paid),
            ],
            payments: vec![Payment::new("2", Money::from_units(8_000), payment_date)],
        }
    }
}
