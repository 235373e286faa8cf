//! Read models behind the dashboard, client and payment pages.

use crate::stats::{get_client_name, CLIENT_NOT_FOUND};
use crate::types::{AppState, ClientId, Money, Payment, Project, ProjectStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Returned as the project title of a payment whose project is gone
pub const PROJECT_NOT_FOUND: &str = "Project not found";

/// The first `limit` projects in insertion order
#[must_use]
pub fn recent_projects(state: &AppState, limit: usize) -> &[Project] {
    &state.projects[..limit.min(state.projects.len())]
}

/// Projects owned by `client_id`, in insertion order
#[must_use]
pub fn projects_for_client<'a>(state: &'a AppState, client_id: &ClientId) -> Vec<&'a Project> {
    state
        .projects
        .iter()
        .filter(|p| &p.client_id == client_id)
        .collect()
}

/// Copy of `project` with a new workflow status
///
/// Dispatch the result as [`AppAction::UpdateProject`](crate::AppAction::UpdateProject).
#[must_use]
pub fn set_project_status(project: &Project, status: ProjectStatus) -> Project {
    project.clone().with_status(status)
}

/// One row of the payment history
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Title of the paid project, or [`PROJECT_NOT_FOUND`]
    pub project_title: String,
    /// Name of the project's client, or the client-not-found sentinel
    pub client_name: String,
    /// Amount received
    pub amount: Money,
    /// When it was received
    pub date: DateTime<Utc>,
}

impl PaymentRecord {
    fn resolve(state: &AppState, payment: &Payment) -> Self {
        let project = state.project(&payment.project_id);
        let client_name = project.map_or(CLIENT_NOT_FOUND, |p| {
            get_client_name(&state.clients, &p.client_id)
        });

        Self {
            project_title: project.map_or(PROJECT_NOT_FOUND, |p| p.title.as_str()).to_owned(),
            client_name: client_name.to_owned(),
            amount: payment.amount,
            date: payment.date,
        }
    }
}

/// Every payment joined with its project and client, newest first
///
/// Payments with the same date keep their insertion order.
#[must_use]
pub fn payment_history(state: &AppState) -> Vec<PaymentRecord> {
    let mut records: Vec<_> = state
        .payments
        .iter()
        .map(|payment| PaymentRecord::resolve(state, payment))
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

/// Sum of every recorded payment
#[must_use]
pub fn total_received(state: &AppState) -> Money {
    state.payments.iter().map(|p| p.amount).sum()
}
