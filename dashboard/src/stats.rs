//! Derived statistics and queries over [`AppState`].
//!
//! Everything here is a pure read. Missing references produce sentinels or
//! empty results instead of errors.

use crate::types::{
    AppState, Client, ClientId, Money, Payment, PaymentStatus, Project, ProjectId, ProjectStatus,
};
use serde::Serialize;

/// Returned by [`get_client_name`] when the client does not exist
pub const CLIENT_NOT_FOUND: &str = "Client not found";

/// Paid and unpaid project counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaymentCounts {
    /// Projects marked paid
    pub paid: usize,
    /// Projects not marked paid
    pub unpaid: usize,
}

/// Counts projects by payment status
#[must_use]
pub fn count_payment_status(projects: &[Project]) -> PaymentCounts {
    projects
        .iter()
        .fold(PaymentCounts::default(), |mut counts, project| {
            match project.payment_status {
                PaymentStatus::Paid => counts.paid += 1,
                PaymentStatus::Unpaid => counts.unpaid += 1,
            }
            counts
        })
}

/// Looks up a client by id
#[must_use]
pub fn find_client_by_id<'a>(clients: &'a [Client], client_id: &ClientId) -> Option<&'a Client> {
    clients.iter().find(|c| &c.id == client_id)
}

/// Returns the client's name, or [`CLIENT_NOT_FOUND`]
#[must_use]
pub fn get_client_name<'a>(clients: &'a [Client], client_id: &ClientId) -> &'a str {
    find_client_by_id(clients, client_id).map_or(CLIENT_NOT_FOUND, |c| c.name.as_str())
}

/// Criteria for [`filter_projects`]; `None` fields match everything
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    /// Required workflow status
    pub status: Option<ProjectStatus>,
    /// Required payment status
    pub payment_status: Option<PaymentStatus>,
    /// Required owning client
    pub client_id: Option<ClientId>,
}

impl ProjectFilter {
    /// A filter that matches every project
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            payment_status: None,
            client_id: None,
        }
    }

    /// Require a workflow status
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Require a payment status
    #[must_use]
    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    /// Require an owning client
    #[must_use]
    pub fn with_client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Returns true if the project satisfies every set criterion
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.status.is_none_or(|s| project.status == s)
            && self.payment_status.is_none_or(|s| project.payment_status == s)
            && self.client_id.as_ref().is_none_or(|c| &project.client_id == c)
    }
}

/// Projects matching all criteria of `filter`, in their original order
#[must_use]
pub fn filter_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Project> {
    projects
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Entities that can be found by free-text search
pub trait Searchable {
    /// The text a search term is matched against
    fn search_text(&self) -> &str;
}

impl Searchable for Client {
    fn search_text(&self) -> &str {
        &self.name
    }
}

impl Searchable for Project {
    fn search_text(&self) -> &str {
        &self.title
    }
}

/// Case-insensitive substring search on a client's name or a project's title
///
/// A blank term returns every entity unchanged.
#[must_use]
pub fn search_entities<T: Searchable + Clone>(entities: &[T], term: &str) -> Vec<T> {
    if term.trim().is_empty() {
        return entities.to_vec();
    }

    let needle = term.to_lowercase();
    entities
        .iter()
        .filter(|e| e.search_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Headline figures for the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of projects
    pub total_projects: usize,
    /// Number of clients
    pub total_clients: usize,
    /// Projects marked paid
    pub paid_projects: usize,
    /// Projects not marked paid
    pub unpaid_projects: usize,
    /// Sum of every project budget
    pub total_budget: Money,
    /// Sum of every payment
    pub paid_amount: Money,
    /// `total_budget - paid_amount`
    ///
    /// Not reconciled against unpaid budgets: over-payments or stray
    /// payments make it diverge, and it can go negative.
    pub pending_amount: Money,
}

/// Computes the dashboard figures for `state`
#[must_use]
pub fn get_dashboard_stats(state: &AppState) -> DashboardStats {
    let counts = count_payment_status(&state.projects);
    let total_budget: Money = state.projects.iter().map(|p| p.budget).sum();
    let paid_amount: Money = state.payments.iter().map(|p| p.amount).sum();

    DashboardStats {
        total_projects: state.projects.len(),
        total_clients: state.clients.len(),
        paid_projects: counts.paid,
        unpaid_projects: counts.unpaid,
        total_budget,
        paid_amount,
        pending_amount: total_budget - paid_amount,
    }
}

/// Records whose parent no longer exists
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Projects whose client is missing
    pub orphaned_projects: Vec<ProjectId>,
    /// Payments whose project is missing
    pub orphaned_payments: Vec<Payment>,
}

impl IntegrityReport {
    /// Returns true when every reference resolves
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.orphaned_projects.is_empty() && self.orphaned_payments.is_empty()
    }
}

/// Lists dangling references without repairing them
#[must_use]
pub fn find_orphans(state: &AppState) -> IntegrityReport {
    IntegrityReport {
        orphaned_projects: state
            .projects
            .iter()
            .filter(|p| state.client(&p.client_id).is_none())
            .map(|p| p.id.clone())
            .collect(),
        orphaned_payments: state
            .payments
            .iter()
            .filter(|p| state.project(&p.project_id).is_none())
            .cloned()
            .collect(),
    }
}
