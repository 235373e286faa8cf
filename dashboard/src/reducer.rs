//! Reducer logic for the dashboard.
//!
//! Every transition is total: actions that reference missing records are
//! applied as far as they can be and logged, never rejected.

use crate::types::{
    AppAction, AppState, Client, ClientId, Money, Payment, PaymentStatus, Project, ProjectId,
};
use chrono::{DateTime, Utc};
use clientdesk_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};
use std::collections::HashSet;
use std::sync::Arc;

/// Environment dependencies for the dashboard reducer
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock used to date payments created by `MARK_PROJECT_PAID`
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for [`AppState`]
#[derive(Clone, Debug)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new `AppReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    // Ids are not unique: every record carrying the id is replaced
    fn update_client(state: &mut AppState, client: Client) {
        let mut updated = 0_usize;
        for existing in state.clients.iter_mut().filter(|c| c.id == client.id) {
            existing.clone_from(&client);
            updated += 1;
        }
        if updated == 0 {
            tracing::warn!(client_id = %client.id, "Update for unknown client ignored");
        }
    }

    fn add_project(state: &mut AppState, project: Project) {
        if state.client(&project.client_id).is_none() {
            tracing::warn!(
                project_id = %project.id,
                client_id = %project.client_id,
                "Project added for unknown client"
            );
        }
        state.projects.push(project);
    }

    fn update_project(state: &mut AppState, project: Project) {
        let mut updated = 0_usize;
        for existing in state.projects.iter_mut().filter(|p| p.id == project.id) {
            existing.clone_from(&project);
            updated += 1;
        }
        if updated == 0 {
            tracing::warn!(project_id = %project.id, "Update for unknown project ignored");
        }
    }

    fn mark_paid(state: &mut AppState, project_id: &ProjectId) {
        let mut marked = 0_usize;
        for project in state.projects.iter_mut().filter(|p| &p.id == project_id) {
            project.payment_status = PaymentStatus::Paid;
            marked += 1;
        }
        if marked == 0 {
            tracing::warn!(%project_id, "Payment recorded for unknown project");
        }
    }

    fn mark_project_paid(
        state: &mut AppState,
        project_id: ProjectId,
        amount: Money,
        now: DateTime<Utc>,
    ) {
        if state.payments_for(&project_id).next().is_some() {
            tracing::warn!(%project_id, "Project already has a payment, recording another");
        }
        Self::mark_paid(state, &project_id);
        state.payments.push(Payment::new(project_id, amount, now));
    }

    fn add_payment(state: &mut AppState, payment: Payment) {
        Self::mark_paid(state, &payment.project_id);
        state.payments.push(payment);
    }

    fn delete_project(state: &mut AppState, project_id: &ProjectId) {
        state.projects.retain(|p| &p.id != project_id);
        state.payments.retain(|p| &p.project_id != project_id);
    }

    fn delete_client(state: &mut AppState, client_id: &ClientId) {
        let removed: HashSet<ProjectId> = state
            .projects
            .iter()
            .filter(|p| &p.client_id == client_id)
            .map(|p| p.id.clone())
            .collect();

        state.clients.retain(|c| &c.id != client_id);
        state.projects.retain(|p| &p.client_id != client_id);
        state.payments.retain(|p| !removed.contains(&p.project_id));

        tracing::debug!(%client_id, projects = removed.len(), "Client removed with its projects");
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect; 4]> {
        tracing::debug!(kind = action.kind(), cascade = action.is_cascading(), "Reducing action");

        match action {
            AppAction::AddClient(client) => state.clients.push(client),
            AppAction::UpdateClient(client) => Self::update_client(state, client),
            AppAction::AddProject(project) => Self::add_project(state, project),
            AppAction::UpdateProject(project) => Self::update_project(state, project),
            AppAction::MarkProjectPaid { project_id, amount } => {
                Self::mark_project_paid(state, project_id, amount, env.clock.now());
            },
            AppAction::AddPayment(payment) => Self::add_payment(state, payment),
            AppAction::DeleteProject(project_id) => Self::delete_project(state, &project_id),
            AppAction::DeleteClient(client_id) => Self::delete_client(state, &client_id),
        }

        smallvec![Effect::None]
    }
}
