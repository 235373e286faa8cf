//! Property-based invariant tests for the dashboard reducer and queries.
//!
//! 1. Undecodable actions leave state unchanged.
//! 2. DELETE_CLIENT removes the client, its projects and their payments, and
//!    nothing else.
//! 3. DELETE_PROJECT removes the project and its payments, and nothing else.
//! 4. pendingAmount = totalBudget - paidAmount for any state.
//! 5. A blank search term returns the input.
//! 6. Search ignores case.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use clientdesk_core::reducer::Reducer;
use clientdesk_dashboard::{
    get_dashboard_stats, search_entities, AppAction, AppContext, AppEnvironment, AppReducer,
    AppState, Client, ClientId, Money, Payment, PaymentStatus, Project, ProjectId, ProjectStatus,
};
use clientdesk_testing::test_clock;
use proptest::prelude::*;
use std::sync::Arc;

// ── Helpers ─────────────────────────────────────────────────────────────

fn status_strategy() -> impl Strategy<Value = ProjectStatus> {
    prop::sample::select(ProjectStatus::ALL.to_vec())
}

fn payment_status_strategy() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![Just(PaymentStatus::Paid), Just(PaymentStatus::Unpaid)]
}

/// States with unique ids whose references may dangle
fn state_strategy() -> impl Strategy<Value = AppState> {
    (1usize..5)
        .prop_flat_map(|clients| {
            let names = prop::collection::vec("[A-Za-z ]{1,12}", clients);
            let projects = prop::collection::vec(
                (
                    0..clients + 2,
                    "[A-Za-z ]{1,16}",
                    0i64..10_000_000,
                    status_strategy(),
                    payment_status_strategy(),
                ),
                0..8,
            );
            (names, projects)
        })
        .prop_flat_map(|(names, projects)| {
            let project_count = projects.len();
            let payments = prop::collection::vec((0..project_count + 2, 1i64..5_000_000), 0..8);
            (Just(names), Just(projects), payments)
        })
        .prop_map(|(names, projects, payments)| {
            let date = test_clock_now();
            AppState {
                clients: names
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| Client::new(ClientId::new(format!("c{i}")), name, "USA"))
                    .collect(),
                projects: projects
                    .into_iter()
                    .enumerate()
                    .map(|(i, (owner, title, cents, status, payment_status))| {
                        Project::new(
                            ProjectId::new(format!("p{i}")),
                            ClientId::new(format!("c{owner}")),
                            title,
                            Money::from_cents(cents),
                        )
                        .with_status(status)
                        .with_payment_status(payment_status)
                    })
                    .collect(),
                payments: payments
                    .into_iter()
                    .map(|(project, cents)| {
                        Payment::new(
                            ProjectId::new(format!("p{project}")),
                            Money::from_cents(cents),
                            date,
                        )
                    })
                    .collect(),
            }
        })
}

fn test_clock_now() -> chrono::DateTime<chrono::Utc> {
    use clientdesk_core::environment::Clock;
    test_clock().now()
}

fn reduce(mut state: AppState, action: AppAction) -> AppState {
    let env = AppEnvironment::new(Arc::new(test_clock()));
    let _effects = AppReducer::new().reduce(&mut state, action, &env);
    state
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Undecodable actions are identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_action_leaves_state_unchanged(
        state in state_strategy(),
        tag in "[A-Z_]{1,20}",
    ) {
        prop_assume!(!AppAction::KINDS.contains(&tag.as_str()));

        let context = AppContext::new(state.clone(), Arc::new(test_clock()));
        let raw = format!(r#"{{"type":"{tag}","payload":"c0"}}"#);

        let result = tokio_test::block_on(context.dispatch_json(&raw));
        prop_assert!(result.is_err());
        prop_assert_eq!(tokio_test::block_on(context.get_state()), state);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. DELETE_CLIENT cascade
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delete_client_cascades_completely(state in state_strategy(), target in 0usize..6) {
        let client_id = ClientId::new(format!("c{target}"));
        let owned: Vec<ProjectId> = state
            .projects
            .iter()
            .filter(|p| p.client_id == client_id)
            .map(|p| p.id.clone())
            .collect();

        let next = reduce(state.clone(), AppAction::DeleteClient(client_id.clone()));

        prop_assert!(next.clients.iter().all(|c| c.id != client_id));
        prop_assert!(next.projects.iter().all(|p| p.client_id != client_id));
        prop_assert!(next.payments.iter().all(|p| !owned.contains(&p.project_id)));

        // Everything else survives in order
        let clients: Vec<_> = state.clients.iter().filter(|c| c.id != client_id).cloned().collect();
        let projects: Vec<_> = state.projects.iter().filter(|p| p.client_id != client_id).cloned().collect();
        let payments: Vec<_> = state.payments.iter().filter(|p| !owned.contains(&p.project_id)).cloned().collect();
        prop_assert_eq!(next.clients, clients);
        prop_assert_eq!(next.projects, projects);
        prop_assert_eq!(next.payments, payments);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. DELETE_PROJECT cascade
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn delete_project_removes_its_payments(state in state_strategy(), target in 0usize..10) {
        let project_id = ProjectId::new(format!("p{target}"));

        let next = reduce(state.clone(), AppAction::DeleteProject(project_id.clone()));

        prop_assert_eq!(&next.clients, &state.clients);
        prop_assert!(next.projects.iter().all(|p| p.id != project_id));
        prop_assert!(next.payments.iter().all(|p| p.project_id != project_id));
        prop_assert_eq!(
            next.payments.len(),
            state.payments.iter().filter(|p| p.project_id != project_id).count()
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Pending amount identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pending_is_budget_minus_paid(state in state_strategy()) {
        let stats = get_dashboard_stats(&state);
        prop_assert_eq!(stats.pending_amount, stats.total_budget - stats.paid_amount);
        prop_assert_eq!(stats.paid_projects + stats.unpaid_projects, stats.total_projects);
    }

    #[test]
    fn pending_identity_survives_mark_paid(state in state_strategy(), target in 0usize..10, cents in 1i64..1_000_000) {
        let next = reduce(state, AppAction::MarkProjectPaid {
            project_id: ProjectId::new(format!("p{target}")),
            amount: Money::from_cents(cents),
        });
        let stats = get_dashboard_stats(&next);
        prop_assert_eq!(stats.pending_amount, stats.total_budget - stats.paid_amount);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5-6. Search
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn blank_search_is_identity(state in state_strategy(), term in "[ \t]{0,4}") {
        prop_assert_eq!(search_entities(&state.clients, &term), state.clients.clone());
        prop_assert_eq!(search_entities(&state.projects, &term), state.projects.clone());
    }

    #[test]
    fn search_ignores_case(state in state_strategy(), term in "[A-Za-z]{1,3}") {
        prop_assert_eq!(
            search_entities(&state.projects, &term.to_uppercase()),
            search_entities(&state.projects, &term.to_lowercase())
        );
        let found = search_entities(&state.clients, &term);
        prop_assert!(found.len() <= state.clients.len());
        prop_assert!(found
            .iter()
            .all(|c| c.name.to_lowercase().contains(&term.to_lowercase())));
    }
}
