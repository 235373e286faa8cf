//! End-to-end dashboard scenarios through `AppContext`
//!
//! Each test starts from the demo seed with a fixed clock.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use clientdesk_dashboard::{
    filter_projects, find_orphans, payment_history, record_payment, set_project_status,
    AppAction, AppContext, AppState, Client, ClientId, DashboardStats, Money, PaymentError,
    PaymentStatus, Project, ProjectFilter, ProjectId, ProjectStatus,
};
use clientdesk_testing::test_clock;
use std::sync::Arc;

fn seeded_context() -> AppContext {
    AppContext::new(AppState::seed(), Arc::new(test_clock()))
}

#[tokio::test]
async fn seed_dashboard_figures() {
    let context = seeded_context();

    assert_eq!(
        context.dashboard_stats().await,
        DashboardStats {
            total_projects: 2,
            total_clients: 2,
            paid_projects: 1,
            unpaid_projects: 1,
            total_budget: Money::from_units(13_000),
            paid_amount: Money::from_units(8_000),
            pending_amount: Money::from_units(5_000),
        }
    );
}

#[tokio::test]
async fn marking_the_open_project_paid_settles_the_dashboard() {
    let context = seeded_context();

    context
        .dispatch(AppAction::MarkProjectPaid {
            project_id: ProjectId::from("1"),
            amount: Money::from_units(5_000),
        })
        .await;

    let stats = context.dashboard_stats().await;
    assert_eq!(stats.paid_projects, 2);
    assert_eq!(stats.unpaid_projects, 0);
    assert_eq!(stats.paid_amount, Money::from_units(13_000));
    assert_eq!(stats.pending_amount, Money::ZERO);

    let state = context.get_state().await;
    assert_eq!(state.payments.len(), 2);

    // Newest first: the new payment is dated by the fixed clock (2025)
    let history = payment_history(&state);
    assert_eq!(history[0].project_title, "E-commerce Website");
    assert_eq!(history[0].client_name, "Acme Corp");
    assert_eq!(history[1].project_title, "Mobile App");
}

#[tokio::test]
async fn deleting_a_client_removes_their_work() {
    let context = seeded_context();

    context.dispatch(AppAction::DeleteClient(ClientId::from("1"))).await;

    let state = context.get_state().await;
    assert_eq!(state.clients.len(), 1);
    assert_eq!(state.clients[0].id, ClientId::from("2"));
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].client_id, ClientId::from("2"));
    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.payments[0].amount, Money::from_units(8_000));
}

#[tokio::test]
async fn unknown_action_types_are_rejected_at_the_boundary() {
    let context = seeded_context();

    let result = context
        .dispatch_json(r#"{"type":"RESET_EVERYTHING","payload":null}"#)
        .await;
    assert!(result.is_err());

    let result = context.dispatch_json("not json").await;
    assert!(result.is_err());

    assert_eq!(context.get_state().await, AppState::seed());
}

#[tokio::test]
async fn json_actions_drive_a_full_client_lifecycle() {
    let context = seeded_context();

    let actions = [
        r#"{"type":"ADD_CLIENT","payload":{"id":"3","name":"Nordwind","country":"DE"}}"#,
        r#"{"type":"ADD_PROJECT","payload":{"id":"3","clientId":"3","title":"Brand Refresh","budget":2500.5,"status":"pending","paymentStatus":"unpaid"}}"#,
        r#"{"type":"ADD_PAYMENT","payload":{"projectId":"3","amount":2500.5,"date":"2024-03-01T12:00:00Z"}}"#,
        r#"{"type":"UPDATE_CLIENT","payload":{"id":"3","name":"Nordwind GmbH","country":"DE","email":"hallo@nordwind.de"}}"#,
    ];
    for raw in actions {
        context.dispatch_json(raw).await.unwrap();
    }

    let state = context.get_state().await;
    let client = state.client(&ClientId::from("3")).unwrap();
    assert_eq!(client.name, "Nordwind GmbH");
    assert_eq!(client.email.as_deref(), Some("hallo@nordwind.de"));

    let project = state.project(&ProjectId::from("3")).unwrap();
    assert_eq!(project.payment_status, PaymentStatus::Paid);
    assert_eq!(project.budget, Money::from_cents(250_050));

    let stats = context.dashboard_stats().await;
    assert_eq!(stats.total_clients, 3);
    assert_eq!(stats.pending_amount, Money::from_units(5_000));

    context
        .dispatch_json(r#"{"type":"DELETE_PROJECT","payload":"3"}"#)
        .await
        .unwrap();
    let state = context.get_state().await;
    assert!(state.project(&ProjectId::from("3")).is_none());
    assert_eq!(state.payments.len(), 1);
    assert_eq!(state.clients.len(), 3);
}

#[tokio::test]
async fn validated_payments_respect_one_per_project() {
    let context = seeded_context();
    let clock = test_clock();

    let state = context.get_state().await;
    let duplicate = record_payment(
        &ProjectId::from("2"),
        Money::from_units(100),
        &state.payments,
        &clock,
    );
    assert_eq!(
        duplicate,
        Err(PaymentError::AlreadyRecorded {
            project_id: ProjectId::from("2")
        })
    );

    let payment = record_payment(
        &ProjectId::from("1"),
        Money::from_units(5_000),
        &state.payments,
        &clock,
    )
    .unwrap();
    context.dispatch(AppAction::AddPayment(payment)).await;

    let stats = context.dashboard_stats().await;
    assert_eq!(stats.unpaid_projects, 0);
    assert_eq!(stats.pending_amount, Money::ZERO);
}

#[tokio::test]
async fn status_changes_flow_through_update_project() {
    let context = seeded_context();
    let state = context.get_state().await;

    let pending = filter_projects(
        &state.projects,
        &ProjectFilter::new().with_status(ProjectStatus::InProgress),
    );
    assert_eq!(pending.len(), 1);

    let done = set_project_status(&pending[0], ProjectStatus::Completed);
    context.dispatch(AppAction::UpdateProject(done)).await;

    let state = context.get_state().await;
    let completed = filter_projects(
        &state.projects,
        &ProjectFilter::new().with_status(ProjectStatus::Completed),
    );
    assert_eq!(completed.len(), 2);
}

#[tokio::test]
async fn concurrent_dispatches_are_all_applied() {
    let context = seeded_context();

    let mut handles = Vec::new();
    for i in 0..20 {
        let context = context.clone();
        handles.push(tokio::spawn(async move {
            let id = format!("n{i}");
            context
                .dispatch(AppAction::AddClient(Client::new(id.as_str(), "New", "USA")))
                .await;
            context
                .dispatch(AppAction::AddProject(Project::new(
                    id.as_str(),
                    id.as_str(),
                    "Work",
                    Money::from_units(10),
                )))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let state = context.get_state().await;
    assert_eq!(state.clients.len(), 22);
    assert_eq!(state.projects.len(), 22);
    assert!(find_orphans(&state).is_clean());
}
