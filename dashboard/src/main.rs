//! `clientdesk` binary
//!
//! Prints the dashboard overview, records a payment for the first unpaid
//! project and prints the overview again.

use anyhow::Context as _;
use clientdesk_dashboard::{
    format_date, get_client_name, get_dashboard_stats, global, payment_history, recent_projects,
    AppAction, AppContext, AppState, DashboardConfig,
};
use clientdesk_runtime::metrics::MetricsExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DashboardConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(environment = %config.environment, seed = ?config.seed, "Starting clientdesk");

    let mut exporter = MetricsExporter::new();
    if config.metrics {
        exporter.install().context("installing metrics recorder")?;
    }

    let context = global::install(AppContext::from_config(&config))?;

    let state = context.get_state().await;
    print_overview(&state, config.recent_projects);

    if let Some(project) = state.projects.iter().find(|p| !p.is_paid()) {
        println!("\n>>> Marking '{}' paid ({})", project.title, project.budget);
        context
            .dispatch(AppAction::MarkProjectPaid {
                project_id: project.id.clone(),
                amount: project.budget,
            })
            .await;

        print_overview(&context.get_state().await, config.recent_projects);
    } else {
        println!("\nEvery project is already paid");
    }

    if let Some(text) = exporter.render() {
        println!("\n=== Metrics ===\n{text}");
    }

    Ok(())
}

fn print_overview(state: &AppState, recent: usize) {
    let stats = get_dashboard_stats(state);

    println!("\n=== Dashboard ===");
    println!("Clients:  {}", stats.total_clients);
    println!(
        "Projects: {} ({} paid, {} unpaid)",
        stats.total_projects, stats.paid_projects, stats.unpaid_projects
    );
    println!("Budget:   {}", stats.total_budget);
    println!("Received: {}", stats.paid_amount);
    println!("Pending:  {}", stats.pending_amount);

    println!("\nRecent projects:");
    for project in recent_projects(state, recent) {
        println!(
            "  {:<24} {:<14} {:<12} {:>12}  {}",
            project.title,
            get_client_name(&state.clients, &project.client_id),
            project.status,
            project.budget.to_string(),
            project.payment_status
        );
    }

    println!("\nPayment history:");
    for record in payment_history(state) {
        println!(
            "  {:<14} {:<24} {:<14} {:>12}",
            format_date(&record.date),
            record.project_title,
            record.client_name,
            record.amount.to_string()
        );
    }
}
