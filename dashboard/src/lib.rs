//! Client dashboard built on the clientdesk reducer architecture.
//!
//! Clients own projects and projects receive payments. All of it lives in a
//! single [`AppState`] changed only by [`AppReducer`], held by an
//! [`AppContext`], and read through pure query functions.
//!
//! - [`types`]: the domain model and the [`AppAction`] enum
//! - [`reducer`]: the eight state transitions
//! - [`stats`] and [`views`]: derived figures and read models
//! - [`payments`]: validated payment construction
//! - [`context`]: the state container and its process-wide slot
//! - [`config`]: process configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use clientdesk_dashboard::{AppAction, AppContext, Money, ProjectId};
//!
//! # async fn example() {
//! let context = AppContext::seeded();
//!
//! context
//!     .dispatch(AppAction::MarkProjectPaid {
//!         project_id: ProjectId::from("1"),
//!         amount: Money::from_units(5_000),
//!     })
//!     .await;
//!
//! let stats = context.dashboard_stats().await;
//! println!("Pending: {}", stats.pending_amount);
//! # }
//! ```

pub mod config;
pub mod context;
pub mod format;
pub mod payments;
pub mod reducer;
mod seed;
pub mod stats;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use config::{ConfigError, DashboardConfig, Environment, SeedMode};
pub use context::global::{self, ContextError};
pub use context::{ActionDecodeError, AppContext, AppStore};
pub use format::format_date;
pub use payments::{record_payment, PaymentError};
pub use reducer::{AppEnvironment, AppReducer};
pub use stats::{
    count_payment_status, filter_projects, find_client_by_id, find_orphans, get_client_name,
    get_dashboard_stats, search_entities, DashboardStats, IntegrityReport, PaymentCounts,
    ProjectFilter, Searchable,
};
pub use types::{
    AppAction, AppState, Client, ClientId, Money, Payment, PaymentStatus, Project, ProjectId,
    ProjectStatus,
};
pub use views::{
    payment_history, projects_for_client, recent_projects, set_project_status, total_received,
    PaymentRecord,
};
