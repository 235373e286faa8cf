//! Domain types for the client dashboard.
//!
//! Clients own projects, projects receive payments. All three live in one
//! [`AppState`] value held by the store; the reducer is the only code that
//! changes it.

use chrono::{DateTime, Utc};
use clientdesk_macros::Action;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use uuid::Uuid;

/// Unique identifier for a client
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a `ClientId` from an existing string id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a project
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a `ProjectId` from an existing string id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Money amount in cents (avoids floating point issues)
///
/// Signed so that derived figures such as a pending balance can go negative.
/// On the wire it is a decimal number of whole currency units (`5000`,
/// `12.5`), rounded to the nearest cent when read.
///
/// Amounts are kept within [`Money::MIN`]..=[`Money::MAX`] (15 significant
/// digits), so every amount survives the decimal wire form exactly.
/// Construction and arithmetic saturate at those bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

/// Largest magnitude in cents: $9,999,999,999,999.99
const MAX_CENTS: i64 = 999_999_999_999_999;

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Largest representable amount
    pub const MAX: Self = Self(MAX_CENTS);

    /// Smallest representable amount
    pub const MIN: Self = Self(-MAX_CENTS);

    /// Creates a `Money` amount from cents, saturating at the bounds
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self::clamped(cents)
    }

    /// Creates a `Money` amount from whole currency units, saturating at the bounds
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self::clamped(units.saturating_mul(100))
    }

    const fn clamped(cents: i64) -> Self {
        if cents > MAX_CENTS {
            Self::MAX
        } else if cents < -MAX_CENTS {
            Self::MIN
        } else {
            Self(cents)
        }
    }

    /// Returns the amount in cents
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Checks if this amount is strictly greater than zero
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checks if this amount is zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

// Operands are bounded well inside i64, so the raw sum cannot overflow
// before it is clamped.
impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::clamped(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::clamped(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Formats as US-dollar currency with thousands separators: `$13,000.00`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = (abs / 100).to_string();

        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{sign}${grouped}.{:02}", abs % 100)
    }
}

impl Serialize for Money {
    #[allow(clippy::cast_precision_loss)] // Exact: bounded to 15 digits
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)] // Range checked before the cast
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = f64::deserialize(deserializer)?;
        let cents = (units * 100.0).round();
        if !cents.is_finite() || cents.abs() > MAX_CENTS as f64 {
            return Err(serde::de::Error::custom(format!(
                "amount out of range: {units}"
            )));
        }
        Ok(Self(cents as i64))
    }
}

/// Workflow status of a project
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Not started
    Pending,
    /// Work under way
    InProgress,
    /// Work delivered
    Completed,
}

impl ProjectStatus {
    /// Every status, in workflow order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Whether a project has been paid for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// At least one payment was recorded
    Paid,
    /// No payment recorded yet
    Unpaid,
}

impl PaymentStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A customer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Country of residence
    pub country: String,
    /// Contact email, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Client {
    /// Creates a client without an email
    #[must_use]
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            country: country.into(),
            email: None,
        }
    }

    /// Sets the contact email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A unit of work for a client
///
/// `client_id` is not checked against existing clients, and `budget` is
/// expected to be non-negative but is not validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Owning client
    pub client_id: ClientId,
    /// Short description
    pub title: String,
    /// Agreed budget
    pub budget: Money,
    /// Workflow status
    pub status: ProjectStatus,
    /// Payment status
    pub payment_status: PaymentStatus,
}

impl Project {
    /// Creates a pending, unpaid project
    #[must_use]
    pub fn new(
        id: impl Into<ProjectId>,
        client_id: impl Into<ClientId>,
        title: impl Into<String>,
        budget: Money,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            title: title.into(),
            budget,
            status: ProjectStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
        }
    }

    /// Sets the workflow status
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the payment status
    #[must_use]
    pub const fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    /// Returns true if the project is marked paid
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

/// Money received against a project
///
/// Payments are never updated. Several may reference the same project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Project the payment is for
    pub project_id: ProjectId,
    /// Amount received
    pub amount: Money,
    /// When it was received
    pub date: DateTime<Utc>,
}

impl Payment {
    /// Creates a payment
    #[must_use]
    pub fn new(project_id: impl Into<ProjectId>, amount: Money, date: DateTime<Utc>) -> Self {
        Self {
            project_id: project_id.into(),
            amount,
            date,
        }
    }
}

/// Whole application state
///
/// Each sequence keeps insertion order, which is the display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// All clients
    pub clients: Vec<Client>,
    /// All projects
    pub projects: Vec<Project>,
    /// All payments
    pub payments: Vec<Payment>,
}

impl AppState {
    /// Creates an empty state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clients: Vec::new(),
            projects: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Returns a client by ID
    #[must_use]
    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.id == id)
    }

    /// Returns a project by ID
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Payments recorded against a project
    pub fn payments_for<'a>(&'a self, project_id: &'a ProjectId) -> impl Iterator<Item = &'a Payment> {
        self.payments.iter().filter(move |p| &p.project_id == project_id)
    }
}

/// Actions accepted by the dashboard reducer
///
/// Serialized with the tag in `type` and the data in `payload`, e.g.
/// `{"type": "DELETE_CLIENT", "payload": "1"}`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppAction {
    /// Append a client
    AddClient(Client),

    /// Replace the client with the same id
    UpdateClient(Client),

    /// Append a project
    AddProject(Project),

    /// Replace the project with the same id
    UpdateProject(Project),

    /// Mark a project paid and record a payment for it
    #[serde(rename_all = "camelCase")]
    MarkProjectPaid {
        /// Project being paid
        project_id: ProjectId,
        /// Amount received
        amount: Money,
    },

    /// Append a payment and mark its project paid
    AddPayment(Payment),

    /// Remove a project and its payments
    #[cascade]
    DeleteProject(ProjectId),

    /// Remove a client, its projects and their payments
    #[cascade]
    DeleteClient(ClientId),
}
