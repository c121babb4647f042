//! Seeds an empty store with sample data on startup.
//!
//! The sample records themselves come from `subsync_core::membership`; this
//! module only writes them through the repositories.

use serde::Serialize;
use tokio::sync::OnceCell;

use subsync_core::membership::{sample_members, sample_payments, sample_reminders};
use subsync_core::storage::{MemberRepository, PaymentRepository, ReminderRepository, Result};

/// What a seeding attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeedOutcome {
    /// The store was empty and sample data was written.
    Seeded {
        members: usize,
        payments: usize,
        reminders: usize,
    },
    /// Members already existed; nothing was written.
    AlreadyPopulated,
    /// The attempt failed. Any records written before the failure remain.
    Failed,
    /// Seeding is turned off for this process.
    Disabled,
}

/// Writes the sample members, payments and reminder if no member exists yet.
///
/// Payments and the reminder reference the ids assigned to the sample
/// members. If the emptiness check fails nothing is written.
pub async fn seed_initial_data<R>(repo: &R) -> Result<SeedOutcome>
where
    R: MemberRepository + PaymentRepository + ReminderRepository + ?Sized,
{
    let existing = repo.list_members().await?;
    if !existing.is_empty() {
        tracing::debug!(members = existing.len(), "Store already populated, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let mut member_ids = Vec::new();
    for member in sample_members() {
        member_ids.push(repo.create_member(&member).await?);
    }

    let payments = sample_payments(&member_ids);
    for payment in &payments {
        repo.create_payment(payment).await?;
    }

    let reminders = sample_reminders(&member_ids);
    for reminder in &reminders {
        repo.create_reminder(reminder).await?;
    }

    tracing::info!(
        members = member_ids.len(),
        payments = payments.len(),
        reminders = reminders.len(),
        "Seeded sample data"
    );

    Ok(SeedOutcome::Seeded {
        members: member_ids.len(),
        payments: payments.len(),
        reminders: reminders.len(),
    })
}

/// Runs [`seed_initial_data`] at most once per process.
///
/// Failures are logged and swallowed; later calls return the first outcome
/// without touching the store.
#[derive(Debug, Default)]
pub struct SeedInitializer {
    outcome: OnceCell<SeedOutcome>,
}

impl SeedInitializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn run<R>(&self, repo: &R) -> SeedOutcome
    where
        R: MemberRepository + PaymentRepository + ReminderRepository + ?Sized,
    {
        *self
            .outcome
            .get_or_init(|| async {
                match seed_initial_data(repo).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::error!(error = %err, "Seeding sample data failed");
                        SeedOutcome::Failed
                    }
                }
            })
            .await
    }

    /// Records that seeding is turned off. Later runs do nothing.
    pub fn disable(&self) {
        if self.outcome.set(SeedOutcome::Disabled).is_err() {
            tracing::debug!("Seed already ran, leaving outcome unchanged");
        }
    }

    /// The outcome of the first run, if it has happened.
    pub fn outcome(&self) -> Option<SeedOutcome> {
        self.outcome.get().copied()
    }
}
