use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Audit log DTOs.
pub mod audit;
/// Backup and restore DTOs.
pub mod backup;
/// Runtime configuration projection DTOs.
pub mod config;
/// Health check DTOs.
pub mod health;
/// Lock gate DTOs.
pub mod lock;
/// Score submission, ledger, and standings DTOs.
pub mod scores;
/// Team roster DTOs.
pub mod teams;
/// Validation helpers shared by request DTOs.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
