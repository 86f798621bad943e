/// Standings computation over the raw ledger.
pub mod aggregation;
/// Read side of the audit log.
pub mod audit_service;
/// Snapshot and restore of the whole scoreboard.
pub mod backup_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Global score freeze management.
pub mod lock_service;
/// Team roster management.
pub mod roster_service;
/// Score ledger mutations and read models.
pub mod scoring_service;
/// Storage connection supervisor with reconnect backoff.
pub mod storage_supervisor;
