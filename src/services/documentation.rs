use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the jury board backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::scores::list_scores,
        crate::routes::scores::submit_score,
        crate::routes::scores::replace_scores,
        crate::routes::scores::clear_scores,
        crate::routes::scores::clear_jury_scores,
        crate::routes::scores::list_standings,
        crate::routes::scores::scoreboard,
        crate::routes::teams::list_teams,
        crate::routes::teams::create_team,
        crate::routes::teams::replace_roster,
        crate::routes::teams::update_team,
        crate::routes::teams::delete_team,
        crate::routes::lock::lock_status,
        crate::routes::lock::set_lock,
        crate::routes::audit::list_audit,
        crate::routes::backup::list_backups,
        crate::routes::backup::create_backup,
        crate::routes::backup::restore_backup,
        crate::routes::meta::get_config,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::scores::SubmitScoreRequest,
            crate::dto::scores::ScoreRow,
            crate::dto::scores::JuryScore,
            crate::dto::scores::StandingRow,
            crate::dto::scores::ScoreboardSnapshot,
            crate::dto::teams::TeamInput,
            crate::dto::teams::TeamRow,
            crate::dto::lock::LockStatus,
            crate::dto::lock::SetLockRequest,
            crate::dto::audit::AuditRow,
            crate::dto::backup::BackupInfo,
            crate::dto::config::ConfigResponse,
            crate::dto::config::JuryMemberInfo,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scores", description = "Score ledger and standings"),
        (name = "teams", description = "Team roster management"),
        (name = "lock", description = "Global score freeze"),
        (name = "audit", description = "Score change history"),
        (name = "backups", description = "Scoreboard snapshot and restore"),
        (name = "config", description = "Static scoring configuration"),
    )
)]
pub struct ApiDoc;
