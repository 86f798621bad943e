use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{Document, doc},
    options::IndexOptions,
};
use tokio::sync::RwLock;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoAuditDocument, MongoLockDocument, MongoScoreDocument, MongoSnapshotDocument,
        MongoStandingsDocument, MongoTeamDocument,
    },
};
use crate::dao::{
    models::{
        AuditEntryEntity, LockStateEntity, ScoreEntity, ScoreKey, SnapshotEntity,
        SnapshotInfoEntity, StandingEntity, TeamEntity,
    },
    score_store::{MAX_AUDIT_ENTRIES, ScoreStore},
    storage::StorageResult,
};

const SCORE_COLLECTION_NAME: &str = "scores";
const TEAM_COLLECTION_NAME: &str = "teams";
const STANDINGS_COLLECTION_NAME: &str = "standings";
const LOCK_COLLECTION_NAME: &str = "lock";
const AUDIT_COLLECTION_NAME: &str = "audit_log";
const SNAPSHOT_COLLECTION_NAME: &str = "snapshots";

/// MongoDB-backed score store holding one document per ledger triple.
#[derive(Clone)]
pub struct MongoScoreStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoScoreStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        // Audit queries always sort newest-first and trimming sorts oldest-first.
        let audit = database.collection::<Document>(AUDIT_COLLECTION_NAME);
        let audit_index = mongodb::IndexModel::builder()
            .keys(doc! {"timestamp": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("audit_timestamp_idx".to_owned()))
                    .build(),
            )
            .build();
        audit
            .create_index(audit_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: AUDIT_COLLECTION_NAME,
                index: "timestamp",
                source,
            })?;

        // Cascading deletes filter the ledger by team and by jury member.
        let scores = database.collection::<Document>(SCORE_COLLECTION_NAME);
        for (keys, name) in [
            (doc! {"team_id": 1}, "score_team_idx"),
            (doc! {"jury_id": 1, "contest_id": 1}, "score_jury_idx"),
        ] {
            let index = mongodb::IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(Some(name.to_owned())).build())
                .build();
            scores
                .create_index(index)
                .await
                .map_err(|source| MongoDaoError::EnsureIndex {
                    collection: SCORE_COLLECTION_NAME,
                    index: name,
                    source,
                })?;
        }

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn score_collection(&self) -> Collection<MongoScoreDocument> {
        self.database()
            .await
            .collection::<MongoScoreDocument>(SCORE_COLLECTION_NAME)
    }

    async fn team_collection(&self) -> Collection<MongoTeamDocument> {
        self.database()
            .await
            .collection::<MongoTeamDocument>(TEAM_COLLECTION_NAME)
    }

    async fn standings_collection(&self) -> Collection<MongoStandingsDocument> {
        self.database()
            .await
            .collection::<MongoStandingsDocument>(STANDINGS_COLLECTION_NAME)
    }

    async fn lock_collection(&self) -> Collection<MongoLockDocument> {
        self.database()
            .await
            .collection::<MongoLockDocument>(LOCK_COLLECTION_NAME)
    }

    async fn audit_collection(&self) -> Collection<MongoAuditDocument> {
        self.database()
            .await
            .collection::<MongoAuditDocument>(AUDIT_COLLECTION_NAME)
    }

    async fn snapshot_collection(&self) -> Collection<MongoSnapshotDocument> {
        self.database()
            .await
            .collection::<MongoSnapshotDocument>(SNAPSHOT_COLLECTION_NAME)
    }

    async fn save_score(&self, score: ScoreEntity) -> MongoResult<()> {
        let key = score.key().storage_key();
        let document: MongoScoreDocument = score.into();
        self.score_collection()
            .await
            .replace_one(doc! {"_id": &key}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveScore { key, source })?;
        Ok(())
    }

    async fn find_score(&self, key: ScoreKey) -> MongoResult<Option<ScoreEntity>> {
        let document = self
            .score_collection()
            .await
            .find_one(doc! {"_id": key.storage_key()})
            .await
            .map_err(|source| MongoDaoError::LoadScores { source })?;
        Ok(document.map(Into::into))
    }

    async fn list_scores(&self) -> MongoResult<Vec<ScoreEntity>> {
        let documents: Vec<MongoScoreDocument> = self
            .score_collection()
            .await
            .find(doc! {})
            .sort(doc! {"submitted_at": 1})
            .await
            .map_err(|source| MongoDaoError::LoadScores { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadScores { source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn replace_scores(&self, scores: Vec<ScoreEntity>) -> MongoResult<()> {
        let collection = self.score_collection().await;
        collection
            .delete_many(doc! {})
            .await
            .map_err(|source| MongoDaoError::DeleteScores { source })?;
        if scores.is_empty() {
            return Ok(());
        }
        let documents: Vec<MongoScoreDocument> = scores.into_iter().map(Into::into).collect();
        collection
            .insert_many(documents)
            .await
            .map_err(|source| MongoDaoError::SaveScore {
                key: "<bulk>".to_owned(),
                source,
            })?;
        Ok(())
    }

    async fn delete_scores(&self, filter: Document) -> MongoResult<u64> {
        let result = self
            .score_collection()
            .await
            .delete_many(filter)
            .await
            .map_err(|source| MongoDaoError::DeleteScores { source })?;
        Ok(result.deleted_count)
    }

    async fn list_teams(&self) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .team_collection()
            .await
            .find(doc! {})
            .sort(doc! {"_id": 1})
            .await
            .map_err(|source| MongoDaoError::LoadTeams { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadTeams { source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_team(&self, id: String) -> MongoResult<Option<TeamEntity>> {
        let document = self
            .team_collection()
            .await
            .find_one(doc! {"_id": id})
            .await
            .map_err(|source| MongoDaoError::LoadTeams { source })?;
        Ok(document.map(Into::into))
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id.clone();
        let document: MongoTeamDocument = team.into();
        self.team_collection()
            .await
            .replace_one(doc! {"_id": &id}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveTeam { id, source })?;
        Ok(())
    }

    async fn delete_team(&self, id: String) -> MongoResult<bool> {
        let result = self
            .team_collection()
            .await
            .delete_one(doc! {"_id": &id})
            .await
            .map_err(|source| MongoDaoError::DeleteTeam { id, source })?;
        Ok(result.deleted_count > 0)
    }

    async fn replace_teams(&self, teams: Vec<TeamEntity>) -> MongoResult<()> {
        let collection = self.team_collection().await;
        collection
            .delete_many(doc! {})
            .await
            .map_err(|source| MongoDaoError::DeleteTeam {
                id: "<all>".to_owned(),
                source,
            })?;
        if teams.is_empty() {
            return Ok(());
        }
        let documents: Vec<MongoTeamDocument> = teams.into_iter().map(Into::into).collect();
        collection
            .insert_many(documents)
            .await
            .map_err(|source| MongoDaoError::SaveTeam {
                id: "<bulk>".to_owned(),
                source,
            })?;
        Ok(())
    }

    async fn load_standings(&self) -> MongoResult<Vec<StandingEntity>> {
        let document = self
            .standings_collection()
            .await
            .find_one(doc! {"_id": MongoStandingsDocument::SINGLETON_ID})
            .await
            .map_err(|source| MongoDaoError::LoadStandings { source })?;
        Ok(document.map(|doc| doc.into_entities()).unwrap_or_default())
    }

    async fn replace_standings(&self, standings: Vec<StandingEntity>) -> MongoResult<()> {
        let document = MongoStandingsDocument::from_entities(standings);
        self.standings_collection()
            .await
            .replace_one(doc! {"_id": MongoStandingsDocument::SINGLETON_ID}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveStandings { source })?;
        Ok(())
    }

    async fn load_lock(&self) -> MongoResult<Option<LockStateEntity>> {
        let document = self
            .lock_collection()
            .await
            .find_one(doc! {"_id": MongoLockDocument::SINGLETON_ID})
            .await
            .map_err(|source| MongoDaoError::LoadLock { source })?;
        Ok(document.map(Into::into))
    }

    async fn save_lock(&self, lock: LockStateEntity) -> MongoResult<()> {
        let document: MongoLockDocument = lock.into();
        self.lock_collection()
            .await
            .replace_one(doc! {"_id": MongoLockDocument::SINGLETON_ID}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveLock { source })?;
        Ok(())
    }

    async fn append_audit(&self, entry: AuditEntryEntity) -> MongoResult<()> {
        let collection = self.audit_collection().await;
        let document: MongoAuditDocument = entry.into();
        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::AppendAudit { source })?;

        self.trim_audit(&collection).await
    }

    /// Keep the audit log bounded by dropping the oldest entries over the cap.
    async fn trim_audit(&self, collection: &Collection<MongoAuditDocument>) -> MongoResult<()> {
        let count = collection
            .count_documents(doc! {})
            .await
            .map_err(|source| MongoDaoError::LoadAudit { source })?;

        let Some(excess) = (count as usize).checked_sub(MAX_AUDIT_ENTRIES) else {
            return Ok(());
        };
        if excess == 0 {
            return Ok(());
        }

        let oldest: Vec<MongoAuditDocument> = collection
            .find(doc! {})
            .sort(doc! {"timestamp": 1})
            .limit(excess as i64)
            .await
            .map_err(|source| MongoDaoError::LoadAudit { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadAudit { source })?;

        let ids: Vec<_> = oldest.into_iter().filter_map(|doc| doc.id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        collection
            .delete_many(doc! {"_id": {"$in": ids}})
            .await
            .map_err(|source| MongoDaoError::DeleteScores { source })?;
        Ok(())
    }

    async fn list_audit(&self, limit: usize) -> MongoResult<Vec<AuditEntryEntity>> {
        let documents: Vec<MongoAuditDocument> = self
            .audit_collection()
            .await
            .find(doc! {})
            .sort(doc! {"timestamp": -1})
            .limit(limit as i64)
            .await
            .map_err(|source| MongoDaoError::LoadAudit { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::LoadAudit { source })?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn save_snapshot(&self, snapshot: SnapshotEntity) -> MongoResult<()> {
        let id = snapshot.id.clone();
        let document: MongoSnapshotDocument = snapshot.into();
        self.snapshot_collection()
            .await
            .replace_one(doc! {"_id": &id}, &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveSnapshot { id, source })?;
        Ok(())
    }

    async fn find_snapshot(&self, id: String) -> MongoResult<Option<SnapshotEntity>> {
        let document = self
            .snapshot_collection()
            .await
            .find_one(doc! {"_id": &id})
            .await
            .map_err(|source| MongoDaoError::LoadSnapshot { id, source })?;
        Ok(document.map(Into::into))
    }

    async fn list_snapshots(&self) -> MongoResult<Vec<SnapshotInfoEntity>> {
        let documents: Vec<MongoSnapshotDocument> = self
            .snapshot_collection()
            .await
            .find(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| MongoDaoError::ListSnapshots { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListSnapshots { source })?;
        Ok(documents
            .into_iter()
            .map(|document| SnapshotInfoEntity {
                id: document.id().to_owned(),
                created_at: document.created_at.to_system_time(),
            })
            .collect())
    }
}

impl ScoreStore for MongoScoreStore {
    fn find_score(&self, key: ScoreKey) -> BoxFuture<'static, StorageResult<Option<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_score(key).await.map_err(Into::into) })
    }

    fn save_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_score(score).await.map_err(Into::into) })
    }

    fn list_scores(&self) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_scores().await.map_err(Into::into) })
    }

    fn replace_scores(&self, scores: Vec<ScoreEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.replace_scores(scores).await.map_err(Into::into) })
    }

    fn delete_scores_for_team(&self, team_id: String) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .delete_scores(doc! {"team_id": team_id})
                .await
                .map_err(Into::into)
        })
    }

    fn delete_scores_for_jury(
        &self,
        jury_id: String,
        contest_id: Option<String>,
    ) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            let filter = match contest_id {
                Some(contest_id) => doc! {"jury_id": jury_id, "contest_id": contest_id},
                None => doc! {"jury_id": jury_id},
            };
            store.delete_scores(filter).await.map_err(Into::into)
        })
    }

    fn clear_scores(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.delete_scores(doc! {}).await?;
            Ok(())
        })
    }

    fn list_teams(&self) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams().await.map_err(Into::into) })
    }

    fn find_team(&self, id: String) -> BoxFuture<'static, StorageResult<Option<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_team(id).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn delete_team(&self, id: String) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_team(id).await.map_err(Into::into) })
    }

    fn replace_teams(&self, teams: Vec<TeamEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.replace_teams(teams).await.map_err(Into::into) })
    }

    fn load_standings(&self) -> BoxFuture<'static, StorageResult<Vec<StandingEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_standings().await.map_err(Into::into) })
    }

    fn replace_standings(
        &self,
        standings: Vec<StandingEntity>,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.replace_standings(standings).await.map_err(Into::into) })
    }

    fn load_lock(&self) -> BoxFuture<'static, StorageResult<Option<LockStateEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.load_lock().await.map_err(Into::into) })
    }

    fn save_lock(&self, lock: LockStateEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_lock(lock).await.map_err(Into::into) })
    }

    fn append_audit(&self, entry: AuditEntryEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.append_audit(entry).await.map_err(Into::into) })
    }

    fn list_audit(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<AuditEntryEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_audit(limit).await.map_err(Into::into) })
    }

    fn save_snapshot(&self, snapshot: SnapshotEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_snapshot(snapshot).await.map_err(Into::into) })
    }

    fn find_snapshot(
        &self,
        id: String,
    ) -> BoxFuture<'static, StorageResult<Option<SnapshotEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_snapshot(id).await.map_err(Into::into) })
    }

    fn list_snapshots(&self) -> BoxFuture<'static, StorageResult<Vec<SnapshotInfoEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_snapshots().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
