#[cfg(test)]
mod tests {
    use aimtrack::db::documents::SqliteStore;
    use aimtrack::libs::scoring::ScoreAggregator;
    use aimtrack::libs::tracker::Tracker;
    use aimtrack::store::{DocumentStore, Fields, StoreError, PLAYLISTS, TASKS};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct SqliteTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        store: SqliteStore,
    }

    impl AsyncTestContext for SqliteTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("aimtrack.db");
            let store = SqliteStore::open(&db_path).unwrap();
            SqliteTestContext {
                _temp_dir: temp_dir,
                db_path,
                store,
            }
        }
    }

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_create_and_get(ctx: &mut SqliteTestContext) {
        let created = ctx
            .store
            .create(TASKS, "gridshot", fields(json!({"task_name": "gridshot", "highscore": 100})))
            .await
            .unwrap();
        assert_eq!(created.revision, 1);

        let fetched = ctx.store.get(TASKS, "gridshot").await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(ctx.store.get(TASKS, "missing").await.unwrap().is_none());
        assert!(ctx.store.get(PLAYLISTS, "gridshot").await.unwrap().is_none());
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_create_duplicate_fails(ctx: &mut SqliteTestContext) {
        ctx.store.create(TASKS, "a", Fields::new()).await.unwrap();
        let err = ctx.store.create(TASKS, "a", Fields::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_merge_preserves_untouched_fields(ctx: &mut SqliteTestContext) {
        ctx.store
            .create(TASKS, "gridshot", fields(json!({"task_name": "gridshot", "highscore": 100, "threshold": 95.0})))
            .await
            .unwrap();

        let merged = ctx
            .store
            .merge(TASKS, "gridshot", fields(json!({"highscore": 110, "threshold": 104.5})), Some(1))
            .await
            .unwrap();

        assert_eq!(merged.revision, 2);
        assert_eq!(merged.fields["task_name"], json!("gridshot"));
        assert_eq!(merged.fields["highscore"], json!(110));
        assert_eq!(ctx.store.get(TASKS, "gridshot").await.unwrap().unwrap(), merged);
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_stale_revision_conflicts(ctx: &mut SqliteTestContext) {
        ctx.store.create(TASKS, "a", fields(json!({"highscore": 1}))).await.unwrap();
        ctx.store.merge(TASKS, "a", fields(json!({"highscore": 2})), Some(1)).await.unwrap();

        let err = ctx
            .store
            .merge(TASKS, "a", fields(json!({"highscore": 3})), Some(1))
            .await
            .unwrap_err();
        match err {
            StoreError::Conflict { expected, actual, .. } => assert_eq!((expected, actual), (1, 2)),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(ctx.store.get(TASKS, "a").await.unwrap().unwrap().fields["highscore"], json!(2));
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_merge_missing_document(ctx: &mut SqliteTestContext) {
        let err = ctx.store.merge(TASKS, "nope", Fields::new(), None).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_list_and_delete(ctx: &mut SqliteTestContext) {
        for id in ["c", "a", "b"] {
            ctx.store.create(TASKS, id, Fields::new()).await.unwrap();
        }
        ctx.store.create(PLAYLISTS, "warmup", Fields::new()).await.unwrap();

        let ids: Vec<String> = ctx.store.list(TASKS).await.unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        assert!(ctx.store.delete(TASKS, "b").await.unwrap());
        assert!(!ctx.store.delete(TASKS, "b").await.unwrap());
        assert_eq!(ctx.store.list(TASKS).await.unwrap().len(), 2);
        assert_eq!(ctx.store.list(PLAYLISTS).await.unwrap().len(), 1);
    }

    #[test_context(SqliteTestContext)]
    #[tokio::test]
    async fn test_documents_survive_reopen(ctx: &mut SqliteTestContext) {
        let tracker = Tracker::new(SqliteStore::open(&ctx.db_path).unwrap(), ScoreAggregator::default());
        tracker.create_task("gridshot", 100).await.unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 16).unwrap();
        tracker.record_session("gridshot", &[98, 102], 0.5, today).await.unwrap();
        drop(tracker);

        let reopened = Tracker::new(SqliteStore::open(&ctx.db_path).unwrap(), ScoreAggregator::default());
        let task = reopened.get_task("gridshot").await.unwrap().unwrap();
        assert_eq!(task.highscore, 102);
        assert_eq!(task.history.len(), 2);
        assert_eq!(task.history[0].date, today);
    }
}
