#[cfg(test)]
mod tests {
    use aimtrack::commands::{playlist, record, report, task};
    use aimtrack::libs::export::{ExportFormat, Exporter};
    use aimtrack::libs::scoring::{Period, ScoreAggregator};
    use aimtrack::libs::tracker::Tracker;
    use aimtrack::store::memory::MemoryStore;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct CommandTestContext {
        temp_dir: TempDir,
        tracker: Tracker<MemoryStore>,
    }

    impl AsyncTestContext for CommandTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let tracker = Tracker::new(MemoryStore::new(), ScoreAggregator::default());
            CommandTestContext { temp_dir, tracker }
        }
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_task_create_and_duplicate(ctx: &mut CommandTestContext) {
        task::handle_create(&ctx.tracker, Some("gridshot".to_string()), Some(100)).await.unwrap();
        // A duplicate is reported, not returned as an error.
        task::handle_create(&ctx.tracker, Some("gridshot".to_string()), Some(50)).await.unwrap();

        let task = ctx.tracker.get_task("gridshot").await.unwrap().unwrap();
        assert_eq!(task.highscore, 100);
        assert_eq!(task.threshold, 95.0);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_task_edit_missing_is_reported(ctx: &mut CommandTestContext) {
        task::handle_edit(&ctx.tracker, Some("nope".to_string()), Some(10)).await.unwrap();
        assert!(ctx.tracker.get_task("nope").await.unwrap().is_none());
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_invalid_task_input_is_reported_not_fatal(ctx: &mut CommandTestContext) {
        task::handle_create(&ctx.tracker, Some("x".to_string()), Some(0)).await.unwrap();
        task::handle_create(&ctx.tracker, Some("a/b".to_string()), Some(10)).await.unwrap();
        assert!(ctx.tracker.list_tasks().await.unwrap().is_empty());

        ctx.tracker.create_task("gridshot", 100).await.unwrap();
        task::handle_edit(&ctx.tracker, Some("gridshot".to_string()), Some(0)).await.unwrap();
        assert_eq!(ctx.tracker.get_task("gridshot").await.unwrap().unwrap().highscore, 100);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_invalid_playlist_name_is_reported_not_fatal(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("gridshot", 100).await.unwrap();

        playlist::handle_create(&ctx.tracker, Some("a/b".to_string()), Some("gridshot".to_string()))
            .await
            .unwrap();
        assert!(ctx.tracker.list_playlists().await.unwrap().is_empty());

        ctx.tracker.create_playlist("warmup", &["gridshot".to_string()]).await.unwrap();
        playlist::handle_edit(&ctx.tracker, Some("warmup".to_string()), Some("x/y".to_string()), None, false)
            .await
            .unwrap();
        assert!(ctx.tracker.get_playlist("warmup").await.unwrap().is_some());
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_record_with_all_arguments(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("sixshot", 60).await.unwrap();

        record::handle_record(&ctx.tracker, "sixshot", Some(0.45), Some(vec![55, 62, 58])).await.unwrap();

        let task = ctx.tracker.get_task("sixshot").await.unwrap().unwrap();
        assert_eq!(task.highscore, 62);
        assert_eq!(task.history.len(), 3);
        assert_eq!(task.sensitivity, Some(0.45));
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_record_invalid_input_leaves_task_untouched(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("sixshot", 60).await.unwrap();

        record::handle_record(&ctx.tracker, "sixshot", Some(0.45), Some(vec![])).await.unwrap();
        record::handle_record(&ctx.tracker, "sixshot", Some(-1.0), Some(vec![50])).await.unwrap();
        record::handle_record(&ctx.tracker, "unknown", Some(0.45), Some(vec![50])).await.unwrap();

        let task = ctx.tracker.get_task("sixshot").await.unwrap().unwrap();
        assert!(task.history.is_empty());
        assert_eq!(task.highscore, 60);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_playlist_create_and_rename(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("gridshot", 100).await.unwrap();
        ctx.tracker.create_task("1w6ts", 80).await.unwrap();

        playlist::handle_create(&ctx.tracker, Some("warmup".to_string()), Some("gridshot, 1w6ts, ghost".to_string()))
            .await
            .unwrap();
        let created = ctx.tracker.get_playlist("warmup").await.unwrap().unwrap();
        assert_eq!(created.tasks, vec!["gridshot", "1w6ts"]);

        playlist::handle_edit(&ctx.tracker, Some("warmup".to_string()), Some("daily".to_string()), None, false)
            .await
            .unwrap();
        assert!(ctx.tracker.get_playlist("warmup").await.unwrap().is_none());
        let renamed = ctx.tracker.get_playlist("daily").await.unwrap().unwrap();
        assert_eq!(renamed.tasks, created.tasks);
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_list_and_report_run_without_data(ctx: &mut CommandTestContext) {
        task::handle_list(&ctx.tracker).await.unwrap();
        playlist::handle_list(&ctx.tracker).await.unwrap();
        report::handle_report(&ctx.tracker, Period::Week, None).await.unwrap();
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_report_with_data(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("gridshot", 100).await.unwrap();
        record::handle_record(&ctx.tracker, "gridshot", Some(0.5), Some(vec![90, 96])).await.unwrap();

        report::handle_report(&ctx.tracker, Period::All, None).await.unwrap();
        task::handle_list(&ctx.tracker).await.unwrap();
    }

    #[test_context(CommandTestContext)]
    #[tokio::test]
    async fn test_export_writes_csv_and_json(ctx: &mut CommandTestContext) {
        ctx.tracker.create_task("gridshot", 100).await.unwrap();
        ctx.tracker.create_playlist("warmup", &["gridshot".to_string()]).await.unwrap();
        record::handle_record(&ctx.tracker, "gridshot", Some(0.5), Some(vec![90, 96])).await.unwrap();
        let rows = ctx.tracker.export_rows(None).await.unwrap();

        let csv_path = ctx.temp_dir.path().join("scores.csv");
        Exporter::new(ExportFormat::Csv, Some(csv_path.clone())).write(&rows).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Date,Playlist,Task,Score,Sensitivity"));
        assert_eq!(lines.count(), 2);
        assert!(csv.contains(",warmup,gridshot,96,0.5"));

        let json_path = ctx.temp_dir.path().join("scores.json");
        Exporter::new(ExportFormat::Json, Some(json_path.clone())).write(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }
}
