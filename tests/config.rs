#[cfg(test)]
mod tests {
    use aimtrack::libs::config::{Config, ScoringConfig, StoreBackend, StoreConfig, ENV_API_URL, ENV_AUTH_TOKEN};
    use aimtrack::libs::scoring::DEFAULT_THRESHOLD_RATIO;
    use parking_lot::{Mutex, MutexGuard};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests in this file share process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct ConfigTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
        api_url: String,
        auth_token: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            std::env::remove_var(ENV_API_URL);
            std::env::remove_var(ENV_AUTH_TOKEN);
            ConfigTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
                api_url: "https://scores.example.com/api".to_string(),
                auth_token: "token123".to_string(),
            }
        }

        fn teardown(self) {
            std::env::remove_var(ENV_API_URL);
            std::env::remove_var(ENV_AUTH_TOKEN);
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store_config().backend, StoreBackend::Local);
        assert_eq!(config.aggregator(None).unwrap().threshold_ratio(), DEFAULT_THRESHOLD_RATIO);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            store: Some(StoreConfig {
                backend: StoreBackend::Remote,
                api_url: ctx.api_url.clone(),
                auth_token: ctx.auth_token.clone(),
                timeout_secs: 30,
            }),
            scoring: Some(ScoringConfig { threshold_ratio: 0.9 }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.aggregator(None).unwrap().threshold_ratio(), 0.9);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_store_section_uses_defaults(_ctx: &mut ConfigTestContext) {
        let path = aimtrack::libs::data_storage::DataStorage::new()
            .get_path(aimtrack::libs::config::CONFIG_FILE_NAME)
            .unwrap();
        std::fs::write(&path, r#"{"store": {"backend": "memory"}}"#).unwrap();

        let store = Config::read().unwrap().store_config();
        assert_eq!(store.backend, StoreBackend::Memory);
        assert_eq!(store.timeout_secs, 10);
        assert!(store.api_url.is_empty());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(_ctx: &mut ConfigTestContext) {
        assert!(!Config::delete().unwrap());
        Config::default().save().unwrap();
        assert!(Config::delete().unwrap());
        assert_eq!(Config::read().unwrap(), Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_env_overrides_remote_settings(ctx: &mut ConfigTestContext) {
        std::env::set_var(ENV_API_URL, &ctx.api_url);
        std::env::set_var(ENV_AUTH_TOKEN, &ctx.auth_token);

        let store = Config::default().store_config();
        assert_eq!(store.api_url, ctx.api_url);
        assert_eq!(store.auth_token, ctx.auth_token);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_ratio_override_and_validation(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert_eq!(config.aggregator(Some(0.8)).unwrap().threshold_ratio(), 0.8);
        assert!(config.aggregator(Some(1.5)).is_err());
        assert!(config.aggregator(Some(0.0)).is_err());
    }
}
