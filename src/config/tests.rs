use config::FileFormat;

use super::*;

fn raw_from_toml(source: &str) -> Result<RawSettings, config::ConfigError> {
    Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .build()?
        .try_deserialize()
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.to_string(), "127.0.0.1:3000");
    assert_eq!(settings.server.graceful_shutdown, Duration::from_secs(30));
    assert_eq!(settings.database.url, None);
    assert_eq!(settings.database.max_connections.get(), 8);
    assert_eq!(settings.session.user_header, DEFAULT_SESSION_USER_HEADER);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cache_defaults_match_endpoint_windows() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(
        settings.cache,
        CacheSettings {
            stats_max_age_seconds: 300,
            stats_stale_while_revalidate_seconds: 600,
            listing_max_age_seconds: 60,
            listing_stale_while_revalidate_seconds: 300,
            private_max_age_seconds: 0,
        }
    );
}

#[test]
fn unconfigured_cache_resolves_to_selector_defaults() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(
        EndpointPolicies::from(&settings.cache),
        EndpointPolicies::default()
    );
}

#[test]
fn cache_windows_can_be_overridden_via_cli() {
    let mut raw = RawSettings::default();
    raw.cache.stats_max_age_seconds = Some(120);

    let overrides = ServeOverrides {
        cache: CacheOverrides {
            stats_max_age_seconds: Some(30),
            listing_stale_while_revalidate_seconds: Some(0),
            ..Default::default()
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.cache.stats_max_age_seconds, 30);
    assert_eq!(settings.cache.listing_stale_while_revalidate_seconds, 0);
    assert_eq!(settings.cache.listing_max_age_seconds, 60);
}

#[test]
fn negative_cache_window_is_rejected() {
    let result = raw_from_toml("[cache]\nstats_max_age_seconds = -5\n");
    assert!(result.is_err());
}

#[test]
fn cache_section_is_read_from_file() {
    let raw = raw_from_toml("[cache]\nlisting_max_age_seconds = 15\n").expect("valid toml");
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.cache.listing_max_age_seconds, 15);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero port");
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn zero_pool_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero pool");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "database.max_connections",
            ..
        }
    ));
}

#[test]
fn blank_database_url_is_treated_as_missing() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.database.url, None);
}

#[test]
fn invalid_session_header_is_rejected() {
    let mut raw = RawSettings::default();
    raw.session.user_header = Some("bad header".to_string());
    let err = Settings::from_raw(raw).expect_err("invalid header");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "session.user_header",
            ..
        }
    ));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["creatuno"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_arguments() {
    let args = CliArgs::parse_from([
        "creatuno",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--database-url",
        "postgres://override",
        "--cache-private-max-age-seconds",
        "5",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(
                serve.overrides.database_url.as_deref(),
                Some("postgres://override")
            );
            assert_eq!(serve.overrides.cache.private_max_age_seconds, Some(5));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_migrate_arguments() {
    let args = CliArgs::parse_from(["creatuno", "migrate", "--database-url", "postgres://example"]);

    match args.command.expect("migrate command") {
        Command::Migrate(migrate) => {
            assert_eq!(
                migrate.database.database_url.as_deref(),
                Some("postgres://example")
            );
        }
        _ => panic!("wrong command parsed"),
    }
}
