use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the Creatuno binary.
#[derive(Debug, Parser)]
#[command(name = "creatuno", version, about = "Creatuno API server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "CREATUNO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the Creatuno HTTP API.
    Serve(Box<ServeArgs>),
    /// Apply pending database migrations and exit.
    #[command(name = "migrate")]
    Migrate(MigrateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct DatabaseOverride {
    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseOverride,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CacheOverrides {
    /// Override `max-age` for platform statistics responses.
    #[arg(long = "cache-stats-max-age-seconds", value_name = "SECONDS")]
    pub stats_max_age_seconds: Option<u32>,

    /// Override `stale-while-revalidate` for platform statistics responses.
    #[arg(long = "cache-stats-swr-seconds", value_name = "SECONDS")]
    pub stats_stale_while_revalidate_seconds: Option<u32>,

    /// Override `max-age` for public listing responses.
    #[arg(long = "cache-listing-max-age-seconds", value_name = "SECONDS")]
    pub listing_max_age_seconds: Option<u32>,

    /// Override `stale-while-revalidate` for public listing responses.
    #[arg(long = "cache-listing-swr-seconds", value_name = "SECONDS")]
    pub listing_stale_while_revalidate_seconds: Option<u32>,

    /// Override `max-age` for user-scoped responses.
    #[arg(long = "cache-private-max-age-seconds", value_name = "SECONDS")]
    pub private_max_age_seconds: Option<u32>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub cache: CacheOverrides,

    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL")]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT")]
    pub database_max_connections: Option<u32>,

    /// Override the header carrying the authenticated user id.
    #[arg(long = "session-user-header", value_name = "HEADER")]
    pub session_user_header: Option<String>,
}
