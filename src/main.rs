use std::{future::IntoFuture, process, sync::Arc};

use creatuno::{
    application::{
        error::AppError,
        escrow::EscrowService,
        inbox::InboxService,
        opportunities::OpportunityService,
        push::PushService,
        repos::{
            EscrowRepo, HealthRepo, MessagesRepo, NotificationsRepo, OpportunitiesRepo,
            PushSubscriptionsRepo, StatsRepo,
        },
        stats::StatsService,
    },
    cache::EndpointPolicies,
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        telemetry,
    },
};
use sqlx::postgres::PgPool;
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect_pool(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    let repositories = Arc::new(PostgresRepositories::new(pool));
    let state = build_api_state(repositories, &settings);

    serve_http(&settings, state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect_pool(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(target = "creatuno::migrate", "migrations applied");
    Ok(())
}

async fn connect_pool(settings: &config::Settings) -> Result<PgPool, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))
}

fn build_api_state(repositories: Arc<PostgresRepositories>, settings: &config::Settings) -> ApiState {
    let stats_repo: Arc<dyn StatsRepo> = repositories.clone();
    let opportunities_repo: Arc<dyn OpportunitiesRepo> = repositories.clone();
    let notifications_repo: Arc<dyn NotificationsRepo> = repositories.clone();
    let messages_repo: Arc<dyn MessagesRepo> = repositories.clone();
    let escrow_repo: Arc<dyn EscrowRepo> = repositories.clone();
    let push_repo: Arc<dyn PushSubscriptionsRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories;

    ApiState {
        stats: Arc::new(StatsService::new(stats_repo)),
        opportunities: Arc::new(OpportunityService::new(opportunities_repo)),
        inbox: Arc::new(InboxService::new(notifications_repo, messages_repo)),
        escrow: Arc::new(EscrowService::new(escrow_repo)),
        push: Arc::new(PushService::new(push_repo)),
        health: health_repo,
        policies: EndpointPolicies::from(&settings.cache),
        session_header: settings.session.user_header.clone(),
    }
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "creatuno::serve",
        addr = %settings.server.addr,
        "listening"
    );

    let grace = settings.server.graceful_shutdown;
    let draining = Arc::new(Notify::new());

    let server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown({
        let draining = draining.clone();
        async move {
            shutdown_signal().await;
            info!(target = "creatuno::serve", "shutdown requested, draining connections");
            draining.notify_one();
        }
    });

    // In-flight requests get `grace` to finish once shutdown starts.
    let deadline = async move {
        draining.notified().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|err| AppError::unexpected(format!("server error: {err}")))?;
        }
        () = deadline => {
            warn!(
                target = "creatuno::serve",
                grace_seconds = grace.as_secs(),
                "graceful shutdown timed out"
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(target = "creatuno::serve", error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(target = "creatuno::serve", error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
