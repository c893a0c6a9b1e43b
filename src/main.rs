use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use octocat::controllers::{awesome::AwesomeController, solo::SoloController};
use octocat::domain::awesome::{scheduler, AwesomeService};
use octocat::domain::backup::BackupService;
use octocat::domain::blog::BlogRegistry;
use octocat::infrastructure::config::{Config, LogFormat};
use octocat::infrastructure::github::{GitHubApi, GitHubClient};
use octocat::infrastructure::http::{create_router, start_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        awesome_enabled = config.awesome_enabled(),
        "Starting Octocat on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);
    let shutdown = CancellationToken::new();

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Shared state and GitHub client
    let registry = Arc::new(BlogRegistry::new());
    let github: Arc<dyn GitHubApi> = Arc::new(GitHubClient::new(config.github_api_url.clone()));

    // 2. Services
    tracing::info!("Instantiating services...");
    let backup_service = Arc::new(BackupService::new(github.clone()));
    let awesome_service = config.org_access_token.clone().map(|token| {
        Arc::new(AwesomeService::new(
            github.clone(),
            registry.clone(),
            token,
            config.showcase_repo.clone(),
            config.awesome_title_max_chars,
            config.awesome_period(),
        ))
    });

    // 3. Background awesome list refresh
    let scheduler_handle = match &awesome_service {
        Some(service) => {
            tracing::info!(showcase = %config.showcase_repo, "Awesome list refresh enabled");
            Some(tokio::spawn(scheduler::run(service.clone(), shutdown.clone())))
        }
        None => {
            tracing::warn!("ORG_ACCESS_TOKEN not set, awesome list refresh disabled");
            None
        }
    };

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let solo_controller = Arc::new(SoloController::new(backup_service, registry.clone()));
    let awesome_controller = Arc::new(AwesomeController::new(awesome_service));

    let app = create_router(&config, solo_controller, awesome_controller);

    // Stop on Ctrl-C
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        tracing::info!("Shutdown signal received");
        signal_token.cancel();
    });

    let result = start_http_server(config, app, shutdown.clone()).await;
    shutdown.cancel();

    if let Some(handle) = scheduler_handle {
        let _ = handle.await;
    }

    tracing::info!(registered_blogs = registry.len(), "Octocat stopped");
    result
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "octocat=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "octocat=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
