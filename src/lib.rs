use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod binder;
pub mod dom;
pub mod forms;
pub mod handlers;
pub mod i18n;
pub mod index;
pub mod language;
pub mod models;
pub mod render;
pub mod schema;
pub mod sections;
pub mod selector;
pub mod service;
pub mod slider;
pub mod templates;

use api::{ContentClient, FsContentClient, HttpContentClient};
use i18n::I18n;
use models::AppConfig;
use service::SiteService;
use slider::HeroSlider;
use templates::TemplateStore;

pub struct AppState {
    pub config: AppConfig,
    pub templates: TemplateStore,
    pub service: SiteService<dyn ContentClient + Send + Sync>,
}

/// Reads content from `CONTENT_URL` when set, otherwise from `CONTENT_DIR`.
pub async fn build_app_state(config: AppConfig) -> Arc<AppState> {
    let client: Arc<dyn ContentClient + Send + Sync> = match &config.content_url {
        Some(url) => Arc::new(HttpContentClient::new(url.clone())),
        None => Arc::new(FsContentClient::new(config.content_dir.clone())),
    };
    build_app_state_with_client(config, client).await
}

pub async fn build_app_state_with_client(
    config: AppConfig,
    client: Arc<dyn ContentClient + Send + Sync>,
) -> Arc<AppState> {
    let i18n = I18n::new(&config.languages_dir);
    let slider = HeroSlider::new(config.slider_interval());
    let templates = TemplateStore::new(config.templates_dir.clone());
    let service = SiteService::new(client, i18n, slider);

    Arc::new(AppState {
        config,
        templates,
        service,
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);
    let content = ServeDir::new(&state.config.content_dir);

    Router::new()
        .route("/", get(handlers::get_index))
        .route("/contact", get(handlers::get_contact).post(handlers::post_contact))
        .route("/partner", get(handlers::get_partner).post(handlers::post_partner))
        .route("/hero/pointer-enter", post(handlers::hero_pointer_enter))
        .route("/hero/pointer-leave", post(handlers::hero_pointer_leave))
        .route("/{page}", get(handlers::get_page))
        .nest_service("/assets", assets)
        .nest_service("/content", content)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ejona_site=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match envy::from_env::<AppConfig>() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let port = config.port;
    let source = match &config.content_url {
        Some(url) => url.clone(),
        None => config.content_dir.display().to_string(),
    };

    let state = build_app_state(config).await;
    let app = build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Site running at http://{}", addr);
    tracing::info!("Content source: {}", source);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
