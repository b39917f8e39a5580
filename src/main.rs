use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::runtime::Handle;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use homeboard::application::{UiEvent, UiState, ViewManager};
use homeboard::domain::dom::Document;
use homeboard::domain::entities::ViewId;
use homeboard::domain::ports::{ControllerLoaderPort, TemplateLoaderPort, TemplateSource};
use homeboard::domain::view_registry::ViewRegistry;
use homeboard::infrastructure::{
    AppConfig, BuiltinControllers, CliArgs, FsTemplateSource, HttpTemplateSource, StateStore,
    StorageManager, TemplateLoader, TemplateSourceKind,
};
use homeboard::presentation::components::organisms::BottomNav;
use homeboard::presentation::components::{ComponentHandle, Props, init_components};
use homeboard::presentation::events::{ActionRegistry, NavigationDispatcher};

const SHELL: &str = r#"<div id="app" class="dashboard"><header id="status-bar"></header><main id="views-container"></main><footer id="bottom-nav"></footer><div id="modals-container"></div></div>"#;

fn init_logging(config: &AppConfig) -> Result<()> {
    let default_level = LevelFilter::from_level(config.log_level.to_tracing_level());
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, CliArgs)> {
    let args = CliArgs::parse();
    let storage = StorageManager::new().wrap_err("Failed to locate config directory")?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load configuration")?;
    config.merge_with_args(&args);
    Ok((config, args))
}

fn template_source(config: &AppConfig) -> Result<Arc<dyn TemplateSource>> {
    let templates = &config.templates;
    Ok(match templates.source {
        TemplateSourceKind::Fs => Arc::new(FsTemplateSource::new(templates.root.clone())),
        TemplateSourceKind::Http => Arc::new(HttpTemplateSource::new(
            templates.base_url.clone(),
            templates.cache_buster.clone(),
        )?),
    })
}

/// Keeps the bottom navigation highlight in sync with the current view.
fn track_active_view(ui_state: &UiState, nav: ComponentHandle) {
    let mut events = ui_state.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let UiEvent::ViewChanged { new, .. } = event {
                BottomNav::set_active_view(&nav, new.as_str());
            }
        }
    });
}

async fn initial_view(config: &AppConfig, state_store: &StateStore) -> ViewId {
    if let Some(view) = config.start_view {
        return view;
    }
    if config.restore_last_view {
        match state_store.load().await {
            Ok(state) => {
                if let Some(view) = state.last_view {
                    return view;
                }
            }
            Err(e) => warn!(error = %e, "Failed to load saved state"),
        }
    }
    ViewId::Home
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, args) = load_config()?;
    init_logging(&config)?;
    info!(version = homeboard::VERSION, "Starting {}", homeboard::NAME);
    if let Some(path) = config.effective_config_path() {
        info!(path = %path.display(), "Configuration loaded");
    }

    let document = Document::new();
    document.append_html(document.body(), SHELL);

    let components = init_components(document.clone());
    let registry = Arc::new(ViewRegistry::builtin());
    let loader = Arc::new(
        TemplateLoader::new(Arc::clone(&registry), document.clone(), template_source(&config)?)
            .with_paths(&config.templates.views_path, &config.templates.modals_path),
    );
    let controllers = Arc::new(BuiltinControllers::new(config.controllers.clone()));
    let ui_state = Arc::new(UiState::default());
    let views = Arc::new(
        ViewManager::new(
            registry,
            document.clone(),
            Arc::clone(&controllers) as Arc<dyn ControllerLoaderPort>,
            Arc::clone(&ui_state),
        )
        .with_template_loader(Arc::clone(&loader) as Arc<dyn TemplateLoaderPort>),
    );

    let actions = Arc::new(ActionRegistry::new());
    let navigation = NavigationDispatcher::new(&views, Handle::current());
    navigation.register_actions(&actions);
    actions.install(&document);
    navigation.install(&document);

    let _status_bar = components
        .mount("StatusBar", Props::new(), "#status-bar")
        .wrap_err("Failed to mount status bar")?;
    let bottom_nav = components
        .mount("BottomNav", Props::new(), "#bottom-nav")
        .wrap_err("Failed to mount bottom navigation")?;
    track_active_view(&ui_state, bottom_nav);

    if config.templates.preload {
        let background = loader
            .preload_essential_views(config.templates.preload_delay())
            .await
            .wrap_err("Failed to preload essential views")?;
        loader.preload_modals().await;
        if let Err(e) = background.await {
            warn!(error = %e, "Background preload task failed");
        }
    }

    let state_store = StateStore::new();
    let start = initial_view(&config, &state_store).await;
    views
        .show_view(start.as_str())
        .await
        .wrap_err_with(|| format!("Failed to show start view {start}"))?;

    for view in &args.show {
        if let Err(e) = views.show_view(view).await {
            warn!(view = %view, error = %e, "Failed to show requested view");
        }
    }

    if let Some(last) = views.current_view()
        && let Err(e) = state_store.save(Some(last)).await
    {
        warn!(error = %e, "Failed to save state");
    }

    if args.print_html {
        println!("{}", document.outer_html(document.root()));
    }

    controllers.stop_all();
    info!("Shutting down");
    Ok(())
}
