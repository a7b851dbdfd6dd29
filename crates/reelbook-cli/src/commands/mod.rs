use crate::output::Output;
use clap::Args;
use color_eyre::Result;
use movie_sync_client::HttpBackend;
use movie_sync_config::{Config, PathManager};
use movie_sync_core::ViewController;
use movie_sync_models::{DraftField, FormDraft};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

pub mod add;
pub mod browse;
pub mod config;
pub mod delete;
pub mod edit;
pub mod form;
pub mod list;
pub mod prompts;
pub mod render;
pub mod show;
pub mod ui;
pub mod update;

/// Loaded configuration plus the paths it came from
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let paths = path_manager(config_dir);
        let config = load_config(&paths)?;
        Ok(Self { paths, config })
    }

    /// A fresh controller talking to the configured backend
    pub fn controller(&self) -> Result<ViewController> {
        let backend = HttpBackend::from_config(&self.config.backend)?;
        tracing::debug!(base_url = %backend.base_url(), "Using HTTP backend");
        Ok(ViewController::new(Arc::new(backend), &self.config.ui))
    }
}

pub fn path_manager(config_dir: Option<&Path>) -> PathManager {
    config_dir.map(PathManager::with_base).unwrap_or_default()
}

/// Config file (or defaults) with `REELBOOK_API_URL` applied, validated
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Form fields given on the command line
#[derive(Args, Debug, Clone, Default)]
pub struct DraftArgs {
    /// Movie name
    #[arg(long)]
    pub name: Option<String>,

    /// Actors, comma separated
    #[arg(long)]
    pub actors: Option<String>,

    /// Director name
    #[arg(long)]
    pub director: Option<String>,

    /// Budget in crores
    #[arg(long, allow_hyphen_values = true)]
    pub budget: Option<String>,

    /// Genre (Action, Comedy, Drama, Horror, Sci-Fi, Fantasy)
    #[arg(long)]
    pub genre: Option<String>,
}

impl DraftArgs {
    pub fn value(&self, field: DraftField) -> Option<&str> {
        match field {
            DraftField::MovieName => self.name.as_deref(),
            DraftField::Actors => self.actors.as_deref(),
            DraftField::Director => self.director.as_deref(),
            DraftField::Budget => self.budget.as_deref(),
            DraftField::Genre => self.genre.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        DraftField::ALL.iter().all(|f| self.value(*f).is_none())
    }

    /// Overwrite the draft with every field given on the command line
    pub fn apply(&self, draft: &mut FormDraft) {
        for field in DraftField::ALL {
            if let Some(value) = self.value(field) {
                draft.set(field, value);
            }
        }
    }
}

/// Whether prompts and spinners can be shown
pub fn interactive(output: &Output) -> bool {
    output.is_human() && !output.is_quiet() && ui::is_interactive()
}

/// Render the home screen: the filtered list, or the empty state
pub async fn render_home(controller: &ViewController, output: &Output) {
    let snapshot = controller.store().snapshot().await;
    let visible = snapshot.visible_movies();

    output.json(&json!({
        "filter": snapshot.filter,
        "total": snapshot.movies.len(),
        "count": visible.len(),
        "movies": visible,
    }));

    if snapshot.movies.is_empty() {
        output.info("No movies listed yet.");
        return;
    }
    if visible.is_empty() {
        output.info("No movies match the current filter.");
        return;
    }

    output.block(render::movies_table(&visible));
    let mut summary = format!("Showing {} of {} movies", visible.len(), snapshot.movies.len());
    if let Some(filter) = render::filter_summary(&snapshot.filter) {
        summary.push_str(&format!(" ({})", filter));
    }
    output.info(summary);
}

/// Print the alert currently in the slot, if any
pub async fn show_alert(controller: &ViewController, output: &Output) {
    if let Some(alert) = controller.alerts().current().await {
        output.alert(&alert);
    }
}
