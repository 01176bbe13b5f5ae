use super::config::load_config;
use super::progress::RequestSpinner;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use rateit_models::FailureKind;

pub async fn run_show(id: String, output: &Output) -> Result<()> {
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err(color_eyre::eyre::eyre!("Movie id cannot be empty"));
    }

    let config = load_config(output)?;
    let mut app = super::build_app(&config);

    app.toggle_select(&id);
    let spinner = RequestSpinner::start(format!("Loading {}...", id), output);
    app.settle().await;
    spinner.finish();

    let snapshot = app.snapshot();
    if !output.is_human() {
        output.json(&serde_json::to_value(&snapshot)?);
    } else {
        output.block(render::detail_view(&snapshot));
    }

    match snapshot.detail.failure() {
        Some(failure) if failure.kind == FailureKind::Transport => {
            Err(color_eyre::eyre::eyre!("Failed to load {}: {}", id, failure.message))
        }
        _ => Ok(()),
    }
}
