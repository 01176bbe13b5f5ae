use super::config::load_config;
use super::progress::RequestSpinner;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use rateit_models::FailureKind;

pub async fn run_search(title: String, output: &Output) -> Result<()> {
    let config = load_config(output)?;
    let mut app = super::build_app(&config);

    app.on_query_change(title.as_str());
    if !app.has_pending() {
        output.warn(format!(
            "\"{}\" is too short, searches need at least {} characters",
            title.trim(),
            config.search.min_query_len
        ));
        return Ok(());
    }

    let spinner = RequestSpinner::start(format!("Searching for \"{}\"...", title), output);
    app.settle().await;
    spinner.finish();

    let snapshot = app.snapshot();
    if !output.is_human() {
        output.json(&serde_json::to_value(&snapshot)?);
    } else {
        output.block(render::search_view(&snapshot));
    }

    match snapshot.search.failure() {
        Some(failure) if failure.kind == FailureKind::Transport => {
            Err(color_eyre::eyre::eyre!("Search failed: {}", failure.message))
        }
        _ => Ok(()),
    }
}
