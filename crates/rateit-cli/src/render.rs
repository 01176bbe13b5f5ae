// Human-readable views of an AppSnapshot

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use rateit_core::{AppSnapshot, WatchedSummary};
use rateit_models::RequestState;

pub const LOADING: &str = "Loading...";

fn table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn runtime(minutes: Option<u32>) -> String {
    minutes.map(|m| format!("{} min", m)).unwrap_or_else(|| "N/A".to_string())
}

pub fn imdb_rating(rating: Option<f64>) -> String {
    rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "N/A".to_string())
}

fn failure_line(message: &str) -> String {
    format!("{} {}", "⛔".red(), message)
}

/// The result list, with a mark on movies already in the watched list.
pub fn search_view(snapshot: &AppSnapshot) -> String {
    match &snapshot.search {
        RequestState::Idle => String::new(),
        RequestState::Loading => LOADING.to_string(),
        RequestState::Failure(failure) => failure_line(&failure.message),
        RequestState::Success(results) => {
            let mut table = table();
            table.set_header(vec![
                header("#"),
                header("Title"),
                header("Year"),
                header("Id"),
                header("Watched"),
            ]);
            for (index, result) in results.iter().enumerate() {
                let watched = snapshot.watched.iter().any(|w| w.id == result.id);
                table.add_row(vec![
                    Cell::new(index + 1),
                    Cell::new(&result.title),
                    Cell::new(&result.year),
                    Cell::new(&result.id),
                    Cell::new(if watched { "✓".green().to_string() } else { String::new() }),
                ]);
            }
            let count = match snapshot.total_results {
                Some(total) if total as usize > snapshot.result_count => {
                    format!("Showing {} of {} results", snapshot.result_count, total)
                }
                _ => format!("Found {} result(s)", snapshot.result_count),
            };
            format!("{} for \"{}\"\n{}", count, snapshot.query, table)
        }
    }
}

pub fn detail_view(snapshot: &AppSnapshot) -> String {
    match &snapshot.detail {
        RequestState::Idle => String::new(),
        RequestState::Loading => LOADING.to_string(),
        RequestState::Failure(failure) => failure_line(&failure.message),
        RequestState::Success(movie) => {
            let mut table = table();
            table.set_header(vec![header(&movie.title), Cell::new(or_na(&movie.year))]);
            table.add_row(vec![Cell::new("Genre"), Cell::new(or_na(&movie.genre))]);
            table.add_row(vec![Cell::new("Released"), Cell::new(or_na(&movie.released))]);
            table.add_row(vec![Cell::new("Runtime"), Cell::new(runtime(movie.runtime_minutes))]);
            table.add_row(vec![Cell::new("IMDb rating"), Cell::new(format!("⭐ {}", imdb_rating(movie.imdb_rating)))]);
            table.add_row(vec![Cell::new("Director"), Cell::new(or_na(&movie.director))]);
            table.add_row(vec![Cell::new("Starring"), Cell::new(or_na(&movie.actors))]);
            table.add_row(vec![Cell::new("Plot"), Cell::new(or_na(&movie.plot))]);

            let footer = match snapshot.selected_user_rating {
                Some(rating) => format!("You rated this movie {} ⭐", rating),
                None => "Rate it with :rate <1-10> to add it to your watched list".dimmed().to_string(),
            };
            format!("{}\n{}", table, footer)
        }
    }
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "#️⃣ {} movies   ⭐️ {:.2}   🌟 {:.2}   ⏳ {:.0} min",
        summary.count, summary.avg_imdb_rating, summary.avg_user_rating, summary.avg_runtime_minutes
    )
}

pub fn watched_view(snapshot: &AppSnapshot) -> String {
    let summary = summary_line(&snapshot.summary);
    if snapshot.watched.is_empty() {
        return format!("{}\n{}", summary, "No watched movies yet".dimmed());
    }

    let mut table = table();
    table.set_header(vec![
        header("Title"),
        header("Id"),
        header("IMDb"),
        header("Yours"),
        header("Runtime"),
    ]);
    for entry in &snapshot.watched {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.id),
            Cell::new(imdb_rating(entry.imdb_rating)),
            Cell::new(entry.user_rating),
            Cell::new(runtime(entry.runtime_minutes)),
        ]);
    }
    format!("{}\n{}", summary, table)
}
