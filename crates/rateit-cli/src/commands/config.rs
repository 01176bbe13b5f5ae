use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use rateit_config::{Config, CredentialStore, PathManager, API_KEY_ENV, PLACEHOLDER_API_KEY};
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match cmd {
        ConfigCommands::Show { full } => show_config(&path_manager, full, output),
        ConfigCommands::Init { force } => init_config(&path_manager, force, output),
        ConfigCommands::SetKey { key } => set_api_key(&path_manager, key, output),
    }
}

/// Load the config file (defaults when missing), resolve the API key from
/// env/credentials and validate the result.
pub fn load_config(output: &Output) -> Result<Config> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials = load_credentials(&path_manager)?;
    config.apply_api_key_overrides(&credentials);

    if let Err(e) = config.validate() {
        if !config.catalog.has_api_key() {
            output.info(format!(
                "Get a free key at https://www.omdbapi.com/apikey.aspx, then run 'rateit config set-key' or export {}.",
                API_KEY_ENV
            ));
        }
        return Err(color_eyre::eyre::eyre!("Invalid configuration: {}", e));
    }

    tracing::debug!(
        config_file = %config_file.display(),
        base_url = %config.catalog.base_url,
        min_query_len = config.search.min_query_len,
        "Configuration loaded"
    );
    Ok(config)
}

fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(credentials)
}

/// Where the effective API key comes from.
fn api_key_source(config: &Config, credentials: &CredentialStore) -> &'static str {
    if std::env::var(API_KEY_ENV).map(|k| !k.trim().is_empty()).unwrap_or(false) {
        "environment"
    } else if credentials.get_omdb_api_key().is_some() {
        "credentials file"
    } else if config.catalog.has_api_key() {
        "config file"
    } else {
        "not set"
    }
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let credentials = load_credentials(path_manager)?;
    let source = api_key_source(&config, &credentials);
    config.apply_api_key_overrides(&credentials);

    let api_key = if full { config.catalog.api_key.clone() } else { mask_string(&config.catalog.api_key) };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "log_dir": path_manager.log_dir().display().to_string(),
            "default_log_file": path_manager.default_log_file().display().to_string(),
            "catalog": {
                "base_url": config.catalog.base_url,
                "api_key": api_key,
                "api_key_source": source,
                "timeout_secs": config.catalog.timeout_secs,
            },
            "search": {
                "min_query_len": config.search.min_query_len,
                "debounce_ms": config.search.debounce_ms,
            },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at {}, showing defaults. Run 'rateit config init' to create it.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    table.add_row(vec![Cell::new("Catalog URL"), Cell::new(&config.catalog.base_url)]);
    table.add_row(vec![Cell::new("API key"), Cell::new(format!("{} ({})", api_key, source))]);
    table.add_row(vec![Cell::new("Timeout"), Cell::new(format!("{}s", config.catalog.timeout_secs))]);
    table.add_row(vec![Cell::new("Min query length"), Cell::new(config.search.min_query_len)]);
    table.add_row(vec![Cell::new("Debounce"), Cell::new(format!("{}ms", config.search.debounce_ms))]);
    table.add_row(vec![
        Cell::new("Suggested log file"),
        Cell::new(format!("--log-file {}", path_manager.default_log_file().display())),
    ]);
    output.block(table.to_string());

    match config.validate() {
        Ok(()) => output.success("Configuration is valid"),
        Err(e) => output.warn(format!("Configuration is incomplete: {}", e)),
    }
    Ok(())
}

fn init_config(path_manager: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        let overwrite = output.is_human()
            && prompts::is_interactive()
            && prompts::prompt_yes_no(&format!("{} already exists. Overwrite it with defaults?", config_file.display()), Some(false))?;
        if !overwrite {
            output.warn(format!("Keeping existing configuration at {} (use --force to overwrite)", config_file.display()));
            return Ok(());
        }
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    tracing::info!(config_file = %config_file.display(), "Wrote default configuration");
    output.success(format!("Configuration written to {}", config_file.display()));
    output.info("Next: store your catalog API key with 'rateit config set-key'.");
    Ok(())
}

fn set_api_key(path_manager: &PathManager, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_password("OMDb API key")?,
    };
    let key = key.trim().to_string();
    if let Err(msg) = validate_api_key(&key) {
        output.error(msg);
        return Err(color_eyre::eyre::eyre!("{}", msg));
    }

    let mut credentials = load_credentials(path_manager)?;
    credentials.set_omdb_api_key(key);
    credentials.save().map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to save credentials to {}: {}",
            path_manager.credentials_file().display(),
            e
        )
    })?;

    output.success(format!("API key stored in {}", path_manager.credentials_file().display()));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }
    Ok(())
}

fn validate_api_key(key: &str) -> std::result::Result<(), &'static str> {
    if key.is_empty() {
        return Err("API key cannot be empty");
    }
    if key == PLACEHOLDER_API_KEY {
        return Err("API key is still the placeholder value");
    }
    if key.chars().any(char::is_whitespace) {
        return Err("API key cannot contain whitespace");
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() || s == PLACEHOLDER_API_KEY {
        return "<not set>".dimmed().to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("abcd"), "****");
        assert_eq!(mask_string("abcdef12"), "ab***12");
        assert!(mask_string("").contains("<not set>"));
        assert!(mask_string(PLACEHOLDER_API_KEY).contains("<not set>"));
    }

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("f84fc31d").is_ok());
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key(PLACEHOLDER_API_KEY).is_err());
        assert!(validate_api_key("f84 fc31d").is_err());
    }
}
