//! Config command implementations

use std::path::Path;

use anyhow::{Context, Result};

use tb_core::config::{save_config, Settings};

use crate::output::{mask_secret, print_error, print_info, print_success, print_warning};

/// Key whose value is never echoed back
const SECRET_KEY: &str = "desktop.password";

fn settings_table(settings: &Settings) -> Result<toml::Table> {
    let text = toml::to_string(settings)?;
    Ok(toml::from_str(&text)?)
}

/// Get a config value by dotted key (e.g. `orchestrator.base_url`)
pub fn config_get(path: &Path, key: &str) -> Result<()> {
    let settings = Settings::load_or_default(path)?;
    let table = settings_table(&settings)?;

    let mut current = &toml::Value::Table(table);
    for part in key.split('.') {
        match current.as_table().and_then(|t| t.get(part)) {
            Some(v) => current = v,
            None => anyhow::bail!("Unknown config key: {}", key),
        }
    }

    match current {
        toml::Value::String(s) if key == SECRET_KEY => println!("{}", mask_secret(s)),
        toml::Value::String(s) => println!("{}", s),
        toml::Value::Table(_) => println!("{}", toml::to_string_pretty(current)?),
        other => println!("{}", other),
    }

    Ok(())
}

/// Set a config value by dotted key
///
/// Every known key starts out with its typed value (from the file or the
/// defaults), so the new value is parsed as the field's type. The result is
/// validated against the settings schema before it is written, so unknown
/// keys and wrongly typed values are rejected.
pub fn config_set(path: &Path, key: &str, value: &str) -> Result<()> {
    let current_settings = Settings::load_or_default(path)
        .with_context(|| format!("Failed to load config file: {:?}", path))?;
    let mut table = settings_table(&current_settings)?;

    let parts: Vec<&str> = key.split('.').collect();
    let (last_key, parents) = parts
        .split_last()
        .ok_or_else(|| anyhow::anyhow!("Invalid key: key path cannot be empty"))?;

    let mut current = &mut table;
    for part in parents {
        current = current
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(|| anyhow::anyhow!("Cannot navigate to key: {}", key))?;
    }

    let existing = current.get(*last_key).cloned();
    let toml_value = parse_value(value, existing.as_ref());
    current.insert(last_key.to_string(), toml_value);

    let text = toml::to_string_pretty(&table)?;
    let settings: Settings = toml::from_str(&text)
        .with_context(|| format!("Invalid value for {}: {}", key, value))?;

    let round_trip = settings_table(&settings)?;
    if lookup(&round_trip, &parts).is_none() {
        anyhow::bail!("Unknown config key: {}", key);
    }

    save_config(path, &settings)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    if key == SECRET_KEY {
        print_success(&format!("Set {}", key));
    } else {
        print_success(&format!("Set {} = {}", key, value));
    }
    Ok(())
}

/// Show current configuration with secrets masked
pub fn config_show(path: &Path) -> Result<()> {
    if !path.exists() {
        print_warning(&format!("No configuration file found at {:?}", path));
        print_info("Showing defaults. Run 'takebridge config init' to create one");
    } else {
        print_info(&format!("Configuration file: {:?}", path));
    }
    println!();

    let mut settings = Settings::load_or_default(path)?;
    settings.desktop.password = mask_secret(&settings.desktop.password);
    println!("{}", toml::to_string_pretty(&settings)?);

    Ok(())
}

/// Write a default configuration file
pub fn config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        print_error(&format!("Config file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    save_config(path, &Settings::default())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    print_success(&format!("Created configuration file: {:?}", path));
    Ok(())
}

/// Interpret `value` using the type of the value it replaces, if any
fn parse_value(value: &str, existing: Option<&toml::Value>) -> toml::Value {
    match existing {
        Some(toml::Value::String(_)) => return toml::Value::String(value.to_string()),
        Some(toml::Value::Boolean(_)) => {
            if let Ok(b) = value.parse::<bool>() {
                return toml::Value::Boolean(b);
            }
        }
        Some(toml::Value::Integer(_)) => {
            if let Ok(i) = value.parse::<i64>() {
                return toml::Value::Integer(i);
            }
        }
        _ => {}
    }

    if let Ok(b) = value.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(value.to_string())
    }
}

fn lookup<'a>(table: &'a toml::Table, parts: &[&str]) -> Option<&'a toml::Value> {
    let (first, rest) = parts.split_first()?;
    let value = table.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        lookup(value.as_table()?, rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_core::config::load_config;

    #[test]
    fn test_set_string_and_bool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        config_set(&path, "desktop.url", "ws://h:6080/websockify").unwrap();
        config_set(&path, "desktop.show", "true").unwrap();
        config_set(&path, "orchestrator.user_id", "12345").unwrap();

        let settings: Settings = load_config(&path).unwrap();
        assert_eq!(settings.desktop.url, "ws://h:6080/websockify");
        assert!(settings.desktop.show);
        assert_eq!(settings.orchestrator.user_id, "12345");
    }

    #[test]
    fn test_set_numeric_password_in_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[desktop]\nurl = \"ws://h/p\"\n").unwrap();

        config_set(&path, "desktop.password", "1234").unwrap();
        config_set(&path, "orchestrator.user_id", "42").unwrap();

        let settings: Settings = load_config(&path).unwrap();
        assert_eq!(settings.desktop.password, "1234");
        assert_eq!(settings.desktop.url, "ws://h/p");
        assert_eq!(settings.orchestrator.user_id, "42");
    }

    #[test]
    fn test_set_unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(config_set(&path, "desktop.colour", "red").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_wrong_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(config_set(&path, "orchestrator.timeout", "soon").is_err());
    }

    #[test]
    fn test_get_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        assert!(config_get(&dir.path().join("config.toml"), "nope.nothing").is_err());
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        config_set(&path, "orchestrator.user_id", "alice").unwrap();
        config_init(&path, false).unwrap();
        let settings: Settings = load_config(&path).unwrap();
        assert_eq!(settings.orchestrator.user_id, "alice");

        config_init(&path, true).unwrap();
        let settings: Settings = load_config(&path).unwrap();
        assert_eq!(settings.orchestrator.user_id, "local-dev-user");
    }
}
