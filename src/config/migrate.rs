use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

/// Migration that adds the `show_coordinates` parameter to the YAML config,
/// if missing, and marks the migration as applied in the `log` table.
pub fn migrate_add_show_coordinates(conn: &Connection) -> Result<(), Error> {
    let version = "20250601_0009_add_show_coordinates";

    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file).map_err(|e| {
            Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(format!("Failed to read config {:?}: {}", conf_file, e)),
            )
        })?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            let key = Value::String("show_coordinates".to_string());

            if !map.contains_key(&key) {
                map.insert(key.clone(), Value::String("None".to_string()));

                // Serialize updated YAML
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to serialize updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                // Inject documentation comment right after the new line
                let mut new_content = String::new();

                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("show_coordinates:") {
                        new_content.push_str(
                            "  # show-coordinates parameter options:\n\
                             #   None → hide lat/lon in listings\n\
                             #   Full → show lat/lon next to the location name\n",
                        );
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    Error::SqliteFailure(
                        rusqlite::ffi::Error::new(1),
                        Some(format!(
                            "Failed to write updated config {:?}: {}",
                            conf_file, e
                        )),
                    )
                })?;

                success(format!(
                    "Migration applied: {} — added show_coordinates parameter to config.",
                    version
                ));
            }
        }
    }

    // Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added show_coordinates to config')",
        [version],
    )?;

    Ok(())
}

/// Check the config file for missing keys; returns the list of absent ones.
pub fn missing_config_keys() -> std::io::Result<Vec<String>> {
    let expected = [
        "database",
        "default_category",
        "default_cadence",
        "default_membership",
        "separator_char",
        "show_coordinates",
    ];

    let conf_file = super::Config::config_file();
    if !conf_file.exists() {
        return Ok(expected.iter().map(|s| s.to_string()).collect());
    }

    let content = fs::read_to_string(&conf_file)?;

    let mut missing = Vec::new();
    if let Ok(yaml) = serde_yaml::from_str::<Value>(&content)
        && let Some(map) = yaml.as_mapping()
    {
        for key in expected {
            if !map.contains_key(Value::String(key.to_string())) {
                missing.push(key.to_string());
            }
        }
    }

    Ok(missing)
}
