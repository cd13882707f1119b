//! INI parsing: maps `config.ini` keys onto [`ConfigFile`] fields.

use ini::Ini;

use super::file::{ConfigFile, ConfigFileError};

/// Parse an `Ini` into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [endpoint] section
    if let Some(section) = ini.section(Some("endpoint")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !v.is_empty() {
                // Checked when a summon is sent, not here
                config.endpoint.url = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout_secs") {
            let v = v.trim();
            config.endpoint.timeout_secs = if v.is_empty() {
                None
            } else {
                match v.parse::<u64>() {
                    Ok(secs) if secs > 0 => Some(secs),
                    _ => {
                        return Err(invalid(
                            "endpoint",
                            "timeout_secs",
                            v,
                            "must be a positive integer (seconds) or empty",
                        ))
                    }
                }
            };
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        if let Some(v) = section.get("follow_on_start") {
            config.map.follow_on_start = parse_bool(v)
                .ok_or_else(|| invalid("map", "follow_on_start", v, "must be true or false"))?;
        }
    }

    // [session] section
    if let Some(section) = ini.section(Some("session")) {
        if let Some(v) = section.get("event_channel_capacity") {
            config.session.event_channel_capacity = match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(invalid(
                        "session",
                        "event_channel_capacity",
                        v,
                        "must be a positive integer",
                    ))
                }
            };
        }
    }

    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
