//! Serialization of [`ConfigFile`] to a commented INI string.

use super::file::ConfigFile;

/// Convert a `ConfigFile` to the INI text written to `config.ini`.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let timeout_secs = config
        .endpoint
        .timeout_secs
        .map(|secs| secs.to_string())
        .unwrap_or_default();

    format!(
        r#"[endpoint]
; Vehicle address summon requests are POSTed to
url = {}
; Request timeout in seconds (leave empty for no timeout)
timeout_secs = {}

[map]
; Keep the map centered on the device from the start
follow_on_start = {}

[session]
; Maximum number of queued session events
event_channel_capacity = {}
"#,
        config.endpoint.url,
        timeout_secs,
        config.map.follow_on_start,
        config.session.event_channel_capacity,
    )
}
