use apexlog_types::DebugLevel;
use regex::Regex;
use std::sync::LazyLock;

/// Debug settings header, e.g.
/// `64.0 APEX_CODE,FINEST;APEX_PROFILING,INFO;CALLOUT,INFO;DB,INFO`
static SETTINGS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\.\d+\sAPEX_CODE,\w+;APEX_PROFILING,.+$").unwrap());

/// Whether `line` is the debug settings header.
pub fn is_settings_line(line: &str) -> bool {
    SETTINGS_REGEX.is_match(line)
}

/// Parse the `category,level` pairs from the log's settings line.
/// Returns an empty list when the log has none.
pub fn parse_debug_levels(text: &str) -> Vec<DebugLevel> {
    let Some(found) = SETTINGS_REGEX.find(text) else {
        return Vec::new();
    };
    let settings = found.as_str().trim_end();
    let Some((_, levels)) = settings.split_once(' ') else {
        return Vec::new();
    };

    levels
        .split(';')
        .filter_map(|entry| {
            let (category, level) = entry.split_once(',')?;
            Some(DebugLevel {
                category: category.trim().to_string(),
                level: level.trim().to_string(),
            })
        })
        .collect()
}
