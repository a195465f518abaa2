use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const NOT_ON_DISK: &str = "(not on disk)";

/// Label/value pairs printed by the `version` command.
pub fn rows(data_dir: Option<&Path>, config_file: Option<&Path>) -> Vec<(&'static str, String)> {
    let shown = |path: Option<&Path>| {
        path.map(|path| path.display().to_string())
            .unwrap_or_else(|| NOT_ON_DISK.to_string())
    };
    vec![
        ("Version", VERSION.to_string()),
        ("Data directory", shown(data_dir)),
        ("Config file", shown(config_file)),
    ]
}
