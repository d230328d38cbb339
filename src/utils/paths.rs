use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".crop_advisor";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.crop_advisor`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("CROP_ADVISOR_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the configuration file below `base`.
pub fn config_dir_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

/// Path of the configuration file below `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}
