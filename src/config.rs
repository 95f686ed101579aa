use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://api.papermc.io/v2";
pub const DEFAULT_BACKUP_NAME: &str = "paper.backup.jar";

/// Runtime configuration, threaded into each view and workflow at
/// construction. Nothing in the crate reads process-wide state.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Release API root, without a trailing slash.
    pub base_url: String,
    /// Project slug in API paths ("paper").
    pub project: String,
    /// Where the server jar lands.
    pub artifact_path: PathBuf,
    /// Directory holding the operation log and install marker.
    pub logs_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project: "paper".to_string(),
            artifact_path: PathBuf::from("paper.jar"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}
