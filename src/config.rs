use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthMate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fuzzy score (0-100) a catalog entry must reach to count as a symptom match.
pub const MATCH_THRESHOLD: u8 = 60;

/// Maximum number of doctors returned by a referral lookup.
pub const MAX_DOCTORS: usize = 4;

/// Session identifier used when a caller does not supply one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Sessions idle longer than this are eligible for eviction.
pub const IDLE_TIMEOUT_SECS: u64 = 1800;

/// Catalog file names inside the catalog directory.
pub const CONDITIONS_FILE: &str = "conditions.json";
pub const DOCTORS_FILE: &str = "doctors.json";
pub const SPECIALIZATIONS_FILE: &str = "condition_specializations.json";

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/HealthMate/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("HealthMate")
}

/// Get the catalog directory holding the three reference tables.
pub fn catalog_dir() -> PathBuf {
    app_data_dir().join("catalog")
}
