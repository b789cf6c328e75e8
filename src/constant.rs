use std::time::Duration;

// Window size constants
pub const DEFAULT_WINDOW_WIDTH: f32 = 900.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;
pub const DEFAULT_WINDOW_TITLE: &str = "Watcher – Desktop Client";
pub const HISTORY_WINDOW_SIZE: [f32; 2] = [600.0, 400.0];
pub const DETAIL_WINDOW_SIZE: [f32; 2] = [900.0, 600.0];

/// Application name, also the confy config name
pub const APP_NAME: &str = "watcher-client";

/// Backend defaults
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const BACKEND_URL_ENV: &str = "WATCHER_BACKEND_URL";
pub const FALLBACK_INSTANCE_NAME: &str = "watcher-device";
pub const CHANGES_PAGE_LIMIT: usize = 50;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const ASSET_TIMEOUT: Duration = Duration::from_secs(45);

/// Monitor form defaults
pub const DEFAULT_FREQUENCY_SECONDS: i64 = 300;

/// Diff engine tuning
pub const CONTEXT_TOKENS: usize = 5;
pub const DIFF_EDIT_COST: usize = 4;
pub const DIFF_TIMEOUT: Duration = Duration::from_secs(1);
pub const BIG_DELIMITER: &str = "\n\n…\n\n";
pub const SMALL_DELIMITER: &str = " → ";
pub const NO_DIFF_PLACEHOLDER: &str = "No diff available";
