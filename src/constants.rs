//! Application constants and configuration

pub const APP_NAME: &str = "Prompt Sync";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Persisted model file holding the full sync source list
pub const SOURCES_FILE: &str = "sources.json";

/// Directory of per-source cache files, one `<id>.json` per source
pub const CACHE_MODEL_DIR: &str = "cache_model";

/// Merged command index rebuilt after every sync
pub const CACHE_INDEX_FILE: &str = "cache_model.json";

/// Tag stamped onto every cached entry produced by a sync
pub const USER_SYNC_TAG: &str = "user-sync";

pub const DEFAULT_PAGE_SIZE: usize = 8;
