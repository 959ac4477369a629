//! Persisted model store for the sync source list
//!
//! The full list lives in sources.json in the app data directory. Every
//! mutation rewrites the whole file. Writes go through a temp file and a
//! rename so an interrupted write never leaves a torn model behind.

use crate::constants::SOURCES_FILE;
use crate::types::SyncSource;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct SourceStore {
    path: PathBuf,
}

impl SourceStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SOURCES_FILE),
        }
    }

    pub fn load(&self) -> Vec<SyncSource> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(sources) => {
                    debug!(path = %self.path.display(), "Source list loaded");
                    sources
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse source list, starting empty");
                    Vec::new()
                }
            },
            Err(_) => {
                debug!("No source list found, starting empty");
                Vec::new()
            }
        }
    }

    pub fn save(&self, sources: &[SyncSource]) {
        let json = match serde_json::to_string_pretty(sources) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize source list");
                return;
            }
        };
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, json).and_then(|_| std::fs::rename(&tmp, &self.path)) {
            warn!(error = %e, path = %self.path.display(), "Failed to save source list");
        }
    }
}

// ============================================================================
// LIST OPERATIONS
// ============================================================================
// CRUD over the in-memory list, keyed by `id`. Callers persist afterwards.

pub fn add(list: &mut Vec<SyncSource>, record: SyncSource) {
    list.push(record);
}

/// Replace exactly the record matching `key`, preserving its position.
pub fn replace(list: &mut [SyncSource], key: &str, record: SyncSource) -> bool {
    match list.iter_mut().find(|s| s.id == key) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Remove exactly the record matching `key`.
pub fn remove(list: &mut Vec<SyncSource>, key: &str) -> bool {
    let before = list.len();
    list.retain(|s| s.id != key);
    list.len() != before
}

/// Set `last_updated` on the record matching `key`, leaving everything else alone.
pub fn touch(list: &mut [SyncSource], key: &str, timestamp: i64) -> bool {
    match list.iter_mut().find(|s| s.id == key) {
        Some(source) => {
            source.last_updated = Some(timestamp);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PayloadFormat, Protocol};

    fn source(id: &str, name: &str) -> SyncSource {
        SyncSource {
            id: id.into(),
            name: name.into(),
            path: "example.com/prompts.json".into(),
            protocol: Protocol::Https,
            format: PayloadFormat::Json,
            tags: vec!["work".into()],
            enabled: true,
            last_updated: None,
        }
    }

    #[test]
    fn add_grows_list_by_one_with_submitted_fields() {
        let mut list = vec![source("a", "first")];
        add(&mut list, source("b", "second"));
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].id, "b");
        assert_eq!(list[1].name, "second");
        assert_eq!(list[1].tags, vec!["work".to_string()]);
    }

    #[test]
    fn replace_touches_only_the_matching_record() {
        let mut list = vec![source("a", "first"), source("b", "second"), source("c", "third")];
        let mut edited = source("b", "renamed");
        edited.path = "other.host/list.csv".into();
        assert!(replace(&mut list, "b", edited));

        assert_eq!(list.len(), 3);
        assert_eq!(
            list.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["a", "b", "c"]
        );
        assert_eq!(list[1].name, "renamed");
        assert_eq!(list[0].name, "first");
        assert_eq!(list[2].name, "third");
    }

    #[test]
    fn replace_unknown_key_is_a_noop() {
        let mut list = vec![source("a", "first")];
        assert!(!replace(&mut list, "zzz", source("zzz", "ghost")));
        assert_eq!(list[0].name, "first");
    }

    #[test]
    fn remove_drops_exactly_the_matching_key() {
        let mut list = vec![source("a", "first"), source("b", "second"), source("c", "third")];
        assert!(remove(&mut list, "b"));
        assert_eq!(
            list.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(),
            ["a", "c"]
        );
        assert!(!remove(&mut list, "b"));
    }

    #[test]
    fn touch_updates_timestamp_and_nothing_else() {
        let mut list = vec![source("a", "first"), source("b", "second")];
        assert!(touch(&mut list, "a", 1_700_000_000_000));

        assert_eq!(list[0].last_updated, Some(1_700_000_000_000));
        assert_eq!(list[0].name, "first");
        assert_eq!(list[0].path, "example.com/prompts.json");
        assert!(list[0].enabled);
        assert_eq!(list[1].last_updated, None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SourceStore::new(tmp.path());

        let mut list = vec![source("a", "first")];
        touch(&mut list, "a", 42);
        store.save(&list);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a");
        assert_eq!(loaded[0].last_updated, Some(42));
    }

    #[test]
    fn missing_and_corrupt_files_load_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SourceStore::new(tmp.path());
        assert!(store.load().is_empty());

        std::fs::write(tmp.path().join(SOURCES_FILE), "{not json").unwrap();
        assert!(store.load().is_empty());
    }
}
