//! Cache model store
//!
//! Each sync writes the parsed entries of one source to
//! cache_model/<id>.json, then the merged command index cache_model.json is
//! rebuilt from every enabled source's cache file.

use crate::constants::{CACHE_INDEX_FILE, CACHE_MODEL_DIR, USER_SYNC_TAG};
use crate::error::SyncError;
use crate::types::{PromptEntry, SyncSource};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(CACHE_MODEL_DIR)
}

pub fn entry_file(data_dir: &Path, id: &str) -> PathBuf {
    cache_dir(data_dir).join(format!("{}.json", id))
}

/// Stamp the user-sync tag and force-enable every entry.
pub fn tag_entries(mut entries: Vec<PromptEntry>) -> Vec<PromptEntry> {
    for entry in &mut entries {
        entry.tags = vec![USER_SYNC_TAG.to_string()];
        entry.enable = true;
    }
    entries
}

/// Write one source's entry list to its cache file.
pub fn write_entries(
    data_dir: &Path,
    id: &str,
    entries: &[PromptEntry],
) -> Result<(), SyncError> {
    std::fs::create_dir_all(cache_dir(data_dir))?;
    let path = entry_file(data_dir, id);
    std::fs::write(&path, serde_json::to_string_pretty(entries)?)?;
    debug!(path = %path.display(), count = entries.len(), "Cache entries written");
    Ok(())
}

pub fn read_entries(data_dir: &Path, id: &str) -> Result<Vec<PromptEntry>, SyncError> {
    let text = std::fs::read_to_string(entry_file(data_dir, id))?;
    Ok(serde_json::from_str(&text)?)
}

/// Rebuild the merged command index from every enabled source's cache file.
///
/// Entries keep the order of the source list; duplicate cmds keep their first
/// occurrence. Sources that have never synced simply have no cache file yet.
pub fn rebuild_index(data_dir: &Path, sources: &[SyncSource]) -> Result<usize, SyncError> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<PromptEntry> = Vec::new();

    for source in sources.iter().filter(|s| s.enabled) {
        let entries = match read_entries(data_dir, &source.id) {
            Ok(entries) => entries,
            Err(SyncError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        for entry in entries {
            if entry.enable && seen.insert(entry.cmd.clone()) {
                merged.push(entry);
            }
        }
    }

    let path = data_dir.join(CACHE_INDEX_FILE);
    std::fs::write(&path, serde_json::to_string_pretty(&merged)?)?;
    debug!(path = %path.display(), count = merged.len(), "Cache index rebuilt");
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PayloadFormat, Protocol};

    fn entry(cmd: &str, enable: bool) -> PromptEntry {
        PromptEntry {
            cmd: cmd.into(),
            act: cmd.replace('_', " "),
            prompt: format!("You are {}", cmd),
            tags: vec![USER_SYNC_TAG.into()],
            enable,
            extra: Default::default(),
        }
    }

    fn source(id: &str, enabled: bool) -> SyncSource {
        SyncSource {
            id: id.into(),
            name: id.into(),
            path: "example.com/p.json".into(),
            protocol: Protocol::Https,
            format: PayloadFormat::Json,
            tags: Vec::new(),
            enabled,
            last_updated: None,
        }
    }

    #[test]
    fn tag_entries_stamps_tag_and_enable() {
        let tagged = tag_entries(vec![
            PromptEntry {
                cmd: "one".into(),
                tags: vec!["old".into()],
                enable: false,
                ..Default::default()
            },
            PromptEntry::default(),
        ]);
        for entry in &tagged {
            assert_eq!(entry.tags, vec![USER_SYNC_TAG.to_string()]);
            assert!(entry.enable);
        }
    }

    #[test]
    fn write_then_read_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let entries = vec![entry("linux_terminal", true)];
        write_entries(tmp.path(), "abc", &entries).unwrap();
        assert_eq!(read_entries(tmp.path(), "abc").unwrap(), entries);
    }

    #[test]
    fn empty_list_writes_an_empty_cache_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_entries(tmp.path(), "abc", &[]).unwrap();
        assert!(read_entries(tmp.path(), "abc").unwrap().is_empty());
    }

    #[test]
    fn index_merges_enabled_sources_and_dedupes_by_cmd() {
        let tmp = tempfile::tempdir().unwrap();
        write_entries(tmp.path(), "a", &[entry("one", true), entry("two", true)]).unwrap();
        write_entries(tmp.path(), "b", &[entry("two", true), entry("three", true)]).unwrap();
        write_entries(tmp.path(), "c", &[entry("four", true)]).unwrap();

        let sources = vec![source("a", true), source("b", true), source("c", false)];
        let count = rebuild_index(tmp.path(), &sources).unwrap();
        assert_eq!(count, 3);

        let text = std::fs::read_to_string(tmp.path().join(CACHE_INDEX_FILE)).unwrap();
        let merged: Vec<PromptEntry> = serde_json::from_str(&text).unwrap();
        let cmds: Vec<&str> = merged.iter().map(|e| e.cmd.as_str()).collect();
        assert_eq!(cmds, ["one", "two", "three"]);
    }

    #[test]
    fn index_skips_disabled_entries_and_missing_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_entries(tmp.path(), "a", &[entry("one", true), entry("off", false)]).unwrap();

        // "ghost" has no cache file yet
        let sources = vec![source("a", true), source("ghost", true)];
        let count = rebuild_index(tmp.path(), &sources).unwrap();
        assert_eq!(count, 1);
    }
}
