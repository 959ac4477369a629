//! Sync chain logic - fetch, parse, cache

use super::{App, ToastKind};
use crate::error::SyncError;
use crate::types::*;
use crate::utils::{self, Target};
use crate::{cache, parser, store};
use eframe::egui;
use std::path::Path;
use tracing::{error, info, warn};

/// Run one fetch-parse-cache chain for `source`.
///
/// The surrounding list is only used to rebuild the merged index after the
/// cache write. A remote answering with a non-success status completes the
/// chain without touching the cache.
async fn sync_source(
    source: &SyncSource,
    sources: &[SyncSource],
    data_dir: &Path,
) -> Result<SyncOutcome, SyncError> {
    let entries = match utils::resolve_target(source, data_dir) {
        Target::Url(url) => {
            info!(url = %url, "Fetching remote source");
            let response = reqwest::get(&url).await?;
            if !response.status().is_success() {
                return Ok(SyncOutcome::HttpFailed {
                    status: response.status().as_u16(),
                });
            }
            match source.format {
                PayloadFormat::Json => {
                    let payload: serde_json::Value = response.json().await?;
                    parser::entries_from_json(payload)
                }
                PayloadFormat::Csv => parser::parse_prompts(&response.text().await?)?,
            }
        }
        Target::File(path) => {
            info!(path = %path.display(), "Reading local source");
            let text = tokio::fs::read_to_string(&path).await?;
            match source.format {
                PayloadFormat::Json => parser::entries_from_json(serde_json::from_str(&text)?),
                PayloadFormat::Csv => parser::parse_prompts(&text)?,
            }
        }
    };

    let entries = cache::tag_entries(entries);
    let count = entries.len();
    cache::write_entries(data_dir, &source.id, &entries)?;
    if let Err(e) = cache::rebuild_index(data_dir, sources) {
        warn!(error = %e, "Cache index rebuild failed");
    }
    Ok(SyncOutcome::Synced { entries: count })
}

impl App {
    /// Kick off a sync chain for the source at `idx` in the list.
    ///
    /// Chains for different sources overlap freely; a source with a chain
    /// already in flight is left alone (its action shows a spinner).
    pub fn start_sync(&mut self, idx: usize, ctx: &egui::Context) {
        let Some(source) = self.sources.get(idx).cloned() else {
            return;
        };
        {
            let mut state = self.sync_state.lock().unwrap();
            if !state.jobs.insert(source.id.clone()) {
                return;
            }
        }

        info!(id = %source.id, name = %source.name, "Starting sync");
        let sources_snapshot = self.sources.clone();
        let data_dir = self.data_dir.clone();
        let state = self.sync_state.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = match sync_source(&source, &sources_snapshot, &data_dir).await {
                Ok(outcome) => outcome,
                Err(e) => SyncOutcome::Failed(e),
            };
            let mut s = state.lock().unwrap();
            s.jobs.remove(&source.id);
            s.events.push(SyncEvent {
                id: source.id,
                outcome,
            });
            drop(s);
            ctx.request_repaint();
        });
    }

    /// Drain completed chains on the UI thread: bump timestamps, persist the
    /// list, surface toasts. Keeps all persisted-model writes off the sync
    /// tasks so overlapping chains cannot race on sources.json.
    pub fn apply_sync_events(&mut self) {
        let events: Vec<SyncEvent> = {
            let mut state = self.sync_state.lock().unwrap();
            std::mem::take(&mut state.events)
        };
        for event in events {
            match event.outcome {
                SyncOutcome::Synced { entries } => {
                    info!(id = %event.id, entries, "Sync complete");
                    self.finish_sync(&event.id);
                    self.show_toast("Prompt data has been synchronized", ToastKind::Success);
                }
                SyncOutcome::HttpFailed { status } => {
                    warn!(id = %event.id, status, "Remote answered with failure status");
                    self.finish_sync(&event.id);
                    self.show_toast("Prompt sync failed, please try again", ToastKind::Error);
                }
                // Chain aborted before the cache write; the record keeps its
                // old timestamp and the user is not notified.
                SyncOutcome::Failed(e) => {
                    error!(id = %event.id, error = %e, "Sync chain failed");
                }
            }
        }
    }

    fn finish_sync(&mut self, id: &str) {
        if store::touch(&mut self.sources, id, utils::now_millis()) {
            self.store.save(&self.sources);
            self.apply_filters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USER_SYNC_TAG;

    fn local_source(dir: &Path, file: &str, format: PayloadFormat) -> SyncSource {
        SyncSource {
            id: "src-1".into(),
            name: "local".into(),
            path: dir.join(file).to_string_lossy().into_owned(),
            protocol: Protocol::Local,
            format,
            tags: Vec::new(),
            enabled: true,
            last_updated: None,
        }
    }

    #[tokio::test]
    async fn local_json_array_lands_in_cache_tagged() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("prompts.json");
        std::fs::write(
            &file,
            r#"[{"cmd": "one", "act": "One", "prompt": "p1", "enable": false}]"#,
        )
        .unwrap();

        let source = local_source(tmp.path(), "prompts.json", PayloadFormat::Json);
        let sources = vec![source.clone()];
        let outcome = sync_source(&source, &sources, tmp.path()).await.unwrap();
        assert!(matches!(outcome, SyncOutcome::Synced { entries: 1 }));

        let cached = cache::read_entries(tmp.path(), "src-1").unwrap();
        assert_eq!(cached[0].tags, vec![USER_SYNC_TAG.to_string()]);
        assert!(cached[0].enable);
    }

    #[tokio::test]
    async fn non_array_json_payload_caches_an_empty_list() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("bad.json"), r#"{"message": "not a list"}"#).unwrap();

        let source = local_source(tmp.path(), "bad.json", PayloadFormat::Json);
        let sources = vec![source.clone()];
        let outcome = sync_source(&source, &sources, tmp.path()).await.unwrap();
        assert!(matches!(outcome, SyncOutcome::Synced { entries: 0 }));
        assert!(cache::read_entries(tmp.path(), "src-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_csv_entries_are_enabled_with_cmds() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("prompts.csv"),
            "\"act\",\"prompt\"\n\"Linux Terminal\",\"Act as a terminal\"\n",
        )
        .unwrap();

        let source = local_source(tmp.path(), "prompts.csv", PayloadFormat::Csv);
        let sources = vec![source.clone()];
        sync_source(&source, &sources, tmp.path()).await.unwrap();

        let cached = cache::read_entries(tmp.path(), "src-1").unwrap();
        assert_eq!(cached[0].cmd, "linux_terminal");
        assert!(cached[0].enable);
    }

    #[tokio::test]
    async fn missing_local_file_errors_without_writing_cache() {
        let tmp = tempfile::tempdir().unwrap();
        let source = local_source(tmp.path(), "gone.json", PayloadFormat::Json);
        let sources = vec![source.clone()];
        let err = sync_source(&source, &sources, tmp.path()).await.unwrap_err();
        assert!(matches!(err, SyncError::Io(_)));
        assert!(cache::read_entries(tmp.path(), "src-1").is_err());
    }
}
