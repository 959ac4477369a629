//! Prompt payload parsing
//!
//! Remote and local sources deliver either a JSON array of prompt records or
//! CSV text with an "act","prompt" header (optionally a cmd column).

use crate::types::PromptEntry;
use csv::ReaderBuilder;

/// Derive a command slug from an act label: lowercase, alphanumerics kept,
/// whitespace and slashes become underscores, everything else dropped.
pub fn gen_cmd(act: &str) -> String {
    let mut cmd = String::with_capacity(act.len());
    for c in act.to_lowercase().chars() {
        if c.is_alphanumeric() {
            cmd.push(c);
        } else if c.is_whitespace() || c == '/' {
            if !cmd.ends_with('_') {
                cmd.push('_');
            }
        }
    }
    cmd.trim_matches('_').to_string()
}

/// Parse CSV text into prompt entries.
///
/// Rows without an act value are skipped; cmd falls back to a slug of act.
pub fn parse_prompts(data: &str) -> Result<Vec<PromptEntry>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let act_col = col("act");
    let prompt_col = col("prompt");
    let cmd_col = col("cmd");

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> String {
        idx.and_then(|i| record.get(i)).unwrap_or_default().to_string()
    };

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        let act = field(&record, act_col);
        if act.is_empty() {
            continue;
        }
        let cmd = match field(&record, cmd_col) {
            c if c.is_empty() => gen_cmd(&act),
            c => c,
        };
        entries.push(PromptEntry {
            cmd,
            act,
            prompt: field(&record, prompt_col),
            ..Default::default()
        });
    }
    Ok(entries)
}

/// Turn a remote JSON payload into prompt entries.
///
/// A non-array payload yields an empty list; array elements that are not
/// prompt-shaped objects are skipped.
pub fn entries_from_json(payload: serde_json::Value) -> Vec<PromptEntry> {
    match payload {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::tag_entries;
    use crate::constants::USER_SYNC_TAG;

    #[test]
    fn gen_cmd_slugifies() {
        assert_eq!(gen_cmd("Linux Terminal"), "linux_terminal");
        assert_eq!(gen_cmd("UX/UI Developer"), "ux_ui_developer");
        assert_eq!(gen_cmd("  Excel Sheet!  "), "excel_sheet");
        assert_eq!(gen_cmd("`position` Interviewer"), "position_interviewer");
        assert_eq!(gen_cmd(""), "");
    }

    #[test]
    fn parses_act_prompt_csv() {
        let data = "\"act\",\"prompt\"\n\
                    \"Linux Terminal\",\"I want you to act as a linux terminal.\"\n\
                    \"English Translator\",\"I want you to act as a translator.\"\n";
        let entries = parse_prompts(data).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].cmd, "linux_terminal");
        assert_eq!(entries[0].act, "Linux Terminal");
        assert_eq!(entries[1].prompt, "I want you to act as a translator.");
    }

    #[test]
    fn explicit_cmd_column_wins_over_slug() {
        let data = "cmd,act,prompt\nterm,Linux Terminal,Act as a terminal\n,Plain,Act plain\n";
        let entries = parse_prompts(data).unwrap();
        assert_eq!(entries[0].cmd, "term");
        assert_eq!(entries[1].cmd, "plain");
    }

    #[test]
    fn rows_without_act_are_skipped() {
        let data = "act,prompt\n,orphan prompt\nReal,real prompt\n";
        let entries = parse_prompts(data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].act, "Real");
    }

    #[test]
    fn every_tagged_csv_entry_is_enabled_with_nonempty_cmd() {
        let data = "act,prompt\nLinux Terminal,one\nSQL terminal,two\n";
        let entries = tag_entries(parse_prompts(data).unwrap());
        for entry in &entries {
            assert!(entry.enable);
            assert!(!entry.cmd.is_empty());
            assert_eq!(entry.tags, vec![USER_SYNC_TAG.to_string()]);
        }
    }

    #[test]
    fn json_array_payload_becomes_entries() {
        let payload = serde_json::json!([
            {"cmd": "one", "act": "One", "prompt": "p1", "extra_field": 7},
            {"cmd": "two", "act": "Two", "prompt": "p2"}
        ]);
        let entries = entries_from_json(payload);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].extra.get("extra_field"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn non_array_payload_yields_empty_tagged_list() {
        let entries = tag_entries(entries_from_json(serde_json::json!({"error": "nope"})));
        assert!(entries.is_empty());
        let entries = tag_entries(entries_from_json(serde_json::json!("plain string")));
        assert!(entries.is_empty());
    }
}
