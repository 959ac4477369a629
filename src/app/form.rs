//! Modal form state for creating and editing sync sources

use crate::types::{PayloadFormat, Protocol, SyncSource};
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq)]
pub enum FormMode {
    New,
    /// Editing the record under this key; the id survives the edit
    Edit { id: String },
}

#[derive(Default)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub path: Option<&'static str>,
}

pub struct SourceForm {
    pub mode: FormMode,
    pub name: String,
    pub protocol: Protocol,
    pub path: String,
    pub format: PayloadFormat,
    /// Comma-separated in the input, split on confirm
    pub tags: String,
    pub enabled: bool,
    pub errors: FormErrors,
}

impl SourceForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::New,
            name: String::new(),
            protocol: Protocol::Https,
            path: String::new(),
            format: PayloadFormat::Json,
            tags: String::new(),
            enabled: true,
            errors: FormErrors::default(),
        }
    }

    pub fn edit(source: &SyncSource) -> Self {
        Self {
            mode: FormMode::Edit {
                id: source.id.clone(),
            },
            name: source.name.clone(),
            protocol: source.protocol,
            path: source.path.clone(),
            format: source.format,
            tags: source.tags.join(", "),
            enabled: source.enabled,
            errors: FormErrors::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::New => "New sync source",
            FormMode::Edit { .. } => "Edit sync source",
        }
    }

    /// Validate against the current list. Fills inline errors and returns
    /// whether the form may be confirmed.
    pub fn validate(&mut self, sources: &[SyncSource]) -> bool {
        self.errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            self.errors.name = Some("Name is required");
        } else {
            let own_id = match &self.mode {
                FormMode::Edit { id } => Some(id.as_str()),
                FormMode::New => None,
            };
            let taken = sources
                .iter()
                .any(|s| Some(s.id.as_str()) != own_id && s.name == name);
            if taken {
                self.errors.name = Some("A source with this name already exists");
            }
        }

        let path = self.path.trim();
        if path.is_empty() {
            self.errors.path = Some("Path is required");
        } else if self.protocol.is_remote() && path.contains("://") {
            self.errors.path = Some("Leave out the scheme, it comes from the protocol");
        }

        self.errors.name.is_none() && self.errors.path.is_none()
    }

    /// Build the record to persist. `last_updated` carries over on edit.
    pub fn to_record(&self, sources: &[SyncSource]) -> SyncSource {
        let (id, last_updated) = match &self.mode {
            FormMode::New => (Uuid::new_v4().to_string(), None),
            FormMode::Edit { id } => (
                id.clone(),
                sources
                    .iter()
                    .find(|s| &s.id == id)
                    .and_then(|s| s.last_updated),
            ),
        };
        SyncSource {
            id,
            name: self.name.trim().to_string(),
            path: self.path.trim().to_string(),
            protocol: self.protocol,
            format: self.format,
            tags: self
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            enabled: self.enabled,
            last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(id: &str, name: &str) -> SyncSource {
        SyncSource {
            id: id.into(),
            name: name.into(),
            path: "example.com/p.json".into(),
            protocol: Protocol::Https,
            format: PayloadFormat::Json,
            tags: Vec::new(),
            enabled: true,
            last_updated: Some(99),
        }
    }

    #[test]
    fn empty_name_and_path_block_confirm() {
        let mut form = SourceForm::new();
        assert!(!form.validate(&[]));
        assert!(form.errors.name.is_some());
        assert!(form.errors.path.is_some());
    }

    #[test]
    fn duplicate_name_blocks_confirm_but_own_name_survives_edit() {
        let sources = vec![existing("a", "prompts")];

        let mut form = SourceForm::new();
        form.name = "prompts".into();
        form.path = "example.com/p.json".into();
        assert!(!form.validate(&sources));
        assert!(form.errors.name.is_some());

        let mut form = SourceForm::edit(&sources[0]);
        assert!(form.validate(&sources));
    }

    #[test]
    fn remote_paths_must_not_embed_a_scheme() {
        let mut form = SourceForm::new();
        form.name = "prompts".into();
        form.path = "https://example.com/p.json".into();
        assert!(!form.validate(&[]));
        assert!(form.errors.path.is_some());

        form.protocol = Protocol::Local;
        assert!(form.validate(&[]));
    }

    #[test]
    fn new_records_get_a_fresh_unique_id() {
        let mut form = SourceForm::new();
        form.name = "prompts".into();
        form.path = "example.com/p.json".into();
        form.tags = "work, daily,, ".into();

        let a = form.to_record(&[]);
        let b = form.to_record(&[]);
        assert_ne!(a.id, b.id);
        assert_eq!(a.tags, vec!["work".to_string(), "daily".to_string()]);
        assert_eq!(a.last_updated, None);
    }

    #[test]
    fn edit_keeps_id_and_last_updated() {
        let sources = vec![existing("a", "prompts")];
        let mut form = SourceForm::edit(&sources[0]);
        form.name = "renamed".into();

        let record = form.to_record(&sources);
        assert_eq!(record.id, "a");
        assert_eq!(record.name, "renamed");
        assert_eq!(record.last_updated, Some(99));
    }
}
