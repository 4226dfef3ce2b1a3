//! Shared root manifest (`package.json`) and the per-app script merge.
//!
//! The manifest is persisted state mutated by independent invocations, so the
//! merge is modelled as a pure upsert over the parsed document; reading and
//! writing it back is the application layer's job.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{entities::app_request::AppRequest, error::DomainError};

const SCRIPTS_KEY: &str = "scripts";

/// One named script, keyed `<verb>:<app-name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub key: String,
    pub command: String,
}

impl ManifestEntry {
    fn for_verb(app: &str, verb: &str) -> Self {
        Self {
            key: format!("{verb}:{app}"),
            command: format!("pnpm --filter {app} {verb}"),
        }
    }
}

/// The fixed set of scripts one generated app contributes to the root manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSet {
    entries: Vec<ManifestEntry>,
}

impl ScriptSet {
    /// `dev`, `build`, `test`, plus `typecheck` for typed archetypes.
    pub fn for_app(request: &AppRequest) -> Self {
        let app = request.name().as_str();
        let mut entries = vec![
            ManifestEntry::for_verb(app, "dev"),
            ManifestEntry::for_verb(app, "build"),
            ManifestEntry::for_verb(app, "test"),
        ];
        if request.archetype().has_typecheck() {
            entries.push(ManifestEntry::for_verb(app, "typecheck"));
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }
}

/// What an upsert did to each key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
}

impl MergeOutcome {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

/// Parsed root manifest. Key order is preserved from the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DomainError::ManifestInvalid {
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(doc) => {
                if let Some(scripts) = doc.get(SCRIPTS_KEY) {
                    if !scripts.is_object() {
                        return Err(DomainError::ManifestInvalid {
                            reason: "\"scripts\" must be an object".into(),
                        });
                    }
                }
                Ok(Self { doc })
            }
            other => Err(DomainError::ManifestInvalid {
                reason: format!("expected a JSON object at the top level, found {}", kind(&other)),
            }),
        }
    }

    pub fn script(&self, key: &str) -> Option<&str> {
        self.doc
            .get(SCRIPTS_KEY)
            .and_then(Value::as_object)
            .and_then(|s| s.get(key))
            .and_then(Value::as_str)
    }

    pub fn script_keys(&self) -> Vec<&str> {
        self.doc
            .get(SCRIPTS_KEY)
            .and_then(Value::as_object)
            .map(|s| s.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Insert or overwrite `entries` in the `scripts` object.
    ///
    /// Existing keys keep their position; new keys are appended. Keys not in
    /// `entries` are never touched.
    pub fn upsert_scripts(&mut self, entries: &[ManifestEntry]) -> Result<MergeOutcome, DomainError> {
        let scripts = self
            .doc
            .entry(SCRIPTS_KEY)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| DomainError::ManifestInvalid {
                reason: "\"scripts\" must be an object".into(),
            })?;

        let mut outcome = MergeOutcome::default();
        for entry in entries {
            let new_value = Value::String(entry.command.clone());
            match scripts.get(&entry.key).map(|existing| *existing == new_value) {
                Some(true) => {
                    outcome.unchanged.push(entry.key.clone());
                }
                Some(false) => {
                    scripts.insert(entry.key.clone(), new_value);
                    outcome.updated.push(entry.key.clone());
                }
                None => {
                    scripts.insert(entry.key.clone(), new_value);
                    outcome.added.push(entry.key.clone());
                }
            }
        }

        Ok(outcome)
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut out =
            serde_json::to_string_pretty(&self.doc).map_err(|e| DomainError::ManifestInvalid {
                reason: e.to_string(),
            })?;
        out.push('\n');
        Ok(out)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::app_request::{AppName, Archetype},
        value_objects::ArchetypeKind,
    };

    fn request(name: &str, kind: ArchetypeKind) -> AppRequest {
        AppRequest::new(AppName::parse(name).unwrap(), Archetype::default_for(kind))
    }

    const ROOT: &str = r#"{
  "name": "workspace",
  "private": true,
  "scripts": {
    "lint": "eslint .",
    "dev:web": "pnpm --filter web dev"
  },
  "devDependencies": {
    "prettier": "^3.0.0"
  }
}
"#;

    #[test]
    fn script_set_for_typed_node_includes_typecheck() {
        let set = ScriptSet::for_app(&request("api", ArchetypeKind::BackendNode));
        let keys: Vec<_> = set.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["dev:api", "build:api", "test:api", "typecheck:api"]);
        assert_eq!(set.entries()[0].command, "pnpm --filter api dev");
    }

    #[test]
    fn script_set_for_python_has_no_typecheck() {
        let set = ScriptSet::for_app(&request("ml", ArchetypeKind::BackendPython));
        assert_eq!(set.entries().len(), 3);
    }

    #[test]
    fn upsert_appends_and_preserves_existing_order() {
        let mut manifest = Manifest::parse(ROOT).unwrap();
        let set = ScriptSet::for_app(&request("api", ArchetypeKind::BackendPython));
        let outcome = manifest.upsert_scripts(set.entries()).unwrap();

        assert_eq!(outcome.added, ["dev:api", "build:api", "test:api"]);
        assert_eq!(
            manifest.script_keys(),
            ["lint", "dev:web", "dev:api", "build:api", "test:api"]
        );
        assert_eq!(manifest.script("lint"), Some("eslint ."));

        let rendered = manifest.to_pretty_string().unwrap();
        let name_pos = rendered.find("\"name\"").unwrap();
        let dev_deps_pos = rendered.find("\"devDependencies\"").unwrap();
        assert!(name_pos < dev_deps_pos, "top-level order must be preserved");
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn upsert_twice_is_idempotent() {
        let set = ScriptSet::for_app(&request("api", ArchetypeKind::BackendNode));

        let mut once = Manifest::parse(ROOT).unwrap();
        once.upsert_scripts(set.entries()).unwrap();
        let first = once.to_pretty_string().unwrap();

        let mut twice = Manifest::parse(&first).unwrap();
        let outcome = twice.upsert_scripts(set.entries()).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(outcome.unchanged.len(), 4);
        assert_eq!(twice.to_pretty_string().unwrap(), first);
    }

    #[test]
    fn upsert_overwrites_stale_entry_in_place() {
        let mut manifest = Manifest::parse(ROOT).unwrap();
        let entries = [ManifestEntry {
            key: "dev:web".into(),
            command: "pnpm --filter web dev".into(),
        }];
        assert!(manifest.upsert_scripts(&entries).unwrap().is_noop());

        let stale = [ManifestEntry {
            key: "dev:web".into(),
            command: "pnpm --filter web start".into(),
        }];
        let outcome = manifest.upsert_scripts(&stale).unwrap();
        assert_eq!(outcome.updated, ["dev:web"]);
        assert_eq!(manifest.script_keys(), ["lint", "dev:web"]);
    }

    #[test]
    fn missing_scripts_object_is_created() {
        let mut manifest = Manifest::parse(r#"{"name":"root"}"#).unwrap();
        let set = ScriptSet::for_app(&request("tool", ArchetypeKind::Custom));
        manifest.upsert_scripts(set.entries()).unwrap();
        assert_eq!(manifest.script("test:tool"), Some("pnpm --filter tool test"));
    }

    #[test]
    fn rejects_non_object_documents() {
        assert!(matches!(
            Manifest::parse("[1, 2]"),
            Err(DomainError::ManifestInvalid { .. })
        ));
        assert!(Manifest::parse("not json").is_err());
        assert!(Manifest::parse(r#"{"scripts": []}"#).is_err());
    }
}
