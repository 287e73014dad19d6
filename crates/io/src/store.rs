//! Template persistence.
//!
//! [`DirTemplateStore`] keeps one JSON document per template, named
//! `<id>.json`, holding the template metadata and its items.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use truckstock_recon::model::TemplateItem;
use uuid::Uuid;

use crate::error::StoreError;

/// What the user supplies when uploading a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMeta {
    pub name: String,
    pub trade: String,
    #[serde(default)]
    pub department: Option<String>,
    pub truck_type: String,
}

impl TemplateMeta {
    /// Trims every field; a blank department becomes `None`.
    pub fn validate(mut self) -> Result<Self, StoreError> {
        self.name = self.name.trim().to_string();
        self.trade = self.trade.trim().to_string();
        self.truck_type = self.truck_type.trim().to_string();
        self.department = self
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        for (field, value) in [("name", &self.name), ("trade", &self.trade), ("truck_type", &self.truck_type)] {
            if value.is_empty() {
                return Err(StoreError::Invalid(format!("{field} is required")));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    #[serde(flatten)]
    pub meta: TemplateMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub item_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredTemplate {
    #[serde(flatten)]
    template: Template,
    items: Vec<TemplateItem>,
}

pub trait TemplateStore {
    /// All templates, ordered by name.
    fn list_templates(&self) -> Result<Vec<Template>, StoreError>;
    fn get_template(&self, id: &str) -> Result<Template, StoreError>;
    /// Items in upload order.
    fn get_template_items(&self, id: &str) -> Result<Vec<TemplateItem>, StoreError>;
    fn create_template(&self, meta: TemplateMeta, items: Vec<TemplateItem>) -> Result<Template, StoreError>;
    /// Removes the template together with its items.
    fn delete_template(&self, id: &str) -> Result<(), StoreError>;
}

// ============================================================================
// Directory store
// ============================================================================

#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    dir: PathBuf,
}

impl DirTemplateStore {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/truckstock/templates`, falling back to the working directory.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("truckstock")
            .join("templates")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        // Ids are UUIDs; anything else could escape the directory
        let uuid = Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))?;
        Ok(self.dir.join(format!("{}.json", uuid.hyphenated())))
    }

    fn read(&self, id: &str) -> Result<StoredTemplate, StoreError> {
        let path = self.path_for(id)?;
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            id: id.to_string(),
            message: e.to_string(),
        })
    }

    fn write(&self, stored: &StoredTemplate) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StoreError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let path = self.path_for(&stored.template.id)?;
        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| StoreError::Io(format!("serialize: {}", e)))?;

        // Write beside the target then rename, so readers never see half a file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl TemplateStore for DirTemplateStore {
    fn list_templates(&self) -> Result<Vec<Template>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", self.dir.display(), e))),
        };

        let mut templates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.read(id) {
                Ok(stored) => templates.push(stored.template),
                // One bad file should not hide the others
                Err(e) => log::warn!("skipping {}: {}", path.display(), e),
            }
        }

        templates.sort_by(|a, b| {
            a.meta
                .name
                .to_lowercase()
                .cmp(&b.meta.name.to_lowercase())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(templates)
    }

    fn get_template(&self, id: &str) -> Result<Template, StoreError> {
        Ok(self.read(id)?.template)
    }

    fn get_template_items(&self, id: &str) -> Result<Vec<TemplateItem>, StoreError> {
        Ok(self.read(id)?.items)
    }

    fn create_template(&self, meta: TemplateMeta, items: Vec<TemplateItem>) -> Result<Template, StoreError> {
        let meta = meta.validate()?;
        if items.is_empty() {
            return Err(StoreError::Invalid("template has no items".into()));
        }

        let now = Utc::now();
        let template = Template {
            id: Uuid::new_v4().to_string(),
            meta,
            created_at: now,
            updated_at: now,
            item_count: items.len(),
        };
        let stored = StoredTemplate { template, items };
        self.write(&stored)?;

        log::info!(
            "created template '{}' ({}) with {} items",
            stored.template.meta.name,
            stored.template.id,
            stored.template.item_count
        );
        Ok(stored.template)
    }

    fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("deleted template {}", id);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn meta(name: &str) -> TemplateMeta {
        TemplateMeta {
            name: name.into(),
            trade: "HVAC".into(),
            department: Some("  ".into()),
            truck_type: "Service".into(),
        }
    }

    fn item(code: &str) -> TemplateItem {
        TemplateItem {
            item_code: code.into(),
            item_description: None,
            min_qty: 1.0,
            max_qty: 3.0,
            unit_of_measure: Some("EA".into()),
            bin_location: None,
        }
    }

    #[test]
    fn create_get_delete() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path().join("templates"));

        let created = store.create_template(meta(" Van A "), vec![item("B2"), item("A1")]).unwrap();
        assert_eq!(created.meta.name, "Van A");
        assert_eq!(created.meta.department, None);
        assert_eq!(created.item_count, 2);

        let items = store.get_template_items(&created.id).unwrap();
        let codes: Vec<&str> = items.iter().map(|i| i.item_code.as_str()).collect();
        assert_eq!(codes, vec!["B2", "A1"]);
        assert_eq!(store.get_template(&created.id).unwrap(), created);

        store.delete_template(&created.id).unwrap();
        assert!(matches!(store.get_template_items(&created.id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete_template(&created.id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn list_is_ordered_by_name() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path());
        assert!(store.list_templates().unwrap().is_empty());

        store.create_template(meta("plumbing"), vec![item("A")]).unwrap();
        store.create_template(meta("Electrical"), vec![item("A")]).unwrap();
        store.create_template(meta("HVAC"), vec![item("A")]).unwrap();

        let names: Vec<String> = store.list_templates().unwrap().into_iter().map(|t| t.meta.name).collect();
        assert_eq!(names, vec!["Electrical", "HVAC", "plumbing"]);
    }

    #[test]
    fn missing_store_dir_lists_nothing() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path().join("never-created"));
        assert!(store.list_templates().unwrap().is_empty());
    }

    #[test]
    fn rejects_incomplete_meta_and_empty_items() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path());

        let mut bad = meta("Van");
        bad.trade = " ".into();
        assert!(matches!(store.create_template(bad, vec![item("A")]), Err(StoreError::Invalid(_))));
        assert!(matches!(store.create_template(meta("Van"), vec![]), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn non_uuid_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path());
        assert!(matches!(store.get_template_items("../etc/passwd"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn corrupt_file_is_reported_and_skipped_in_listing() {
        let dir = tempdir().unwrap();
        let store = DirTemplateStore::new(dir.path());
        let good = store.create_template(meta("Van"), vec![item("A")]).unwrap();

        let bad_id = Uuid::new_v4().to_string();
        fs::write(dir.path().join(format!("{bad_id}.json")), "{not json").unwrap();

        assert!(matches!(store.get_template_items(&bad_id), Err(StoreError::Corrupt { .. })));
        let listed = store.list_templates().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, good.id);
    }
}
