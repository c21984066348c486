use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::BenefitTemplate;

/// Templates shipped with the service
const BUILTIN_CATALOG: &str = include_str!("../../data/benefits.json");

/// Errors raised while loading a catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Template at index {0} has no identifier")]
    MissingId(usize),

    #[error("Duplicate template identifier: {0}")]
    DuplicateId(String),

    #[error("Template {0} has no title")]
    MissingTitle(String),

    #[error("Template {id} declares an empty {dimension} target set")]
    EmptyTargetSet { id: String, dimension: &'static str },
}

/// Immutable collection of benefit templates, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<BenefitTemplate>,
}

impl Catalog {
    /// Build a catalog, rejecting structurally invalid templates
    pub fn new(templates: Vec<BenefitTemplate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(templates.len());

        for (index, template) in templates.iter().enumerate() {
            if template.id.trim().is_empty() {
                return Err(CatalogError::MissingId(index));
            }
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogError::DuplicateId(template.id.clone()));
            }
            if template.title.trim().is_empty() {
                return Err(CatalogError::MissingTitle(template.id.clone()));
            }
            for (dimension, values) in template.target_groups.dimensions() {
                if values.is_some_and(|v| v.is_empty()) {
                    return Err(CatalogError::EmptyTargetSet {
                        id: template.id.clone(),
                        dimension,
                    });
                }
            }
        }

        Ok(Self { templates })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let templates: Vec<BenefitTemplate> = serde_json::from_str(json)?;
        Self::new(templates)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn templates(&self) -> &[BenefitTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&BenefitTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
