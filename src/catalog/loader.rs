//! YAML catalog files.
//!
//! Format:
//! ```yaml
//! screens:
//!   start:
//!     type: menu
//!     message: "Welcome\n\nPlease select a service:"
//!     options:
//!       - id: banking
//!         text: Banking Services
//!   banking:
//!     type: input
//!     message: "Enter your PIN:"
//!     inputType: pin
//!   banking.submitted:
//!     type: end
//!     message: Done
//!     footer: Thank you
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{Catalog, ROOT_KEY};
use crate::error::{Result, UssdError};
use crate::screen::Screen;

/// On-disk catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Screens keyed by dotted path
    #[serde(default)]
    pub screens: BTreeMap<String, Screen>,
}

impl From<&Catalog> for CatalogFile {
    fn from(catalog: &Catalog) -> Self {
        Self {
            screens: catalog
                .entries()
                .map(|(key, screen)| (key.to_string(), screen.clone()))
                .collect(),
        }
    }
}

impl Catalog {
    /// Parses a catalog document. A catalog without a root screen is rejected.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;

        if let Some(key) = file
            .screens
            .keys()
            .find(|k| k.is_empty() || k.split('.').any(str::is_empty))
        {
            return Err(UssdError::Catalog(format!("Malformed path key: {:?}", key)));
        }
        if !file.screens.contains_key(ROOT_KEY) {
            return Err(UssdError::Catalog(format!(
                "Missing root screen '{}'",
                ROOT_KEY
            )));
        }

        Ok(file.screens.into_iter().collect())
    }

    /// Loads a catalog from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&content)?;
        tracing::info!("Loaded {} screens from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Serializes the catalog in the same format `from_yaml_str` reads
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&CatalogFile::from(self))?)
    }
}
