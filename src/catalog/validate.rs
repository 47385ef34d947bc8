//! Catalog integrity checks.
//!
//! The engine degrades gracefully on any of these problems, so only a missing
//! root or an ambiguous menu counts as an error. Everything else surfaces as
//! a warning for catalog authors.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::{child_key, parent_key, Catalog, ROOT_KEY, SUBMITTED};
use crate::screen::ScreenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    /// Path key the issue was found at
    pub key: String,
    pub severity: Severity,
    pub message: String,
}

impl CatalogIssue {
    fn error(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(key: &str, message: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity.as_str(), self.key, self.message)
    }
}

/// Checks a catalog against the authoring rules. Issues are ordered by key.
pub fn validate(catalog: &Catalog) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    if !catalog.has_root() {
        issues.push(CatalogIssue::error(ROOT_KEY, "root screen is missing"));
    }

    for (key, screen) in catalog.entries() {
        if let Some(parent) = parent_key(key) {
            if !catalog.contains(parent) {
                issues.push(CatalogIssue::warning(
                    key,
                    format!("unreachable: parent '{}' is missing", parent),
                ));
            }
        }

        match screen.kind {
            ScreenKind::Menu => {
                if screen.options.is_empty() {
                    issues.push(CatalogIssue::error(key, "menu has no options"));
                }

                let mut seen = HashSet::new();
                for option in &screen.options {
                    if !seen.insert(option.id.as_str()) {
                        issues.push(CatalogIssue::error(
                            key,
                            format!("duplicate option id '{}'", option.id),
                        ));
                    }
                }

                for option in &screen.options {
                    if option.id == "back" || option.id == ROOT_KEY {
                        continue;
                    }
                    let child = child_key(key, &option.id);
                    if !catalog.contains(&child) {
                        issues.push(CatalogIssue::warning(
                            key,
                            format!(
                                "option '{}' leads nowhere ('{}' is missing)",
                                option.id, child
                            ),
                        ));
                    }
                }
            }
            ScreenKind::Input => {
                let submitted = child_key(key, SUBMITTED);
                if !catalog.contains(&submitted) {
                    issues.push(CatalogIssue::warning(
                        key,
                        format!("input has no '{}' continuation", submitted),
                    ));
                }
            }
            ScreenKind::Message | ScreenKind::End => {}
        }

        if screen.kind != ScreenKind::Menu && !screen.options.is_empty() {
            issues.push(CatalogIssue::warning(
                key,
                format!("options are ignored on a {} screen", screen.kind.as_str()),
            ));
        }
        if screen.kind != ScreenKind::Input && screen.input_kind.is_some() {
            issues.push(CatalogIssue::warning(
                key,
                format!("inputType is ignored on a {} screen", screen.kind.as_str()),
            ));
        }
    }

    issues
}
