//! Menu Catalog Module
//!
//! A flat mapping from dotted path keys (`"banking.transfer.mobile"`) to
//! screens. The key structure encodes the menu tree: `"banking.transfer"` is
//! the parent of `"banking.transfer.mobile"`.

pub mod builtin;
pub mod loader;
pub mod validate;

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::screen::Screen;

pub use loader::CatalogFile;
pub use validate::{validate, CatalogIssue, Severity};

/// Root key, also the resolution of the empty path
pub const ROOT_KEY: &str = "start";

/// Path segment appended when an input screen is submitted
pub const SUBMITTED: &str = "submitted";

pub const PATH_SEPARATOR: char = '.';

/// Global built-in catalog instance (lazily initialized)
pub static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(builtin::teleussd()));

/// Joins path tokens into a catalog key; the empty path maps to `"start"`
pub fn path_key<S: AsRef<str>>(path: &[S]) -> String {
    if path.is_empty() {
        return ROOT_KEY.to_string();
    }
    let mut key = String::new();
    for (i, token) in path.iter().enumerate() {
        if i > 0 {
            key.push(PATH_SEPARATOR);
        }
        key.push_str(token.as_ref());
    }
    key
}

/// Key of a direct child; children of the root live at the top level
pub fn child_key(key: &str, token: &str) -> String {
    if key == ROOT_KEY {
        return token.to_string();
    }
    let mut child = String::with_capacity(key.len() + token.len() + 1);
    child.push_str(key);
    child.push(PATH_SEPARATOR);
    child.push_str(token);
    child
}

/// Key of the parent screen, `None` for the root
pub fn parent_key(key: &str) -> Option<&str> {
    if key == ROOT_KEY {
        return None;
    }
    Some(
        key.rsplit_once(PATH_SEPARATOR)
            .map(|(parent, _)| parent)
            .unwrap_or(ROOT_KEY),
    )
}

/// Immutable screen catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    screens: HashMap<String, Screen>,
}

impl Catalog {
    pub fn new(screens: HashMap<String, Screen>) -> Self {
        Self { screens }
    }

    /// The TeleUSSD catalog shipped with the crate
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Shared handle to the built-in catalog
    pub fn builtin_shared() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    /// Looks up a screen by its exact key
    pub fn lookup(&self, key: &str) -> Option<&Screen> {
        self.screens.get(key)
    }

    /// Looks up the screen at a token path
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&Screen> {
        self.lookup(&path_key(path))
    }

    /// Screen at a path, or the "menu not found" screen when absent
    pub fn current_screen<S: AsRef<str>>(&self, path: &[S]) -> Screen {
        self.resolve(path)
            .cloned()
            .unwrap_or_else(Screen::menu_not_found)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.screens.contains_key(key)
    }

    pub fn has_root(&self) -> bool {
        self.contains(ROOT_KEY)
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.screens.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterates entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Screen)> {
        self.keys()
            .into_iter()
            .filter_map(move |key| self.screens.get(key).map(|screen| (key, screen)))
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}

impl FromIterator<(String, Screen)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Screen)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
