//! Session Engine
//!
//! Token-driven path rewriting over the catalog. Every input resolves to
//! exactly one screen; unresolvable input degrades to a message screen and
//! leaves the path alone.

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::{child_key, path_key, Catalog, SUBMITTED};
use crate::screen::{Screen, ScreenKind};
use crate::session::Session;

/// Reserved token that returns to the root
pub const START: &str = "start";

/// Reserved token that moves one level up
pub const BACK: &str = "back";

/// Which navigation rule produced a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Reset,
    Back,
    Select,
    Submit,
    InvalidSelection,
    SubmissionError,
}

impl Rule {
    /// Whether the transition fell back to an error screen
    pub fn is_degraded(&self) -> bool {
        matches!(self, Rule::InvalidSelection | Rule::SubmissionError)
    }
}

/// Result of applying one token to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The new authoritative session
    pub session: Session,
    /// Screen to render
    pub screen: Screen,
    pub rule: Rule,
}

#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Arc<Catalog>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Catalog::builtin_shared())
    }
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Screen at a path, or the "menu not found" screen
    pub fn current_screen(&self, path: &[String]) -> Screen {
        self.catalog.current_screen(path)
    }

    /// Applies `token` to `session`, returning the next session and screen.
    ///
    /// Total over all inputs: misses produce an invalid-selection or
    /// form-submission-error screen, and the history always grows by one.
    pub fn transition(&self, session: &Session, token: &str) -> Transition {
        let mut path = session.current_path.clone();
        let (rule, screen) = self.step(&mut path, token);

        if rule.is_degraded() {
            tracing::warn!(
                session = %session.id,
                token,
                path = %path_key(path.as_slice()),
                "{:?}", rule
            );
        } else {
            tracing::debug!(
                session = %session.id,
                token,
                path = %path_key(path.as_slice()),
                "{:?}", rule
            );
        }

        let mut next = session.clone();
        next.current_path = path;
        next.history.push(screen.clone());
        next.touch();

        Transition {
            session: next,
            screen,
            rule,
        }
    }

    fn step(&self, path: &mut Vec<String>, token: &str) -> (Rule, Screen) {
        if token == START {
            path.clear();
            return (Rule::Reset, self.current_screen(path));
        }

        if token == BACK && !path.is_empty() {
            return self.pop(path);
        }

        if path.is_empty() {
            return match self.catalog.lookup(token) {
                Some(screen) => {
                    path.push(token.to_string());
                    (Rule::Select, screen.clone())
                }
                None => (Rule::InvalidSelection, Screen::invalid_selection()),
            };
        }

        let current_kind = self.catalog.resolve(path.as_slice()).map(|s| s.kind);
        if current_kind == Some(ScreenKind::Input) {
            let submitted = child_key(&path_key(path.as_slice()), SUBMITTED);
            return match self.catalog.lookup(&submitted) {
                Some(screen) => {
                    path.push(SUBMITTED.to_string());
                    (Rule::Submit, screen.clone())
                }
                None => (Rule::SubmissionError, Screen::form_submission_error()),
            };
        }

        let child = child_key(&path_key(path.as_slice()), token);
        if let Some(screen) = self.catalog.lookup(&child) {
            path.push(token.to_string());
            return (Rule::Select, screen.clone());
        }

        // Already handled above; kept so a "back" never reads as a miss.
        if token == BACK {
            return self.pop(path);
        }

        (Rule::InvalidSelection, Screen::invalid_selection())
    }

    fn pop(&self, path: &mut Vec<String>) -> (Rule, Screen) {
        path.pop();
        (Rule::Back, self.current_screen(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{InputKind, MenuOption, INVALID_SELECTION};
    use crate::session::create_session;

    fn at(path: &[&str]) -> Session {
        let mut session = create_session();
        session.current_path = path.iter().map(|s| s.to_string()).collect();
        session
    }

    #[test]
    fn test_default_engines_share_builtin_catalog() {
        let a = Engine::default();
        let b = Engine::default();
        assert!(Arc::ptr_eq(&a.catalog, &b.catalog));
    }

    #[test]
    fn test_start_resets_from_anywhere() {
        let engine = Engine::default();
        let t = engine.transition(&at(&["banking", "transfer", "mobile"]), "start");
        assert!(t.session.current_path.is_empty());
        assert_eq!(t.rule, Rule::Reset);
        assert!(t.screen.message.starts_with("Welcome to TeleUSSD"));
    }

    #[test]
    fn test_root_selection_miss_keeps_root() {
        let engine = Engine::default();
        let t = engine.transition(&create_session(), "bogus");
        assert!(t.session.current_path.is_empty());
        assert_eq!(t.screen.message, INVALID_SELECTION);
        assert_eq!(t.rule, Rule::InvalidSelection);
    }

    #[test]
    fn test_back_at_root_is_invalid() {
        let engine = Engine::default();
        let t = engine.transition(&create_session(), "back");
        assert!(t.session.current_path.is_empty());
        assert_eq!(t.rule, Rule::InvalidSelection);
    }

    #[test]
    fn test_input_screen_accepts_any_token() {
        let engine = Engine::default();
        for token in ["1234", "back-ish", "", "start.now"] {
            let t = engine.transition(&at(&["banking", "balance"]), token);
            assert_eq!(t.session.current_path, ["banking", "balance", "submitted"]);
            assert_eq!(t.rule, Rule::Submit);
        }
    }

    #[test]
    fn test_back_on_input_screen_navigates() {
        let engine = Engine::default();
        let t = engine.transition(&at(&["banking", "balance"]), "back");
        assert_eq!(t.session.current_path, ["banking"]);
        assert_eq!(t.rule, Rule::Back);
    }

    #[test]
    fn test_input_without_continuation() {
        let catalog: Catalog = vec![
            (
                "start".to_string(),
                Screen::menu("Root", vec![MenuOption::new("name", "Name")]),
            ),
            ("name".to_string(), Screen::input("Name?", InputKind::Text)),
        ]
        .into_iter()
        .collect();
        let engine = Engine::new(Arc::new(catalog));

        let t = engine.transition(&at(&["name"]), "Ada");
        assert_eq!(t.session.current_path, ["name"]);
        assert_eq!(t.screen, Screen::form_submission_error());
        assert_eq!(t.rule, Rule::SubmissionError);
    }

    #[test]
    fn test_dangling_path_degrades() {
        let engine = Engine::default();
        let t = engine.transition(&at(&["nowhere", "deeper"]), "x");
        assert_eq!(t.session.current_path, ["nowhere", "deeper"]);
        assert_eq!(t.rule, Rule::InvalidSelection);

        let t = engine.transition(&at(&["nowhere", "deeper"]), "back");
        assert_eq!(t.session.current_path, ["nowhere"]);
        assert_eq!(t.screen, Screen::menu_not_found());
    }

    #[test]
    fn test_missing_root_resolves_to_not_found() {
        let engine = Engine::new(Arc::new(Catalog::default()));
        let t = engine.transition(&create_session(), "start");
        assert_eq!(t.screen, Screen::menu_not_found());
        assert_eq!(t.session.history.len(), 1);
    }

    #[test]
    fn test_input_session_untouched() {
        let engine = Engine::default();
        let before = create_session();
        let t = engine.transition(&before, "banking");
        assert!(before.current_path.is_empty());
        assert!(before.history.is_empty());
        assert_eq!(t.session.id, before.id);
        assert_eq!(t.session.history, vec![t.screen.clone()]);
    }
}
