pub mod catalog;
pub mod error;
pub mod screen;
pub mod service;
pub mod session;

pub use catalog::{validate, Catalog, CatalogFile, CatalogIssue, Severity, ROOT_KEY, SUBMITTED};
pub use error::{Result, UssdError};
pub use screen::{InputKind, MenuOption, Screen, ScreenKind};
pub use service::{ServiceConfig, UssdService};
pub use session::engine::{BACK, START};
pub use session::{create_session, Engine, Rule, Session, SessionStore, Transition};
