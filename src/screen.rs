//! Screen model
//!
//! A screen is the unit handed back to the caller after every transition:
//! the text to display plus what kind of input is expected next.

use serde::{Deserialize, Serialize};

pub const INVALID_SELECTION: &str = "Invalid selection. Please try again.";
pub const FORM_SUBMISSION_ERROR: &str = "Form submission error. Please try again.";
pub const MENU_NOT_FOUND: &str = "Menu not found. Please restart.";

/// What a screen expects from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenKind {
    /// A list of options, navigated by option id
    Menu,
    /// A free-form entry; any token submits it
    Input,
    /// Informational text
    Message,
    /// Terminal screen of a flow
    End,
}

impl ScreenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenKind::Menu => "menu",
            ScreenKind::Input => "input",
            ScreenKind::Message => "message",
            ScreenKind::End => "end",
        }
    }

    /// Heading used by front-ends above the screen body
    pub fn title(&self) -> &'static str {
        match self {
            ScreenKind::Menu => "Menu Options",
            ScreenKind::Input => "Input Required",
            ScreenKind::Message => "Message",
            ScreenKind::End => "Transaction Complete",
        }
    }
}

/// Rendering hint for input screens. Never used to validate content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Phone,
    Pin,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Phone => "phone",
            InputKind::Pin => "pin",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            InputKind::Text => "Enter text",
            InputKind::Number => "Enter number",
            InputKind::Phone => "Enter phone number",
            InputKind::Pin => "Enter PIN",
        }
    }

    /// Whether typed content should be masked
    pub fn is_secret(&self) -> bool {
        matches!(self, InputKind::Pin)
    }
}

/// A selectable menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Navigation token sent when the option is chosen
    pub id: String,
    /// Display label
    pub text: String,
}

impl MenuOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(rename = "type")]
    pub kind: ScreenKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<MenuOption>,
    #[serde(rename = "inputType", skip_serializing_if = "Option::is_none")]
    pub input_kind: Option<InputKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Screen {
    pub fn menu(message: impl Into<String>, options: Vec<MenuOption>) -> Self {
        Self {
            kind: ScreenKind::Menu,
            message: message.into(),
            options,
            input_kind: None,
            footer: None,
        }
    }

    pub fn input(message: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            kind: ScreenKind::Input,
            message: message.into(),
            options: Vec::new(),
            input_kind: Some(input_kind),
            footer: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            kind: ScreenKind::Message,
            message: message.into(),
            options: Vec::new(),
            input_kind: None,
            footer: None,
        }
    }

    pub fn end(message: impl Into<String>) -> Self {
        Self {
            kind: ScreenKind::End,
            message: message.into(),
            options: Vec::new(),
            input_kind: None,
            footer: None,
        }
    }

    /// Sets the footer
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Returned when a token does not resolve at the current path
    pub fn invalid_selection() -> Self {
        Self::message(INVALID_SELECTION)
    }

    /// Returned when an input screen has no `.submitted` continuation
    pub fn form_submission_error() -> Self {
        Self::message(FORM_SUBMISSION_ERROR)
    }

    pub fn menu_not_found() -> Self {
        Self::message(MENU_NOT_FOUND)
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.kind == ScreenKind::Input
    }

    /// Finds an option by its id
    pub fn option(&self, id: &str) -> Option<&MenuOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.split('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_serializes_with_wire_names() {
        let screen = Screen::input("Enter your PIN:", InputKind::Pin).with_footer("secret");
        let json = serde_json::to_value(&screen).unwrap();

        assert_eq!(json["type"], "input");
        assert_eq!(json["inputType"], "pin");
        assert_eq!(json["footer"], "secret");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn test_screen_deserializes_without_optional_fields() {
        let screen: Screen =
            serde_json::from_str(r#"{"type":"message","message":"Hello"}"#).unwrap();

        assert_eq!(screen, Screen::message("Hello"));
    }

    #[test]
    fn test_builtin_degraded_screens_are_messages() {
        for screen in [
            Screen::invalid_selection(),
            Screen::form_submission_error(),
            Screen::menu_not_found(),
        ] {
            assert_eq!(screen.kind, ScreenKind::Message);
            assert!(screen.options.is_empty());
            assert!(screen.footer.is_none());
        }
        assert_eq!(Screen::invalid_selection().message, INVALID_SELECTION);
    }

    #[test]
    fn test_option_lookup() {
        let screen = Screen::menu(
            "Pick",
            vec![MenuOption::new("a", "Alpha"), MenuOption::new("b", "Beta")],
        );
        assert_eq!(screen.option("b").map(|o| o.text.as_str()), Some("Beta"));
        assert!(screen.option("c").is_none());
    }

    #[test]
    fn test_only_pin_is_secret() {
        assert!(InputKind::Pin.is_secret());
        assert!(!InputKind::Phone.is_secret());
        assert!(Screen::input("PIN?", InputKind::Pin).is_awaiting_input());
        assert!(!Screen::message("Hi").is_awaiting_input());
    }
}
