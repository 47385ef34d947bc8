//! Plain-text rendering of screens for the terminal client.

use std::fmt::Write;

use ussd_sim::{Screen, ScreenKind, BACK, START};

const RULE_WIDTH: usize = 36;

/// Renders a screen the way a handset would show it
pub fn screen(screen: &Screen) -> String {
    let mut out = String::new();
    let title = screen.kind.title();
    let _ = writeln!(
        out,
        "── {} {}",
        title,
        "─".repeat(RULE_WIDTH.saturating_sub(title.len() + 4))
    );

    for line in screen.lines() {
        let _ = writeln!(out, "{}", line);
    }

    if screen.kind == ScreenKind::Menu && !screen.options.is_empty() {
        out.push('\n');
        for (i, option) in screen.options.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, option.text);
        }
    }

    if let Some(footer) = &screen.footer {
        let _ = writeln!(out, "\n  {}", footer);
    }

    out
}

/// Prompt shown before reading the next line
pub fn prompt(screen: &Screen) -> String {
    match (screen.kind, screen.input_kind) {
        (ScreenKind::Input, Some(kind)) if kind.is_secret() => {
            format!("{} (hidden) > ", kind.placeholder())
        }
        (ScreenKind::Input, Some(kind)) => format!("{} > ", kind.placeholder()),
        (ScreenKind::Input, None) => "Enter text > ".to_string(),
        _ => "> ".to_string(),
    }
}

/// Maps a typed line to the token sent to the engine.
///
/// Input screens take the line as typed. Elsewhere `0` goes back, `00`
/// restarts, and on menus a line matching an option id is sent as is,
/// otherwise a 1-based option number selects that option.
pub fn token_for(screen: &Screen, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if screen.is_awaiting_input() {
        return Some(line.to_string());
    }

    match line {
        "0" => return Some(BACK.to_string()),
        "00" => return Some(START.to_string()),
        _ => {}
    }

    if screen.kind == ScreenKind::Menu && screen.option(line).is_none() {
        if let Some(option) = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| screen.options.get(i))
        {
            return Some(option.id.clone());
        }
    }

    Some(line.to_string())
}
