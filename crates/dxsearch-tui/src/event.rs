//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! The search screen is always in "insert mode": every printable character
//! edits the query, so only non-printable keys carry commands.
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `Ctrl+c`                | `Quit`                     |
//! | `Esc`                   | `Escape`                   |
//! | `Enter`                 | `Accept`                   |
//! | `↑` / `Ctrl+p`          | `Select(Up)`               |
//! | `↓` / `Ctrl+n`          | `Select(Down)`             |
//! | `PageUp`                | `PageUp`                   |
//! | `PageDown`              | `PageDown`                 |
//! | `←` / `→`               | `Cursor(Left/Right)`       |
//! | `Home` / `Ctrl+a`       | `CursorHome`               |
//! | `End` / `Ctrl+e`        | `CursorEnd`                |
//! | `Ctrl+u`                | `ClearQuery`               |
//! | `F1`                    | `ToggleHelp`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | terminal resize         | `Resize(w, h)`             |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Vertical direction through the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Horizontal direction for the query-bar cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit without choosing an entry.
    Quit,
    /// Clear the query, or quit when it is already empty.
    Escape,
    /// Choose the highlighted result.
    Accept,
    /// Move the result highlight by one row.
    Select(Direction),
    /// Move the result highlight by one page.
    PageUp,
    PageDown,
    /// Move the text cursor in the query bar.
    Cursor(Side),
    CursorHome,
    CursorEnd,
    /// Delete the whole query.
    ClearQuery,
    /// Show or hide the keybinding popup.
    ToggleHelp,
    /// A printable character forwarded to the query bar.
    Char(char),
    /// Delete the character before the cursor.
    Backspace,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, focus changes, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ClearQuery),
        Char('p') if key.modifiers == Mod::CONTROL => Some(AppEvent::Select(Direction::Up)),
        Char('n') if key.modifiers == Mod::CONTROL => Some(AppEvent::Select(Direction::Down)),
        Char('a') if key.modifiers == Mod::CONTROL => Some(AppEvent::CursorHome),
        Char('e') if key.modifiers == Mod::CONTROL => Some(AppEvent::CursorEnd),

        Up => Some(AppEvent::Select(Direction::Up)),
        Down => Some(AppEvent::Select(Direction::Down)),
        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Left => Some(AppEvent::Cursor(Side::Left)),
        Right => Some(AppEvent::Cursor(Side::Right)),
        Home => Some(AppEvent::CursorHome),
        End => Some(AppEvent::CursorEnd),
        F(1) => Some(AppEvent::ToggleHelp),

        // Printable characters, including shifted ones
        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Accept),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
