//! Terminal User Interface
//!
//! ratatui front end for the detective game

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::Tone;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            highlight: Color::Magenta,
        }
    }
}

/// Color and weight for a log line
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Narrative => Style::default().fg(Color::White),
        Tone::Lead => Style::default().fg(Color::Magenta),
        Tone::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Tone::Warning => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Tone::Failure => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Tone::Hint => Style::default().fg(Color::Cyan),
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// ASCII art logo
pub const LOGO: &str = r#"
 ██████╗ █████╗ ███████╗███████╗███████╗██╗██╗     ███████╗
██╔════╝██╔══██╗██╔════╝██╔════╝██╔════╝██║██║     ██╔════╝
██║     ███████║███████╗█████╗  █████╗  ██║██║     █████╗
██║     ██╔══██║╚════██║██╔══╝  ██╔══╝  ██║██║     ██╔══╝
╚██████╗██║  ██║███████║███████╗██║     ██║███████╗███████╗
 ╚═════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝     ╚═╝╚══════╝╚══════╝

         Every clue costs you. Every mistake costs more.
"#;

/// Smaller logo for header
pub const SMALL_LOGO: &str = " CASEFILE ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  e     Examine the current location (free)                    ║
║  1-4   Move to a location                                     ║
║  ↑/↓   Select a suspect                                       ║
║  i     Interrogate the selected suspect                       ║
║  p     Present evidence to the selected suspect               ║
║  a     Accuse the selected suspect                            ║
║  s     Search: type the clue id to collect                    ║
║  n     Open the notebook                                      ║
║  :     Type a command                                         ║
║  ?     Toggle this help                                       ║
║  q     Quit                                                   ║
╠═══════════════════════════════════════════════════════════════╣
║                       COMMANDS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  move <location>     examine          search <id>             ║
║  interrogate <name>  present <name>   accuse <name>           ║
║  notebook            help                                     ║
╠═══════════════════════════════════════════════════════════════╣
║  Most actions cost 1 credibility and 1 turn. Examining and    ║
║  repeat questioning are free. Accuse with 2 linking clues.    ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(3),   // Command line
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (side panels + log)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Locations and suspects
            Constraint::Percentage(70),  // Investigative log
        ])
        .split(area)
        .to_vec()
}

/// Split the side panel into locations over suspects
pub fn create_side_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),   // Locations
            Constraint::Min(5),      // Suspects
        ])
        .split(area)
        .to_vec()
}

/// A rectangle centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}
