//! Main application state and rendering

use crate::config::LaunchOptions;
use crate::data::{LocationId, SuspectId, Tone};
use crate::game::{ActionOutcome, Game};
use crate::tui::widgets::{DramaticBox, Meter};
use crate::tui::{centered_rect, styled_block, tone_style, Theme, HELP_TEXT, LOGO, SMALL_LOGO};
use crate::tui::{create_content_layout, create_main_layout, create_side_layout};
use crate::CaseError;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;
use tracing::{error, info};

/// Lines kept in the on-screen log
const LOG_LIMIT: usize = 200;

const TITLE_MENU: [&str; 3] = ["New case", "Tutorial case", "Quit"];

/// Application state
pub struct App {
    pub game: Option<Game>,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub menu_state: ListState,
    pub suspect_state: ListState,
    pub input_buffer: String,
    pub input_mode: InputMode,
    pub command_output: Vec<(Tone, String)>,
    /// Seed for the next random case; consumed once
    pending_seed: Option<u64>,
}

/// Current screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Playing,
    Notebook,
    CaseClosed,
}

/// Input mode for command prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

impl App {
    pub fn new(options: &LaunchOptions) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));

        let mut app = Self {
            game: None,
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Title,
            menu_state,
            suspect_state: ListState::default(),
            input_buffer: String::new(),
            input_mode: InputMode::Normal,
            command_output: Vec::new(),
            pending_seed: options.seed,
        };
        if options.tutorial {
            app.start_tutorial();
        }
        app
    }

    /// Handle keyboard input
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }
        Ok(self.running)
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        if self.input_mode == InputMode::Command {
            match code {
                KeyCode::Enter => {
                    self.execute_command();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match (self.current_screen, code) {
            (_, KeyCode::Char('q')) => self.running = false,
            (_, KeyCode::Char('?')) => self.show_help = true,

            (Screen::Title, KeyCode::Up) => self.navigate_menu(-1),
            (Screen::Title, KeyCode::Down) => self.navigate_menu(1),
            (Screen::Title, KeyCode::Enter) => match self.menu_state.selected() {
                Some(0) => self.start_new_case(),
                Some(1) => self.start_tutorial(),
                _ => self.running = false,
            },
            (Screen::Title | Screen::CaseClosed, KeyCode::Char('c')) => self.start_new_case(),
            (Screen::Title | Screen::CaseClosed, KeyCode::Char('t')) => self.start_tutorial(),
            (Screen::CaseClosed, KeyCode::Enter | KeyCode::Esc) => self.current_screen = Screen::Title,

            (Screen::Notebook, KeyCode::Esc | KeyCode::Char('n')) => self.current_screen = Screen::Playing,

            (Screen::Playing, KeyCode::Char('e')) => self.act(|game| game.examine()),
            (Screen::Playing, KeyCode::Char(d @ '1'..='9')) => {
                let index = d as usize - '1' as usize;
                self.act(|game| game.move_to(LocationId(index)));
            }
            (Screen::Playing, KeyCode::Up) => self.navigate_suspects(-1),
            (Screen::Playing, KeyCode::Down) => self.navigate_suspects(1),
            (Screen::Playing, KeyCode::Char('i')) => self.act_on_selected(Game::interrogate),
            (Screen::Playing, KeyCode::Char('p')) => self.act_on_selected(Game::present_evidence),
            (Screen::Playing, KeyCode::Char('a')) => self.act_on_selected(Game::accuse),
            (Screen::Playing, KeyCode::Char('s')) => self.open_command_line("search "),
            (Screen::Playing, KeyCode::Char(':')) => self.open_command_line(""),
            (Screen::Playing, KeyCode::Char('n')) => self.current_screen = Screen::Notebook,
            _ => {}
        }
    }

    fn open_command_line(&mut self, prefill: &str) {
        self.input_buffer = prefill.to_string();
        self.input_mode = InputMode::Command;
    }

    /// Execute a typed command
    fn execute_command(&mut self) {
        let input = std::mem::take(&mut self.input_buffer);
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "" => {}
            "notebook" => self.current_screen = Screen::Notebook,
            "help" => self.show_help = true,
            _ => self.act(|game| game.perform(input)),
        }
    }

    fn act_on_selected(&mut self, action: fn(&mut Game, SuspectId) -> Result<ActionOutcome, CaseError>) {
        match self.suspect_state.selected() {
            Some(index) => self.act(|game| action(game, SuspectId(index))),
            None => self.push(Tone::Warning, "Select a suspect first (up/down)."),
        }
    }

    /// Run an engine action and fold its outcome into the log
    fn act<F>(&mut self, action: F)
    where
        F: FnOnce(&mut Game) -> Result<ActionOutcome, CaseError>,
    {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        match action(game) {
            Ok(outcome) => {
                for entry in &outcome.messages {
                    self.push(entry.tone, entry.text.clone());
                }
                if outcome.terminal {
                    self.current_screen = Screen::CaseClosed;
                }
            }
            Err(e) => self.push(Tone::Warning, e.to_string()),
        }
    }

    fn push(&mut self, tone: Tone, text: impl Into<String>) {
        self.command_output.push((tone, text.into()));
        if self.command_output.len() > LOG_LIMIT {
            let excess = self.command_output.len() - LOG_LIMIT;
            self.command_output.drain(..excess);
        }
    }

    fn navigate_menu(&mut self, step: i32) {
        let current = self.menu_state.selected().unwrap_or(0) as i32;
        let next = (current + step).rem_euclid(TITLE_MENU.len() as i32);
        self.menu_state.select(Some(next as usize));
    }

    fn navigate_suspects(&mut self, step: i32) {
        let count = self.game.as_ref().map(|g| g.case().suspects().len()).unwrap_or(0);
        if count == 0 {
            return;
        }
        let next = match self.suspect_state.selected() {
            Some(current) => (current as i32 + step).rem_euclid(count as i32) as usize,
            None => 0,
        };
        self.suspect_state.select(Some(next));
    }

    fn start_new_case(&mut self) {
        let seed = self.pending_seed.take().unwrap_or_else(crate::seed_from_clock);
        match Game::start_new_case(seed) {
            Ok(game) => self.load(game),
            Err(e) => {
                error!(seed, error = %e, "could not generate a case");
                self.push(Tone::Failure, e.to_string());
            }
        }
    }

    fn start_tutorial(&mut self) {
        self.load(Game::start_tutorial_case());
    }

    fn load(&mut self, game: Game) {
        info!(case_id = %game.case().id(), title = game.case().title(), "case loaded into ui");
        self.command_output = game
            .timeline()
            .entries
            .iter()
            .map(|e| (e.tone, e.text.clone()))
            .collect();
        self.suspect_state.select(Some(0));
        self.current_screen = Screen::Playing;
        self.game = Some(game);
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        match (self.current_screen, self.game.as_ref()) {
            (Screen::Title, _) | (_, None) => self.render_title(frame),
            (Screen::Playing, Some(game)) => self.render_game(frame, game),
            (Screen::Notebook, Some(game)) => self.render_notebook(frame, game),
            (Screen::CaseClosed, Some(game)) => {
                self.render_game(frame, game);
                self.render_case_closed(frame, game);
            }
        }

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_title(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Length(5),
                Constraint::Min(1),
            ])
            .split(area);

        let logo = Paragraph::new(LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(logo, chunks[0]);

        let items: Vec<ListItem> = TITLE_MENU.iter().map(|item| ListItem::new(format!("  {}", item))).collect();
        let menu = List::new(items)
            .block(styled_block("Menu", &self.theme))
            .highlight_style(Style::default().fg(self.theme.highlight).add_modifier(Modifier::REVERSED));
        let menu_area = centered_rect(chunks[1], 30, 5);
        let mut state = self.menu_state.clone();
        frame.render_stateful_widget(menu, menu_area, &mut state);

        let hint = Paragraph::new("Enter to choose | c new case | t tutorial | ? help | q quit")
            .style(Style::default().fg(self.theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }

    fn render_game(&self, frame: &mut Frame, game: &Game) {
        let layout = create_main_layout(frame.area());
        self.render_header(frame, layout[0], game);

        let content = create_content_layout(layout[1]);
        let side = create_side_layout(content[0]);
        self.render_locations(frame, side[0], game);
        self.render_suspects(frame, side[1], game);
        self.render_log(frame, content[1]);

        self.render_command_line(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(12),
                Constraint::Min(20),
                Constraint::Length(34),
            ])
            .split(area);

        let border = Style::default().fg(self.theme.border);
        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(logo, header_layout[0]);

        let title = Paragraph::new(format!("{} | at {}", game.case().title(), game.current_location().name))
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
        frame.render_widget(title, header_layout[1]);

        let meters_block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = meters_block.inner(header_layout[2]);
        frame.render_widget(meters_block, header_layout[2]);
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);

        let start = game.rules().starting_credibility.max(1) as u32;
        frame.render_widget(Meter::new("Cred", game.credibility() as u32, start), halves[0]);
        frame.render_widget(
            Meter::new("Left", game.turns(), game.max_turns())
                .remaining()
                .color(self.theme.accent)
                .thresholds(0.3, 0.1),
            halves[1],
        );
    }

    fn render_locations(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let items: Vec<ListItem> = game
            .location_summaries()
            .iter()
            .enumerate()
            .map(|(i, loc)| {
                let marker = if loc.is_current { ">" } else { " " };
                let text = format!("{}{} {} ({})", marker, i + 1, loc.name, loc.clue_count);
                let style = if loc.is_current {
                    Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.fg)
                };
                ListItem::new(text).style(style)
            })
            .collect();
        frame.render_widget(List::new(items).block(styled_block("Locations", &self.theme)), area);
    }

    fn render_suspects(&self, frame: &mut Frame, area: Rect, game: &Game) {
        let items: Vec<ListItem> = game
            .suspect_summaries()
            .into_iter()
            .map(|s| {
                let asked = if s.interrogated { "Q" } else { "-" };
                let presented = s.presentation.map(|p| p.label()).unwrap_or("-");
                ListItem::new(vec![
                    Line::from(Span::styled(s.name, Style::default().fg(self.theme.fg))),
                    Line::from(Span::styled(
                        format!("  {} | {} | {}", s.motive, asked, presented),
                        Style::default().fg(self.theme.border),
                    )),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(styled_block("Suspects", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = self.suspect_state.clone();
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.command_output.len().saturating_sub(visible);
        let lines: Vec<Line> = self.command_output[start..]
            .iter()
            .map(|(tone, text)| {
                Line::from(vec![
                    Span::styled(format!("[{}] ", tone.label()), tone_style(*tone)),
                    Span::styled(text.as_str(), tone_style(*tone)),
                ])
            })
            .collect();
        let log = Paragraph::new(lines)
            .block(styled_block("Investigation", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(log, area);
    }

    fn render_command_line(&self, frame: &mut Frame, area: Rect) {
        let typing = self.input_mode == InputMode::Command;
        let prompt = if typing {
            format!("detective> {}_", self.input_buffer)
        } else {
            "detective> [: to type a command | ? for help]".to_string()
        };
        let color = if typing { self.theme.success } else { self.theme.border };
        let input = Paragraph::new(prompt).style(Style::default().fg(color)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(" Command "),
        );
        frame.render_widget(input, area);
    }

    fn render_notebook(&self, frame: &mut Frame, game: &Game) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let notes: Vec<Line> = game.notebook().lines().into_iter().map(Line::from).collect();
        let notebook = Paragraph::new(notes)
            .block(styled_block("Notebook (n/Esc to close)", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(notebook, chunks[0]);

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let entries: Vec<Line> = game
            .timeline()
            .recent(visible)
            .iter()
            .map(|e| {
                Line::from(vec![
                    Span::styled(
                        format!("{} T{:>2} ", e.timestamp.format("%H:%M:%S"), e.turn),
                        Style::default().fg(self.theme.border),
                    ),
                    Span::styled(e.text.as_str(), tone_style(e.tone)),
                ])
            })
            .collect();
        let timeline = Paragraph::new(entries)
            .block(styled_block("Case timeline", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(timeline, chunks[1]);
    }

    fn render_case_closed(&self, frame: &mut Frame, game: &Game) {
        let Some(verdict) = game.verdict() else {
            return;
        };
        let popup = centered_rect(frame.area(), 64, 10);
        frame.render_widget(Clear, popup);

        let color = if verdict.is_win() { self.theme.success } else { self.theme.alert };
        let content = vec![
            String::new(),
            String::new(),
            String::new(),
            format!("Credibility {} | turns used {}", game.credibility(), game.turns()),
            String::new(),
            "c new case | t tutorial | Enter title | q quit".to_string(),
        ];
        let dramatic = DramaticBox::new(verdict.headline()).content(content).border_color(color);
        frame.render_widget(dramatic, popup);

        // Verdict text wraps over two lines
        let inner = Rect::new(popup.x + 2, popup.y + 2, popup.width.saturating_sub(4), 2);
        let text = Paragraph::new(verdict.to_string())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });
        frame.render_widget(text, inner);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 67, 27);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options(tutorial: bool) -> LaunchOptions {
        LaunchOptions {
            seed: Some(42),
            tutorial,
            log_file: PathBuf::from("casefile.log"),
        }
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
    }

    fn log_contains(app: &App, needle: &str) -> bool {
        app.command_output.iter().any(|(_, text)| text.contains(needle))
    }

    #[test]
    fn starts_on_title_without_a_game() {
        let app = App::new(&options(false));
        assert_eq!(app.current_screen, Screen::Title);
        assert!(app.game.is_none());
    }

    #[test]
    fn tutorial_flag_opens_the_tutorial() {
        let app = App::new(&options(true));
        assert_eq!(app.current_screen, Screen::Playing);
        assert!(app.game.as_ref().is_some_and(|g| g.case().is_tutorial()));
        assert!(log_contains(&app, "Tutorial case loaded"));
    }

    #[test]
    fn quick_keys_drive_the_engine() {
        let mut app = App::new(&options(true));
        app.handle_key(KeyCode::Char('e'));
        assert!(log_contains(&app, "Visible items and clues:"));

        app.handle_key(KeyCode::Char('s'));
        assert_eq!(app.input_buffer, "search ");
        type_line(&mut app, "1");
        assert!(log_contains(&app, "You collected the clue"));
        let game = app.game.as_ref().unwrap();
        assert_eq!((game.credibility(), game.turns()), (9, 1));
    }

    #[test]
    fn errors_are_logged_not_fatal() {
        let mut app = App::new(&options(true));
        app.handle_key(KeyCode::Char(':'));
        type_line(&mut app, "search banana");
        assert!(log_contains(&app, "banana"));
        assert!(app.running);
    }

    #[test]
    fn notebook_command_switches_screen() {
        let mut app = App::new(&options(true));
        app.handle_key(KeyCode::Char(':'));
        type_line(&mut app, "notebook");
        assert_eq!(app.current_screen, Screen::Notebook);
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.current_screen, Screen::Playing);
    }

    #[test]
    fn seeded_new_case_from_title() {
        let mut app = App::new(&options(false));
        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.current_screen, Screen::Playing);
        let game = app.game.as_ref().unwrap();
        assert_eq!(game.seed(), 42);
        assert!(!game.case().is_tutorial());
    }
}
