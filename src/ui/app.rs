use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::info;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::catalog::{
    row_cells, BrowserError, CatalogBrowser, EditorOutcome, FormField, RecordEditor,
    COLUMN_HEADERS,
};
use crate::db::CatalogStore;

use super::forms::form_view;
use super::helpers::{centered_rect, single_line, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Grid column widths, in [`COLUMN_HEADERS`] order. The taste column takes
/// whatever is left.
const COLUMN_WIDTHS: [Constraint; 7] = [
    Constraint::Length(5),
    Constraint::Length(22),
    Constraint::Length(12),
    Constraint::Length(8),
    Constraint::Fill(1),
    Constraint::Length(10),
    Constraint::Length(14),
];

/// Whether the editor dialog is up.
enum Mode {
    Browsing,
    Editing(RecordEditor),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Terminal front end: owns the store for the whole session, the grid, and at
/// most one open editor.
pub struct App {
    store: CatalogStore,
    browser: CatalogBrowser,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Take ownership of the store and load the initial grid.
    pub fn new(store: CatalogStore) -> Result<Self> {
        let mut browser = CatalogBrowser::new();
        browser
            .load(&store)
            .context("failed to load the coffee catalog")?;
        info!("loaded {} coffee records", browser.rows().len());

        Ok(Self {
            store,
            browser,
            mode: Mode::Browsing,
            status: None,
        })
    }

    /// Hand the store back so the caller can close it.
    pub fn into_store(self) -> CatalogStore {
        self.store
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Browsing);

        self.mode = match mode {
            Mode::Browsing => self.handle_browse_key(code, &mut exit)?,
            Mode::Editing(editor) => self.handle_editor_key(code, editor)?,
        };

        Ok(exit)
    }

    /// Ctrl+S saves the open editor from any field, including the multi-line
    /// taste description where Enter only breaks the line.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        if let Mode::Editing(editor) = mem::replace(&mut self.mode, Mode::Browsing) {
            self.mode = self.save_editor(editor);
        }
        Ok(())
    }

    fn handle_browse_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.browser.move_selection(-1),
            KeyCode::Down => self.browser.move_selection(1),
            KeyCode::PageUp => self.browser.move_selection(-10),
            KeyCode::PageDown => self.browser.move_selection(10),
            KeyCode::Home => self.browser.select_first(),
            KeyCode::End => self.browser.select_last(),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::Editing(self.browser.add()));
            }
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
                match self.browser.edit(&self.store) {
                    Ok(editor) => {
                        self.clear_status();
                        return Ok(Mode::Editing(editor));
                    }
                    Err(BrowserError::NoSelection) => {
                        self.set_status("Select a record to edit.", StatusKind::Warning);
                    }
                    Err(BrowserError::Store(err)) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => match self.reload() {
                Ok(()) => self.set_status("Catalog reloaded.", StatusKind::Info),
                Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
            },
            _ => {}
        }
        Ok(Mode::Browsing)
    }

    fn handle_editor_key(&mut self, code: KeyCode, mut editor: RecordEditor) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                editor.cancel();
                info!("editor cancelled");
                self.set_status("Edit cancelled.", StatusKind::Info);
                return Ok(Mode::Browsing);
            }
            KeyCode::Tab | KeyCode::Down => editor.form_mut().next_field(),
            KeyCode::BackTab | KeyCode::Up => editor.form_mut().previous_field(),
            KeyCode::Left => {
                editor.edit(|form| form.cycle_selector(false));
            }
            KeyCode::Right => {
                editor.edit(|form| form.cycle_selector(true));
            }
            KeyCode::Backspace => {
                editor.edit(|form| form.backspace());
            }
            KeyCode::Enter => {
                if editor.form().active == FormField::Taste {
                    editor.edit(|form| form.newline());
                } else {
                    return Ok(self.save_editor(editor));
                }
            }
            KeyCode::Char(ch) => {
                editor.edit(|form| form.push_char(ch));
            }
            _ => {}
        }
        Ok(Mode::Editing(editor))
    }

    /// Try to save; the dialog stays up (with its data) unless the store
    /// accepted the write.
    fn save_editor(&mut self, mut editor: RecordEditor) -> Mode {
        match editor.save(&self.store) {
            Ok(id) => {
                let outcome = editor.outcome();
                match self.finish_editor(outcome) {
                    Ok(()) => self.set_status(format!("Saved coffee #{id}."), StatusKind::Info),
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                Mode::Browsing
            }
            Err(err) => {
                self.set_status(single_line(&err.to_string(), "; "), StatusKind::Error);
                Mode::Editing(editor)
            }
        }
    }

    fn finish_editor(&mut self, outcome: EditorOutcome) -> Result<()> {
        self.browser
            .finish_editor(&self.store, outcome)
            .context("failed to reload the coffee catalog")?;
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        self.browser
            .load(&self.store)
            .context("failed to reload the coffee catalog")
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_grid(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::Editing(editor) = &self.mode {
            self.draw_editor(frame, area, editor);
        }
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let title = match self.store.path() {
            Some(path) => format!("Coffee Catalog ({})", path.display()),
            None => "Coffee Catalog".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.browser.rows().is_empty() {
            let message = Paragraph::new("No coffee yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(COLUMN_HEADERS.iter().map(|title| Cell::from(*title))).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

        let rows = self.browser.rows().iter().map(|coffee| {
            let mut cells = row_cells(coffee);
            cells[4] = single_line(&cells[4], " / ");
            Row::new(cells)
        });

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(self.browser.selected());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Browsing => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Select   "),
                Span::styled("[a]", key_style),
                Span::raw(" Add   "),
                Span::styled("[e/Enter]", key_style),
                Span::raw(" Edit   "),
                Span::styled("[r]", key_style),
                Span::raw(" Reload   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
            Mode::Editing(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next field   "),
                Span::styled("[←→]", key_style),
                Span::raw(" Change option   "),
                Span::styled("[Enter/Ctrl+S]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
        }
    }

    fn draw_editor(&self, frame: &mut Frame, area: Rect, editor: &RecordEditor) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let title = editor.title();
        let block = Block::default().title(title.as_str()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let view = form_view(editor.form());
        let mut lines = view.lines;
        lines.push(Line::from(""));

        if let Some(error) = editor.error() {
            for message in error.lines() {
                lines.push(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                )));
            }
        } else {
            let hint = if editor.form().active == FormField::Taste {
                "Enter for a new line • Ctrl+S to save • Esc to cancel"
            } else {
                "Enter to save • Tab to switch • Esc to cancel"
            };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if let Some((x, y)) = view.cursor {
            if x < inner.width && y < inner.height {
                frame.set_cursor_position((inner.x + x, inner.y + y));
            }
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
