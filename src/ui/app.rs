use std::collections::BTreeMap;
use std::mem;

use anyhow::Context;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::export::{ExportJob, ExportSource, Rasterizer};
use crate::kiosk::Kiosk;
use crate::models::{Participant, MAX_SCORE, MIN_SCORE};

use super::forms::{axis_options, score_label, ConfirmDelete, PasscodeForm, WizardForm, WizardStep};
use super::helpers::{badge_preview_lines, centered_rect, format_created, surface_error};
use super::screens::{AdminScreen, SearchState};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the badge preview on the result screen, borders included.
const PREVIEW_WIDTH: u16 = 40;

/// Top-level views.
enum Screen {
    Wizard(WizardForm),
    Result { id: String },
    Admin(AdminScreen),
}

/// Overlays scoped to the current screen.
enum Mode {
    Normal,
    Passcode(PasscodeForm),
    ConfirmDelete(ConfirmDelete),
    Searching(SearchState),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    kiosk: Kiosk,
    rasterizer: Box<dyn Rasterizer>,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    pending_export: Option<ExportJob>,
}

impl App {
    pub fn new(kiosk: Kiosk, rasterizer: Box<dyn Rasterizer>) -> Self {
        let form = WizardForm::new(kiosk.max_interest_chars());
        Self {
            kiosk,
            rasterizer,
            screen: Screen::Wizard(form),
            mode: Mode::Normal,
            status: None,
            pending_export: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code),
            Mode::Passcode(form) => self.handle_passcode(code, form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Searching(state) => self.handle_search(code, state),
        };
    }

    /// Ctrl+A: ask for the operator passcode from the participant side.
    pub(crate) fn handle_ctrl_a(&mut self) {
        if matches!(self.screen, Screen::Admin(_)) || !matches!(self.mode, Mode::Normal) {
            return;
        }
        self.clear_status();
        self.mode = Mode::Passcode(PasscodeForm::default());
    }

    pub(crate) fn has_pending_export(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Run the export requested on the previous key press. Called by the
    /// event loop once the "generating" frame is on screen.
    pub(crate) fn run_pending_export(&mut self) {
        let Some(job) = self.pending_export.take() else {
            return;
        };
        let result = self
            .kiosk
            .run_document_export(&job, self.rasterizer.as_mut())
            .context("failed to export badges");
        match result {
            Ok(file) => self.set_status(
                format!(
                    "Saved {} badge(s) on {} page(s) to {}.",
                    file.count,
                    file.pages,
                    file.path.display()
                ),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(
                format!("Export failed: {}", surface_error(&err)),
                StatusKind::Error,
            ),
        }
        self.kiosk.acknowledge_export();
        self.refresh_admin();
    }

    fn export_busy(&self) -> bool {
        self.pending_export.is_some() || self.kiosk.export_state().is_generating()
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Mode {
        let placeholder = Screen::Wizard(self.fresh_wizard());
        let (screen, mode) = match mem::replace(&mut self.screen, placeholder) {
            Screen::Wizard(form) => self.handle_wizard_key(code, form),
            Screen::Result { id } => self.handle_result_key(code, id),
            Screen::Admin(admin) => self.handle_admin_key(code, admin),
        };
        self.screen = screen;
        mode
    }

    fn handle_wizard_key(&mut self, code: KeyCode, mut form: WizardForm) -> (Screen, Mode) {
        match code {
            KeyCode::Enter => {
                if form.advance() {
                    return self.submit(form);
                }
            }
            KeyCode::Esc => {
                form.back();
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Left if form.step.is_axis() => {
                if form.choose_side(0) {
                    form.advance();
                }
            }
            KeyCode::Right if form.step.is_axis() => {
                if form.choose_side(1) {
                    form.advance();
                }
            }
            KeyCode::Up | KeyCode::Left if form.step == WizardStep::Score => form.nudge_score(-1),
            KeyCode::Down | KeyCode::Right if form.step == WizardStep::Score => {
                form.nudge_score(1)
            }
            KeyCode::Char(ch) if form.step.is_axis() => {
                if form.choose_letter(ch) {
                    form.advance();
                }
            }
            KeyCode::Char(ch) => form.push_char(ch),
            _ => {}
        }
        (Screen::Wizard(form), Mode::Normal)
    }

    fn submit(&mut self, mut form: WizardForm) -> (Screen, Mode) {
        match self.kiosk.submit(&form.draft) {
            Ok(submission) => {
                match submission.save_error {
                    Some(err) => self.set_status(
                        format!("Badge created but not saved: {err}"),
                        StatusKind::Error,
                    ),
                    None => self.set_status(
                        format!("Welcome, {}!", submission.record.name),
                        StatusKind::Info,
                    ),
                }
                (
                    Screen::Result {
                        id: submission.record.id,
                    },
                    Mode::Normal,
                )
            }
            Err(err) => {
                form.error = Some(err.to_string());
                (Screen::Wizard(form), Mode::Normal)
            }
        }
    }

    fn handle_result_key(&mut self, code: KeyCode, id: String) -> (Screen, Mode) {
        match code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.export_busy() {
                    self.request_export(ExportSource::SingleResult(id.clone()));
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter => {
                self.clear_status();
                return (Screen::Wizard(self.fresh_wizard()), Mode::Normal);
            }
            _ => {}
        }
        (Screen::Result { id }, Mode::Normal)
    }

    fn handle_admin_key(&mut self, code: KeyCode, mut admin: AdminScreen) -> (Screen, Mode) {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return (Screen::Wizard(self.fresh_wizard()), Mode::Normal);
            }
            KeyCode::Up => admin.move_selection(-1),
            KeyCode::Down => admin.move_selection(1),
            KeyCode::PageUp => admin.move_selection(-10),
            KeyCode::PageDown => admin.move_selection(10),
            KeyCode::Home => admin.select_first(),
            KeyCode::End => admin.select_last(),
            KeyCode::Char('/') => {
                let query = admin.filter.query.clone().unwrap_or_default();
                return (Screen::Admin(admin), Mode::Searching(SearchState { query }));
            }
            KeyCode::Char('u') | KeyCode::Char('U') => {
                let active = admin.toggle_unprinted_only(&self.kiosk);
                let message = if active {
                    "Showing unprinted badges only."
                } else {
                    "Showing all badges."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char(' ') => {
                if let Some(id) = admin.current_id().map(str::to_string) {
                    if let Err(err) = self.kiosk.toggle_selected(&id) {
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                let all_selected = !admin.visible.is_empty()
                    && admin
                        .visible
                        .iter()
                        .all(|id| self.kiosk.selection().contains(id));
                if all_selected {
                    self.kiosk.clear_selection();
                } else {
                    self.kiosk.set_selection(admin.visible.clone());
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.export_busy() {
                    self.request_export(ExportSource::AdminSelection);
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if !self.export_busy() {
                    self.export_csv();
                }
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                let names: Vec<String> = self
                    .kiosk
                    .selection()
                    .pick(self.kiosk.records())
                    .into_iter()
                    .map(|record| record.name.clone())
                    .collect();
                if names.is_empty() {
                    self.set_status("Select badges to delete first.", StatusKind::Error);
                } else {
                    self.clear_status();
                    return (Screen::Admin(admin), Mode::ConfirmDelete(ConfirmDelete { names }));
                }
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if let Some(record) = admin.current_id().and_then(|id| self.kiosk.get(id)) {
                    let link = record.link.trim().to_string();
                    let name = record.name.clone();
                    if link.is_empty() {
                        self.set_status("This participant left no link.", StatusKind::Error);
                    } else if let Err(err) = open_link(&link) {
                        self.set_status(format!("Failed to open link: {err}"), StatusKind::Error);
                    } else {
                        self.set_status(format!("Opened link from {name}."), StatusKind::Info);
                    }
                }
            }
            _ => {}
        }
        (Screen::Admin(admin), Mode::Normal)
    }

    fn handle_passcode(&mut self, code: KeyCode, mut form: PasscodeForm) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Enter => {
                if self.kiosk.unlock(&form.input) {
                    self.screen = Screen::Admin(AdminScreen::new(&self.kiosk));
                    self.set_status("Admin dashboard unlocked.", StatusKind::Info);
                    return Mode::Normal;
                }
                form.input.clear();
                form.error = Some("Wrong passcode.".to_string());
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) => form.push_char(ch),
            _ => {}
        }
        Mode::Passcode(form)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let result = self
                    .kiosk
                    .bulk_delete_selected()
                    .context("failed to delete participants");
                match result {
                    Ok(removed) => {
                        self.set_status(format!("Deleted {removed} badge(s)."), StatusKind::Info)
                    }
                    Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
                }
                self.refresh_admin();
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Mode::Normal,
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        let Screen::Admin(admin) = &mut self.screen else {
            return Mode::Normal;
        };
        let kiosk = &self.kiosk;
        match code {
            KeyCode::Esc => {
                admin.set_query(None, kiosk);
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) => state.query.push(ch),
            _ => return Mode::Searching(state),
        }
        admin.set_query(Some(state.query.clone()), kiosk);
        Mode::Searching(state)
    }

    fn request_export(&mut self, source: ExportSource) {
        match self.kiosk.request_document_export(source) {
            Ok(job) => {
                self.set_status(
                    format!("Generating {} badge(s)...", job.len()),
                    StatusKind::Info,
                );
                self.pending_export = Some(job);
            }
            Err(err) => self.set_status(err.to_string(), StatusKind::Error),
        }
    }

    fn export_csv(&mut self) {
        let dir = self.kiosk.output_dir().to_path_buf();
        let result = self
            .kiosk
            .export_csv(&dir)
            .with_context(|| format!("failed to export CSV to {}", dir.display()));
        match result {
            Ok(file) => self.set_status(
                format!("Exported {} row(s) to {}.", file.count, file.path.display()),
                StatusKind::Info,
            ),
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    fn refresh_admin(&mut self) {
        if let Screen::Admin(admin) = &mut self.screen {
            admin.apply_filter(&self.kiosk);
        }
    }

    fn fresh_wizard(&self) -> WizardForm {
        WizardForm::new(self.kiosk.max_interest_chars())
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

        match &self.screen {
            Screen::Wizard(form) => self.draw_wizard(frame, content_area, form),
            Screen::Result { id } => self.draw_result(frame, content_area, id),
            Screen::Admin(admin) => self.draw_admin(frame, content_area, admin),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::Passcode(form) => self.draw_passcode(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_wizard(&self, frame: &mut Frame, area: Rect, form: &WizardForm) {
        let title = format!(
            "Badge Kiosk • Step {}/{}",
            form.step.number(),
            WizardStep::ALL.len()
        );
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![
            Line::from(Span::styled(
                form.step.question(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if form.step.is_axis() {
            let chosen = form.current_axis_letter();
            for option in axis_options(form.step) {
                let selected = chosen == Some(option.letter);
                let marker = if selected { "▶ " } else { "  " };
                let style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("{marker}{}", option.label),
                    style,
                )));
                lines.push(Line::from(Span::styled(
                    format!("    {}", option.blurb),
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::from(""));
            }
        } else if form.step == WizardStep::Score {
            for level in MIN_SCORE..=MAX_SCORE {
                let (label, blurb) = score_label(level);
                let selected = form.draft.score == Some(level);
                let style = if selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let marker = if selected { "▶" } else { " " };
                lines.push(Line::from(vec![
                    Span::styled(format!("{marker} {level}  {label}"), style),
                    Span::styled(format!("  {blurb}"), Style::default().fg(Color::Gray)),
                ]));
            }
        } else {
            lines.push(form.build_line());
        }

        if let Some(error) = &form.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, inner);

        if let Some(value) = form.text_value() {
            if !matches!(self.mode, Mode::Normal) {
                return;
            }
            let cursor_x = inner.x + 2 + value.chars().count() as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y + 2));
        }
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect, id: &str) {
        let Some(record) = self.kiosk.get(id) else {
            let message = Paragraph::new("This badge no longer exists. Press 'n' to start over.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(message, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(PREVIEW_WIDTH), Constraint::Min(0)])
            .split(area);

        let badge = self.kiosk.render(record);
        let block = Block::default().title("Your Badge").borders(Borders::ALL);
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        frame.render_widget(Paragraph::new(badge_preview_lines(&badge, inner.width)), inner);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(Span::styled(
                format!("{} • {}", record.code(), badge.group_title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(badge.code_title),
            Line::from(""),
            Line::from(format!("Interest: {}", record.interest)),
            Line::from(format!("Score: {}/{}", record.score, MAX_SCORE)),
            Line::from(if record.link.is_empty() {
                "Link: -".to_string()
            } else {
                format!("Link: {}", record.link)
            }),
            Line::from(""),
            Line::from(vec![
                Span::styled("[p]", key_style),
                Span::raw(" Save this badge as PDF"),
            ]),
            Line::from(vec![
                Span::styled("[n]", key_style),
                Span::raw(" Next participant"),
            ]),
        ];
        let details = Paragraph::new(lines)
            .block(Block::default().title("Details").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        frame.render_widget(details, chunks[1]);
    }

    fn draw_admin(&self, frame: &mut Frame, area: Rect, admin: &AdminScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(1)])
            .split(area);

        let stats = self.kiosk.stats();
        let mut filter_spans = vec![Span::raw(format!(
            "{} selected (max {} per print)",
            self.kiosk.selection().len(),
            self.kiosk.batch_limit()
        ))];
        if let Some(query) = &admin.filter.query {
            filter_spans.push(Span::styled(
                format!("   search: \"{query}\""),
                Style::default().fg(Color::Yellow),
            ));
        }
        if admin.filter.unprinted_only {
            filter_spans.push(Span::styled(
                "   unprinted only",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(
                    "{} participants • {} printed • {} duplicate name(s)",
                    stats.total,
                    stats.printed,
                    stats.duplicate_names.len()
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(filter_spans),
        ])
        .block(Block::default().title("Admin Dashboard").borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let block = Block::default().title("Roster").borders(Borders::ALL);
        if admin.visible.is_empty() {
            let message = if self.kiosk.records().is_empty() {
                "No participants yet."
            } else {
                "No participants match the current filter."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        let name_counts = self.kiosk.name_counts();
        let rows: Vec<Row> = admin
            .visible
            .iter()
            .filter_map(|id| self.kiosk.get(id))
            .map(|record| self.roster_row(record, &name_counts))
            .collect();
        let widths = [
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(14),
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(11),
        ];
        let table = Table::new(rows, widths)
            .header(
                Row::new(["", "", "Name", "Code", "Grp", "Interest", "Score", "Created"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block)
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");
        let mut state = TableState::default().with_selected(Some(admin.selected));
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    fn roster_row(&self, record: &Participant, name_counts: &BTreeMap<String, usize>) -> Row<'static> {
        let checkbox = if self.kiosk.selection().contains(&record.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let printed = if record.printed {
            Cell::from(Span::styled("✓", Style::default().fg(Color::Green)))
        } else {
            Cell::from("")
        };
        let duplicate = name_counts.get(&record.name).copied().unwrap_or(0) > 1;
        let name = if duplicate {
            Cell::from(Line::from(vec![
                Span::raw(record.name.clone()),
                Span::styled(" ⚠ dup", Style::default().fg(Color::Red)),
            ]))
        } else {
            Cell::from(record.name.clone())
        };
        Row::new(vec![
            Cell::from(checkbox),
            printed,
            name,
            Cell::from(record.code()),
            Cell::from(record.group.code()),
            Cell::from(record.interest.clone()),
            Cell::from(record.score.to_string()),
            Cell::from(format_created(&record.created_at)),
        ])
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if self.export_busy() {
            Line::from(Span::styled(
                format!("Export {}...", self.kiosk.export_state()),
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(status) = &self.status {
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
        let keys = |pairs: &[(&'static str, &'static str)]| {
            let mut spans = Vec::with_capacity(pairs.len() * 2);
            for (key, label) in pairs {
                spans.push(Span::styled(*key, key_style));
                spans.push(Span::raw(format!(" {label}   ")));
            }
            Line::from(spans)
        };
        match (&self.screen, &self.mode) {
            (_, Mode::Passcode(_)) => keys(&[("[Enter]", "Unlock"), ("[Esc]", "Cancel")]),
            (_, Mode::ConfirmDelete(_)) => keys(&[("[y]", "Delete"), ("[n]", "Keep")]),
            (_, Mode::Searching(_)) => keys(&[("[Enter]", "Keep Filter"), ("[Esc]", "Clear")]),
            (Screen::Admin(_), _) => keys(&[
                ("[↑↓]", "Move"),
                ("[Space]", "Select"),
                ("[a]", "All"),
                ("[/]", "Search"),
                ("[u]", "Unprinted"),
                ("[p]", "Print"),
                ("[c]", "CSV"),
                ("[d]", "Delete"),
                ("[o]", "Open Link"),
                ("[Esc]", "Kiosk"),
            ]),
            (Screen::Result { .. }, _) => keys(&[
                ("[p]", "Print"),
                ("[n]", "Next"),
                ("[Ctrl+A]", "Admin"),
                ("[Ctrl+C]", "Quit"),
            ]),
            (Screen::Wizard(form), _) if form.step.is_axis() => keys(&[
                ("[←→]", "Choose"),
                ("[Esc]", "Back"),
                ("[Ctrl+A]", "Admin"),
                ("[Ctrl+C]", "Quit"),
            ]),
            (Screen::Wizard(_), _) => keys(&[
                ("[Enter]", "Next"),
                ("[Esc]", "Back"),
                ("[Ctrl+A]", "Admin"),
                ("[Ctrl+C]", "Quit"),
            ]),
        }
    }

    fn draw_passcode(&self, frame: &mut Frame, area: Rect, form: &PasscodeForm) {
        let popup_area = centered_rect(40, 25, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Operator Access").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from("Enter the admin passcode:"),
            Line::from(Span::styled(
                format!("> {}", form.masked()),
                Style::default().fg(Color::Yellow),
            )),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete {} badge(s)?", confirm.names.len())),
            Line::from(confirm.names.join(", ")),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
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
