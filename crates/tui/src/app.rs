use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hosta_core::{
    format::{
        format_date, format_time, parse_date, parse_number, parse_simulation_date, parse_time,
    },
    Account, HotelError, Hotel, Person, Reservation, Room, RoomStatus, RoomType,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    form::{FormKind, FormModal},
    menu::{MenuAction, Screen},
};

const TICK_RATE: Duration = Duration::from_millis(250);
/// Literal a client must type to delete their own account.
const DELETE_ACCOUNT_TOKEN: &str = "STERGE";
const DELETE_CLIENT_ANSWERS: [&str; 2] = ["da", "yes"];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Output {
    title: String,
    lines: Vec<String>,
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Menu-driven front desk shell.
pub struct HotelApp {
    hotel: Hotel,
    screen: Screen,
    menu_cursor: usize,
    session: Option<Account>,
    form: Option<FormModal>,
    output: Option<Output>,
    status: String,
    status_kind: StatusKind,
    theme: Theme,
    should_quit: bool,
}

impl HotelApp {
    pub fn new(hotel: Hotel) -> Self {
        Self {
            hotel,
            screen: Screen::Main,
            menu_cursor: 0,
            session: None,
            form: None,
            output: None,
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // the hotel date is chosen before anything else
        self.form = Some(self.change_date_form());

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let result = loop {
            if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
                break Err(err).context("failed to draw frame");
            }
            if self.should_quit {
                break Ok(());
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) || self.should_quit {
                break Ok(());
            }
        };

        restore_terminal(&mut terminal)?;
        info!("shell exited");
        result
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                self.handle_key(key);
                true
            }
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn set_status(&mut self, kind: StatusKind, message: impl Into<String>) {
        self.status_kind = kind;
        self.status = message.into();
    }

    fn report_error(&mut self, err: &HotelError) {
        warn!(kind = ?err.kind(), %err, "operation refused");
        self.set_status(StatusKind::Error, format!("{:?}: {err}", err.kind()));
    }

    fn show_output(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.output = Some(Output {
            title: title.into(),
            lines,
        });
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.menu_cursor = 0;
        self.output = None;
    }

    fn session_username(&self) -> String {
        self.session
            .as_ref()
            .map(|account| account.username().to_string())
            .unwrap_or_default()
    }

    // --- input ---

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.form.is_some() {
            self.handle_form_key(key);
        } else {
            self.handle_menu_key(key);
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let items = self.screen.items();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1) % items.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.menu_cursor = (self.menu_cursor + items.len() - 1) % items.len();
            }
            KeyCode::Enter => {
                if let Some((_, action)) = items.get(self.menu_cursor) {
                    self.activate(*action);
                }
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
                let index = (ch as usize) - ('1' as usize);
                if let Some((_, action)) = items.get(index) {
                    self.menu_cursor = index;
                    self.activate(*action);
                }
            }
            KeyCode::Esc => {
                if let Some(parent) = self.screen.parent() {
                    self.switch_screen(parent);
                } else {
                    self.output = None;
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
                self.set_status(StatusKind::Info, "Cancelled");
            }
            KeyCode::Enter => {
                if !form.next_field() {
                    if let Some(form) = self.form.take() {
                        self.submit_form(form);
                    }
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Left => form.move_cursor(-1),
            KeyCode::Right => form.move_cursor(1),
            KeyCode::Home => form.move_home(),
            KeyCode::End => form.move_end(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Delete => form.delete(),
            KeyCode::Char(ch) => form.insert(ch),
            _ => {}
        }
    }

    // --- menu actions ---

    fn activate(&mut self, action: MenuAction) {
        debug!(?action, screen = ?self.screen, "menu action");
        match action {
            MenuAction::Login => {
                self.form = Some(
                    FormModal::new(FormKind::Login, "Login", &["Username", "Password"])
                        .masked("Password"),
                );
            }
            MenuAction::Register => {
                self.form = Some(
                    FormModal::new(
                        FormKind::Register,
                        "Register",
                        &["First name", "Last name", "Age (18+)", "Username", "Password"],
                    )
                    .masked("Password"),
                );
            }
            MenuAction::ChangeDate => self.form = Some(self.change_date_form()),
            MenuAction::Exit => self.should_quit = true,
            MenuAction::Open(screen) => self.switch_screen(screen),
            MenuAction::Back => {
                let parent = self.screen.parent().unwrap_or(self.screen);
                self.switch_screen(parent);
            }
            MenuAction::Logout => {
                if let Some(account) = self.session.take() {
                    info!(username = account.username(), "logged out");
                }
                self.switch_screen(Screen::Main);
                self.set_status(StatusKind::Info, "Logged out");
            }
            MenuAction::AddRoom => {
                self.form = Some(
                    FormModal::new(
                        FormKind::AddRoom,
                        "Add room",
                        &["Room number", "Type", "Price per night"],
                    )
                    .with_hint("Type: 1. Single | 2. Double | 3. Suite"),
                );
            }
            MenuAction::RemoveRoom => {
                self.form = Some(FormModal::new(
                    FormKind::RemoveRoom,
                    "Remove room",
                    &["Room number"],
                ));
            }
            MenuAction::SetRoomStatus => {
                self.form = Some(
                    FormModal::new(
                        FormKind::SetRoomStatus,
                        "Change room status",
                        &["Room number", "New status"],
                    )
                    .with_hint(format!("Statuses: {}", RoomStatus::KNOWN.join(", "))),
                );
            }
            MenuAction::ListRooms => {
                let lines = self.hotel.rooms().iter().map(room_line).collect();
                self.show_output("Rooms", lines);
            }
            MenuAction::HireCleaner => {
                self.form = Some(
                    FormModal::new(
                        FormKind::HireCleaner,
                        "Hire cleaner",
                        &["First name", "Last name", "Username", "Password"],
                    )
                    .masked("Password"),
                );
            }
            MenuAction::FireCleaner => {
                self.form = Some(FormModal::new(
                    FormKind::FireCleaner,
                    "Fire cleaner",
                    &["Username"],
                ));
            }
            MenuAction::ListCleaners => {
                let lines = self.hotel.cleaners().iter().map(person_line).collect();
                self.show_output("Cleaners", lines);
            }
            MenuAction::SetCheckIn => {
                self.form = Some(
                    FormModal::new(FormKind::SetCheckIn, "Check-in start", &["New time (HH:mm)"])
                        .with_hint(format!(
                            "Current: {}",
                            format_time(self.hotel.check_in_start())
                        )),
                );
            }
            MenuAction::SetCheckOut => {
                self.form = Some(
                    FormModal::new(
                        FormKind::SetCheckOut,
                        "Check-out limit",
                        &["New time (HH:mm)"],
                    )
                    .with_hint(format!(
                        "Current: {}",
                        format_time(self.hotel.check_out_limit())
                    )),
                );
            }
            MenuAction::ClientReservations => {
                self.form = Some(FormModal::new(
                    FormKind::ClientReservations,
                    "Client reservations",
                    &["Client username"],
                ));
            }
            MenuAction::AdminCancel => {
                self.form = Some(FormModal::new(
                    FormKind::AdminCancel,
                    "Cancel reservation",
                    &["Client username", "Room number"],
                ));
            }
            MenuAction::AdminChangePeriod => {
                self.form = Some(FormModal::new(
                    FormKind::AdminChangePeriod,
                    "Change reservation period",
                    &[
                        "Client username",
                        "Room number",
                        "Start (dd-mm-yyyy)",
                        "End (dd-mm-yyyy)",
                    ],
                ));
            }
            MenuAction::AdminForceCheckIn => {
                self.form = Some(FormModal::new(
                    FormKind::AdminForceCheckIn,
                    "Force check-in",
                    &["Client username", "Room number"],
                ));
            }
            MenuAction::DeleteClient => {
                self.form = Some(
                    FormModal::new(
                        FormKind::DeleteClient,
                        "Delete client account",
                        &["Client username", "Continue? (da/nu)"],
                    )
                    .with_hint("Historical reservations are deleted as well."),
                );
            }
            MenuAction::FreeRooms => {
                let lines = self.hotel.free_rooms().iter().map(room_line).collect();
                self.show_output("Available rooms", lines);
            }
            MenuAction::Book => {
                self.form = Some(FormModal::new(
                    FormKind::Book,
                    "Book a room",
                    &["Room number", "Start date (dd-mm-yyyy)", "Nights"],
                ));
            }
            MenuAction::SelfCheckIn => {
                let ready = self
                    .hotel
                    .reservations_for_check_in(&self.session_username());
                if ready.is_empty() {
                    self.set_status(
                        StatusKind::Info,
                        "You have no reservations valid for check-in today.",
                    );
                } else {
                    let lines = ready.iter().map(reservation_line).collect();
                    self.show_output("Reservations ready for check-in", lines);
                    self.form = Some(FormModal::new(
                        FormKind::SelfCheckIn,
                        "Self check-in",
                        &["Room number"],
                    ));
                }
            }
            MenuAction::SelfCheckOut => {
                let staying = self
                    .hotel
                    .reservations_for_check_out(&self.session_username());
                if staying.is_empty() {
                    self.set_status(StatusKind::Info, "You are not checked in to any room.");
                } else {
                    let lines = staying.iter().map(reservation_line).collect();
                    self.show_output("Occupied rooms", lines);
                    self.form = Some(FormModal::new(
                        FormKind::SelfCheckOut,
                        "Self check-out",
                        &["Room number"],
                    ));
                }
            }
            MenuAction::History => {
                let history = self.hotel.client_reservations(&self.session_username());
                let lines = history.iter().map(reservation_line).collect();
                self.show_output("My reservations", lines);
            }
            MenuAction::Cancel => {
                self.form = Some(FormModal::new(
                    FormKind::Cancel,
                    "Cancel a reservation",
                    &["Room number"],
                ));
            }
            MenuAction::DeleteAccount => {
                self.form = Some(
                    FormModal::new(FormKind::DeleteAccount, "Delete my account", &["Confirm"])
                        .with_hint(format!(
                            "WARNING: this cannot be undone. Type '{DELETE_ACCOUNT_TOKEN}' to confirm."
                        )),
                );
            }
            MenuAction::DirtyRooms => {
                let dirty = self.hotel.dirty_rooms();
                if dirty.is_empty() {
                    self.set_status(StatusKind::Info, "Everything is clean.");
                    self.output = None;
                } else {
                    let lines = dirty
                        .iter()
                        .map(|room| format!("Room {}", room.number))
                        .collect();
                    self.show_output("Rooms to clean", lines);
                }
            }
            MenuAction::CleanRoom => {
                self.form = Some(FormModal::new(
                    FormKind::CleanRoom,
                    "Mark room cleaned",
                    &["Room number"],
                ));
            }
        }
    }

    fn change_date_form(&self) -> FormModal {
        FormModal::new(FormKind::ChangeDate, "Hotel date", &["New date (dd-mm-yyyy)"]).with_hint(
            format!(
                "Current hotel date: {}. Leave empty to use today.",
                format_date(self.hotel.current_date())
            ),
        )
    }

    // --- form submission ---

    fn submit_form(&mut self, form: FormModal) {
        match form.kind {
            FormKind::Login => self.login(&form),
            FormKind::ChangeDate => self.change_date(&form),
            _ => match self.apply_form(&form) {
                Ok(message) => self.set_status(StatusKind::Success, message),
                Err(err) => self.report_error(&err),
            },
        }
    }

    fn login(&mut self, form: &FormModal) {
        let username = form.value(0).trim();
        match self.hotel.authenticate(username, form.value(1)) {
            Some(account) => {
                let person = account.person();
                info!(username = %person.username, role = %account.role(), "logged in");
                let greeting = format!("Welcome, {}!", person.first_name);
                self.switch_screen(Screen::for_role(account.role()));
                self.session = Some(account);
                self.set_status(StatusKind::Success, greeting);
            }
            None => {
                warn!(username, "failed login");
                self.set_status(StatusKind::Error, "Wrong username or password.");
            }
        }
    }

    fn change_date(&mut self, form: &FormModal) {
        let input = form.value(0).trim();
        if input.is_empty() {
            self.hotel.reset_simulation_date();
            self.set_status(StatusKind::Success, "Using today's date.");
            return;
        }
        match parse_simulation_date(input) {
            Ok(date) => {
                self.hotel.set_simulation_date(date);
                self.set_status(StatusKind::Success, "Hotel date updated.");
            }
            Err(err @ HotelError::YearOutOfRange(_)) => self.report_error(&err),
            Err(err) => {
                warn!(%err, "unparseable hotel date; falling back to today");
                self.hotel.reset_simulation_date();
                self.set_status(StatusKind::Warning, "Invalid format. Using today's date.");
            }
        }
    }

    fn apply_form(&mut self, form: &FormModal) -> Result<String, HotelError> {
        let field = |index: usize| form.value(index).trim();
        match form.kind {
            FormKind::Register => {
                let age = parse_number(field(2))?;
                self.hotel
                    .register_client(field(0), field(1), age, field(3), form.value(4))?;
                Ok("Account created. You can now log in.".to_string())
            }
            FormKind::AddRoom => {
                let number = parse_number(field(0))?;
                let room_type = parse_room_type(field(1))?;
                let price = parse_number(field(2))?;
                self.hotel.add_room(number, room_type, price)?;
                Ok(format!("Room {number} ({room_type}) added."))
            }
            FormKind::RemoveRoom => {
                let number = parse_number(field(0))?;
                self.hotel.remove_room(number)?;
                Ok(format!("Room {number} removed."))
            }
            FormKind::SetRoomStatus => {
                let number = parse_number(field(0))?;
                self.hotel.set_room_status(number, form.value(1))?;
                Ok(format!("Room {number} is now '{}'.", form.value(1)))
            }
            FormKind::HireCleaner => {
                self.hotel
                    .add_cleaner(field(0), field(1), field(2), form.value(3))?;
                Ok(format!("Cleaner {} hired.", field(2)))
            }
            FormKind::FireCleaner => {
                self.hotel.remove_cleaner(field(0));
                Ok(format!("Cleaner {} is no longer on staff.", field(0)))
            }
            FormKind::SetCheckIn => {
                let time = parse_time(field(0))?;
                self.hotel.update_check_in_time(time);
                Ok(format!("Check-in now starts at {}.", format_time(time)))
            }
            FormKind::SetCheckOut => {
                let time = parse_time(field(0))?;
                self.hotel.update_check_out_time(time);
                Ok(format!("Check-out limit is now {}.", format_time(time)))
            }
            FormKind::ClientReservations => {
                let username = field(0);
                let reservations = self.hotel.client_reservations(username);
                let count = reservations.len();
                let lines = reservations.iter().map(reservation_line).collect();
                self.show_output(format!("Reservations of {username}"), lines);
                Ok(format!("{count} reservation(s) found for {username}."))
            }
            FormKind::AdminCancel => {
                let room = parse_number(field(1))?;
                self.hotel.admin_cancel_reservation(field(0), room)?;
                Ok("Reservation cancelled.".to_string())
            }
            FormKind::AdminChangePeriod => {
                let room = parse_number(field(1))?;
                let start = parse_date(field(2))?;
                let end = parse_date(field(3))?;
                self.hotel
                    .admin_change_reservation_period(field(0), room, start, end)?;
                Ok("Reservation period changed.".to_string())
            }
            FormKind::AdminForceCheckIn => {
                let room = parse_number(field(1))?;
                self.hotel.admin_force_check_in(field(0), room)?;
                Ok("Forced check-in done.".to_string())
            }
            FormKind::DeleteClient => {
                let answer = field(1).to_lowercase();
                if !DELETE_CLIENT_ANSWERS.contains(&answer.as_str()) {
                    return Ok("Deletion cancelled.".to_string());
                }
                self.hotel.admin_delete_client(field(0))?;
                Ok(format!("Client {} deleted.", field(0)))
            }
            FormKind::Book => {
                let room = parse_number(field(0))?;
                let start = parse_date(field(1))?;
                let nights = parse_number(field(2))?;
                let username = self.session_username();
                self.hotel.make_reservation(&username, room, start, nights)?;
                Ok("Reservation confirmed!".to_string())
            }
            FormKind::SelfCheckIn => {
                let room = parse_number(field(0))?;
                let username = self.session_username();
                self.hotel.self_check_in(&username, room)?;
                self.output = None;
                Ok("Welcome! You are checked in.".to_string())
            }
            FormKind::SelfCheckOut => {
                let room = parse_number(field(0))?;
                let username = self.session_username();
                self.hotel.self_check_out(&username, room)?;
                self.output = None;
                Ok("Goodbye! You are checked out.".to_string())
            }
            FormKind::Cancel => {
                let room = parse_number(field(0))?;
                let username = self.session_username();
                self.hotel.cancel_reservation(&username, room)?;
                Ok("Your reservation was cancelled.".to_string())
            }
            FormKind::DeleteAccount => {
                if form.value(0) != DELETE_ACCOUNT_TOKEN {
                    return Ok("Not confirmed. Your account stays active.".to_string());
                }
                let username = self.session_username();
                self.hotel.delete_self_account(&username)?;
                self.session = None;
                self.switch_screen(Screen::Main);
                Ok("Your account was deleted. Goodbye.".to_string())
            }
            FormKind::CleanRoom => {
                let room = parse_number(field(0))?;
                self.hotel.clean_room(room)?;
                Ok(format!("Room {room} marked free."))
            }
            FormKind::Login | FormKind::ChangeDate => Ok(String::new()),
        }
    }

    // --- drawing ---

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(20)])
            .split(chunks[1]);
        self.render_menu(frame, body[0]);
        self.render_output(frame, body[1]);
        self.render_status(frame, chunks[2]);

        if let Some(form) = &self.form {
            self.render_form(frame, form);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut title = format!("HOSTA HOTEL - {}", self.screen.title());
        if let Some(account) = &self.session {
            title.push_str(&format!(": {}", account.person().display_name()));
        }
        let clock = format!(
            "[DATE] {} (simulated)   [TIME] {} (real)   check-in from {}, check-out by {}",
            format_date(self.hotel.current_date()),
            format_time(self.hotel.wall_clock_time()),
            format_time(self.hotel.check_in_start()),
            format_time(self.hotel.check_out_limit()),
        );
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(clock, Style::default().fg(self.theme.muted))),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_menu(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .screen
            .items()
            .iter()
            .enumerate()
            .map(|(idx, (label, _))| {
                if idx == self.menu_cursor {
                    Line::from(Span::styled(
                        format!("▶ {}. {label}", idx + 1),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}. {label}", idx + 1),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        let menu = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Menu"));
        frame.render_widget(menu, area);
    }

    fn render_output(&self, frame: &mut Frame, area: Rect) {
        let (title, lines) = match &self.output {
            Some(output) if output.lines.is_empty() => {
                (output.title.clone(), vec![Line::from("Nothing found.")])
            }
            Some(output) => (
                output.title.clone(),
                output.lines.iter().map(|l| Line::from(l.clone())).collect(),
            ),
            None => (
                "Details".to_string(),
                vec![Line::from(Span::styled(
                    "↑/↓ or j/k to move, Enter or a digit to choose, Esc to go back, Ctrl-C to quit",
                    Style::default().fg(self.theme.muted),
                ))],
            ),
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let color = match self.status_kind {
            StatusKind::Info => self.theme.primary_fg,
            StatusKind::Success => self.theme.success,
            StatusKind::Warning => self.theme.warning,
            StatusKind::Error => self.theme.danger,
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            self.status.clone(),
            Style::default().fg(color),
        )))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_form(&self, frame: &mut Frame, form: &FormModal) {
        let frame_area = frame.size();
        let hint_rows = u16::from(form.hint.is_some()) * 2;
        let height = (form.fields.len() as u16 + hint_rows + 4).min(frame_area.height);
        let width = 64_u16.min(frame_area.width.saturating_sub(2)).max(24);
        let area = centered_rect(width, height, frame_area);
        frame.render_widget(Clear, area);

        let mut lines = Vec::new();
        if let Some(hint) = &form.hint {
            lines.push(Line::from(Span::styled(
                hint.clone(),
                Style::default().fg(self.theme.warning),
            )));
            lines.push(Line::from(""));
        }
        for (idx, field) in form.fields.iter().enumerate() {
            let focused = idx == form.focus;
            let marker = if focused { "> " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker}{}: ", field.label), label_style),
                Span::raw(FormModal::display(field)),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" next/submit  "),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" switch  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(form.title.clone()));
        frame.render_widget(paragraph, area);

        if let Some(field) = form.fields.get(form.focus) {
            let prefix = 2 + field.label.len() as u16 + 2;
            let cursor_x = (area.x + 1 + prefix + form.cursor as u16)
                .min(area.x + area.width.saturating_sub(2));
            let cursor_y = area.y + 1 + hint_rows + form.focus as u16;
            frame.set_cursor(cursor_x, cursor_y);
        }
    }
}

fn parse_room_type(input: &str) -> Result<RoomType, HotelError> {
    match input {
        "1" => Ok(RoomType::Single),
        "2" => Ok(RoomType::Double),
        "3" => Ok(RoomType::Suite),
        other => other.parse(),
    }
}

fn room_line(room: &Room) -> String {
    format!(
        "{} - {} - {} - {} / night",
        room.number, room.room_type, room.status, room.price_per_night
    )
}

fn person_line(person: &Person) -> String {
    format!("{} ({})", person.display_name(), person.username)
}

fn reservation_line(reservation: &Reservation) -> String {
    format!(
        "Room {} | {} - {} | {} night(s) | In: {} | Out: {}",
        reservation.room_number,
        format_date(reservation.start_date),
        format_date(reservation.end_date),
        reservation.nights(),
        yes_no(reservation.is_checked_in),
        yes_no(reservation.is_checked_out),
    )
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}
