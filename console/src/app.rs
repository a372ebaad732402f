use std::{
    sync::mpsc,
    time::{Duration, Instant},
};

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use record::{
    PenaltyRecord,
    display::{Penalty, project},
    sheet::DataRow,
};

use crate::form::FormState;

pub const SUBMIT_OK_NOTICE: &str = "Penalità inserita";
pub const SUBMIT_ERR_NOTICE: &str = "Errore durante l'inserimento della penalità";

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Work for the provider thread.
pub enum Command {
    Submit(PenaltyRecord),
    Fetch,
}

/// Results coming back from the provider thread.
pub enum Delta {
    Submitted(Result<(), String>),
    Penalties(Result<Vec<DataRow>, String>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Screen {
    Form,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient status line, dropped again after a few seconds.
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub detail: Option<String>,
    posted: Instant,
}

pub struct App {
    pub event: String,
    pub screen: Screen,
    pub form: FormState,
    pub rows: Vec<DataRow>,
    pub penalties: Vec<Penalty>,
    pub selected: Option<usize>,
    pub detail_open: bool,
    pub submitting: bool,
    pub fetching: bool,
    pub updated_at: Option<String>,
    pub notice: Option<Notice>,
    pub should_quit: bool,
    poll_interval: Duration,
    last_fetch: Instant,
    fetch_queued: bool,
    cmd_tx: Option<mpsc::Sender<Command>>,
}

impl App {
    pub fn new(
        event: String,
        poll_interval: Duration,
        cmd_tx: Option<mpsc::Sender<Command>>,
    ) -> Self {
        App {
            event,
            screen: Screen::Form,
            form: FormState::new(),
            rows: Vec::new(),
            penalties: Vec::new(),
            selected: None,
            detail_open: false,
            submitting: false,
            fetching: false,
            updated_at: None,
            notice: None,
            should_quit: false,
            poll_interval,
            last_fetch: Instant::now(),
            fetch_queued: false,
            cmd_tx,
        }
    }

    pub fn selected_penalty(&self) -> Option<&Penalty> {
        self.penalties.get(self.selected?)
    }

    pub fn apply_delta(&mut self, delta: Delta) {
        match delta {
            Delta::Submitted(Ok(())) => {
                self.submitting = false;
                self.form.reset();
                self.post_notice(NoticeKind::Success, SUBMIT_OK_NOTICE, None);
                self.request_fetch();
            }
            Delta::Submitted(Err(detail)) => {
                self.submitting = false;
                self.post_notice(NoticeKind::Failure, SUBMIT_ERR_NOTICE, Some(detail));
            }
            Delta::Penalties(Ok(rows)) => {
                self.fetching = false;
                self.rows = rows;
                self.penalties = project(&self.rows);
                self.clamp_selection();
                self.updated_at = Some(Local::now().format("%H:%M:%S").to_string());
                self.run_queued_fetch();
            }
            // The stamp in the list header stops moving, rows stay as they were.
            Delta::Penalties(Err(_)) => {
                self.fetching = false;
                self.run_queued_fetch();
            }
        }
    }

    /// Refreshes the list on the poll interval while it is on screen.
    pub fn maybe_poll(&mut self) {
        if self.screen != Screen::List {
            return;
        }
        if self.last_fetch.elapsed() < self.poll_interval {
            return;
        }
        self.request_fetch();
    }

    pub fn request_fetch(&mut self) {
        // Fetches never overlap; a request landing mid-fetch is kept and
        // fired once the running one reports back.
        if self.fetching {
            self.fetch_queued = true;
            return;
        }
        let Some(tx) = &self.cmd_tx else {
            return;
        };
        if tx.send(Command::Fetch).is_ok() {
            self.fetching = true;
            self.last_fetch = Instant::now();
        }
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.duration_since(notice.posted) >= NOTICE_TTL {
                self.notice = None;
            }
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Form => self.on_form_key(key),
            Screen::List => self.on_list_key(key),
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                self.submit_form();
            }
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::List,
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter => {
                if self.form.focused().multiline {
                    self.form.insert('\n');
                } else {
                    self.form.focus_next();
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(ch) => self.form.insert(ch),
            _ => {}
        }
    }

    fn on_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('r') => self.request_fetch(),
            KeyCode::Char('n') => {
                self.detail_open = false;
                self.screen = Screen::Form;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.penalties.is_empty() {
                    self.selected = Some(match self.selected {
                        Some(idx) => (idx + 1).min(self.penalties.len() - 1),
                        None => 0,
                    });
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.penalties.is_empty() {
                    self.selected = Some(match self.selected {
                        Some(idx) => idx.saturating_sub(1),
                        None => 0,
                    });
                }
            }
            KeyCode::Enter => {
                if self.selected_penalty().is_some() {
                    self.detail_open = true;
                }
            }
            KeyCode::Esc => {
                if self.detail_open {
                    self.detail_open = false;
                    self.selected = None;
                } else {
                    self.screen = Screen::Form;
                }
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        if self.submitting {
            return;
        }
        let Some(record) = self.form.submit() else {
            return;
        };
        let Some(tx) = &self.cmd_tx else {
            return;
        };
        if tx.send(Command::Submit(record)).is_ok() {
            self.submitting = true;
        }
    }

    fn post_notice(&mut self, kind: NoticeKind, text: &str, detail: Option<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.to_string(),
            detail,
            posted: Instant::now(),
        });
    }

    fn run_queued_fetch(&mut self) {
        if self.fetch_queued {
            self.fetch_queued = false;
            self.request_fetch();
        }
    }

    fn clamp_selection(&mut self) {
        if self.penalties.is_empty() {
            self.selected = None;
        } else if let Some(idx) = self.selected {
            self.selected = Some(idx.min(self.penalties.len() - 1));
        }
    }
}
