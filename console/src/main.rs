use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

mod api;
mod app;
mod form;
mod ui;

use crate::api::ApiClient;
use crate::app::{App, Delta};
use crate::ui::ui;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Backend address.
    #[arg(long, default_value = "http://localhost:1111")]
    base_url: String,

    /// Seconds between list refreshes.
    #[arg(long, default_value_t = 5)]
    poll_secs: u64,

    /// Event name shown in the header.
    #[arg(long, default_value = "4 Season Summer 2021")]
    event: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    api::spawn_provider(ApiClient::new(&args.base_url), cmd_rx, tx);

    let mut app = App::new(
        args.event,
        Duration::from_secs(args.poll_secs),
        Some(cmd_tx),
    );
    app.request_fetch();
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            app.apply_delta(delta);
        }
        app.expire_notice(Instant::now());
        app.maybe_poll();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
