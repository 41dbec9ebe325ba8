mod agent;
mod app;
mod clipboard;
mod config;
mod form;
mod markdown;
mod mode;
mod ui;
mod ui_state;

use std::env;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::Config;
use ui::draw;

fn main() -> io::Result<()> {
    let config = Config::from_args(env::args().skip(1));

    // Diagnostics go to a file; the alternate screen stays clean.
    let (log_writer, _log_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(".", config.log_file));
    tracing_subscriber::fmt()
        .with_writer(log_writer)
        .with_ansi(false)
        .init();
    tracing::info!("starting against {}", config.base_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(&config, runtime.handle().clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &Config,
) -> io::Result<()> {
    loop {
        app.tick();
        app.drain_outcomes();

        terminal.draw(|frame| draw(frame, app))?;

        // Poll for events with timeout (60 FPS for smooth animation)
        if !event::poll(Duration::from_millis(config.tick_rate_ms))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('y') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.copy_result();
                }
                KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if let Some(text) = app.clipboard.read() {
                        app.paste(&text);
                    }
                }
                KeyCode::Tab => app.next_mode(),
                KeyCode::BackTab => app.prev_mode(),
                KeyCode::Enter => app.submit(),
                KeyCode::Up => app.focus_prev(),
                KeyCode::Down => app.focus_next(),
                KeyCode::Left => app.cycle_option(-1),
                KeyCode::Right => app.cycle_option(1),
                KeyCode::PageUp => app.scroll_up(),
                KeyCode::PageDown => app.scroll_down(),
                KeyCode::F(2) => app.show_raw_markdown = !app.show_raw_markdown,
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) if key.modifiers.is_empty()
                    || key.modifiers == KeyModifiers::SHIFT =>
                {
                    app.input_char(c);
                }
                _ => {}
            },
            // Bracketed paste lands here as one event.
            Event::Paste(text) => app.paste(&text),
            _ => {}
        }
    }
}
