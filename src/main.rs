use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod app;
mod error;
mod remote;
mod store;
mod task;
mod ui;

use app::App;
use error::Result as TasktabResult;
use task::Task;

#[derive(Parser)]
#[command(name = "tasktab", version, about = "Terminal task table over a remote todo feed")]
struct Cli {
    /// Endpoint for the initial task fetch
    #[arg(long, default_value = remote::DEFAULT_URL)]
    url: String,

    /// Maximum number of remote records to consume
    #[arg(long, default_value_t = remote::DEFAULT_LIMIT)]
    limit: usize,

    /// Skip the remote fetch and start with an empty list
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Kick off the one-shot fetch; the loop drains the channel between
    // key events so the table stays responsive while it is in flight.
    let mut app = App::new();
    let (tx, rx) = mpsc::channel();
    if !cli.offline {
        app.loading = true;
        remote::spawn_fetch(cli.url, cli.limit, tx);
    }

    let result = run_app(&mut terminal, &mut app, &rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    load_rx: &Receiver<TasktabResult<Vec<Task>>>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Ok(outcome) = load_rx.try_recv() {
            app.apply_load(outcome);
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
