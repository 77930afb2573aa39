use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;

use trajscope::cli::Cli;
use trajscope::data::Trajectory;
use trajscope::persistence::config::load_config;
use trajscope::persistence::logging::init_logging;
use trajscope::tui::app::App;
use trajscope::tui::event::{poll_event, AppEvent};

/// Longest wait for input while the clock is stopped.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loaded = load_config();
    let config = loaded.config;
    let log_file = init_logging(&config.log_level);
    for warning in &loaded.warnings {
        warn!("{}", warning);
    }

    // Load before touching the terminal: a bad file ends here.
    let path = config.data_path(cli.path.as_deref());
    let trajectory = match Trajectory::load(&path, &config.column_keys()) {
        Ok(t) => t,
        Err(err) => {
            error!("{}", err);
            eprintln!("trajscope: {}", err);
            std::process::exit(1);
        }
    };
    if let Some(file) = &log_file {
        info!("logging to {}", file.display());
    }

    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = Picker::from_query_stdio().ok();

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(trajectory, &path, picker, config, Instant::now());
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Losing the terminal mid-session is an exit, not a failure.
    if let Err(err) = result {
        info!("session ended by terminal error: {}", err);
        eprintln!("User exit? Bye. ({})", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = app.session.clock().timeout(Instant::now(), IDLE_POLL);
        if let Some(event) = poll_event(timeout) {
            match event {
                AppEvent::Key(key) => {
                    app.handle_key(key, Instant::now());
                }
                AppEvent::Mouse(mouse) => {
                    app.handle_mouse(mouse, Instant::now());
                }
                AppEvent::Resize(_, _) => app.on_resize(),
                AppEvent::Tick => {}
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            info!("quit at frame {}", app.session.state().frame_index);
            break;
        }
    }

    Ok(())
}
