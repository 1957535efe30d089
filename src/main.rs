use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ionquiz::{
    app::{App, KeyOutcome},
    app_dirs::AppDirs,
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    engine::QuizEngine,
    logging,
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner},
    session::{QuestionCount, QuizMode},
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, warn};

const TICK_RATE_MS: u64 = 100;

/// practise naming cations and anions from their formulas
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal quiz for learning the names of common cations and anions. Each question shows a formula and asks for the ion's name."
)]
pub struct Cli {
    /// start directly in this quiz mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<QuizMode>,

    /// number of questions (a number or "all"); used together with --mode
    #[clap(short = 'n', long)]
    count: Option<QuestionCount>,

    /// print the ion catalog (filtered by --mode) and exit
    #[clap(long)]
    list: bool,

    /// append finished quizzes to the results log
    #[clap(long)]
    log_results: bool,

    /// write trace output here when IONQUIZ_LOG is set
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// save the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Apply command line overrides on top of the stored config.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(mode) = self.mode {
            config.default_mode = Some(mode);
        }
        if self.log_results {
            config.log_results = true;
        }
        config
    }
}

fn print_catalog(catalog: &Catalog, mode: Option<QuizMode>, out: &mut impl Write) -> io::Result<()> {
    let formulas = match mode {
        Some(mode) => mode.candidates(catalog),
        None => catalog.all_formulas(),
    };
    for entry in formulas
        .into_iter()
        .filter_map(|formula| catalog.lookup(formula).ok())
    {
        writeln!(out, "{}\t{}", entry.formula, entry.accepted_names.iter().join(", "))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::trace_log_path);
    if let Err(e) = logging::init(&log_path) {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::Io,
            format!("cannot open log file {}: {e}", log_path.display()),
        )
        .exit();
    }

    let catalog = Catalog::builtin()?;

    if cli.list {
        print_catalog(&catalog, cli.mode, &mut io::stdout().lock())?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.apply_to(store.load());
    if cli.save_config {
        if let Err(e) = store.save(&config) {
            warn!(path = %store.path().display(), error = %e, "failed to save config");
        }
    }
    info!(?config, "starting");

    let mut app = App::new(QuizEngine::new(catalog), config.clone());
    if let Some(mode) = cli.mode.or(config.default_mode) {
        // A count only applies to a mode named on the command line
        let count = cli.mode.and(cli.count);
        app.start(mode, count);
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {
                if app.celebration.is_active {
                    app.on_tick();
                    terminal.draw(|f| f.render_widget(&*app, f.area()))?;
                }
            }
            QuizEvent::Resize => {
                let size = terminal.size()?;
                app.set_viewport(size.width, size.height);
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
            QuizEvent::Key(key) => {
                if app.on_key(key) == KeyOutcome::Quit {
                    break;
                }
                terminal.draw(|f| f.render_widget(&*app, f.area()))?;
            }
        }
    }

    Ok(())
}
