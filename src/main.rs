mod config;
mod logging;
mod selection;
mod tui;

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};
use config::{Config, ConfigError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use selection::{Confirmation, Outcome, SelectionEvent, SelectionModel};
use std::io;
use tui::{
    app::App,
    handlers::{KeyEventHandler, MouseEventHandler},
    ui,
};

#[derive(Parser)]
#[command(name = "pagepick")]
#[command(about = "A TUI for picking pages with a select-all checkbox")]
struct Cli {
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..=config::MAX_PAGES as u64),
        help = "Number of pages for this run (page1..pageN)"
    )]
    pages: Option<u64>,
    #[arg(
        long = "item",
        value_name = "ID",
        global = true,
        help = "Explicit item id for this run (repeatable)"
    )]
    items: Vec<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn page_count(&self) -> Option<usize> {
        self.pages.map(|pages| pages as usize)
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Apply toggle events without the TUI and print the confirmed selection")]
    Apply {
        #[arg(
            required = true,
            help = "Events in order: 'all' toggles every page, 'done' confirms, anything else toggles that item ('item:<id>' to force)"
        )]
        events: Vec<String>,
    },
    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(about = "Generate shell completion scripts")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key (pages or all_label)")]
        key: String,
        #[arg(help = "Configuration value")]
        value: String,
    },
    #[command(about = "Get a configuration value")]
    Get {
        #[arg(help = "Configuration key")]
        key: String,
    },
    #[command(about = "List all configuration values")]
    List,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing();
    let pages = cli.page_count();

    let result = match cli.command {
        Some(Commands::Config { action }) => {
            handle_config_command(action).map_err(anyhow::Error::from)
        }
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            print_completions(shell, &mut cmd);
            Ok(())
        }
        Some(Commands::Apply { events }) => run_apply(pages, cli.items, &events),
        None => run_main_app(pages, cli.items),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn handle_config_command(action: ConfigAction) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("Configuration saved successfully.");
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for (key, value) in config.entries() {
                println!("{} = {}", key, value);
            }
        }
    }
    Ok(())
}

fn load_config(pages: Option<usize>, items: Vec<String>) -> Result<Config> {
    let config = Config::load().context("Configuration error")?;
    Ok(config.with_overrides(pages, items))
}

fn run_apply(pages: Option<usize>, items: Vec<String>, events: &[String]) -> Result<()> {
    let config = load_config(pages, items)?;
    let ids = config.page_items().into_iter().map(|item| item.id);
    let mut model = SelectionModel::new(ids)?;

    let confirmation = replay(&mut model, events)?;
    print_confirmation(&confirmation);
    Ok(())
}

/// Applies events in order. Stops at the first `done`; without one the
/// selection is confirmed after the last event.
fn replay(model: &mut SelectionModel, events: &[String]) -> Result<Confirmation> {
    for (position, raw) in events.iter().enumerate() {
        let event: SelectionEvent = match raw.parse() {
            Ok(event) => event,
            Err(never) => match never {},
        };
        let outcome = model
            .apply(&event)
            .with_context(|| format!("Event {} ('{}') rejected", position + 1, raw))?;

        if let Outcome::Confirmed(confirmation) = outcome {
            let ignored = events.len() - position - 1;
            if ignored > 0 {
                tracing::warn!(ignored, "Events after 'done' were ignored");
            }
            return Ok(confirmation);
        }
    }
    Ok(model.confirm_selection())
}

fn print_confirmation(confirmation: &Confirmation) {
    match confirmation {
        Confirmation::Empty => eprintln!("No pages selected"),
        Confirmation::Selected(ids) => {
            for id in ids {
                println!("{}", id);
            }
        }
    }
}

fn run_main_app(pages: Option<usize>, items: Vec<String>) -> Result<()> {
    let config = load_config(pages, items)?;
    let mut app = App::new(config.page_items(), config.all_label)?;
    tracing::info!(items = app.total_items(), "Starting page selector");

    run_tui(&mut app)?;

    if let Some(confirmation) = &app.confirmed {
        print_confirmation(confirmation);
    } else {
        tracing::info!("Exited without confirming");
    }

    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => app.handle_key_event(key)?,
            Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
            _ => {}
        }
        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn print_completions<G: Generator>(generator: G, cmd: &mut Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
