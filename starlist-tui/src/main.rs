//! starlist-tui - Terminal UI for Starlist
//!
//! Browses the Films and Planets collections of the Star Wars API with a
//! staggered entrance animation and a search dialog.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::KeyEvent;
use libstarlist::logging::{LogFormat, LoggingConfig, LogTarget};
use libstarlist::{CollectionKind, Config};
use tui_textarea::TextArea;

use starlist_tui::{
    app::{
        event::{EventHandler, TuiEvent},
        reduce, routes_to_search_field, Action, Animations, AppState, UiConfig,
    },
    services::ServiceHandle,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui,
};

#[derive(Parser, Debug)]
#[command(name = "starlist-tui")]
#[command(version, about = "Browse Star Wars films and planets in the terminal")]
#[command(long_about = r#"Browse Star Wars films and planets in the terminal.

KEYS:
    Tab / Shift+Tab   Switch between Films and Planets
    F1 / F2           Show Films / Planets
    Enter             Search (or close the search dialog)
    Esc               Close the search dialog
    Up / Down         Scroll the list
    Ctrl+C            Quit

CONFIGURATION:
    Read from $STARLIST_CONFIG or ~/.config/starlist/config.toml.
    Logs go to ~/.local/share/starlist/starlist.log unless [logging] file is set.
"#)]
struct Cli {
    /// Screen to show first
    #[arg(long, default_value = "films")]
    screen: CollectionKind,

    /// Configuration file (overrides STARLIST_CONFIG)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Listing API base URL
    #[arg(long, env = "STARLIST_BASE_URL")]
    base_url: Option<String>,

    /// Serve built-in demo data instead of calling the API
    #[arg(long)]
    offline: bool,

    /// Log format: text, json or pretty
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("starlist-tui: {:#}", e);
        let code = e
            .downcast_ref::<starlist_tui::TuiError>()
            .map(|err| err.exit_code())
            .or_else(|| e.downcast_ref::<libstarlist::StarlistError>().map(|err| err.exit_code()))
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_env_overrides(),
        None => Config::load().context("Failed to load config")?,
    };

    init_logging(&cli, &config)?;

    let services = if cli.offline {
        ServiceHandle::offline()?
    } else {
        let base_url = cli.base_url.as_deref().unwrap_or(&config.api.base_url);
        ServiceHandle::new(base_url)?
    };

    tracing::info!(screen = %cli.screen, offline = cli.offline, "Starting starlist-tui");

    let state = AppState::with_screen(cli.screen, UiConfig::from(&config.ui));

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, state, services);
    restore_terminal(terminal)?;

    result
}

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let format = match cli.log_format {
        Some(format) => format,
        None => config
            .logging
            .format
            .parse()
            .map_err(anyhow::Error::msg)
            .context("Invalid [logging] format")?,
    };
    let target = LogTarget::File(config.log_file_path()?);

    LoggingConfig::new(format, config.logging.level.clone(), cli.verbose)
        .with_target(target)
        .init()?;
    Ok(())
}

fn new_search_field(state: &AppState) -> TextArea<'static> {
    let text = state.current_search_text();
    let mut textarea = if text.is_empty() {
        TextArea::default()
    } else {
        TextArea::from([text.to_string()])
    };
    ui::style_search_field(&mut textarea, state.current_screen, state.config.colors_enabled);
    textarea.move_cursor(tui_textarea::CursorMove::End);
    textarea
}

fn run_app(terminal: &mut Tui, mut state: AppState, mut services: ServiceHandle) -> Result<()> {
    let mut animations = Animations::new();
    let mut search = new_search_field(&state);
    let event_handler = EventHandler::new(state.config.tick_rate_ms);
    let mut dirty = true;
    let mut was_animating = false;

    loop {
        // Mount: the first render of a screen starts its single fetch
        for kind in state.mounted_kinds() {
            if services.ensure_mounted(kind) {
                tracing::debug!(screen = %kind, "Screen mounted");
            }
        }

        for outcome in services.drain_outcomes() {
            state = reduce(state, outcome.into());
            dirty = true;
        }

        let now = Instant::now();
        animations.sync(&state, now);

        // Idle ticks skip drawing; one extra frame lands rows on their final position
        let animating = animations.needs_redraw(now);
        if dirty || animating || was_animating {
            terminal.draw(|frame| {
                ui::render(frame, &state, &search, &animations, now);
            })?;
        }
        was_animating = animating;

        let event = event_handler.next()?;
        dirty = !matches!(event, TuiEvent::Tick);
        let action = match event {
            TuiEvent::Key(key) if routes_to_search_field(&state, &key) => {
                edit_search_field(&mut search, key)
            }
            other => other.into(),
        };

        let previous_screen = state.current_screen;
        state = reduce(state, action);

        // Each screen keeps its own search text
        if state.current_screen != previous_screen {
            search = new_search_field(&state);
        }

        if state.should_quit {
            break;
        }
    }

    services.shutdown();
    Ok(())
}

/// Feed a key to the search field and report its new contents
fn edit_search_field(search: &mut TextArea<'static>, key: KeyEvent) -> Action {
    search.input(key);
    Action::SearchTextChanged(search.lines().join(""))
}
