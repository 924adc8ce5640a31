//! Terminal block grid runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `block_grid::term`.
//! Every event is handled to completion before the next one is read.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use block_grid::core::{GameConfig, Palette, Session};
use block_grid::input::{handle_key_event, mouse_click, should_quit};
use block_grid::term::{FrameBuffer, GridView, StatusView, TerminalRenderer, Viewport};
use block_grid::types::{
    Colour, GridAction, DEFAULT_HEIGHT, DEFAULT_MIN_GROUP_SIZE, DEFAULT_PALETTE, DEFAULT_WIDTH,
};

/// Colour-match block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "block-grid",
    version,
    about = "Select a block to clear every same-coloured block connected to it; the blocks above drop into place.",
    long_about = "Select a block to clear every same-coloured block connected to it; the blocks above drop into place.\n\n\
        CONTROLS:\n  Arrows/hjkl/wasd  Move cursor   Space/Enter  Select   Mouse  Click to select\n  R                 Reset grid    Q / Esc      Quit"
)]
struct Args {
    /// Grid width in columns.
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_name = "COLS")]
    width: u16,

    /// Grid height in rows.
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_name = "ROWS")]
    height: u16,

    /// Smallest group a selection clears.
    #[arg(long, default_value_t = DEFAULT_MIN_GROUP_SIZE, value_name = "N")]
    min_group: usize,

    /// RNG seed for block colours. Defaults to the current time.
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,

    /// Comma-separated palette, e.g. red,green,blue,yellow.
    #[arg(long, value_delimiter = ',', value_parser = parse_colour, value_name = "COLOURS")]
    colours: Vec<Colour>,

    /// Write logs to this file (filter with RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn parse_colour(s: &str) -> Result<Colour, String> {
    match Colour::from_str(s.trim()) {
        Some(Colour::Cleared) | None => Err(format!("unknown colour '{}'", s)),
        Some(c) => Ok(c),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = game_config(&args)?;
    let mut session = Session::new(config).context("failed to create grid")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn game_config(args: &Args) -> Result<GameConfig> {
    let colours = if args.colours.is_empty() {
        DEFAULT_PALETTE.to_vec()
    } else {
        args.colours.clone()
    };
    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(1)
    });
    Ok(GameConfig {
        width: args.width,
        height: args.height,
        min_group_size: args.min_group,
        seed,
        palette: Palette::new(colours)?,
    })
}

/// Logs go to a file because stdout belongs to the game screen.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GridView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = session.snapshot();
    let mut status = StatusView {
        min_group_size: session.config().min_group_size,
        ..StatusView::default()
    };

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        session.snapshot_into(&mut snap);
        status.resets = session.reset_count();
        view.render_into(&snap, Some(session.cursor()), Some(&status), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    info!("quit requested");
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GridAction::Select) => {
                        let (x, y) = session.cursor();
                        status.last_cleared = session.select(x, y).len();
                    }
                    Some(action) => {
                        session.apply_action(action);
                    }
                    None => {}
                }
            }
            Event::Mouse(mouse) => {
                let cell = mouse_click(mouse)
                    .and_then(|(col, row)| view.cell_at(&snap, viewport, col, row));
                if let Some((x, y)) = cell {
                    session.move_cursor(x, y);
                    status.last_cleared = session.select(x, y).len();
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
