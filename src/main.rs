mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};

use space_fighter::assets::{load_background, AssetStore, Background};
use space_fighter::compute::{
    new_session, restart, return_to_menu, start, tick, FrameInput, Hud,
};
use space_fighter::config::{frame_for_fps, GameConfig, SessionConfig, DEFAULT_FPS};
use space_fighter::entities::{
    BackgroundId, GameSession, PersistMode, Phase, FIELD_HEIGHT, FIELD_WIDTH,
};
use space_fighter::logger;
use space_fighter::render::draw_frame;

use display::TerminalSurface;

/// Field units the pointer moves per arrow / WASD key press.
const POINTER_NUDGE: f64 = 40.0;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WeaponMode {
    /// Boosts last until a life is lost
    Permanent,
    /// Each boost level expires after 15 seconds
    Timed,
}

#[derive(Parser, Debug)]
#[command(name = "space_fighter", about = "Pointer-driven arcade shooter for the terminal")]
struct Cli {
    #[arg(long, value_enum, default_value_t = WeaponMode::Permanent)]
    weapon_mode: WeaponMode,

    /// Background image file name, or "default" for the starfield
    #[arg(long, default_value = "default")]
    background: String,

    /// Directory holding player.png, enemy1.png and enemy2.png
    #[arg(long, default_value_os_t = GameConfig::default().asset_dir)]
    assets: PathBuf,

    /// Directory holding background images
    #[arg(long, default_value_os_t = GameConfig::default().background_dir)]
    backgrounds: PathBuf,

    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    #[arg(long, default_value_os_t = GameConfig::default().log_file)]
    log_file: PathBuf,
}

impl Cli {
    fn into_config(self) -> GameConfig {
        let persist_mode = match self.weapon_mode {
            WeaponMode::Permanent => PersistMode::Permanent,
            WeaponMode::Timed => PersistMode::Timed,
        };
        GameConfig {
            session: SessionConfig {
                persist_mode,
                background: BackgroundId::from_name(&self.background),
            },
            asset_dir: self.assets,
            background_dir: self.backgrounds,
            frame: frame_for_fps(self.fps),
            log_file: self.log_file,
        }
    }
}

// ── Key bindings ──────────────────────────────────────────────────────────────

enum Command {
    Quit,
    Start,
    Restart,
    Menu,
    ToggleWeaponMode,
    ToggleInstructions,
    Bomb,
    TogglePause,
    Nudge(f64, f64),
    Nothing,
}

fn command_for(code: KeyCode, modifiers: KeyModifiers, phase: Phase) -> Command {
    if let KeyCode::Char('c') = code {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return Command::Quit;
        }
    }
    match (phase, code) {
        (_, KeyCode::Char('q') | KeyCode::Char('Q')) => Command::Quit,

        (Phase::Menu, KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S')) => Command::Start,
        (Phase::Menu, KeyCode::Char('w') | KeyCode::Char('W')) => Command::ToggleWeaponMode,
        (Phase::Menu, KeyCode::Char('i') | KeyCode::Char('I')) => Command::ToggleInstructions,
        (Phase::Menu, KeyCode::Esc) => Command::Quit,

        (Phase::Playing, KeyCode::Char(' ')) => Command::Bomb,
        (Phase::Playing | Phase::Paused, KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P')) => {
            Command::TogglePause
        }
        (Phase::Paused | Phase::GameOver, KeyCode::Char('m') | KeyCode::Char('M')) => Command::Menu,
        (Phase::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => Command::Restart,

        (Phase::Playing, KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A')) => {
            Command::Nudge(-POINTER_NUDGE, 0.0)
        }
        (Phase::Playing, KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D')) => {
            Command::Nudge(POINTER_NUDGE, 0.0)
        }
        (Phase::Playing, KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W')) => {
            Command::Nudge(0.0, -POINTER_NUDGE)
        }
        (Phase::Playing, KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')) => {
            Command::Nudge(0.0, POINTER_NUDGE)
        }
        _ => Command::Nothing,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Start a session, loading the selected background first.  A background
/// that fails to load falls back to the starfield for this and later games.
fn begin(
    state: &GameSession,
    settings: &mut SessionConfig,
    config: &GameConfig,
) -> (GameSession, Background) {
    let (background, resolved) = load_background(&settings.background, &config.background_dir);
    settings.background = resolved;
    (start(state, settings), background)
}

/// Runs the frame scheduler until the player quits.
///
/// Input is drained from the channel without blocking: mouse movement
/// becomes the frame's pointer, keys become session commands or discrete
/// actions for `tick`.  Elapsed time is measured every frame, whatever the
/// phase, so resuming from pause never produces a huge delta.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    assets: &AssetStore,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();
    let mut settings = config.session.clone();
    let mut state = new_session(&settings);
    let mut background = Background::Starfield;
    let mut show_instructions = false;

    let (mut width, mut height) = terminal::size()?;
    let mut surface = TerminalSurface::new(width, height);

    // The menu is drawn over whatever is on screen, so clear it only when
    // its contents change.
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let clock = Instant::now();
    let mut last_frame: Option<Instant> = None;

    loop {
        let frame_start = Instant::now();

        let (w, h) = terminal::size()?;
        if !surface.fits(w, h) {
            surface = TerminalSurface::new(w, h);
            out.queue(terminal::Clear(terminal::ClearType::All))?;
        }
        (width, height) = (w, h);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                    column,
                    row,
                    ..
                }) => {
                    input.pointer = Some(surface.cell_to_field(column, row));
                }
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match command_for(code, modifiers, state.phase) {
                    Command::Quit => return Ok(()),
                    Command::Start => {
                        (state, background) = begin(&state, &mut settings, config);
                        show_instructions = false;
                        out.queue(terminal::Clear(terminal::ClearType::All))?;
                    }
                    Command::Restart => {
                        state = restart(&state);
                    }
                    Command::Menu => {
                        state = return_to_menu(&state);
                        out.queue(terminal::Clear(terminal::ClearType::All))?;
                    }
                    Command::ToggleWeaponMode => {
                        settings.persist_mode = match settings.persist_mode {
                            PersistMode::Permanent => PersistMode::Timed,
                            PersistMode::Timed => PersistMode::Permanent,
                        };
                        out.queue(terminal::Clear(terminal::ClearType::All))?;
                    }
                    Command::ToggleInstructions => {
                        show_instructions = !show_instructions;
                        out.queue(terminal::Clear(terminal::ClearType::All))?;
                    }
                    Command::Bomb => input.use_bomb = true,
                    Command::TogglePause => input.toggle_pause = !input.toggle_pause,
                    Command::Nudge(dx, dy) => {
                        let (x, y) = input.pointer.unwrap_or(state.pointer);
                        input.pointer = Some((
                            (x + dx).clamp(0.0, FIELD_WIDTH),
                            (y + dy).clamp(0.0, FIELD_HEIGHT),
                        ));
                    }
                    Command::Nothing => {}
                },
                _ => {}
            }
        }

        let dt = last_frame.map(|t| frame_start.duration_since(t).as_secs_f64() * 1000.0);
        last_frame = Some(frame_start);

        state = tick(&state, &input, dt, &mut rng);

        // ── Draw ──────────────────────────────────────────────────────────────
        if state.phase == Phase::Menu {
            display::draw_menu(out, &settings, show_instructions, width, height)?;
        } else {
            let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
            draw_frame(&mut surface, &state, assets, &background, now_ms);
            surface.flush(out)?;

            let hud = Hud::from_session(&state);
            display::draw_hud(out, &hud, width)?;
            display::draw_controls_hint(out, height)?;
            match state.phase {
                Phase::Paused => display::draw_pause(out, width, height)?,
                Phase::GameOver => display::draw_game_over(out, &hud, width, height)?,
                _ => {}
            }
        }
        out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
        out.flush()?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    logger::init(&config.log_file).context("failed to initialise logging")?;

    // Every sprite settles (loaded or failed) before the first frame.
    let assets = AssetStore::load_all(&config.asset_dir);
    for (file, loaded) in assets.status() {
        if loaded {
            info!(sprite = file, "asset ready");
        } else {
            warn!(sprite = file, "asset missing, drawing fallback shapes");
        }
    }
    debug_assert!(assets.is_ready());

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, &assets);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result
}
