use std::fs::File;
use std::io::{stdout, BufWriter, Stdout};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ship_duel::config::Config;
use ship_duel::display::{Surface, TerminalSurface};
use ship_duel::entities::GameStatus;
use ship_duel::game::Game;
use ship_duel::keyboard::{Control, Keyboard};

type Screen = TerminalSurface<BufWriter<Stdout>>;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Tick at a fixed rate while the round runs; once it is over, block on
/// input until the player restarts or quits.
fn game_loop(
    screen: &mut Screen,
    game: &mut Game<StdRng>,
    keyboard: &mut Keyboard,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> anyhow::Result<()> {
    loop {
        if game.status() == GameStatus::Over {
            let Ok(ev) = rx.recv() else {
                return Ok(());
            };
            let now = Instant::now();
            for release in keyboard.expire(now) {
                game.handle_event(release);
            }
            match keyboard.translate(ev, now) {
                Some(Control::Quit) => return Ok(()),
                Some(Control::Game(input)) => {
                    game.handle_event(input);
                }
                None => {}
            }
            continue;
        }

        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match keyboard.translate(ev, Instant::now()) {
                Some(Control::Quit) => return Ok(()),
                Some(Control::Game(input)) => {
                    game.handle_event(input);
                }
                None => {}
            }
        }
        for release in keyboard.expire(Instant::now()) {
            game.handle_event(release);
        }

        game.frame(screen)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_logging(&config)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release (and key-repeat) events where the terminal can
    // report them; others fall back to the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    } else {
        warn!("terminal does not report key releases; using hold window");
    }
    let mut keyboard = Keyboard::new(keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let (cols, rows) = terminal::size()?;
    let mut screen = TerminalSurface::new(out, cols, rows, config.cell_width, config.cell_height);
    let (width, height) = screen.size();
    let mut game = Game::new(config.rule_options(), width, height, rng);

    let frame_time = Duration::from_secs(1) / config.fps;
    let result = game_loop(&mut screen, &mut game, &mut keyboard, &rx, frame_time);

    // Always restore the terminal
    let out = screen.get_mut();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(frames = game.state().frame, "exiting");
    result
}
