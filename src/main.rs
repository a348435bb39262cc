mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use waste_management::assets::AssetSet;
use waste_management::compositor::Frame;
use waste_management::compute::{init_session, tick};
use waste_management::config::{self, Config, CONFIG_FILE};
use waste_management::entities::{InputSymbol, Outcome, Session, SessionStatus};
use waste_management::records::RecordStore;

const LOG_FILE: &str = "waste_management.log";

/// How long the calibration notice stays up unless a key is pressed.
const CALIBRATION_WAIT: Duration = Duration::from_secs(4);
const LOADING_STEP: Duration = Duration::from_millis(400);
const LOADING_STEPS: usize = 6;

#[derive(Parser)]
#[command(name = "waste_management")]
#[command(author, version, about = "Two fish flee a shark through a sea of trash")]
struct Args {
    /// Config file (TOML); missing means defaults
    #[arg(long, short = 'c', default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Milliseconds per tick; 0 waits for a keystroke every tick
    #[arg(long, short = 't')]
    tick_ms: Option<u64>,

    /// Fixed RNG seed
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Directory of replacement art files
    #[arg(long, short = 'a')]
    assets: Option<PathBuf>,

    /// Directory for records, the encyclopedia and the log
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,
}

fn resolve_config(args: Args) -> Result<Config> {
    let mut config = config::load(&args.config)?;
    if let Some(tick_ms) = args.tick_ms {
        config.tick_ms = tick_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.assets.is_some() {
        config.assets_dir = args.assets;
    }
    if let Some(data) = args.data {
        config.data_dir = data;
    }
    Ok(config)
}

/// The terminal belongs to the game, so log lines go to a file.
fn init_logging(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    let path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Key {
    Char(char),
    Enter,
    Quit,
    Other,
}

fn classify(event: Event) -> Option<Key> {
    let Event::Key(KeyEvent {
        code,
        kind,
        modifiers,
        ..
    }) = event
    else {
        return None;
    };
    if kind == KeyEventKind::Release {
        return None;
    }
    Some(match code {
        KeyCode::Esc => Key::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        _ => Key::Other,
    })
}

/// Blocks until the next key press.
fn next_key(rx: &mpsc::Receiver<Event>) -> Result<Key> {
    loop {
        let event = rx.recv().context("input thread stopped")?;
        if let Some(key) = classify(event) {
            return Ok(key);
        }
    }
}

/// Waits up to `duration`; returns early with `true` on any key press.
fn wait_or_key(rx: &mpsc::Receiver<Event>, duration: Duration) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        match rx.recv_timeout(deadline - now) {
            Ok(event) => {
                if classify(event).is_some() {
                    return true;
                }
            }
            Err(_) => return false,
        }
    }
}

/// What the players asked for during one tick.
enum TickInput {
    Symbol(Option<InputSymbol>),
    Quit,
}

/// The single suspension point of the game loop.  With a tick length, waits
/// out the tick and keeps only the latest keystroke; with none, blocks for
/// exactly one keystroke.
fn await_tick_input(
    rx: &mpsc::Receiver<Event>,
    tick_len: Option<Duration>,
    tick_start: Instant,
) -> Result<TickInput> {
    let Some(tick_len) = tick_len else {
        return Ok(match next_key(rx)? {
            Key::Quit => TickInput::Quit,
            Key::Char(c) => TickInput::Symbol(InputSymbol::from_char(c)),
            Key::Enter | Key::Other => TickInput::Symbol(None),
        });
    };

    let elapsed = tick_start.elapsed();
    if elapsed < tick_len {
        thread::sleep(tick_len - elapsed);
    }
    let mut latest = None;
    while let Ok(event) = rx.try_recv() {
        match classify(event) {
            Some(Key::Quit) => return Ok(TickInput::Quit),
            Some(Key::Char(c)) => latest = Some(c),
            Some(Key::Enter | Key::Other) => latest = None,
            None => {}
        }
    }
    Ok(TickInput::Symbol(latest.and_then(InputSymbol::from_char)))
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn show_intro<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<()> {
    display::draw_calibration(out, terminal::size()?)?;
    if wait_or_key(rx, CALIBRATION_WAIT) {
        return Ok(());
    }
    for step in 0..LOADING_STEPS {
        display::draw_loading(out, step)?;
        if wait_or_key(rx, LOADING_STEP) {
            break;
        }
    }
    Ok(())
}

enum MenuResult {
    Start,
    Quit,
}

fn show_home<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    store: &RecordStore,
) -> Result<MenuResult> {
    let records = store.load()?;
    display::draw_home(out, &records)?;

    loop {
        match next_key(rx)? {
            Key::Enter => return Ok(MenuResult::Start),
            Key::Quit | Key::Char('q' | 'Q') => return Ok(MenuResult::Quit),
            Key::Char('i' | 'I') => {
                display::draw_instructions(out)?;
                loop {
                    match next_key(rx)? {
                        Key::Char('q' | 'Q') | Key::Quit => break,
                        _ => {}
                    }
                }
                display::draw_home(out, &records)?;
            }
            _ => {}
        }
    }
}

/// `true` → play again.
fn show_result<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &Session,
    outcome: Outcome,
) -> Result<bool> {
    display::draw_result(out, outcome, session.leveled_up, &session.records())?;
    loop {
        match next_key(rx)? {
            Key::Char('r' | 'R') => return Ok(true),
            Key::Char('q' | 'Q') | Key::Quit => return Ok(false),
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// `None` when the players quit mid-game.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session,
    assets: &AssetSet,
    config: &Config,
    rng: &mut StdRng,
) -> Result<Option<Outcome>> {
    let tick_len = (config.tick_ms > 0).then(|| Duration::from_millis(config.tick_ms));
    let mut frame = Frame::new();
    // The first frame is drawn before any input is awaited.
    let mut input = None;

    out.execute(terminal::Clear(terminal::ClearType::All))?;
    loop {
        let tick_start = Instant::now();
        let status = tick(session, &mut frame, assets, input, rng);
        display::render(out, &frame, terminal::size()?)?;

        if let SessionStatus::Ended(outcome) = status {
            return Ok(Some(outcome));
        }

        input = match await_tick_input(rx, tick_len, tick_start)? {
            TickInput::Symbol(symbol) => symbol,
            TickInput::Quit => {
                log::info!("players quit at offset {}", session.camera.offset());
                return Ok(None);
            }
        };
    }
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    assets: &AssetSet,
    store: &RecordStore,
) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    show_intro(out, rx)?;

    loop {
        if let MenuResult::Quit = show_home(out, rx, store)? {
            break;
        }

        let records = store.load()?;
        let mut session = init_session(&records, &mut rng);
        let outcome = game_loop(out, rx, &mut session, assets, config, &mut rng)?;

        // Bests reached before a quit still count.
        store.save(&session.records())?;

        let Some(outcome) = outcome else {
            break;
        };
        if !show_result(out, rx, &session, outcome)? {
            break;
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let config = resolve_config(Args::parse())?;
    init_logging(&config.data_dir)?;

    // Fatal start-up errors surface before the terminal is taken over.
    let assets = match &config.assets_dir {
        Some(dir) => AssetSet::load_dir(dir)?,
        None => AssetSet::builtin()?,
    };
    let store = RecordStore::new(&config.data_dir);
    store.load()?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop decides when to wait.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config, &assets, &store);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("fatal: {:#}", err);
    }
    result
}
