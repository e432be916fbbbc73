use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use druggle_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "druggle")]
#[command(about = "Daily drug guessing game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Play as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// Use a catalog JSON file instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play today's puzzle (default)
    Play {
        /// Scripted guess; repeat to guess several times (skips the prompt)
        #[arg(long = "guess")]
        guesses: Vec<String>,

        /// Scripted number of hints to reveal before guessing
        #[arg(long, default_value_t = 0)]
        hints: usize,

        /// Seed for hint selection
        #[arg(long)]
        seed: Option<u64>,

        /// Play without recording progress
        #[arg(long)]
        dry_run: bool,
    },

    /// Show streak and achievements
    Stats,

    /// List drug names starting with a prefix
    Suggest {
        prefix: String,
    },

    /// Show today's puzzle number
    Today,
}

/// Everything a command needs that comes from flags and config
struct Context {
    catalog: Catalog,
    data_dir: PathBuf,
    reference_date: NaiveDate,
    today: NaiveDate,
}

fn main() -> Result<()> {
    druggle_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(path) = cli.catalog {
        config.game.catalog_path = Some(path);
    }

    let catalog = config.game.load_catalog()?;
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let ctx = Context {
        catalog,
        data_dir: cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone()),
        reference_date: config.game.reference_date,
        today: cli.date.unwrap_or_else(druggle_core::daily::local_today),
    };
    tracing::debug!(
        "Playing {} with data dir {:?} ({} drugs)",
        ctx.today,
        ctx.data_dir,
        ctx.catalog.len()
    );

    match cli.command {
        Some(Commands::Play {
            guesses,
            hints,
            seed,
            dry_run,
        }) => cmd_play(&ctx, guesses, hints, seed, dry_run),
        Some(Commands::Stats) => cmd_stats(&ctx),
        Some(Commands::Suggest { prefix }) => cmd_suggest(&ctx, &prefix),
        Some(Commands::Today) => cmd_today(&ctx),
        None => cmd_play(&ctx, Vec::new(), 0, None, false),
    }
}

fn cmd_play(
    ctx: &Context,
    guesses: Vec<String>,
    hints: usize,
    seed: Option<u64>,
    dry_run: bool,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if dry_run {
        let tracker = ProgressTracker::open(MemoryStore::new())?;
        play(ctx, tracker, rng, guesses, hints)?;
        println!("\n[Dry run - progress not recorded]");
        Ok(())
    } else {
        let store = FileStore::new(Config::progress_path(&ctx.data_dir));
        let tracker = ProgressTracker::open(store)?;
        play(ctx, tracker, rng, guesses, hints)
    }
}

fn play<S: KeyValueStore>(
    ctx: &Context,
    mut tracker: ProgressTracker<S>,
    mut rng: StdRng,
    guesses: Vec<String>,
    hints: usize,
) -> Result<()> {
    let puzzle = puzzle_for_date(&ctx.catalog, ctx.reference_date, ctx.today);
    let mut session = GameSession::new(puzzle.target.clone());

    display_banner(puzzle.number(), tracker.state());

    if guesses.is_empty() && hints == 0 {
        return play_interactive(ctx, &mut tracker, &mut rng, &mut session, puzzle.number());
    }

    for _ in 0..hints {
        reveal_hint(&mut session, &mut rng);
    }
    for guess in &guesses {
        submit(ctx, &mut tracker, &mut session, guess, puzzle.number())?;
    }

    if !session.is_terminal() {
        println!(
            "\nPuzzle unfinished: {} attempts remaining.",
            session.attempts_remaining()
        );
    }
    Ok(())
}

fn play_interactive<S: KeyValueStore>(
    ctx: &Context,
    tracker: &mut ProgressTracker<S>,
    rng: &mut StdRng,
    session: &mut GameSession,
    number: i64,
) -> Result<()> {
    println!("Type a drug name to guess, '?' for a hint, 'reset' to restart, 'quit' to leave.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;

        // A drug name always wins over a command word
        if ctx.catalog.find(&line).is_some() {
            submit(ctx, tracker, session, &line, number)?;
            continue;
        }

        match line.trim().to_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "?" | "hint" => reveal_hint(session, rng),
            "reset" => {
                session.reset();
                println!("New game. {} attempts.", MAX_ATTEMPTS);
            }
            _ => submit(ctx, tracker, session, &line, number)?,
        }
    }

    Ok(())
}

fn reveal_hint(session: &mut GameSession, rng: &mut StdRng) {
    if session.is_terminal() {
        println!("The game is over. Type 'reset' to play again.");
        return;
    }
    match session.reveal_hint(rng) {
        Some(category) => println!(
            "Hint: {} → {}",
            category.label(),
            session.target().value(category)
        ),
        None => println!("No hints left."),
    }
}

fn submit<S: KeyValueStore>(
    ctx: &Context,
    tracker: &mut ProgressTracker<S>,
    session: &mut GameSession,
    guess: &str,
    number: i64,
) -> Result<()> {
    match session.submit_guess(&ctx.catalog, guess) {
        Err(err) => {
            eprintln!("{}", err);
            let suggestions = ctx.catalog.suggest(guess);
            if !suggestions.is_empty() {
                eprintln!("  Did you mean: {}", suggestions.join(", "));
            }
        }
        Ok(GuessOutcome::Ignored) => {
            println!("The game is over. Type 'reset' to play again.");
        }
        Ok(GuessOutcome::Repeated) => {
            println!("You just guessed that.");
        }
        Ok(GuessOutcome::Recorded(status)) => {
            if let Some(feedback) = session.feedback().last() {
                display_feedback(feedback, session.guesses().len());
            }
            if status.is_terminal() {
                let unlocked = tracker.on_session_resolved(session)?;
                display_result(session, tracker.state(), &unlocked, number);
            }
        }
    }
    Ok(())
}

fn cmd_stats(ctx: &Context) -> Result<()> {
    let store = FileStore::new(Config::progress_path(&ctx.data_dir));
    let state = ProgressState::load(&store)?;

    println!("🔥 Streak: {}", state.streak);
    println!("Achievements: {}", format_achievements(&state));
    Ok(())
}

fn cmd_suggest(ctx: &Context, prefix: &str) -> Result<()> {
    for name in ctx.catalog.suggest(prefix) {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_today(ctx: &Context) -> Result<()> {
    let puzzle = puzzle_for_date(&ctx.catalog, ctx.reference_date, ctx.today);
    println!("Druggle #{} ({})", puzzle.number(), ctx.today);
    Ok(())
}

fn format_achievements(state: &ProgressState) -> String {
    if state.achievements.is_empty() {
        "None yet".to_string()
    } else {
        state
            .achievements
            .iter()
            .map(|a| achievement_display(a))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn display_banner(number: i64, state: &ProgressState) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DRUGGLE #{}", number);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Guess the drug by its classes. {} attempts max.",
        MAX_ATTEMPTS
    );
    println!("  🔥 Streak: {}", state.streak);
    println!();
}

fn display_feedback(feedback: &GuessFeedback, attempt: usize) {
    println!("\n  {} ({}/{})", feedback.name, attempt, MAX_ATTEMPTS);
    for cell in &feedback.cells {
        let mark = if cell.status.is_match() { "✓" } else { "✗" };
        println!("    {} {:<18} {}", mark, cell.category.label(), cell.value);
    }
}

fn display_result(
    session: &GameSession,
    state: &ProgressState,
    unlocked: &[Achievement],
    number: i64,
) {
    println!();
    if session.has_won() {
        println!("🎉 Correct! The drug was {}.", session.target().name);
        if let Some(summary) = session.summary() {
            println!("  {}", summary);
        }
    } else {
        println!("❌ Game Over! The drug was {}.", session.target().name);
    }

    println!("🔥 Streak: {}", state.streak);
    for achievement in unlocked {
        println!("🏅 Achievement unlocked: {}", achievement.display_name());
    }
    println!("Achievements: {}", format_achievements(state));

    println!();
    println!(
        "{}",
        format_share(session.guesses(), session.target(), number)
    );
}
