//! sortviz - watch the classic sorting algorithms step by step.

use std::error::Error;
use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use crossbeam_channel::{select, tick, unbounded, Receiver};
use log::{debug, warn, LevelFilter};

use sortviz::config::{ARRAY_SIZE, DEFAULT_SEED, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use sortviz::controls::HELP;
use sortviz::{verify, Algorithm, Command, RunReport, Session, SystemClock, TerminalRenderer, VisualizerError};

#[derive(Parser)]
#[command(name = "sortviz")]
#[command(author, version, about = "Animated sorting algorithm visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate one algorithm in the terminal
    Run(RunArgs),

    /// Drive the visualizer with typed commands
    Interactive(SessionArgs),

    /// Sort many random arrays headlessly with every algorithm
    Verify(VerifyArgs),

    /// List algorithms and their complexities
    List,
}

#[derive(Args)]
struct SessionArgs {
    /// Animation speed, 1 (slow) to 1000 (fast)
    #[arg(short, long, default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u16).range(MIN_SPEED as i64..=MAX_SPEED as i64))]
    speed: u16,

    /// Seed for the random arrays
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Number of bars
    #[arg(short = 'n', long, default_value_t = ARRAY_SIZE)]
    size: usize,

    /// Height of the bar chart in terminal rows
    #[arg(long, default_value_t = 16)]
    rows: usize,
}

#[derive(Args)]
struct RunArgs {
    /// One of: bubble, selection, insertion, merge, quick, heap, counting, radix, bucket
    #[arg(short, long, default_value = "bubble")]
    algorithm: Algorithm,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Args)]
struct VerifyArgs {
    #[arg(short, long, default_value_t = 1000)]
    rounds: usize,

    #[arg(short = 'n', long, default_value_t = ARRAY_SIZE)]
    size: usize,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Interactive(args) => interactive(args),
        Commands::Verify(args) => verify_all(args),
        Commands::List => {
            list();
            Ok(())
        }
    }
}

fn open_session(args: &SessionArgs) -> Result<Session<TerminalRenderer<io::Stdout>, SystemClock>, VisualizerError> {
    let mut session = Session::new(TerminalRenderer::stdout(args.rows), SystemClock, args.seed, args.size)?;
    session.set_speed(args.speed as i64);
    Ok(session)
}

fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let mut session = open_session(&args.session)?;
    session.start(args.algorithm)?;
    if let Some(outcome) = session.wait() {
        report(outcome?);
    }
    Ok(())
}

fn verify_all(args: VerifyArgs) -> Result<(), Box<dyn Error>> {
    let summaries = verify(args.rounds, args.size, args.seed);
    let mut failures = 0;
    for summary in &summaries {
        println!("{summary}");
        failures += summary.failures;
    }
    if failures > 0 {
        return Err(format!("{failures} runs did not sort correctly").into());
    }
    Ok(())
}

fn list() {
    for algorithm in Algorithm::ALL {
        let stable = if algorithm.is_stable() { "stable" } else { "unstable" };
        println!("{:<10} {:<9} {}", algorithm.name(), stable, algorithm.complexity());
    }
}

fn report(report: RunReport) {
    println!("{report}");
}

enum Event {
    Line(Option<String>),
    Tick,
}

fn stdin_lines() -> Receiver<String> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn interactive(args: SessionArgs) -> Result<(), Box<dyn Error>> {
    let mut session = open_session(&args)?;
    let lines = stdin_lines();
    let ticker = tick(Duration::from_millis(50));
    eprintln!("{HELP}");

    loop {
        let event = select! {
            recv(lines) -> line => Event::Line(line.ok()),
            recv(ticker) -> _ => Event::Tick,
        };
        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) if line.trim().is_empty() => {}
            Event::Line(Some(line)) => match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(e) = apply(&mut session, command) {
                        eprintln!("{e}");
                    }
                }
                Err(e) => eprintln!("{e}"),
            },
            Event::Tick => match session.poll() {
                Some(Ok(r)) => report(r),
                Some(Err(e)) if e.is_cancelled() => debug!("{e}"),
                Some(Err(e)) => warn!("{e}"),
                None => {}
            },
        }
    }

    session.cancel();
    let _ = session.wait();
    Ok(())
}

fn apply(session: &mut Session<TerminalRenderer<io::Stdout>, SystemClock>, command: Command) -> Result<(), VisualizerError> {
    match command {
        Command::Shuffle => session.shuffle()?,
        Command::Sort(algorithm) => {
            session.start(algorithm)?;
        }
        Command::Restart(algorithm) => {
            session.restart(algorithm)?;
        }
        Command::Speed(speed) => eprintln!("speed {}", session.set_speed(speed)),
        Command::Cancel => {
            if !session.cancel() {
                eprintln!("nothing is running");
            }
        }
        Command::Wait => match session.wait() {
            Some(outcome) => report(outcome?),
            None => eprintln!("nothing is running"),
        },
        Command::Show => match session.array() {
            Some(arr) => println!("{arr}"),
            None => eprintln!("array is busy with a running sort"),
        },
        Command::List => list(),
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
