use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pomo_dial::config::{self, Config};
use pomo_dial::dial::pointer_angle;
use pomo_dial::duration::{format_clock, format_duration, parse_duration};
use pomo_dial::feedback::{self, Bell, Hook};
use pomo_dial::ticker::{Manual, ThreadTicker};
use pomo_dial::{Feedback, Snapshot, TickOutcome, TimerSession};

#[derive(Parser, Debug)]
#[command(name = "pomo", version, about = "Pomodoro timer with a turnable dial")]
struct Cli {
    /// Config file (defaults to ~/.config/pomo/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a countdown. Enter toggles pause, `d <degrees>` turns the dial, `q` quits
    Start {
        /// Starting time, e.g. 25m, 30s, 1m30s
        #[arg(long, value_parser = parse_duration)]
        duration: Option<Duration>,

        /// Don't run configured hooks
        #[arg(long)]
        no_hooks: bool,
    },
    /// Simulate one drag gesture on the dial and print the result
    Dial {
        /// Remaining time before the drag
        #[arg(long, value_parser = parse_duration)]
        remaining: Option<Duration>,

        /// Full-scale range of the dial
        #[arg(long, value_parser = parse_duration)]
        total: Option<Duration>,

        /// Pointer offset from the dial centre as DX,DY (screen coordinates)
        #[arg(long = "point", value_parser = parse_point, required = true, allow_hyphen_values = true)]
        points: Vec<(f64, f64)>,
    },
}

#[derive(Debug, Clone)]
enum Event {
    Tick,
    Input(String),
    Interrupt,
}

/// Counts boundary hits for the `dial` report.
#[derive(Default)]
struct HitCounter(std::cell::Cell<usize>);

impl Feedback for HitCounter {
    fn notify_boundary(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Command::Start { duration, no_hooks } => run_countdown(&config, duration, no_hooks),
        Command::Dial {
            remaining,
            total,
            points,
        } => simulate_drag(&config, remaining, total, &points),
    }
}

fn run_countdown(config: &Config, duration: Option<Duration>, no_hooks: bool) -> Result<()> {
    let remaining = duration.unwrap_or_else(|| config.default_remaining());
    if remaining.is_zero() {
        bail!("Duration must be greater than 0");
    }
    // A longer request widens the dial instead of being cut off.
    let total = config.total().max(remaining);

    let hooks = if no_hooks {
        Default::default()
    } else {
        config.hooks.clone()
    };

    let (tx, rx) = mpsc::channel();
    let interrupt = tx.clone();
    ctrlc::set_handler(move || {
        let _ = interrupt.send(Event::Interrupt);
    })
    .context("setting Ctrl-C handler")?;
    spawn_input_reader(tx.clone());

    let boundary = (
        Bell {
            enabled: config.bell,
        },
        Hook {
            command: hooks.boundary.clone(),
        },
    );
    let mut session = TimerSession::new(total, remaining, boundary, ThreadTicker::new(tx, Event::Tick))
        .with_tick_period(config.tick_interval());

    println!("🍅 Starting {} Pomodoro session...", format_duration(remaining));
    start(&mut session, &hooks);

    while let Ok(event) = rx.recv() {
        let now = Utc::now();
        match event {
            Event::Tick => match session.tick(now) {
                TickOutcome::Running(_) => render(&session.snapshot()),
                TickOutcome::Expired => {
                    complete(&session.snapshot(), &hooks);
                    return Ok(());
                }
                TickOutcome::Ignored => {}
            },
            Event::Input(line) => {
                let line = line.trim();
                match line {
                    "" | "p" => {
                        if session.is_running() {
                            if session.tick(now) == TickOutcome::Expired {
                                complete(&session.snapshot(), &hooks);
                                return Ok(());
                            }
                            session.pause();
                            feedback::run_hook(hooks.pause.as_deref());
                            println!("\n⏸  Paused at {}", format_clock(session.remaining()));
                        } else if session.remaining().is_zero() {
                            println!("Turn the dial first (d <degrees>)");
                        } else {
                            start(&mut session, &hooks);
                        }
                    }
                    "q" => {
                        println!("\nStopped with {} left", format_clock(session.remaining()));
                        return Ok(());
                    }
                    _ => match line.strip_prefix('d').map(|rest| rest.trim().parse::<f64>()) {
                        Some(Ok(degrees)) => {
                            session.turn_by(degrees.to_radians());
                            if !session.is_running() {
                                println!("Dial set to {}", format_clock(session.remaining()));
                            } else {
                                println!("\nPause before adjusting the dial");
                            }
                        }
                        _ => println!("Commands: <enter>/p pause or resume, d <degrees> turn dial, q quit"),
                    },
                }
            }
            Event::Interrupt => {
                println!("\n🛑 Interrupted!");
                if session.is_running() {
                    session.tick(now);
                    session.pause();
                    feedback::run_hook(hooks.pause.as_deref());
                }
                println!("{} left", format_clock(session.remaining()));
                return Ok(());
            }
        }
    }

    Ok(())
}

fn start<F: Feedback>(session: &mut TimerSession<F, ThreadTicker<Event>>, hooks: &config::Hooks) {
    session.start(Utc::now());
    feedback::run_hook(hooks.start.as_deref());
    if let Some(deadline) = session.deadline() {
        println!("Ends at {}", deadline.with_timezone(&Local).format("%H:%M:%S"));
    }
    render(&session.snapshot());
}

fn complete(snapshot: &Snapshot, hooks: &config::Hooks) {
    render(snapshot);
    println!();
    feedback::run_hook(hooks.complete.as_deref());
    feedback::alarm();
    println!("🍅 Session complete! Time for a break.");
}

fn simulate_drag(
    config: &Config,
    remaining: Option<Duration>,
    total: Option<Duration>,
    points: &[(f64, f64)],
) -> Result<()> {
    let total = total.unwrap_or_else(|| config.total());
    if total.is_zero() {
        bail!("Dial range must be greater than 0");
    }
    let remaining = remaining.unwrap_or_else(|| config.default_remaining());

    let hits = HitCounter::default();
    let mut session = TimerSession::new(total, remaining, &hits, Manual);
    for &(dx, dy) in points {
        let angle = pointer_angle(dx, dy);
        debug!(dx, dy, angle, "drag");
        session.on_drag_changed(angle);
    }
    session.on_drag_ended();

    println!(
        "remaining {} of {} ({} boundary hit{})",
        format_clock(session.remaining()),
        format_clock(session.total()),
        hits.0.get(),
        if hits.0.get() == 1 { "" } else { "s" }
    );
    Ok(())
}

fn render(snapshot: &Snapshot) {
    let progress_ratio = 1.0 - snapshot.progress();
    let percentage = (progress_ratio * 100.0) as u8;

    let bar_width = 20;
    let filled_blocks = ((progress_ratio * bar_width as f64) as usize).min(bar_width);
    let progress_bar = format!(
        "{}{}",
        "█".repeat(filled_blocks),
        "░".repeat(bar_width - filled_blocks)
    );

    print!(
        "\r⏱️  {} remaining [{}] {}%",
        format_clock(snapshot.remaining),
        progress_bar,
        percentage
    );
    let _ = io::stdout().flush();
}

fn spawn_input_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                break;
            }
        }
    });
}

fn parse_point(input: &str) -> Result<(f64, f64), String> {
    let (dx, dy) = input
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{input}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid coordinate '{value}'"))
    };
    Ok((parse(dx)?, parse(dy)?))
}
