use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use ultracalc_core::convert::{convert_text, Category};
use ultracalc_core::evaluator::{evaluate_with, parse};
use ultracalc_core::node::rewrite_angles;
use ultracalc_core::quiz::{Quiz, Verdict};
use ultracalc_core::session::Key;
use ultracalc_core::{AngleMode, Config, Session};

/// Evaluates calculator expressions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Expression to evaluate; reads lines from stdin when missing
    expression: Vec<String>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read angles in radians instead of degrees
    #[arg(long, default_value_t = false)]
    radians: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("cannot use {}", path.display()))?,
        None => Config::default(),
    };
    if args.radians {
        config.angle_mode = AngleMode::Radians;
    }
    log::debug!("configuration: {:?}", config);

    if args.expression.is_empty() {
        run_repl(config)
    } else {
        eval_once(&args.expression.join(" "), &config)
    }
}

fn eval_once(expr: &str, config: &Config) -> anyhow::Result<()> {
    println!("Original expression: {}", expr);

    let node = parse(&ultracalc_core::balance_parens(expr))?;
    println!(
        "Parsed expression: {}",
        rewrite_angles(node, config.angle_mode)
    );

    let eval = evaluate_with(expr, config.angle_mode, config.result_decimals)?;
    println!("Expression result: {}", eval.value);
    Ok(())
}

const HELP: &str = "\
Type an expression to evaluate it (start with an operator to continue
from the last result), or one of:
  :deg / :rad                          switch the angle mode
  :mc / :mr / :m+ / :m-                memory keys, on the last result
  :history                             show the recent calculations
  :clear-history                       forget the calculations
  :convert <type> <value> <from> <to>  convert units
  :quiz                                ask a question
  :answer <number>                     answer it
  :quit                                leave";

fn run_repl(config: Config) -> anyhow::Result<()> {
    let mut session = Session::with_config(config);
    let mut quiz = Quiz::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("UltraCalc v{} ({})", env!("CARGO_PKG_VERSION"), session.angle_mode());
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let now = Instant::now();
        session.tick(now);

        let Some(command) = line.strip_prefix(':') else {
            if line.is_empty() {
                continue;
            }
            match session.enter_line(line, now) {
                Ok(_) => println!("{}", session.display()),
                Err(err) => println!("{} ({})", session.display(), err),
            }
            continue;
        };

        let mut words = command.split_whitespace();
        match words.next().unwrap_or_default() {
            "deg" => session.set_angle_mode(AngleMode::Degrees),
            "rad" => session.set_angle_mode(AngleMode::Radians),
            "mc" => session.press(Key::MemoryClear, now),
            "mr" => println!("{}", session.memory().recall()),
            "m+" => {
                session.press(Key::MemoryAdd, now);
                println!("M = {}", session.memory().recall());
            }
            "m-" => {
                session.press(Key::MemorySubtract, now);
                println!("M = {}", session.memory().recall());
            }
            "history" => println!("{}", session.history_view()),
            "clear-history" => session.clear_history(),
            "convert" => {
                let parts = words.collect::<Vec<_>>();
                match parts.as_slice() {
                    [category, value, from, to] => {
                        let converted = category
                            .parse::<Category>()
                            .and_then(|category| convert_text(category, value, from, to));
                        match converted {
                            Ok(text) => println!("{}", text),
                            Err(err) => println!("Error ({})", err),
                        }
                    }
                    _ => println!("usage: :convert <type> <value> <from> <to>"),
                }
            }
            "quiz" => println!("{} = ?  (score: {})", quiz.next_question(), quiz.score()),
            "answer" => match quiz.answer(words.next().unwrap_or_default()) {
                Ok(Verdict::Correct) => println!("Correct! +10 points (score: {})", quiz.score()),
                Ok(Verdict::Wrong { expected }) => {
                    println!("Wrong! Answer: {} (score: {})", expected, quiz.score())
                }
                Err(err) => println!("{}", err),
            },
            "quit" | "q" => break,
            _ => println!("{}", HELP),
        }
    }
    Ok(())
}
