use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::mpsc;

use upscall_core::{
    ChatConfig, ChatEvent, ChatWidget, IgnoreReason, RandomSource, SeededRandom, Sender,
    Submission, SystemRandom,
};
use upscall_execution::{TokioScheduler, init_logging, live_widget};

const COMMANDS: [&str; 4] = ["/open", "/close", "/transcript", "/quit"];

#[derive(Parser)]
#[command(name = "upscall-chat")]
#[command(about = "Talk to the Upscall support agent in your terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/upscall/chat.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for reproducible phrasing and typing delays
    #[arg(long)]
    seed: Option<u64>,
    /// Log filter, overrides the config file
    #[arg(long)]
    log_level: Option<String>,
}

/// Phrase randomness: reproducible with `--seed`, entropy otherwise.
enum ReplRandom {
    System(SystemRandom),
    Seeded(SeededRandom),
}

impl RandomSource for ReplRandom {
    fn next_unit(&mut self) -> f64 {
        match self {
            ReplRandom::System(random) => random.next_unit(),
            ReplRandom::Seeded(random) => random.next_unit(),
        }
    }
}

type Widget = ChatWidget<TokioScheduler, ReplRandom>;

/// Line editor helper: completes and highlights slash commands.
#[derive(Clone)]
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }
        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;
}

impl Validator for CliHelper {}

enum ReplInput {
    Line(String),
    Quit,
}

/// Reads lines on a blocking thread and forwards them to the event loop.
fn read_lines(tx: mpsc::UnboundedSender<ReplInput>) {
    let mut rl = match Editor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", format!("Error: {:?}", err).red());
            let _ = tx.send(ReplInput::Quit);
            return;
        }
    };
    rl.set_helper(Some(CliHelper));

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if matches!(trimmed, "quit" | "exit" | "/quit") {
                    let _ = tx.send(ReplInput::Quit);
                    return;
                }
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                if tx.send(ReplInput::Line(line)).is_err() {
                    return;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                let _ = tx.send(ReplInput::Quit);
                return;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                let _ = tx.send(ReplInput::Quit);
                return;
            }
        }
    }
}

/// Tracks how much of the log has been printed. Messages that land while the
/// widget is closed are printed when it reopens.
struct View {
    shown: usize,
}

impl View {
    fn render(&mut self, widget: &Widget, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::VisibilityChanged { open: true } => {
                    println!("{}", "[chat opened]".bright_yellow());
                }
                ChatEvent::VisibilityChanged { open: false } => {
                    println!("{}", "[chat closed]".bright_yellow());
                }
                ChatEvent::TypingChanged { typing: true } if widget.is_open() => {
                    println!("{}", "Upscall is typing...".bright_black());
                }
                _ => {}
            }
        }

        if !widget.is_open() {
            return;
        }
        for message in &widget.messages()[self.shown..] {
            match message.sender {
                Sender::Bot => println!("{}", format!("Upscall: {}", message.text).bright_blue()),
                Sender::User => println!("{}", format!("> {}", message.text).green()),
            }
        }
        self.shown = widget.messages().len();
    }
}

fn handle_line(widget: &mut Widget, line: &str) -> Result<()> {
    match line.trim() {
        "/open" => widget.open(),
        "/close" => widget.close(),
        "/transcript" => println!("{}", widget.transcript_json()?),
        text if !widget.session().email_captured() => {
            if let Submission::Ignored(IgnoreReason::Empty) = widget.submit_email(text) {
                println!("{}", "Please enter your email to start chatting.".bright_black());
            }
        }
        text => match widget.submit_message(text) {
            Submission::Accepted => {}
            Submission::Ignored(reason) => {
                tracing::debug!(?reason, "Ignored submission");
            }
        },
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ChatConfig::load_or_default(cli.config.as_deref())?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level)?;

    let random = match cli.seed {
        Some(seed) => ReplRandom::Seeded(SeededRandom::new(seed)),
        None => ReplRandom::System(SystemRandom::new()),
    };
    let (mut widget, mut due) = live_widget(config, random);
    tracing::info!(session = %widget.session().id(), "Chat session started");

    let (line_tx, mut lines) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_lines(line_tx));

    println!("{}", "=== Upscall Chat ===".bright_magenta().bold());
    println!(
        "{}",
        "Commands: /open, /close, /transcript, quit. Your first line is taken as your email."
            .bright_black()
    );
    println!();

    let mut view = View { shown: 0 };
    widget.open();
    let events = widget.drain_events();
    view.render(&widget, events);

    // ===== Event Loop =====
    loop {
        tokio::select! {
            Some(input) = lines.recv() => match input {
                ReplInput::Line(line) => handle_line(&mut widget, &line)?,
                ReplInput::Quit => break,
            },
            Some(task) = due.recv() => widget.fire(task),
            else => break,
        }
        let events = widget.drain_events();
        view.render(&widget, events);
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
