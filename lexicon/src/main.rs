use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use clap::Parser;
use lexicon::config::{DEFAULT_COMPLETION_LIMIT, DEFAULT_SEPARATOR};
use lexicon::{Config, Dictionary, Error, LoadStats, ResolverKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const HELP: &str = "word: look up   ?prefix: complete   :q: quit";

/// Look words up in a line-oriented dictionary file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Dictionary file. [default: dic.txt next to the executable]
    #[arg(short, long)]
    dictionary: Option<PathBuf>,
    /// Maximum number of completions listed for a prefix.
    #[arg(short, long, default_value_t = DEFAULT_COMPLETION_LIMIT)]
    limit: usize,
    /// Character separating a definition from the next headword.
    #[arg(short, long, default_value_t = DEFAULT_SEPARATOR)]
    separator: char,
    /// Memory-map the dictionary instead of reopening it for every lookup.
    #[arg(long)]
    mmap: bool,
}

/// Input to the prompt loop, from the loader thread or from stdin.
#[derive(Debug)]
enum Event {
    Loaded(lexicon::Result<LoadStats>),
    Line(io::Result<String>),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lexicon=info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> lexicon::Result<()> {
    let dictionary_path = match args.dictionary {
        Some(path) => path,
        None => Config::default_dictionary_path()?,
    };
    let config = Config {
        dictionary_path,
        separator: args.separator,
        completion_limit: args.limit,
        resolver: if args.mmap {
            ResolverKind::Mmap
        } else {
            ResolverKind::File
        },
        ..Config::default()
    };

    let dictionary = Arc::new(Dictionary::new(config)?);
    let (tx, rx) = mpsc::channel();
    spawn_loader(Arc::clone(&dictionary), tx.clone());
    spawn_stdin(tx);

    let mut out = io::stdout().lock();
    writeln!(out, "Lexicon\n{HELP}")?;
    // Threads still blocked on stdin or an unfinished load end with the process.
    session(&dictionary, &rx, &mut out)
}

fn spawn_loader(dictionary: Arc<Dictionary>, tx: Sender<Event>) {
    thread::spawn(move || {
        let _ = tx.send(Event::Loaded(dictionary.load()));
    });
}

fn spawn_stdin(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
    });
}

/// Answer prompt lines until quit or end of input. A failed load ends the
/// session as soon as it is reported, without waiting for another line.
fn session<W: Write>(
    dictionary: &Dictionary,
    events: &Receiver<Event>,
    out: &mut W,
) -> lexicon::Result<()> {
    while let Ok(event) = events.recv() {
        let line = match event {
            Event::Loaded(stats) => {
                let stats = stats?;
                info!(keys = stats.keys, "ready");
                continue;
            }
            Event::Line(line) => line?,
        };

        let input = line.trim_end_matches(['\r', '\n']);
        if matches!(input, ":q" | ":quit") {
            break;
        }

        let result = match input.strip_prefix('?') {
            Some(prefix) => dictionary.complete(prefix).map(|words| {
                words.iter().fold(String::new(), |mut acc, word| {
                    acc.push_str(word);
                    acc.push('\n');
                    acc
                })
            }),
            None => dictionary.lookup(input).map(|lookup| lookup.to_string()),
        };

        match result {
            Ok(text) => writeln!(out, "{text}")?,
            Err(Error::NotLoaded) => writeln!(out, "Loading...")?,
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }

    Ok(())
}
