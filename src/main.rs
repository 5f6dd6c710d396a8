use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dxsearch_core::{config::Config, QueryEngine, SearchHit, Vocabulary};

#[derive(Parser)]
#[command(name = "dxsearch", about = "Fuzzy search over diagnosis names")]
struct Cli {
    /// Write debug logs to /tmp/dxsearch-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Vocabulary file (one name per line) instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    vocab: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one search and print the ranked results.
    Query {
        /// The query text; multiple arguments are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Print at most this many results (defaults to `search.max_results`).
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Print a JSON array of hits instead of plain lines.
        #[arg(long, conflicts_with = "explain")]
        json: bool,

        /// Append tier, quality and best-matching term to each line.
        #[arg(long)]
        explain: bool,
    },
    /// List every vocabulary entry with its extracted search terms.
    Terms,
    /// Interactive search-as-you-type (the default).
    Interactive {
        /// Text to pre-fill the query bar with.
        #[arg(default_value = "")]
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/dxsearch-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("dxsearch debug log started, tail -f /tmp/dxsearch-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });

    let vocabulary = match &cli.vocab {
        Some(path) => Vocabulary::load(path)?,
        None => config
            .vocabulary
            .resolve()
            .context("loading configured vocabulary")?,
    };
    let engine = QueryEngine::with_policy(vocabulary, config.search.single_char);

    match cli.command {
        Some(Command::Query { text, limit, json, explain }) => {
            let query = text.join(" ");
            let mut hits = engine.search_hits(&query);
            match limit {
                Some(n) => hits.truncate(n),
                None => hits = config.search.limit(hits),
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for hit in &hits {
                    println!("{}", format_hit(hit, explain));
                }
            }
        }
        Some(Command::Terms) => {
            for entry in engine.vocabulary() {
                println!("{}\t{}", entry.display_text(), entry.terms().join(" | "));
            }
        }
        Some(Command::Interactive { query }) => interactive(&engine, config, &query)?,
        None => interactive(&engine, config, "")?,
    }

    Ok(())
}

fn interactive(engine: &QueryEngine, config: Config, initial: &str) -> anyhow::Result<()> {
    if let dxsearch_tui::Outcome::Chosen(text) = dxsearch_tui::run(engine, config, initial)? {
        println!("{text}");
    }
    Ok(())
}

fn format_hit(hit: &SearchHit<'_>, explain: bool) -> String {
    if explain {
        format!(
            "{}\t{}\t{:.3}\t{}",
            hit.entry.display_text(),
            hit.tier,
            hit.quality,
            hit.best_term
        )
    } else {
        hit.entry.display_text().to_string()
    }
}
