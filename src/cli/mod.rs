//! Command-line front end: generation, listing and the query menu

pub mod commands;
pub mod menu;
pub mod output;
pub mod prompt;

pub use commands::*;
pub use menu::*;
pub use output::*;
pub use prompt::*;

use crate::config::StoreConfig;
use crate::core::temporal::Timestamp;
use crate::error::{Error, Result};
use crate::generate::{PostGenerator, MAX_POSTS};
use crate::store::Store;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Run the parsed command against stdin/stdout
pub fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cli, stdin.lock(), stdout.lock())
}

/// Run the parsed command against any reader/writer pair
pub fn run_with<R: BufRead, W: Write>(cli: Cli, input: R, output: W) -> Result<()> {
    let config = cli.store_config()?;
    let format = cli.format;
    let mut prompter = match format {
        OutputFormat::Text => Prompter::new(input, output),
        OutputFormat::Json => Prompter::new(input, output).prompts_to_stderr(),
    };

    match cli.command.unwrap_or_default() {
        Commands::Interactive { posts, users, seed } => {
            let posts = match posts {
                Some(n) => n,
                None => {
                    let answer = prompter.ask_parsed(
                        "How many posts would you like to generate? ",
                        "Please enter a whole number.",
                        parse_count,
                    )?;
                    match answer {
                        Some(n) => n,
                        None => return Ok(()),
                    }
                }
            };

            let mut store = populate(config, posts, users, seed)?;
            write_ranked(prompter.output(), format, &store)?;
            Menu::new(&mut store, prompter, format).run()
        }
        Commands::Generate { posts, users, seed } => {
            let store = populate(config, posts, users, seed)?;
            write_ranked(prompter.output(), format, &store)
        }
    }
}

/// Fill a fresh store with generated posts
///
/// Posts refused by a rejecting duplicate policy are skipped. The store
/// preallocates for the larger of `posts` and the configured capacity.
pub fn populate(config: StoreConfig, posts: usize, users: u32, seed: Option<u64>) -> Result<Store> {
    if posts > MAX_POSTS {
        return Err(Error::Configuration(format!(
            "cannot generate {} posts, the limit is {}",
            posts, MAX_POSTS
        )));
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generator = PostGenerator::new(Timestamp::now()).with_max_users(users);
    let capacity = config.initial_capacity.max(posts);
    let mut store = Store::with_config(config.with_initial_capacity(capacity));

    let mut skipped = 0usize;
    for record in generator.generate(posts, &mut rng) {
        match store.insert(record) {
            Ok(_) => {}
            Err(Error::DuplicateTimestamp(_)) => skipped += 1,
            Err(e) => return Err(e),
        }
    }
    if skipped > 0 {
        warn!(skipped, "generated posts dropped as duplicate timestamps");
    }
    info!(
        inserted = store.len(),
        capacity = store.config().initial_capacity,
        base = %generator.base(),
        "store populated"
    );
    Ok(store)
}

fn parse_count(answer: &str) -> Result<usize> {
    match answer.parse::<usize>() {
        Ok(count) if count <= MAX_POSTS => Ok(count),
        Ok(count) => Err(Error::MalformedInput(format!(
            "{} posts is over the limit of {}",
            count, MAX_POSTS
        ))),
        Err(_) => Err(Error::MalformedInput(format!("'{}' is not a post count", answer))),
    }
}
