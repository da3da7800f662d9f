use std::io::Write;

use anyhow::{Context, Result};
use best_tree::config::{TreeConfig, ValueSpace, DEFAULT_TREE_SIZE, DEFAULT_VALUE_SPACE};
use best_tree::error::{SessionError, TreeError};
use best_tree::fsm::FSM;
use best_tree::session::Session;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "best-tree", about = "Rebalance a random binary search tree by hand")]
struct Cli {
    /// Number of nodes in each new tree.
    #[arg(long, default_value_t = DEFAULT_TREE_SIZE)]
    size: usize,
    /// Smallest value a node can hold.
    #[arg(long, default_value_t = DEFAULT_VALUE_SPACE.start, allow_hyphen_values = true)]
    min: i32,
    /// Upper bound (exclusive) of node values.
    #[arg(long, default_value_t = DEFAULT_VALUE_SPACE.end, allow_hyphen_values = true)]
    max: i32,
    /// Seed for reproducible trees.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = TreeConfig::default().with_value_space(ValueSpace::new(cli.min, cli.max));
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let mut session = Session::new(cli.size, config).context("failed to build the initial tree")?;
    let mut fsm = FSM::new(&mut session);

    fsm.handle(&["show"])?;

    while let Some(line) = readline()? {
        let args = match shlex::split(line.trim()) {
            Some(args) => args,
            None => {
                eprintln!("parser error: unbalanced quotes");
                continue;
            }
        };
        if args.is_empty() {
            continue;
        }

        match fsm.handle(args.as_slice()) {
            Ok(should_quit) => {
                if should_quit {
                    return Ok(());
                }
            }
            Err(e) => {
                if e.downcast_ref::<SessionError>().is_some() || e.downcast_ref::<TreeError>().is_some() {
                    eprintln!("{}", e);
                } else {
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

/// `None` once stdin is closed.
fn readline() -> Result<Option<String>> {
    print!("> ");
    std::io::stdout().flush()?;
    let mut buf = String::new();
    if std::io::stdin().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}
