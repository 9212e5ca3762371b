use std::time::Instant;

use anyhow::{Context, Result, bail};
use bitply_core::{Position, STARTING_FEN, divide, perft};
use tracing::{debug, info};

const USAGE: &str = "usage: bitply <perft|divide> <depth> [fen]";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, depth, fen) = match args.as_slice() {
        [command, depth, fen @ ..] => {
            let depth: usize = depth.parse().with_context(|| format!("invalid depth \"{depth}\""))?;
            let fen = if fen.is_empty() { STARTING_FEN.to_string() } else { fen.join(" ") };
            (command.as_str(), depth, fen)
        }
        _ => bail!(USAGE),
    };

    let mut pos: Position = fen.parse().with_context(|| format!("cannot parse FEN \"{fen}\""))?;
    debug!(fen = %pos, "position loaded");

    let start = Instant::now();
    let nodes = match command {
        "perft" => perft(&mut pos, depth)?,
        "divide" => {
            let results = divide(&mut pos, depth)?;
            for (mv, count) in &results {
                println!("{mv}: {count}");
            }
            println!();
            results.iter().map(|(_, count)| count).sum()
        }
        other => bail!("unknown command \"{other}\"; {USAGE}"),
    };
    let elapsed = start.elapsed();

    println!("nodes {nodes}");
    println!("time {} ms", elapsed.as_millis());
    info!(depth, nodes, nps = (nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64, "bitply {command} finished");
    Ok(())
}
