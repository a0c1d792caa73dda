mod config;
mod embeddings;
mod filter;
mod logging;

use std::fs::File;
use std::io::{BufReader, Write, stdout};
use std::path::Path;

use anyhow::Context;

use crate::embeddings::OpenAiEmbedder;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [path] = args.as_slice() else {
        eprintln!("{}", config::USAGE);
        std::process::exit(1);
    };

    if let Err(e) = real_main(Path::new(path)) {
        eprintln!("mdembed: fatal error: {e:?}");
        log::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main(path: &Path) -> anyhow::Result<()> {
    let _logger = logging::init_logging()?;

    let file = File::open(path).with_context(|| format!("failed opening {}", path.display()))?;
    let text = filter::strip_embedding_markers(BufReader::new(file))
        .with_context(|| format!("failed reading {}", path.display()))?;

    if text.trim().is_empty() {
        log::warn!("{} has no content left after filtering", path.display());
    }

    let embedder = OpenAiEmbedder::from_env().context("embeddings client not configured")?;
    log::debug!("Embedding {} with {} via {}", path.display(), embedder.model(), embedder.endpoint());

    let vector = embedder
        .embed(&text)
        .with_context(|| format!("failed embedding {}", path.display()))?;

    let line = serde_json::to_string(&vector).context("failed serializing embedding")?;
    let mut out = stdout().lock();
    writeln!(out, "{line}")?;
    out.flush().context("failed flushing stdout")?;
    Ok(())
}
