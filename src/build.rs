use tracing::{info, warn};

use crate::assembler::{strip_scores, Assembler, AssemblyReport};
use crate::config::{AuthorConfig, Config};
use crate::ingest::{build_source_url, clean_text, load_source, RawRecord};
use crate::pool::{AuthorPool, TextRecord};
use crate::scoring::score;

/// Clean, score and rank one author's raw tweets into a pool of at most `limit`.
pub fn rank_records(author: &AuthorConfig, raw: Vec<RawRecord>, limit: usize) -> AuthorPool {
    let records = raw
        .into_iter()
        .map(|r| {
            let text = clean_text(&r.text);
            TextRecord {
                score: score(&text),
                source_url: build_source_url(&author.handle, &r.id),
                author: author.name.clone(),
                text,
            }
        })
        .collect();

    AuthorPool::from_records(author.author(), records, limit)
}

/// Load every configured author's archive and build their pools.
///
/// Authors whose archive is missing, unreadable or yields nothing usable are
/// left out with a warning. The returned order follows the config.
pub fn build_pools(config: &Config) -> Vec<AuthorPool> {
    let mut pools = Vec::new();

    for author in &config.authors {
        info!("Loading {}...", author.name);
        let path = config.raw_dir.join(&author.source);

        let raw = match load_source(&path, &author.text_col, author.id_col.as_deref()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}: {:#}", author.name, e);
                Vec::new()
            }
        };

        let pool = rank_records(author, raw, config.pool_size);
        if pool.is_empty() {
            warn!("{}: NO DATA", author.name);
        } else {
            info!("{}: {} candidate tweets", author.name, pool.len());
            pools.push(pool);
        }
    }

    pools
}

/// Full run: build pools, assemble `config.count` puzzles with `config.seed`,
/// strip internal scores.
pub fn generate(config: &Config) -> AssemblyReport {
    let pools = build_pools(config);

    info!("Generating {} puzzles...", config.count);
    let mut assembler = Assembler::seeded(pools, config.seed);
    let mut report = assembler.assemble(config.count);
    strip_scores(&mut report.puzzles);

    info!("Generated {} puzzles", report.produced());
    report
}
