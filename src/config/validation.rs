use std::collections::HashSet;

use super::schema::Config;

/// Puzzles always offer this many candidates.
const CANDIDATES_PER_PUZZLE: usize = 4;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.count == 0 {
        errors.push("count: must be at least 1".to_string());
    }

    if config.pool_size == 0 {
        errors.push("pool_size: must be at least 1".to_string());
    }

    let mut names = HashSet::new();
    for (i, author) in config.authors.iter().enumerate() {
        if author.name.trim().is_empty() {
            errors.push(format!("authors[{}].name: must not be empty", i));
        } else if !names.insert(author.name.as_str()) {
            errors.push(format!("authors[{}].name: duplicate author '{}'", i, author.name));
        }

        if !author.handle.starts_with('@') || author.handle.len() < 2 {
            errors.push(format!(
                "authors[{}].handle: invalid '{}' - must look like @name",
                i, author.handle
            ));
        }

        if author.source.trim().is_empty() {
            errors.push(format!("authors[{}].source: must not be empty", i));
        }

        if author.text_col.trim().is_empty() {
            errors.push(format!("authors[{}].text_col: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Too few authors is not an error (generation just stops early), but it is
/// worth telling the user before they wait for nothing.
pub fn has_enough_authors(config: &Config) -> bool {
    config.authors.len() >= CANDIDATES_PER_PUZZLE
}
