use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assembler::{AssemblyReport, Puzzle, StopReason};
use crate::scoring::ScoreResult;

/// Quote width used when stdout is not a terminal.
const DEFAULT_QUOTE_WIDTH: usize = 80;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Room left for a quote after the "  Round N: " prefix and its quotes.
fn quote_width() -> usize {
    let prefix = 13;
    match get_terminal_width() {
        Some(width) if width > prefix + 20 => (width - prefix).min(DEFAULT_QUOTE_WIDTH),
        Some(_) => 20,
        None => DEFAULT_QUOTE_WIDTH,
    }
}

/// Format a puzzle as a multi-line preview: candidates, then each round's
/// quote, answer and link.
pub fn format_puzzle(puzzle: &Puzzle, use_colors: bool) -> String {
    let width = quote_width();
    let names = puzzle
        .candidates
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let header = format!("--- Sample Puzzle #{} ---", puzzle.id);
    let mut lines = if use_colors {
        vec![header.bold().to_string(), format!("Candidates: {}", names.cyan())]
    } else {
        vec![header, format!("Candidates: {}", names)]
    };

    for (i, round) in puzzle.rounds.iter().enumerate() {
        let quote = truncate_text(&round.text, width);
        if use_colors {
            lines.push(format!("  Round {}: \"{}\"", i + 1, quote));
            lines.push(format!("           Answer: {}", round.author.yellow()));
            if !round.source_url.is_empty() {
                lines.push(format!("           Link: {}", round.source_url.underline()));
            }
        } else {
            lines.push(format!("  Round {}: \"{}\"", i + 1, quote));
            lines.push(format!("           Answer: {}", round.author));
            if !round.source_url.is_empty() {
                lines.push(format!("           Link: {}", round.source_url));
            }
        }
    }

    lines.join("\n")
}

/// One-line outcome of a generation run.
pub fn format_summary(report: &AssemblyReport) -> String {
    let mut summary = format!(
        "Generated {} of {} puzzles",
        report.produced(),
        report.requested
    );
    if !report.abandoned.is_empty() {
        summary.push_str(&format!(" ({} abandoned)", report.abandoned.len()));
    }
    if let StopReason::Starved { at, live_authors } = report.stop {
        summary.push_str(&format!(
            "; stopped at #{}, only {} authors had tweets left",
            at, live_authors
        ));
    }
    summary
}

/// Format a score as compact decimal ("20", "19.5")
pub fn format_score(score: f64) -> String {
    format!("{}", (score * 10.0).round() / 10.0)
}

/// Format a per-rule scoring breakdown for one text.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    if let Some(rule) = result.rejected_by {
        return if use_colors {
            format!("Score: {} (rejected: {})", "0".red(), rule)
        } else {
            format!("Score: 0 (rejected: {})", rule)
        };
    }

    let label_width = result
        .contributions
        .iter()
        .map(|c| c.label.len() + c.hits.to_string().len() + 3)
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = result
        .contributions
        .iter()
        .map(|c| {
            let label = format!("{} ({})", c.label, c.hits);
            let delta = format!("{:+}", c.delta);
            let delta = if !use_colors {
                delta
            } else if c.delta < 0.0 {
                delta.red().to_string()
            } else {
                delta.green().to_string()
            };
            format!("  {:<width$}  {}", label, delta, width = label_width)
        })
        .collect();

    let total = format!("Score: {}", format_score(result.score));
    if use_colors {
        lines.push(total.bold().to_string());
    } else {
        lines.push(total);
    }
    lines.join("\n")
}
