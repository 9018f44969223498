pub mod formatter;
pub mod writer;

pub use formatter::{
    format_breakdown, format_puzzle, format_score, format_summary, should_use_colors,
    truncate_text,
};
pub use writer::{write_atomic, write_puzzles};
