pub mod dedup;
pub mod types;

pub use dedup::{dedup, dedup_key, DEDUP_PREFIX_CHARS};
pub use types::{Author, AuthorPool, TextRecord};
