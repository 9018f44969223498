pub mod assembler;
pub mod build;
pub mod config;
pub mod ingest;
pub mod output;
pub mod pool;
pub mod scoring;
