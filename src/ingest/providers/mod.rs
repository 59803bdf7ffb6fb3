// src/ingest/providers/mod.rs
pub mod linkedin;
pub mod reddit;
pub mod twitter;

pub use linkedin::LinkedinProvider;
pub use reddit::RedditProvider;
pub use twitter::TwitterProvider;
