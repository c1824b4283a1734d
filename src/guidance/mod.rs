//! Repository-specific commit guidance scraped from documentation files.

pub mod extract;
pub mod sources;

pub use extract::extract_commit_section;
pub use sources::collect_guidelines;
