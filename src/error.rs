//! Crate-wide result alias for infrastructure failures.
//!
//! Input validation has its own typed error in [`crate::resolver::ValidationError`];
//! everything else (IO, network, terminal prompts) flows through `anyhow`.

pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
