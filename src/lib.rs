//! Fetches GitHub issues, has a language model triage each one, and rolls the
//! results up into batch analytics and reports. Expensive queries are cached
//! on disk with a TTL.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod prompts;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
