//! # refork-core
//!
//! Core library for the refork CLI providing:
//! - Filtered copying of a template tree (`copier`)
//! - Rule-driven symbol replacement in text files (`replacer`)
//! - Git initialization and GitHub publishing (`git`)
//! - Layered YAML configuration (`config`)

pub mod collector;
pub mod config;
pub mod copier;
pub mod error;
pub mod git;
pub mod replacer;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, ReforkConfig};
pub use error::{Error, Result};
pub use types::{CopyReport, InitOutcome, ReplaceReport, Visibility};
