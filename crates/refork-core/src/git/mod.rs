//! Git and GitHub operations
//!
//! This module provides async repository operations including:
//! - Local repository initialization
//! - Remote management and pushing
//! - Publishing to GitHub through the `gh` CLI
//! - Classification of publishing failures
//!
//! # Examples
//!
//! ```no_run
//! use refork_core::config::ReforkConfig;
//! use refork_core::git::{publish_repository, PublishOptions, SystemRunner};
//! use refork_core::types::Visibility;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReforkConfig::default();
//! let options = PublishOptions::from_config(&config, "my-lib", Some("acme"), Visibility::Private);
//! let outcome = publish_repository(&SystemRunner, "./my-lib", &options).await?;
//! println!("{}", outcome.url());
//! # Ok(())
//! # }
//! ```

pub mod classify;
mod init;
mod publish;
mod remote;
mod runner;

pub use classify::{classify_failure, classify_message, failure_message, FailureKind, Guidance};
pub use init::init_repository;
pub use publish::{publish_repository, PublishOptions};
pub use remote::{ensure_remote, push_branch};
pub use runner::{CommandResult, CommandRunner, SystemRunner};
