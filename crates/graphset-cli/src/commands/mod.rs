//! CLI command implementations.

pub mod algorithms;
pub mod distinct;
pub mod info;
pub mod set_ops;
pub mod top;
pub mod validate;

use anyhow::Result;
use graphset_engine::{Config, Engine};

use crate::OutputFormat;

/// Options shared by every command.
pub struct Context {
    pub format: OutputFormat,
    pub threads: usize,
    pub quiet: bool,
}

impl Context {
    /// Builds an engine for the configured thread count.
    pub fn engine(&self) -> Result<Engine> {
        Ok(Engine::with_config(Config::default().with_threads(self.threads))?)
    }
}
