//! Buffers shared between the pipeline roles.
//!
//! Two mutexes: one for the raw token buffer written by the line producer,
//! one for the action list owned by the consumer. Whoever needs both takes
//! the token lock first.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::markup::Token;
use crate::paint::ActionList;

/// Handles to the shared token buffer and action list.
#[derive(Debug, Clone, Default)]
pub struct Shared {
    tokens: Arc<Mutex<Vec<Token>>>,
    actions: Arc<Mutex<ActionList>>,
}

impl Shared {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the token buffer.
    pub fn tokens(&self) -> Result<MutexGuard<'_, Vec<Token>>> {
        self.tokens.lock().map_err(|_| poisoned("token buffer"))
    }

    /// Lock the action list.
    pub fn actions(&self) -> Result<MutexGuard<'_, ActionList>> {
        self.actions.lock().map_err(|_| poisoned("action list"))
    }

    /// Replace the token buffer with `tokens`, holding the lock only for the
    /// swap.
    pub fn replace_tokens(&self, tokens: Vec<Token>) -> Result<()> {
        *self.tokens()? = tokens;
        Ok(())
    }
}

fn poisoned(what: &str) -> Error {
    Error::Thread {
        role: "pipeline",
        message: format!("{what} lock poisoned"),
    }
}
