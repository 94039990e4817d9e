//! The external scanner the host parser drives.
//!
//! One [`Scanner`] per parse. The host calls [`Scanner::scan`] once per
//! token request, and brackets requests with [`Scanner::serialize`] /
//! [`Scanner::deserialize`] to move between checkpoints during incremental
//! re-parses.

use kts_lexer_core::Lexer;

use crate::delimiter::SERIALIZATION_BUFFER_SIZE;
use crate::dispatch::{dispatch, Request};
use crate::state::{Checkpoint, ScannerState};
use crate::{ScannerConfig, TokenKind, ValidSymbols};

/// Contextual external scanner for the Kotlin grammar.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    state: ScannerState,
    config: ScannerConfig,
}

impl Scanner {
    /// Scanner with the default configuration: empty delimiter stack, no
    /// pending class header.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScannerConfig) -> Self {
        Scanner {
            state: ScannerState::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    /// The persisted state.
    #[inline]
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Write the checkpoint into the host's buffer, returning the number of
    /// bytes used.
    pub fn serialize(&self, buffer: &mut [u8; SERIALIZATION_BUFFER_SIZE]) -> usize {
        self.state.serialize_into(self.config.layout, buffer)
    }

    /// Restore from bytes produced by [`serialize`](Self::serialize).
    ///
    /// # Panics
    ///
    /// Panics when the bytes describe more open strings than the stack holds.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        self.state.restore(self.config.layout, bytes);
    }

    /// The checkpoint as an owned value.
    pub fn checkpoint(&self) -> Checkpoint {
        self.state.checkpoint(self.config.layout)
    }

    /// Restore from an owned checkpoint.
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.deserialize(checkpoint.as_bytes());
    }

    /// Recognize one external token at the cursor.
    ///
    /// Returns the token kind with its end marked through the cursor, or
    /// `None` when no external token applies here. After `None` the host
    /// discards whatever the cursor consumed.
    #[tracing::instrument(level = "trace", skip_all, fields(symbols = ?symbols))]
    pub fn scan<L: Lexer + ?Sized>(
        &mut self,
        lexer: &mut L,
        symbols: ValidSymbols,
    ) -> Option<TokenKind> {
        let mut request = Request {
            state: &mut self.state,
            symbols,
            config: self.config,
        };
        dispatch(lexer, &mut request)
    }
}
