//! Persisted scanner state and its checkpoint encoding.
//!
//! The host re-parses incrementally: before scanning at an arbitrary
//! position it restores the checkpoint taken after the preceding token. All
//! state that must survive between token requests therefore lives in
//! [`ScannerState`] and round-trips through [`ScannerState::serialize_into`]
//! and [`ScannerState::restore`].
//!
//! # Layout
//!
//! ```text
//! [delimiter bytes (depth)...] [is_class_decl] [class_sig_ended]
//!                              '---- StateLayout::WithContext only ----'
//! ```

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::context::DeclContext;
use crate::delimiter::{DelimiterStack, CONTEXT_BYTES, SERIALIZATION_BUFFER_SIZE};
use crate::StateLayout;

/// Inline bytes for a checkpoint before it spills to the heap.
const INLINE_CHECKPOINT: usize = 16;

/// State that survives between token requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerState {
    /// Open string literals.
    pub delimiters: DelimiterStack,
    /// Pending class-header record.
    pub context: DeclContext,
}

impl ScannerState {
    /// Empty stack, cleared context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the checkpoint bytes into `buffer`, returning the count.
    ///
    /// The stack is written even when empty (zero bytes); the context bytes
    /// follow in [`StateLayout::WithContext`].
    pub fn serialize_into(&self, layout: StateLayout, buffer: &mut [u8]) -> usize {
        let mut written = self.delimiters.encode_into(buffer);
        if layout == StateLayout::WithContext {
            let end = written + CONTEXT_BYTES;
            buffer[written..end].copy_from_slice(&self.context.encode());
            written = end;
        }
        written
    }

    /// Owned checkpoint bytes.
    pub fn checkpoint(&self, layout: StateLayout) -> Checkpoint {
        let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
        let written = self.serialize_into(layout, &mut buffer);
        Checkpoint(SmallVec::from_slice(&buffer[..written]))
    }

    /// Restore from checkpoint bytes.
    ///
    /// Empty input clears everything. Otherwise the bytes are copied back
    /// verbatim; in [`StateLayout::WithContext`] the last two bytes (when
    /// present) are the context. [`StateLayout::Compact`] checkpoints carry
    /// no context, so the in-memory context is left as it is.
    ///
    /// # Panics
    ///
    /// Panics when the stack part exceeds the delimiter stack capacity.
    pub fn restore(&mut self, layout: StateLayout, bytes: &[u8]) {
        if bytes.is_empty() {
            self.delimiters.clear();
            self.context = DeclContext::NONE;
            debug!("scanner state cleared");
            return;
        }
        match layout {
            StateLayout::WithContext if bytes.len() >= CONTEXT_BYTES => {
                let (stack, context) = bytes.split_at(bytes.len() - CONTEXT_BYTES);
                self.delimiters.decode_from(stack);
                self.context = DeclContext::decode([context[0], context[1]]);
            }
            StateLayout::WithContext => {
                self.delimiters.decode_from(bytes);
                self.context = DeclContext::NONE;
            }
            StateLayout::Compact => self.delimiters.decode_from(bytes),
        }
        debug!(
            depth = self.delimiters.depth(),
            class_decl = self.context.is_class_decl,
            sig_ended = self.context.class_sig_ended,
            "scanner state restored"
        );
    }
}

/// Serialized scanner state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint(SmallVec<[u8; INLINE_CHECKPOINT]>);

impl Checkpoint {
    /// Wrap raw checkpoint bytes, e.g. ones a host stored earlier.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Checkpoint(SmallVec::from_slice(bytes))
    }

    /// The checkpoint bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the checkpoint holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lower-case hex, two digits per byte.
impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
