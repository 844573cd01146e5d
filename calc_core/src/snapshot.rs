//! Session snapshot for deterministic replay testing

use serde::{Deserialize, Serialize};

use crate::buffer::ExprBuffer;
use crate::mode::{KeypadLayout, Mode};
use crate::state::{EditorState, Overlay};

/// Complete session state snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub mode: Mode,
    /// Keypad layout name
    pub layout: String,
    pub buffer: String,
    pub cursor: usize,
    pub next_bracket_closes: bool,
    pub overlay: Option<Overlay>,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub history_len: usize,
}

impl SessionSnapshot {
    pub(crate) fn capture(
        state: &EditorState,
        undo_depth: usize,
        redo_depth: usize,
        history_len: usize,
    ) -> Self {
        Self {
            mode: state.mode(),
            layout: state.layout().name.to_string(),
            buffer: state.buffer().to_string(),
            cursor: state.cursor(),
            next_bracket_closes: state.next_bracket_closes(),
            overlay: state.overlay().cloned(),
            undo_depth,
            redo_depth,
            history_len,
        }
    }

    /// Rebuild the editor state; `None` if the layout name is unknown
    pub fn to_state(&self) -> Option<EditorState> {
        let layout = KeypadLayout::from_name(&self.layout)?;
        Some(EditorState::with_parts(
            ExprBuffer::from_text(self.buffer.clone()),
            self.cursor,
            self.mode,
            layout,
            self.next_bracket_closes,
            self.overlay.clone(),
        ))
    }

    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.mode as u8]);
        hasher.update(self.layout.as_bytes());
        hasher.update(self.buffer.as_bytes());
        hasher.update(self.cursor.to_le_bytes());
        hasher.update([self.next_bracket_closes as u8]);

        match &self.overlay {
            None => hasher.update([0u8]),
            Some(overlay) => {
                hasher.update([1u8]);
                hasher.update(overlay.text().as_bytes());
            }
        }

        hasher.update(self.undo_depth.to_le_bytes());
        hasher.update(self.redo_depth.to_le_bytes());
        hasher.update(self.history_len.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
