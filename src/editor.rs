//! Block-based content composer.
//!
//! A [`BlockEditor`] owns an ordered list of text and image blocks for one
//! editing session. It serializes to the bracket-tag content format and
//! rebuilds itself from previously saved content.
//!
//! Invariants held after every operation:
//! - the list is never empty;
//! - blocks are stored in `order`, and `order` is exactly `0..len`.
//!
//! # Example
//! ```
//! use tagmark::editor::{BlockEditor, BlockKind};
//!
//! let mut editor = BlockEditor::new();
//! let first = editor.blocks()[0].id;
//! editor.update_block(first, "Look at this:");
//! let image = editor.add_block(BlockKind::Image);
//! editor.update_block(image, "https://example.com/a.png");
//!
//! assert_eq!(
//!     editor.serialize(),
//!     "Look at this:\n\n[image]https://example.com/a.png[/image]"
//! );
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::segment::{Segment, parse};
use crate::tag::{TagKind, has_unclosed_opener};

/// Separator placed between serialized blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Session-unique block identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(u32);

impl BlockId {
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Image,
}

/// One user-editable unit: free text or an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub content: String,
    pub order: usize,
}

impl ContentBlock {
    /// True when the block has something other than whitespace.
    #[inline]
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    fn write_serialized(&self, out: &mut String) {
        match self.kind {
            BlockKind::Text => out.push_str(&self.content),
            BlockKind::Image => {
                out.push_str(TagKind::Image.opener());
                out.push_str(&self.content);
                out.push_str(TagKind::Image.closer());
            }
        }
    }
}

/// Ordered block list for one editing session.
#[derive(Debug, Clone)]
pub struct BlockEditor {
    blocks: Vec<ContentBlock>,
    next_id: u32,
}

impl Default for BlockEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockEditor {
    /// A new editor holding one empty text block.
    pub fn new() -> Self {
        let mut editor = Self {
            blocks: Vec::with_capacity(4),
            next_id: 0,
        };
        editor.push(BlockKind::Text, String::new());
        editor
    }

    /// Rebuild an editor from saved content.
    ///
    /// Images become image blocks. Text becomes text blocks. Quote, code and
    /// video spans cannot be edited as blocks, so each is kept verbatim
    /// (tags included) in a text block of its own and survives
    /// re-serialization. Empty content yields one empty text block.
    pub fn deserialize(content: &str) -> Self {
        let mut editor = Self {
            blocks: Vec::new(),
            next_id: 0,
        };
        for segment in parse(content) {
            match segment {
                Segment::Image(url) => editor.push(BlockKind::Image, url.to_owned()),
                Segment::Text(text) => editor.push(BlockKind::Text, text.to_owned()),
                Segment::Quote(_) | Segment::Code { .. } | Segment::Video(_) => {
                    editor.push(BlockKind::Text, segment.to_source())
                }
            };
        }
        if editor.blocks.is_empty() {
            editor.push(BlockKind::Text, String::new());
        }
        editor
    }

    /// Blocks in serialization order.
    #[inline]
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: BlockId) -> Option<&ContentBlock> {
        self.position(id).map(|idx| &self.blocks[idx])
    }

    /// True when at least one block has non-blank content.
    pub fn has_content(&self) -> bool {
        self.blocks.iter().any(ContentBlock::has_content)
    }

    /// Append an empty block and return its id.
    pub fn add_block(&mut self, kind: BlockKind) -> BlockId {
        self.push(kind, String::new())
    }

    /// Replace a block's content. Returns false if the id is unknown.
    pub fn update_block(&mut self, id: BlockId, content: impl Into<String>) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.blocks[idx].content = content.into();
                true
            }
            None => {
                log::debug!("update of unknown {id} ignored");
                false
            }
        }
    }

    /// Remove a block. The last remaining block cannot be removed.
    pub fn remove_block(&mut self, id: BlockId) -> bool {
        let Some(idx) = self.position(id) else {
            log::debug!("removal of unknown {id} ignored");
            return false;
        };
        if self.blocks.len() == 1 {
            log::debug!("refusing to remove {id}, the last block");
            return false;
        }
        self.blocks.remove(idx);
        self.reorder();
        true
    }

    /// Swap a block with the one before it. No-op for the first block.
    pub fn move_up(&mut self, id: BlockId) -> bool {
        match self.position(id) {
            Some(idx) if idx > 0 => {
                self.blocks.swap(idx - 1, idx);
                self.reorder();
                true
            }
            _ => false,
        }
    }

    /// Swap a block with the one after it. No-op for the last block.
    pub fn move_down(&mut self, id: BlockId) -> bool {
        match self.position(id) {
            Some(idx) if idx + 1 < self.blocks.len() => {
                self.blocks.swap(idx, idx + 1);
                self.reorder();
                true
            }
            _ => false,
        }
    }

    /// Serialize to bracket-tag content, blocks joined by a blank line.
    ///
    /// Block text is written unescaped. A text block holding an opener with
    /// no closer, such as `Type [image] to add pictures`, pairs with the
    /// closer of a later block when the content is parsed again, and that
    /// block is lost. [`BlockEditor::unclosed_text_blocks`] finds such
    /// blocks before saving.
    pub fn serialize(&self) -> String {
        let capacity = self
            .blocks
            .iter()
            .map(|b| b.content.len() + 16)
            .sum::<usize>();
        let mut out = String::with_capacity(capacity);
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                out.push_str(BLOCK_SEPARATOR);
            }
            block.write_serialized(&mut out);
        }
        out
    }

    /// Text blocks that would swallow a following block when serialized.
    ///
    /// The last block is never reported; nothing follows it.
    pub fn unclosed_text_blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        let followed = self.blocks.len().saturating_sub(1);
        self.blocks[..followed]
            .iter()
            .filter(|b| b.kind == BlockKind::Text && has_unclosed_opener(&b.content))
            .map(|b| b.id)
    }

    fn push(&mut self, kind: BlockKind, content: String) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.push(ContentBlock {
            id,
            kind,
            content,
            order: self.blocks.len(),
        });
        id
    }

    #[inline]
    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    fn reorder(&mut self) {
        for (order, block) in self.blocks.iter_mut().enumerate() {
            block.order = order;
        }
    }
}
