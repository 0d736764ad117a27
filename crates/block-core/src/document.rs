use serde::{Deserialize, Serialize};

pub const PARAGRAPH_KIND: &str = "paragraph";
pub const PARAGRAPH_TAG: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockKind {
    pub id: String,
    pub tag: String,
}

impl BlockKind {
    pub fn new(id: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: tag.into(),
        }
    }

    pub fn paragraph() -> Self {
        Self::new(PARAGRAPH_KIND, PARAGRAPH_TAG)
    }

    pub fn is_paragraph(&self) -> bool {
        self.id == PARAGRAPH_KIND
    }

    /// Heading variants render as `h1`..`h6`, whatever their registry id.
    pub fn is_heading(&self) -> bool {
        let tag = self.tag.as_bytes();
        tag.len() == 2
            && tag[0].eq_ignore_ascii_case(&b'h')
            && (b'1'..=b'6').contains(&tag[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    kind: BlockKind,
    content: String,
    is_empty: bool,
    pub placeholder: String,
    pub menu_opened: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollback: Option<String>,
}

impl Block {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    pub fn plain_text(&self) -> String {
        plain_text(&self.content)
    }

    /// Replaces the markup payload. `is_empty` is refreshed here as well, so a
    /// mutation can never leave the placeholder state stale.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.check_placeholder();
    }

    pub fn check_placeholder(&mut self) -> bool {
        self.is_empty = plain_text(&self.content).trim().is_empty();
        self.is_empty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    blocks: Vec<Block>,
    next_id: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_block(
        &mut self,
        content: impl Into<String>,
        kind: BlockKind,
        placeholder: impl Into<String>,
    ) -> Block {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        let mut block = Block {
            id,
            kind,
            content: content.into(),
            is_empty: true,
            placeholder: placeholder.into(),
            menu_opened: false,
            rollback: None,
        };
        block.check_placeholder();
        block
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(Block::id).collect()
    }

    pub fn index_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn previous(&self, id: BlockId) -> Option<BlockId> {
        let ix = self.index_of(id)?;
        ix.checked_sub(1).map(|prev| self.blocks[prev].id)
    }

    pub fn next(&self, id: BlockId) -> Option<BlockId> {
        let ix = self.index_of(id)?;
        self.blocks.get(ix + 1).map(Block::id)
    }

    pub fn push(&mut self, block: Block) -> BlockId {
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Inserts `block` right after `anchor`. Returns `None` (and drops nothing
    /// from the document) when `anchor` is gone.
    pub fn insert_after(&mut self, anchor: BlockId, block: Block) -> Option<BlockId> {
        let ix = self.index_of(anchor)?;
        let id = block.id;
        self.blocks.insert(ix + 1, block);
        Some(id)
    }

    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let ix = self.index_of(id)?;
        Some(self.blocks.remove(ix))
    }

    /// Inserts `new` immediately after `old`, then removes `old`.
    pub fn replace(&mut self, old: BlockId, new: Block) -> Option<Block> {
        self.insert_after(old, new)?;
        self.remove(old)
    }
}

/// Plain-text projection of block markup.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '<' => match rest.find('>') {
                Some(end) => {
                    if tag_breaks_line(&rest[1..end]) {
                        out.push('\n');
                    }
                    rest = &rest[end + 1..];
                }
                None => {
                    out.push_str(rest);
                    break;
                }
            },
            '&' => {
                let decoded = rest.find(';').and_then(|end| {
                    let entity = &rest[1..end];
                    decode_entity(entity).map(|c| (c, end))
                });
                match decoded {
                    Some((c, end)) => {
                        out.push(c);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        out.push('&');
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    out
}

pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn tag_breaks_line(tag: &str) -> bool {
    let tag = tag.trim().trim_end_matches('/').trim();
    let name = tag
        .split(|c: char| c.is_ascii_whitespace())
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(name.as_str(), "br" | "/div" | "/p")
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "#39" | "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_drops_tags_and_decodes_entities() {
        assert_eq!(plain_text("<b>a</b> &amp; b"), "a & b");
        assert_eq!(plain_text("x&lt;y&gt;"), "x<y>");
        assert_eq!(plain_text("one<br>two"), "one\ntwo");
        assert_eq!(plain_text("a & b"), "a & b");
        assert_eq!(plain_text("broken <tag"), "broken <tag");
    }

    #[test]
    fn nbsp_and_line_breaks_count_as_whitespace() {
        assert!(plain_text("&nbsp;<br/>").trim().is_empty());
    }

    #[test]
    fn escape_round_trips_through_plain_text() {
        let text = "a<b & 'c'";
        assert_eq!(plain_text(&escape_markup(text)), text);
    }

    #[test]
    fn heading_variants_are_detected_by_tag() {
        assert!(BlockKind::new("heading", "h1").is_heading());
        assert!(BlockKind::new("expandable-heading", "H2").is_heading());
        assert!(!BlockKind::paragraph().is_heading());
        assert!(!BlockKind::new("hr", "hr").is_heading());
        assert!(!BlockKind::new("h7", "h7").is_heading());
    }
}
