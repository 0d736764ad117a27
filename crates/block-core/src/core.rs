use tracing::{debug, trace};

use crate::caret::{Position, caret_coordinates, set_caret_to_end};
use crate::config::EditorConfig;
use crate::document::{BlockId, BlockKind, Document, PARAGRAPH_KIND, escape_markup};
use crate::error::ConfigError;
use crate::keymap::{Intent, KeyDisposition, KeyEvent, classify};
use crate::palette::{Menu, Palette, PaletteExit, PaletteState, parse_command};
use crate::registry::KindRegistry;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A palette entry, by its 1-based index.
    MenuItem(usize),
    Elsewhere,
}

pub struct Editor<S: Surface> {
    doc: Document,
    registry: KindRegistry,
    config: EditorConfig,
    palette: PaletteState,
    focused: Option<BlockId>,
    surface: S,
}

impl<S: Surface> Editor<S> {
    pub fn new(
        registry: KindRegistry,
        config: EditorConfig,
        surface: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(registry, config, surface))
    }

    pub fn with_standard_kinds(surface: S) -> Self {
        Self::build(KindRegistry::standard(), EditorConfig::default(), surface)
    }

    fn build(registry: KindRegistry, config: EditorConfig, surface: S) -> Self {
        let mut doc = Document::new();
        let block = doc.create_block("", BlockKind::paragraph(), config.placeholder.clone());
        doc.push(block);
        Self {
            doc,
            registry,
            config,
            palette: PaletteState::Closed,
            focused: None,
            surface,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> &PaletteState {
        &self.palette
    }

    pub fn focused(&self) -> Option<BlockId> {
        self.focused
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Appends a block at the end of the document.
    pub fn push_block(&mut self, content: impl Into<String>, kind: BlockKind) -> BlockId {
        let block = self
            .doc
            .create_block(content, kind, self.config.placeholder.clone());
        self.doc.push(block)
    }

    pub fn insert_block_after(
        &mut self,
        anchor: BlockId,
        content: impl Into<String>,
        kind: BlockKind,
    ) -> Option<BlockId> {
        if !self.doc.contains(anchor) {
            return None;
        }
        let block = self
            .doc
            .create_block(content, kind, self.config.placeholder.clone());
        self.doc.insert_after(anchor, block)
    }

    pub fn handle_key(&mut self, block: BlockId, event: &KeyEvent) -> KeyDisposition {
        let Some(target) = self.doc.get(block) else {
            return KeyDisposition::Native;
        };
        let Some(intent) = classify(event, target, self.config.trigger) else {
            return KeyDisposition::Native;
        };
        trace!(?block, ?intent, key = ?event.key, "key");

        match intent {
            Intent::OpenPalette => {
                self.open_palette(block);
                // Only a trigger keypress has a known pre-trigger state.
                if let Some(target) = self.doc.get_mut(block) {
                    target.rollback = Some(target.content().to_string());
                }
            }
            Intent::Commit => self.commit(block),
            Intent::RemoveEmpty => self.remove_empty(block),
            Intent::FocusPrevious => self.focus_previous(block),
            Intent::FocusNext => self.focus_next(block),
            Intent::CancelPalette => self.cancel_palette(block),
        }

        if intent.suppresses_native() {
            KeyDisposition::Handled
        } else {
            KeyDisposition::Native
        }
    }

    /// Content-change reaction. The palette stays open exactly while the block
    /// text starts with the trigger, however that text came about.
    pub fn handle_input(&mut self, block: BlockId, content: impl Into<String>) {
        let trigger = self.config.trigger;
        let Some(target) = self.doc.get_mut(block) else {
            return;
        };
        target.set_content(content);
        let text = target.plain_text();
        trace!(?block, empty = target.is_empty(), "input");

        let looks_like_command = text.trim().starts_with(trigger);
        let open_here = self.palette.is_open_for(block);
        if looks_like_command && !open_here {
            self.open_palette(block);
        } else if !looks_like_command && open_here {
            self.close_palette(PaletteExit::Cancelled);
        } else if open_here {
            self.refresh_filter(&text);
        }
    }

    pub fn handle_focus(&mut self, block: BlockId) {
        if let Some(target) = self.doc.get_mut(block) {
            target.check_placeholder();
            self.focused = Some(block);
        }
    }

    pub fn handle_blur(&mut self, block: BlockId) {
        if let Some(target) = self.doc.get_mut(block) {
            target.check_placeholder();
        }
        if self.focused == Some(block) {
            self.focused = None;
        }
    }

    /// Delivers a click in bubble order: the menu item's own handler runs
    /// before the document-level dismissal.
    pub fn click(&mut self, target: ClickTarget) {
        if let ClickTarget::MenuItem(index) = target {
            self.select_menu_item(index);
        }
        self.dismiss();
    }

    /// Document-level click handler. A no-op when no palette is open.
    pub fn dismiss(&mut self) {
        if self.palette.is_open() {
            self.close_palette(PaletteExit::Cancelled);
        }
    }

    pub fn open_palette(&mut self, block: BlockId) {
        if !self.doc.contains(block) {
            return;
        }
        if self.palette.is_open() {
            self.close_palette(PaletteExit::Cancelled);
        }

        let Some(target) = self.doc.get_mut(block) else {
            return;
        };
        target.menu_opened = true;
        let text = target.plain_text();

        let gap = self.config.menu_gap;
        let position = caret_coordinates(&self.surface).map(|p| Position::new(p.x, p.y + gap));
        let mut menu = Menu::new(&self.config, &self.registry);
        menu.filter_index = filter_index(&text, self.config.trigger);

        // Registered only once the menu and its items exist.
        let listener = self.surface.listen_document_click();
        debug!(?block, ?position, ?listener, "palette opened");
        self.palette = PaletteState::Open(Palette::new(block, position, menu, listener));
    }

    /// Returns to Closed. Safe to call when nothing is open.
    pub fn close_palette(&mut self, exit: PaletteExit) -> bool {
        let PaletteState::Open(palette) = std::mem::take(&mut self.palette) else {
            return false;
        };
        self.surface.unlisten_document_click(palette.listener());
        if let Some(anchor) = self.doc.get_mut(palette.anchor()) {
            anchor.menu_opened = false;
            anchor.rollback = None;
        }
        debug!(anchor = ?palette.anchor(), ?exit, "palette closed");
        true
    }

    /// Pointer commit: turns the anchored block into the chosen kind with
    /// empty content.
    pub fn select_menu_item(&mut self, index: usize) -> Option<BlockId> {
        let anchor = self.palette.anchor()?;
        let spec = self.registry.resolve(index)?.clone();
        self.replace_with(anchor, spec.kind(), String::new(), spec.title)
    }

    /// Enter without shift: either a typed palette commit or a plain split.
    pub fn commit(&mut self, block: BlockId) {
        let Some(target) = self.doc.get(block) else {
            return;
        };
        let text = target.plain_text();
        let Some(command) = parse_command(&text, self.config.trigger) else {
            self.split(block);
            return;
        };

        let Some(spec) = command.index.and_then(|ix| self.registry.resolve(ix)).cloned() else {
            debug!(?block, index = ?command.index, "typed commit did not resolve");
            return;
        };
        let seed = escape_markup(command.seed);
        if self.replace_with(block, spec.kind(), seed, spec.title).is_some() {
            self.close_palette(PaletteExit::Committed);
        }
    }

    /// Inserts an empty paragraph after `block` and moves the caret there. The
    /// text of `block` is left as it is.
    pub fn split(&mut self, block: BlockId) -> Option<BlockId> {
        let new = self.insert_block_after(block, "", BlockKind::paragraph())?;
        debug!(?block, ?new, "split");
        self.caret_to_end(new);
        Some(new)
    }

    /// Replaces `block` with a fresh block of kind `kind` seeded with the
    /// plain text `seed`. Unknown kinds leave the document untouched.
    pub fn transform(&mut self, block: BlockId, kind: &str, seed: &str) -> Option<BlockId> {
        let seed = escape_markup(seed);
        if kind == PARAGRAPH_KIND {
            let placeholder = self.config.placeholder.clone();
            return self.replace_with(block, BlockKind::paragraph(), seed, placeholder);
        }
        let spec = self.registry.get(kind)?.clone();
        self.replace_with(block, spec.kind(), seed, spec.title)
    }

    /// Backspace on an empty block: headings are demoted to a paragraph in
    /// place, anything else is removed when a previous block exists.
    pub fn remove_empty(&mut self, block: BlockId) {
        let Some(target) = self.doc.get(block) else {
            return;
        };
        if !target.plain_text().trim().is_empty() {
            return;
        }

        if target.kind().is_heading() {
            let placeholder = self.config.placeholder.clone();
            self.replace_with(block, BlockKind::paragraph(), String::new(), placeholder);
            return;
        }

        let Some(prev) = self.doc.previous(block) else {
            trace!(?block, "nothing before first block");
            return;
        };
        self.doc.remove(block);
        debug!(?block, ?prev, "removed empty block");
        if self.palette.is_open_for(block) {
            self.close_palette(PaletteExit::Cancelled);
        }
        if self.focused == Some(block) {
            self.focused = None;
        }
        self.caret_to_end(prev);
    }

    pub fn focus_previous(&mut self, block: BlockId) {
        if let Some(prev) = self.doc.previous(block) {
            self.caret_to_end(prev);
        }
    }

    pub fn focus_next(&mut self, block: BlockId) {
        if let Some(next) = self.doc.next(block) {
            self.caret_to_end(next);
        }
    }

    pub fn caret_to_end(&mut self, block: BlockId) {
        let Some(target) = self.doc.get_mut(block) else {
            return;
        };
        target.check_placeholder();
        set_caret_to_end(&mut self.surface, block);
        self.focused = Some(block);
    }

    fn cancel_palette(&mut self, block: BlockId) {
        if let Some(target) = self.doc.get_mut(block) {
            if let Some(content) = target.rollback.take() {
                target.set_content(content);
            }
        }
        // Without a snapshot the text stays as typed.
        self.close_palette(PaletteExit::Cancelled);
        self.caret_to_end(block);
    }

    fn refresh_filter(&mut self, text: &str) {
        let index = filter_index(text, self.config.trigger);
        if let Some(palette) = self.palette.palette_mut() {
            palette.set_filter_index(index);
        }
    }

    fn replace_with(
        &mut self,
        block: BlockId,
        kind: BlockKind,
        content: String,
        placeholder: String,
    ) -> Option<BlockId> {
        if !self.doc.contains(block) {
            return None;
        }
        let kind_id = kind.id.clone();
        let new = self.doc.create_block(content, kind, placeholder);
        let new_id = new.id();
        self.doc.replace(block, new)?;
        debug!(old = ?block, new = ?new_id, kind = %kind_id, "block replaced");

        if self.palette.is_open_for(block) {
            self.close_palette(PaletteExit::Committed);
        }
        if self.focused == Some(block) {
            self.focused = None;
        }
        self.caret_to_end(new_id);
        Some(new_id)
    }
}

fn filter_index(text: &str, trigger: char) -> usize {
    parse_command(text, trigger)
        .and_then(|cmd| cmd.index)
        .unwrap_or(1)
}
