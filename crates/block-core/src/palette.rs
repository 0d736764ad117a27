use serde::{Deserialize, Serialize};

use crate::caret::Position;
use crate::config::EditorConfig;
use crate::document::BlockId;
use crate::registry::KindRegistry;
use crate::surface::ListenerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// 1-based registry position, the same number typed after the trigger.
    pub index: usize,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub title: String,
    pub hint: String,
    pub filter_index: usize,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(config: &EditorConfig, registry: &KindRegistry) -> Self {
        let items = registry
            .kinds()
            .iter()
            .enumerate()
            .map(|(ix, spec)| MenuItem {
                index: ix + 1,
                kind: spec.id.clone(),
                title: spec.title.clone(),
                description: spec.description.clone(),
                icon: spec.icon.clone(),
            })
            .collect();
        Self {
            title: config.menu_title.clone(),
            hint: config.menu_hint.clone(),
            filter_index: 1,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    anchor: BlockId,
    position: Option<Position>,
    menu: Menu,
    listener: ListenerId,
}

impl Palette {
    pub(crate) fn new(
        anchor: BlockId,
        position: Option<Position>,
        menu: Menu,
        listener: ListenerId,
    ) -> Self {
        Self {
            anchor,
            position,
            menu,
            listener,
        }
    }

    pub fn anchor(&self) -> BlockId {
        self.anchor
    }

    /// Menu origin relative to the editor container. `None` leaves placement
    /// to the host.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub(crate) fn set_filter_index(&mut self, index: usize) {
        self.menu.filter_index = index;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaletteState {
    #[default]
    Closed,
    Open(Palette),
}

impl PaletteState {
    pub fn is_open(&self) -> bool {
        matches!(self, PaletteState::Open(_))
    }

    pub fn palette(&self) -> Option<&Palette> {
        match self {
            PaletteState::Open(palette) => Some(palette),
            PaletteState::Closed => None,
        }
    }

    pub(crate) fn palette_mut(&mut self) -> Option<&mut Palette> {
        match self {
            PaletteState::Open(palette) => Some(palette),
            PaletteState::Closed => None,
        }
    }

    pub fn anchor(&self) -> Option<BlockId> {
        self.palette().map(Palette::anchor)
    }

    pub fn is_open_for(&self, block: BlockId) -> bool {
        self.anchor() == Some(block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteExit {
    Committed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedCommand<'a> {
    /// The 1-based index typed right after the trigger, if it is a digit.
    pub index: Option<usize>,
    pub seed: &'a str,
}

/// Parses trimmed block text of the form `<trigger><digit><seed>`. Returns
/// `None` when the text does not start with the trigger at all.
pub fn parse_command(text: &str, trigger: char) -> Option<TypedCommand<'_>> {
    let rest = text.trim().strip_prefix(trigger)?;
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return Some(TypedCommand {
            index: None,
            seed: "",
        });
    };
    let index = first.to_digit(10).map(|d| d as usize);
    Some(TypedCommand {
        index,
        seed: chars.as_str().trim(),
    })
}
