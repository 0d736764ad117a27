use serde::{Deserialize, Serialize};

use crate::caret::{Offset, Rect};
use crate::document::BlockId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// The rendering surface the editor drives.
///
/// Geometry is reported in client coordinates. The editor never reads the
/// rendered tree; it only asks for caret geometry, issues focus and caret
/// commands, and owns at most one document-click listener at a time.
pub trait Surface {
    /// Client rect of the active selection collapsed to its end.
    fn caret_rect(&self) -> Option<Rect>;
    fn container_rect(&self) -> Rect;
    fn container_scroll(&self) -> Offset;

    /// Collapses the active selection to just after the block's last content node.
    fn collapse_selection_to_end(&mut self, block: BlockId);
    fn focus(&mut self, block: BlockId);

    fn listen_document_click(&mut self) -> ListenerId;
    fn unlisten_document_click(&mut self, listener: ListenerId);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCommand {
    CollapseToEnd(BlockId),
    Focus(BlockId),
    Listen(ListenerId),
    Unlisten(ListenerId),
}

/// A surface without a display. Geometry is whatever the host sets; every
/// command is recorded in order.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub caret: Option<Rect>,
    pub container: Rect,
    pub scroll: Offset,
    focused: Option<BlockId>,
    caret_block: Option<BlockId>,
    listeners: Vec<ListenerId>,
    next_listener: u64,
    commands: Vec<SurfaceCommand>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(caret: Option<Rect>, container: Rect, scroll: Offset) -> Self {
        Self {
            caret,
            container,
            scroll,
            ..Self::default()
        }
    }

    pub fn focused(&self) -> Option<BlockId> {
        self.focused
    }

    pub fn caret_block(&self) -> Option<BlockId> {
        self.caret_block
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for HeadlessSurface {
    fn caret_rect(&self) -> Option<Rect> {
        self.caret
    }

    fn container_rect(&self) -> Rect {
        self.container
    }

    fn container_scroll(&self) -> Offset {
        self.scroll
    }

    fn collapse_selection_to_end(&mut self, block: BlockId) {
        self.caret_block = Some(block);
        self.commands.push(SurfaceCommand::CollapseToEnd(block));
    }

    fn focus(&mut self, block: BlockId) {
        self.focused = Some(block);
        self.commands.push(SurfaceCommand::Focus(block));
    }

    fn listen_document_click(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(id);
        self.commands.push(SurfaceCommand::Listen(id));
        id
    }

    fn unlisten_document_click(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
        self.commands.push(SurfaceCommand::Unlisten(listener));
    }
}
