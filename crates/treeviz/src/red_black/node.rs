use crate::types::{Color, Decoration, Link, NodeId, VisualNode};

/// Arena slot for the red-black engine. Absent links stand for the black nil
/// sentinel; a node's color is the only balance metadata stored.
#[derive(Debug, Clone)]
pub struct RbNode {
    pub id: NodeId,
    pub value: i64,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub color: Color,
}

impl RbNode {
    /// Fresh detached node. New nodes are born red; the root and recoloring
    /// during fixup are the only paths to black.
    pub fn new(id: NodeId, value: i64) -> Self {
        Self { id, value, p: None, l: None, r: None, color: Color::Red }
    }
}

impl Link for RbNode {
    #[inline]
    fn p(&self) -> Option<u32> {
        self.p
    }

    #[inline]
    fn l(&self) -> Option<u32> {
        self.l
    }

    #[inline]
    fn r(&self) -> Option<u32> {
        self.r
    }
}

impl VisualNode for RbNode {
    #[inline]
    fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    fn value(&self) -> i64 {
        self.value
    }

    fn decorate(&self, _arena: &[Self]) -> Decoration {
        Decoration { color: Some(self.color), ..Decoration::default() }
    }
}
