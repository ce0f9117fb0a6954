use crate::types::{Decoration, Link, NodeId, VisualNode};

/// AVL arena node. Height is stored (≥ 1 for any live node, absence counts
/// as 0); the balance factor is derived from the children's heights.
#[derive(Clone, Debug)]
pub struct AvlNode {
    pub id: NodeId,
    pub value: i64,
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub height: u32,
}

impl AvlNode {
    pub fn new(id: NodeId, value: i64) -> Self {
        Self {
            id,
            value,
            p: None,
            l: None,
            r: None,
            height: 1,
        }
    }
}

impl Link for AvlNode {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }
}

impl VisualNode for AvlNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn decorate(&self, arena: &[Self]) -> Decoration {
        let h = |link: Option<u32>| link.map(|i| arena[i as usize].height).unwrap_or(0);
        Decoration {
            height: Some(self.height),
            balance_factor: Some(h(self.l) as i32 - h(self.r) as i32),
            color: None,
        }
    }
}
