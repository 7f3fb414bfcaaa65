#![forbid(unsafe_code)]

use super::ItemContent;
use ts_core::model::CollectionKind;
use ts_core::order::Ordered;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedItemRow {
    pub kind: CollectionKind,
    pub id: String,
    pub parent_id: Option<String>,
    pub order: i64,
    pub content: ItemContent,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Ordered for OrderedItemRow {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub kind: String,
    pub item_id: Option<String>,
    pub event_type: String,
    pub payload_json: String,
}

impl EventRow {
    pub fn event_id(&self) -> String {
        format!("evt_{:016}", self.seq)
    }
}

#[derive(Clone, Debug)]
pub struct OrderedOpResult {
    pub scope_revision: i64,
    pub item: OrderedItemRow,
    /// Siblings whose order changed besides the item itself.
    pub shifted: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct RemoveResult {
    pub scope_revision: i64,
    pub removed: OrderedItemRow,
    pub shifted: usize,
    /// Children deleted along with the record, per child collection.
    pub cascaded: Vec<(CollectionKind, usize)>,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct NormalizeResult {
    pub scope_revision: i64,
    pub renumbered: usize,
    pub event: EventRow,
}

#[derive(Clone, Debug)]
pub struct ScopeListing {
    pub revision: i64,
    pub items: Vec<OrderedItemRow>,
}
