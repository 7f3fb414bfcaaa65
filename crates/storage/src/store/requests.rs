#![forbid(unsafe_code)]

use ts_core::model::CollectionKind;

/// One ordering sequence: a collection, narrowed to a parent record for scoped kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeRef {
    pub kind: CollectionKind,
    pub parent_id: Option<String>,
}

impl ScopeRef {
    pub fn global(kind: CollectionKind) -> Self {
        Self {
            kind,
            parent_id: None,
        }
    }

    pub fn under(kind: CollectionKind, parent_id: impl Into<String>) -> Self {
        Self {
            kind,
            parent_id: Some(parent_id.into()),
        }
    }

    pub(crate) fn parent_key(&self) -> &str {
        self.parent_id.as_deref().unwrap_or("")
    }
}

/// Bilingual fields shared by every ordered record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemContent {
    pub title_en: String,
    pub title_ar: String,
    pub body_en: Option<String>,
    pub body_ar: Option<String>,
    pub link_url: Option<String>,
    pub media_url: Option<String>,
}

impl ItemContent {
    pub fn titled(title_en: impl Into<String>, title_ar: impl Into<String>) -> Self {
        Self {
            title_en: title_en.into(),
            title_ar: title_ar.into(),
            ..Self::default()
        }
    }
}

/// Partial content update; `Some(None)` clears an optional field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentPatch {
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub body_en: Option<Option<String>>,
    pub body_ar: Option<Option<String>>,
    pub link_url: Option<Option<String>>,
    pub media_url: Option<Option<String>>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.title_en.is_none()
            && self.title_ar.is_none()
            && self.body_en.is_none()
            && self.body_ar.is_none()
            && self.link_url.is_none()
            && self.media_url.is_none()
    }

    pub(crate) fn apply_to(self, content: &mut ItemContent) {
        if let Some(value) = self.title_en {
            content.title_en = value;
        }
        if let Some(value) = self.title_ar {
            content.title_ar = value;
        }
        if let Some(value) = self.body_en {
            content.body_en = value;
        }
        if let Some(value) = self.body_ar {
            content.body_ar = value;
        }
        if let Some(value) = self.link_url {
            content.link_url = value;
        }
        if let Some(value) = self.media_url {
            content.media_url = value;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendRequest {
    pub scope: ScopeRef,
    pub content: ItemContent,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub scope: ScopeRef,
    pub id: String,
    /// Order the caller last saw; rejected as stale when it no longer matches.
    pub from: Option<i64>,
    pub to: i64,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequest {
    pub scope: ScopeRef,
    pub id: String,
    pub patch: ContentPatch,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveRequest {
    pub scope: ScopeRef,
    pub id: String,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeRequest {
    pub scope: ScopeRef,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventsSinceRequest {
    pub since_seq: i64,
    pub limit: usize,
    pub kind: Option<CollectionKind>,
}
