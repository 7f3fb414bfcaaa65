#![forbid(unsafe_code)]

use super::render::{cascaded_json, item_json, items_json, scope_json};
use crate::*;
use serde_json::{Value, json};
use tracing::{info, warn};
use ts_core::model::CollectionKind;
use ts_storage::{
    AppendRequest, ContentPatch, EventRow, ItemContent, MoveRequest, NormalizeRequest,
    OrderedItemRow, RemoveRequest, ScopeRef, UpdateRequest,
};

macro_rules! define_collection_dispatch {
    ($($verb:literal => $method:ident),+ $(,)?) => {
        pub(crate) fn dispatch_collection_action(
            server: &mut AdminServer,
            kind: CollectionKind,
            verb: &str,
            args: Value,
        ) -> Option<Value> {
            match verb {
                $($verb => Some(server.$method(kind, args).unwrap_or_else(|resp| resp)),)+
                _ => None,
            }
        }

        #[cfg(test)]
        pub(crate) fn dispatch_collection_verbs() -> &'static [&'static str] {
            &[$($verb),+]
        }
    };
}

define_collection_dispatch! {
    "list" => collection_list,
    "get" => collection_get,
    "first" => collection_first,
    "create" => collection_create,
    "update" => collection_update,
    "move" => collection_move,
    "delete" => collection_delete,
    "normalize" => collection_normalize,
}

fn intent(kind: CollectionKind, verb: &str) -> String {
    format!("{}.{verb}", kind.as_str())
}

fn scope_from_args(kind: CollectionKind, args: &Args) -> Result<ScopeRef, Value> {
    Ok(ScopeRef {
        kind,
        parent_id: optional_string(args, "parent_id")?,
    })
}

fn content_from_args(args: &Args) -> Result<ItemContent, Value> {
    Ok(ItemContent {
        title_en: require_string(args, "title_en")?,
        title_ar: optional_string(args, "title_ar")?.unwrap_or_default(),
        body_en: optional_string(args, "body_en")?,
        body_ar: optional_string(args, "body_ar")?,
        link_url: optional_string(args, "link_url")?,
        media_url: optional_string(args, "media_url")?,
    })
}

fn patch_from_args(args: &Args) -> Result<ContentPatch, Value> {
    Ok(ContentPatch {
        title_en: optional_string(args, "title_en")?,
        title_ar: optional_string(args, "title_ar")?,
        body_en: optional_nullable_string(args, "body_en")?,
        body_ar: optional_nullable_string(args, "body_ar")?,
        link_url: optional_nullable_string(args, "link_url")?,
        media_url: optional_nullable_string(args, "media_url")?,
    })
}

struct MutationOutcome<'a> {
    intent: &'a str,
    scope: &'a ScopeRef,
    item: Option<&'a OrderedItemRow>,
    scope_revision: i64,
    shifted: usize,
    event: &'a EventRow,
    warnings: Vec<Value>,
}

impl AdminServer {
    fn collection_list(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let listing = self
            .store
            .ordered_list(&scope)
            .map_err(|err| store_error(&err))?;
        Ok(admin_ok(
            &intent(kind, "list"),
            json!({
                "scope": scope_json(&scope),
                "scope_revision": listing.revision,
                "count": listing.items.len(),
                "items": items_json(&listing.items),
            }),
        ))
    }

    fn collection_get(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let id = require_string(&args, "id")?;
        let item = self
            .store
            .ordered_get(kind, &id)
            .map_err(|err| store_error(&err))?;
        Ok(admin_ok(
            &intent(kind, "get"),
            json!({ "item": item_json(&item) }),
        ))
    }

    fn collection_first(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let first = self
            .store
            .ordered_first(&scope)
            .map_err(|err| store_error(&err))?;
        Ok(admin_ok(
            &intent(kind, "first"),
            json!({
                "scope": scope_json(&scope),
                "item": first.as_ref().map(item_json),
            }),
        ))
    }

    fn collection_create(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let content = content_from_args(&args)?;
        let expected_revision = optional_i64(&args, "expected_revision")?;

        let out = self
            .store
            .ordered_append(AppendRequest {
                scope: scope.clone(),
                content,
                expected_revision,
            })
            .map_err(|err| store_error(&err))?;
        info!(collection = kind.as_str(), id = %out.item.id, order = out.item.order, "item appended");

        Ok(self.mutation_response(MutationOutcome {
            intent: &intent(kind, "create"),
            scope: &scope,
            item: Some(&out.item),
            scope_revision: out.scope_revision,
            shifted: out.shifted,
            event: &out.event,
            warnings: Vec::new(),
        }))
    }

    fn collection_update(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let id = require_string(&args, "id")?;
        let patch = patch_from_args(&args)?;
        let from = optional_i64(&args, "from")?;
        let to = optional_i64(&args, "to")?;
        let expected_revision = optional_i64(&args, "expected_revision")?;

        let mut warnings = Vec::new();
        if patch.is_empty() && to.is_none() {
            warnings.push(warning(
                "EMPTY_UPDATE",
                "no content fields and no target order were given",
                "Pass at least one field to change, or use move to reorder.",
            ));
        }

        let out = self
            .store
            .ordered_update(UpdateRequest {
                scope: scope.clone(),
                id,
                patch,
                from,
                to,
                expected_revision,
            })
            .map_err(|err| store_error(&err))?;
        info!(collection = kind.as_str(), id = %out.item.id, order = out.item.order, shifted = out.shifted, "item updated");

        Ok(self.mutation_response(MutationOutcome {
            intent: &intent(kind, "update"),
            scope: &scope,
            item: Some(&out.item),
            scope_revision: out.scope_revision,
            shifted: out.shifted,
            event: &out.event,
            warnings,
        }))
    }

    fn collection_move(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let id = require_string(&args, "id")?;
        let from = optional_i64(&args, "from")?;
        let to = require_i64(&args, "to")?;
        let expected_revision = optional_i64(&args, "expected_revision")?;

        let out = self
            .store
            .ordered_move(MoveRequest {
                scope: scope.clone(),
                id,
                from,
                to,
                expected_revision,
            })
            .map_err(|err| store_error(&err))?;
        info!(collection = kind.as_str(), id = %out.item.id, to = out.item.order, shifted = out.shifted, "item moved");

        let mut warnings = Vec::new();
        if out.shifted == 0 {
            warnings.push(warning(
                "NO_OP_MOVE",
                "the item already sits at the requested order",
                "Nothing to redisplay; the list is unchanged.",
            ));
        }

        Ok(self.mutation_response(MutationOutcome {
            intent: &intent(kind, "move"),
            scope: &scope,
            item: Some(&out.item),
            scope_revision: out.scope_revision,
            shifted: out.shifted,
            event: &out.event,
            warnings,
        }))
    }

    fn collection_delete(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let id = require_string(&args, "id")?;
        let expected_revision = optional_i64(&args, "expected_revision")?;

        let out = self
            .store
            .ordered_remove(RemoveRequest {
                scope: scope.clone(),
                id,
                expected_revision,
            })
            .map_err(|err| store_error(&err))?;
        info!(collection = kind.as_str(), id = %out.removed.id, shifted = out.shifted, "item removed");

        let mut response = self.mutation_response(MutationOutcome {
            intent: &intent(kind, "delete"),
            scope: &scope,
            item: None,
            scope_revision: out.scope_revision,
            shifted: out.shifted,
            event: &out.event,
            warnings: Vec::new(),
        });
        response["result"]["removed"] = item_json(&out.removed);
        response["result"]["cascaded"] = cascaded_json(&out.cascaded);
        Ok(response)
    }

    fn collection_normalize(&mut self, kind: CollectionKind, args: Value) -> Result<Value, Value> {
        let args = args_object(args)?;
        let scope = scope_from_args(kind, &args)?;
        let expected_revision = optional_i64(&args, "expected_revision")?;

        let out = self
            .store
            .ordered_normalize(NormalizeRequest {
                scope: scope.clone(),
                expected_revision,
            })
            .map_err(|err| store_error(&err))?;

        Ok(self.mutation_response(MutationOutcome {
            intent: &intent(kind, "normalize"),
            scope: &scope,
            item: None,
            scope_revision: out.scope_revision,
            shifted: out.renumbered,
            event: &out.event,
            warnings: Vec::new(),
        }))
    }

    /// Mutations answer with the refreshed scope so the dashboard never renders a stale order.
    fn mutation_response(&self, outcome: MutationOutcome<'_>) -> Value {
        let MutationOutcome {
            intent,
            scope,
            item,
            scope_revision,
            shifted,
            event,
            mut warnings,
        } = outcome;

        let mut result = json!({
            "scope": scope_json(scope),
            "scope_revision": scope_revision,
            "shifted": shifted,
            "event_id": event.event_id(),
        });
        if let Some(item) = item {
            result["item"] = item_json(item);
        }
        match self.store.ordered_list(scope) {
            Ok(listing) => result["items"] = items_json(&listing.items),
            Err(err) => {
                warn!(intent, "refresh after commit failed: {err}");
                result["items"] = Value::Null;
                warnings.push(warning(
                    "REFRESH_FAILED",
                    &err.to_string(),
                    "The change was saved; call list before redisplaying.",
                ));
            }
        }
        admin_ok_with_warnings(intent, result, warnings)
    }
}
