#![forbid(unsafe_code)]

mod support;

use serde_json::{Value, json};
use support::*;

fn create(server: &mut Server, token: &str, action: &str, args: Value) -> Value {
    let resp = server.call(action, Some(token), args);
    ok_result(&resp)["item"].clone()
}

fn seed_hero_steps(server: &mut Server, token: &str) -> Vec<String> {
    ["A", "B", "C", "D"]
        .into_iter()
        .map(|title| {
            let item = create(
                server,
                token,
                "hero_steps.create",
                json!({ "title_en": title, "title_ar": format!("{title}-ar") }),
            );
            item["id"].as_str().expect("id").to_string()
        })
        .collect()
}

fn pairs(items: &[(&str, i64)]) -> Vec<(String, i64)> {
    items.iter().map(|(t, o)| (t.to_string(), *o)).collect()
}

#[test]
fn append_places_items_last_and_returns_refreshed_list() {
    let mut server = Server::start();
    let token = server.login();
    seed_hero_steps(&mut server, &token);

    let resp = server.call(
        "hero_steps.create",
        Some(&token),
        json!({ "title_en": "E", "title_ar": "E-ar", "link_url": "https://techstart.example/e" }),
    );
    let result = ok_result(&resp);
    assert_eq!(resp["intent"], "hero_steps.create");
    assert_eq!(result["item"]["order"], 4);
    assert_eq!(result["item"]["link_url"], "https://techstart.example/e");
    assert_eq!(result["scope_revision"], 5);
    assert_eq!(result["shifted"], 0);
    assert!(result["event_id"].as_str().expect("event_id").starts_with("evt_"));
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("A", 0), ("B", 1), ("C", 2), ("D", 3), ("E", 4)])
    );
}

#[test]
fn move_later_and_earlier_shift_the_siblings_between() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "from": 0, "to": 2 }),
    );
    let result = ok_result(&resp);
    assert_eq!(result["shifted"], 2);
    assert_eq!(result["item"]["order"], 2);
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("B", 0), ("C", 1), ("A", 2), ("D", 3)])
    );

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[3], "to": 1 }),
    );
    let result = ok_result(&resp);
    assert_eq!(result["shifted"], 2);
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("B", 0), ("D", 1), ("C", 2), ("A", 3)])
    );
    assert_eq!(result["scope_revision"], 6);
}

#[test]
fn same_slot_move_is_reported_as_a_no_op() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[1], "from": 1, "to": 1 }),
    );
    let result = ok_result(&resp);
    assert_eq!(result["shifted"], 0);
    assert_eq!(resp["warnings"][0]["code"], "NO_OP_MOVE");
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("A", 0), ("B", 1), ("C", 2), ("D", 3)])
    );
}

#[test]
fn rejected_moves_leave_the_stored_order_alone() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "to": 4 }),
    );
    assert_eq!(error_code(&resp), "ORDER_OUT_OF_RANGE");
    assert_eq!(resp["error"]["class"], "validation_failure");
    assert!(resp["error"]["recovery"].as_str().is_some());

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "to": -1 }),
    );
    assert_eq!(error_code(&resp), "ORDER_OUT_OF_RANGE");

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[2], "from": 0, "to": 3 }),
    );
    assert_eq!(error_code(&resp), "STALE_ORDER");

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": "HS-FFFFFFFF", "to": 0 }),
    );
    assert_eq!(error_code(&resp), "UNKNOWN_ID");
    assert_eq!(resp["error"]["class"], "not_found");

    let resp = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "to": 1, "expected_revision": 1 }),
    );
    assert_eq!(error_code(&resp), "REVISION_MISMATCH");

    let resp = server.call("hero_steps.move", Some(&token), json!({ "id": ids[0], "to": "2" }));
    assert_eq!(error_code(&resp), "INVALID_INPUT");

    let resp = server.call("hero_steps.list", Some(&token), json!({}));
    let result = ok_result(&resp);
    assert_eq!(result["scope_revision"], 4);
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("A", 0), ("B", 1), ("C", 2), ("D", 3)])
    );
}

#[test]
fn delete_closes_the_gap() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);

    let resp = server.call("hero_steps.delete", Some(&token), json!({ "id": ids[1] }));
    let result = ok_result(&resp);
    assert_eq!(result["removed"]["title_en"], "B");
    assert_eq!(result["shifted"], 2);
    assert!(result.get("item").is_none());
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("A", 0), ("C", 1), ("D", 2)])
    );

    let resp = server.call("hero_steps.get", Some(&token), json!({ "id": ids[1] }));
    assert_eq!(error_code(&resp), "UNKNOWN_ID");
}

#[test]
fn update_edits_content_and_moves_in_one_call() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);

    let resp = server.call(
        "hero_steps.update",
        Some(&token),
        json!({ "id": ids[3], "title_en": "D2", "body_en": "Apply now", "to": 0 }),
    );
    let result = ok_result(&resp);
    assert_eq!(result["item"]["title_en"], "D2");
    assert_eq!(result["item"]["body_en"], "Apply now");
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("D2", 0), ("A", 1), ("B", 2), ("C", 3)])
    );

    let resp = server.call(
        "hero_steps.update",
        Some(&token),
        json!({ "id": ids[3], "body_en": null }),
    );
    let result = ok_result(&resp);
    assert_eq!(result["item"]["body_en"], Value::Null);
    assert_eq!(result["item"]["order"], 0);

    let resp = server.call(
        "hero_steps.update",
        Some(&token),
        json!({ "id": ids[3], "title_en": "   " }),
    );
    assert_eq!(error_code(&resp), "INVALID_INPUT");
}

#[test]
fn scoped_collections_order_per_parent_and_cascade() {
    let mut server = Server::start();
    let token = server.login();

    let tab = create(
        &mut server,
        &token,
        "program_tabs.create",
        json!({ "title_en": "Bootcamps", "title_ar": "معسكرات" }),
    );
    let tab_id = tab["id"].as_str().expect("tab id").to_string();

    let resp = server.call(
        "tab_buttons.create",
        Some(&token),
        json!({ "title_en": "orphan" }),
    );
    assert_eq!(error_code(&resp), "INVALID_INPUT");

    let resp = server.call(
        "tab_buttons.create",
        Some(&token),
        json!({ "parent_id": "PT-FFFFFFFF", "title_en": "lost" }),
    );
    assert_eq!(error_code(&resp), "UNKNOWN_SCOPE");
    assert_eq!(resp["error"]["class"], "not_found");

    let mut button_ids = Vec::new();
    for title in ["Apply", "Syllabus", "FAQ"] {
        let item = create(
            &mut server,
            &token,
            "tab_buttons.create",
            json!({ "parent_id": tab_id, "title_en": title }),
        );
        assert_eq!(item["parent_id"], tab_id.as_str());
        button_ids.push(item["id"].as_str().expect("id").to_string());
    }

    let resp = server.call(
        "tab_buttons.move",
        Some(&token),
        json!({ "parent_id": tab_id, "id": button_ids[2], "from": 2, "to": 0 }),
    );
    assert_eq!(
        titles_and_orders(ok_result(&resp)),
        pairs(&[("FAQ", 0), ("Apply", 1), ("Syllabus", 2)])
    );

    let resp = server.call(
        "tab_buttons.first",
        Some(&token),
        json!({ "parent_id": tab_id }),
    );
    assert_eq!(ok_result(&resp)["item"]["title_en"], "FAQ");

    let resp = server.call("program_tabs.delete", Some(&token), json!({ "id": tab_id }));
    let result = ok_result(&resp);
    assert_eq!(result["cascaded"]["tab_buttons"], 3);
    assert_eq!(result["items"], json!([]));

    let resp = server.call(
        "tab_buttons.list",
        Some(&token),
        json!({ "parent_id": tab_id }),
    );
    assert_eq!(error_code(&resp), "UNKNOWN_SCOPE");
}

#[test]
fn first_is_null_for_an_empty_scope() {
    let mut server = Server::start();
    let token = server.login();

    let resp = server.call("partner_pages.first", Some(&token), json!({}));
    assert_eq!(ok_result(&resp)["item"], Value::Null);

    let resp = server.call("partner_pages.normalize", Some(&token), json!({}));
    let result = ok_result(&resp);
    assert_eq!(result["shifted"], 0);
    assert_eq!(result["items"], json!([]));
}

#[test]
fn events_record_each_committed_mutation() {
    let mut server = Server::start();
    let token = server.login();
    let ids = seed_hero_steps(&mut server, &token);
    let _ = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "to": 3 }),
    );
    let _ = server.call(
        "hero_steps.move",
        Some(&token),
        json!({ "id": ids[0], "to": 9 }),
    );
    let _ = server.call("faq_categories.create", Some(&token), json!({ "title_en": "General" }));

    let resp = server.call(
        "events.since",
        Some(&token),
        json!({ "collection": "hero_steps" }),
    );
    let result = ok_result(&resp);
    let types: Vec<&str> = result["events"]
        .as_array()
        .expect("events")
        .iter()
        .map(|e| e["type"].as_str().expect("type"))
        .collect();
    assert_eq!(
        types,
        [
            "item_appended",
            "item_appended",
            "item_appended",
            "item_appended",
            "item_moved"
        ]
    );

    let next_seq = result["next_seq"].as_i64().expect("next_seq");
    let resp = server.call(
        "events.since",
        Some(&token),
        json!({ "since_seq": next_seq }),
    );
    let events = ok_result(&resp)["events"].as_array().expect("events").clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["collection"], "faq_categories");
}

#[test]
fn order_survives_a_restart() {
    let storage = tempfile::tempdir().expect("temp dir");
    let ids = {
        let mut server = Server::start_in(storage.path(), &[]);
        let token = server.login();
        let ids = seed_hero_steps(&mut server, &token);
        let resp = server.call(
            "hero_steps.move",
            Some(&token),
            json!({ "id": ids[0], "to": 3 }),
        );
        ok_result(&resp);
        ids
    };

    let mut server = Server::start_in(storage.path(), &[]);
    let token = server.login();
    let resp = server.call("hero_steps.list", Some(&token), json!({}));
    let result = ok_result(&resp);
    assert_eq!(
        titles_and_orders(result),
        pairs(&[("B", 0), ("C", 1), ("D", 2), ("A", 3)])
    );
    assert_eq!(result["items"][3]["id"], ids[0].as_str());
}

#[test]
fn protocol_errors_use_the_same_envelope() {
    let mut server = Server::start();

    server.send_raw("{not json");
    let resp = server.recv();
    assert_eq!(error_code(&resp), "PARSE_ERROR");
    assert_eq!(resp["id"], Value::Null);
    assert_eq!(resp["error"]["class"], "protocol");

    let resp = server.request(json!({ "id": 3, "args": {} }));
    assert_eq!(error_code(&resp), "INVALID_REQUEST");
    assert_eq!(resp["id"], 3);

    let token = server.login();
    let resp = server.call("hero_steps.shuffle", Some(&token), json!({}));
    assert_eq!(error_code(&resp), "UNKNOWN_ACTION");
    let resp = server.call("newsletters.list", Some(&token), json!({}));
    assert_eq!(error_code(&resp), "UNKNOWN_ACTION");

    let resp = server.call("help", None, json!({}));
    let actions = ok_result(&resp)["actions"].as_array().expect("actions").len();
    assert_eq!(actions, 4 + 7 * 8);
}
