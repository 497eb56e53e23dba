use pretty_assertions::assert_eq;
use serde_json::json;
use squirrel_trace_explorer::parser::{parse_trace, ParsedTrace};
use squirrel_trace_explorer::view::{OutlineNode, Placeholder};

fn labels(nodes: &[OutlineNode<'_>]) -> Vec<String> {
    nodes.iter().map(|node| node.display_label()).collect()
}

fn load(raw: serde_json::Value) -> ParsedTrace {
    parse_trace(&raw).unwrap()
}

#[test]
fn test_instruction_outline_lists_four_operands() {
    let trace = load(json!([
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "TARGET", "arg1": 3}
    ]));

    let nodes = trace.outline(0).unwrap();
    assert_eq!(
        labels(&nodes),
        vec!["arg0: \"TARGET\"", "arg1: 3", "arg2: null", "arg3: null"]
    );
    assert!(nodes.iter().all(|node| node.is_leaf()));
    assert!(trace.outline(1).is_none());
}

#[test]
fn test_cycle_yields_placeholder_and_terminates() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:0000000A", "content": {"name": "a", "next": "POINTER:0000000B"}},
        {"type": "object", "address": "POINTER:0000000B", "content": {"name": "b", "next": "POINTER:0000000A"}},
        {"type": "instruction", "fn": "cycle.nut", "op": "move", "arg0": "POINTER:0000000A"}
    ]));
    let arena = trace.arena();

    let nodes = trace.outline(0).unwrap();
    let a = nodes[0].children(arena);
    assert_eq!(labels(&a), vec!["name: \"a\"", "next"]);

    let b = a[1].children(arena);
    assert_eq!(labels(&b), vec!["name: \"b\"", "next"]);

    let back = b[1].children(arena);
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].placeholder_kind(), Some(Placeholder::Cycle));
    assert_eq!(back[0].label(), "<cycle>");
    assert!(back[0].is_leaf());
    assert!(back[0].children(arena).is_empty());
}

#[test]
fn test_self_reference_is_a_cycle() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000001", "content": {"self": "POINTER:00000001"}},
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "POINTER:00000001"}
    ]));
    let arena = trace.arena();

    let nodes = trace.outline(0).unwrap();
    let fields = nodes[0].children(arena);
    assert_eq!(fields[0].label(), "self");

    let inner = fields[0].children(arena);
    assert_eq!(inner[0].placeholder_kind(), Some(Placeholder::Cycle));
}

#[test]
fn test_missing_reference_yields_single_placeholder() {
    let trace = load(json!([
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "POINTER:00000042"}
    ]));
    let arena = trace.arena();

    let nodes = trace.outline(0).unwrap();
    assert!(!nodes[0].is_leaf());

    let children = nodes[0].children(arena);
    assert_eq!(children.len(), 1);
    assert_eq!(
        children[0].placeholder_kind(),
        Some(Placeholder::MissingReference)
    );
    assert_eq!(children[0].label(), "<reference not found>");
    assert!(children[0].value().is_none());
}

#[test]
fn test_hash_table_flattens_string_and_null_keys() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000001", "content": {
            "ObjectType": "SQTable",
            "_nodes": [{"key": "x", "val": 42}, {"key": null, "val": "y"}]
        }},
        {"type": "instruction", "fn": "main.nut", "op": "newslot", "arg0": "POINTER:00000001"}
    ]));
    let arena = trace.arena();

    let nodes = trace.outline(0).unwrap();
    assert_eq!(nodes[0].value().unwrap().label(arena), "SQTable");

    let entries = nodes[0].children(arena);
    assert_eq!(labels(&entries), vec!["x: 42", "null: \"y\""]);
}

#[test]
fn test_leaf_label_always_shows_rendering() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000001", "content": {
            "ObjectType": "SQTable",
            "_nodes": [{"key": null, "val": null}, {"key": "7", "val": 7}]
        }},
        {"type": "instruction", "fn": "main.nut", "op": "get", "arg0": "POINTER:00000001"}
    ]));

    let nodes = trace.outline(0).unwrap();
    let entries = nodes[0].children(trace.arena());
    assert_eq!(labels(&entries), vec!["null: null", "7: 7"]);
}

#[test]
fn test_hash_table_dereferences_dumped_string_keys() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000002", "content": "speed"},
        {"type": "object", "address": "POINTER:00000001", "content": {
            "ObjectType": "SQTable",
            "_nodes": [{"key": "POINTER:00000002", "val": 1.5}]
        }},
        {"type": "instruction", "fn": "main.nut", "op": "get", "arg0": "POINTER:00000001"}
    ]));

    let nodes = trace.outline(0).unwrap();
    let entries = nodes[0].children(trace.arena());
    assert_eq!(labels(&entries), vec!["speed: 1.5"]);
}

#[test]
fn test_hash_table_other_keys_show_key_and_val() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000001", "content": {
            "ObjectType": "SQTable",
            "_nodes": [{"key": 7, "val": true}]
        }},
        {"type": "instruction", "fn": "main.nut", "op": "get", "arg0": "POINTER:00000001"}
    ]));

    let nodes = trace.outline(0).unwrap();
    let entries = nodes[0].children(trace.arena());
    assert_eq!(labels(&entries), vec!["key: 7", "val: true"]);
}

#[test]
fn test_hash_table_with_unexpected_layout_falls_back_to_fields() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000001", "content": {
            "ObjectType": "SQTable",
            "_nodes": 5,
            "_usednodes": 0
        }},
        {"type": "instruction", "fn": "main.nut", "op": "get", "arg0": "POINTER:00000001"}
    ]));

    let nodes = trace.outline(0).unwrap();
    let entries = nodes[0].children(trace.arena());
    assert_eq!(labels(&entries), vec!["_nodes: 5", "_usednodes: 0"]);
}

#[test]
fn test_array_children_labeled_by_type_or_index() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000003", "content": {"ObjectType": "SQClosure", "_outer": null}},
        {"type": "instruction", "fn": "main.nut", "op": "call", "arg2": ["POINTER:00000003", 8, {"plain": 1}]}
    ]));
    let arena = trace.arena();

    let nodes = trace.outline(0).unwrap();
    assert_eq!(nodes[2].value().unwrap().label(arena), "Array (3)");

    let items = nodes[2].children(arena);
    assert_eq!(labels(&items), vec!["SQClosure", "[1]: 8", "[2]"]);
    assert!(!items[0].is_leaf());
}

#[test]
fn test_empty_containers_are_leaves() {
    let trace = load(json!([
        {"type": "instruction", "fn": "main.nut", "op": "call", "arg0": [], "arg1": {}}
    ]));

    let nodes = trace.outline(0).unwrap();
    assert_eq!(nodes[0].leaf_text(), Some("[...]"));
    assert_eq!(nodes[1].leaf_text(), Some("{...}"));
    assert!(nodes[0].children(trace.arena()).is_empty());
}

#[test]
fn test_reference_to_scalar_renders_target() {
    let trace = load(json!([
        {"type": "object", "address": "POINTER:00000004", "content": "update"},
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg1": "POINTER:00000004"}
    ]));

    let nodes = trace.outline(0).unwrap();
    assert_eq!(nodes[1].display_label(), "arg1: \"update\"");
    assert!(nodes[1].is_leaf());
}
