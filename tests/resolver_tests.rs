use pretty_assertions::assert_eq;
use serde_json::json;
use squirrel_trace_explorer::parser::{ingest, parse_trace, ObjectArena, RefState, Value};
use squirrel_trace_explorer::resolver::{resolve, MissingReference};

/// Count references still unresolved anywhere reachable from `value`
fn unresolved_reachable(value: &Value, arena: &ObjectArena, seen: &mut Vec<usize>) -> usize {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| unresolved_reachable(item, arena, seen))
            .sum(),
        Value::Object(object) => object
            .fields()
            .iter()
            .map(|(k, v)| unresolved_reachable(k, arena, seen) + unresolved_reachable(v, arena, seen))
            .sum(),
        Value::HashTable(view) => view
            .object()
            .fields()
            .iter()
            .map(|(k, v)| unresolved_reachable(k, arena, seen) + unresolved_reachable(v, arena, seen))
            .sum(),
        Value::Reference(reference) => match reference.state() {
            RefState::Unresolved => 1,
            RefState::Missing => 0,
            RefState::Resolved(id) => {
                if seen.contains(&id.index()) {
                    return 0;
                }
                seen.push(id.index());
                unresolved_reachable(arena.get(id), arena, seen)
            }
        },
        _ => 0,
    }
}

fn cyclic_trace() -> serde_json::Value {
    json!([
        {"type": "object", "address": "POINTER:0000000A", "content": {"name": "a", "next": "POINTER:0000000B"}},
        {"type": "object", "address": "POINTER:0000000B", "content": {"name": "b", "next": "POINTER:0000000A"}},
        {"type": "instruction", "fn": "cycle.nut", "op": "move", "arg0": "TARGET", "arg1": "POINTER:0000000A"}
    ])
}

#[test]
fn test_round_trip_single_object() {
    let trace = parse_trace(&json!([
        {"type": "object", "address": "POINTER:00000001", "content": {"a": 1}},
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "POINTER:00000001"}
    ]))
    .unwrap();

    let arg0 = &trace.instructions()[0].args[0];
    let reference = arg0.as_reference().unwrap();
    let RefState::Resolved(id) = reference.state() else {
        panic!("arg0 should be resolved, is {:?}", reference.state());
    };

    let object = trace.arena().get(id).as_object().unwrap();
    assert_eq!(object.get("a"), Some(&Value::Int(1)));
    assert_eq!(arg0.render(trace.arena()), "{...}");
    assert_eq!(arg0.label(trace.arena()), "Unknown type");
}

#[test]
fn test_forward_reference_resolves() {
    let trace = parse_trace(&json!([
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg1": "POINTER:00000002"},
        {"type": "object", "address": "POINTER:00000002", "content": "late"}
    ]))
    .unwrap();

    let arg1 = &trace.instructions()[0].args[1];
    assert!(matches!(arg1.as_reference().unwrap().state(), RefState::Resolved(_)));
    assert_eq!(arg1.render(trace.arena()), "\"late\"");
    assert!(trace.missing_references().is_empty());
}

#[test]
fn test_nested_references_inside_objects_resolve() {
    let trace = parse_trace(&json!([
        {"type": "object", "address": "POINTER:00000001", "content": {"ObjectType": "SQClosure", "_function": "POINTER:00000002"}},
        {"type": "object", "address": "POINTER:00000002", "content": {"ObjectType": "SQFunctionProto", "_name": "POINTER:00000003"}},
        {"type": "object", "address": "POINTER:00000003", "content": "update"},
        {"type": "instruction", "fn": "main.nut", "op": "call", "arg1": "POINTER:00000001", "arg2": ["POINTER:00000003", 4]}
    ]))
    .unwrap();

    let mut seen = Vec::new();
    for arg in &trace.instructions()[0].args {
        assert_eq!(unresolved_reachable(arg, trace.arena(), &mut seen), 0);
    }
    assert_eq!(trace.summary().resolved_references, 4);
}

#[test]
fn test_every_reachable_reference_is_terminal() {
    let trace = parse_trace(&json!([
        {"type": "object", "address": "POINTER:00000001", "content": ["POINTER:00000002", "POINTER:00000099"]},
        {"type": "object", "address": "POINTER:00000002", "content": {"ObjectType": "SQTable", "_nodes": [{"key": "POINTER:00000003", "val": "POINTER:00000001"}]}},
        {"type": "object", "address": "POINTER:00000003", "content": "k"},
        {"type": "instruction", "fn": "main.nut", "op": "get", "arg0": "POINTER:00000001", "arg1": {"x": "POINTER:00000098"}}
    ]))
    .unwrap();

    let mut seen = Vec::new();
    for instruction in trace.instructions() {
        for arg in &instruction.args {
            assert_eq!(unresolved_reachable(arg, trace.arena(), &mut seen), 0);
        }
    }
    assert_eq!(trace.summary().missing_references, 2);
}

#[test]
fn test_cyclic_graph_resolves() {
    let trace = parse_trace(&cyclic_trace()).unwrap();

    let mut seen = Vec::new();
    let arg1 = &trace.instructions()[0].args[1];
    assert_eq!(unresolved_reachable(arg1, trace.arena(), &mut seen), 0);
    assert_eq!(seen.len(), 2);
    assert_eq!(trace.summary().resolved_references, 3);
}

#[test]
fn test_resolve_is_idempotent() {
    let mut ingested = ingest(&cyclic_trace()).unwrap();
    let first = resolve(&mut ingested.instructions, &mut ingested.arena, &ingested.table);
    assert_eq!(first.resolved, 3);

    let instructions = ingested.instructions.clone();
    let arena = ingested.arena.clone();
    let rendered: Vec<String> = instructions[0]
        .args
        .iter()
        .map(|arg| arg.render(&arena))
        .collect();

    let second = resolve(&mut ingested.instructions, &mut ingested.arena, &ingested.table);
    assert_eq!(second.resolved, 0);
    assert!(second.missing.is_empty());
    assert_eq!(ingested.instructions, instructions);
    assert_eq!(ingested.arena, arena);

    let rendered_again: Vec<String> = ingested.instructions[0]
        .args
        .iter()
        .map(|arg| arg.render(&ingested.arena))
        .collect();
    assert_eq!(rendered_again, rendered);
}

#[test]
fn test_missing_reference_degrades_without_failing() {
    let trace = parse_trace(&json!([
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "TARGET", "arg1": "POINTER:DEADBEEF"}
    ]))
    .unwrap();

    let arg1 = &trace.instructions()[0].args[1];
    assert_eq!(arg1.as_reference().unwrap().state(), RefState::Missing);
    assert_eq!(arg1.render(trace.arena()), "<reference not found>");
    assert!(!arg1.contains(trace.arena(), "reference"));
    assert!(!arg1.contains(trace.arena(), ""));
    assert_eq!(
        trace.missing_references(),
        &[MissingReference {
            address: 0xDEAD_BEEF,
            instruction: 0
        }]
    );
}

#[test]
fn test_missing_reference_reported_once_per_instance() {
    let trace = parse_trace(&json!([
        {"type": "object", "address": "POINTER:00000001", "content": {"gone": "POINTER:00000077"}},
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "POINTER:00000001"},
        {"type": "instruction", "fn": "main.nut", "op": "load", "arg0": "POINTER:00000001"}
    ]))
    .unwrap();

    // The shared object is walked once, so its dangling field is reported once
    assert_eq!(trace.missing_references().len(), 1);
    assert_eq!(trace.missing_references()[0].instruction, 0);
}
