//! End-to-end round-trip coverage for the revision call graph aggregate:
//! build, canonicalize, encode, decode, compare.

use revgraph_core::{
    CallGraph, ClassHierarchy, MethodId, RevisionCallGraph, TypeInfo, Uri,
};

fn build_aggregate() -> RevisionCallGraph {
    let mut a = TypeInfo::new("A.java");
    a.add_method(MethodId(1), Uri::new("id:A#foo"));
    a.add_method(MethodId(2), Uri::new("id:A#bar"));
    a.super_classes.push(Uri::new("id:Object"));

    let mut b = TypeInfo::new("B.java");
    b.add_method(MethodId(3), Uri::new("id:B#baz"));
    b.super_interfaces.push(Uri::new("id:Runnable"));

    let mut cha = ClassHierarchy::new();
    cha.insert(Uri::new("id:A"), a);
    cha.insert(Uri::new("id:B"), b);

    let mut graph = CallGraph::new();
    graph.add_internal(MethodId(3), MethodId(1));
    graph.add_internal(MethodId(1), MethodId(2));
    graph.add_internal(MethodId(1), MethodId(2));
    graph.add_external(MethodId(2), Uri::new("id:ext#log"), "invokevirtual");
    graph.add_external(MethodId(2), Uri::new("id:ext#log"), "invokevirtual");
    graph.add_external(MethodId(3), Uri::new("id:ext#run"), "invokeinterface");

    RevisionCallGraph::builder()
        .forge("mvn")
        .product("demo")
        .version("1.0.0")
        .generator("test-gen")
        .timestamp(1_574_072_773)
        .depset(serde_json::json!([[{ "forge": "mvn", "product": "dep" }]]))
        .hierarchy(cha)
        .graph(graph)
        .build()
        .expect("aggregate should satisfy the structural invariants")
}

#[test]
fn decode_of_encode_matches_after_canonicalization() {
    let mut original = build_aggregate();
    original.sort_internal_calls();

    let encoded = original.to_json_string();
    let mut decoded = RevisionCallGraph::from_json_str(&encoded).expect("decode should succeed");
    decoded.sort_internal_calls();

    assert_eq!(decoded, original);
    assert_eq!(decoded.to_json_string(), encoded);
}

#[test]
fn field_for_field_equality_after_roundtrip() {
    let mut original = build_aggregate();
    original.sort_internal_calls();
    let decoded = RevisionCallGraph::from_json(&original.to_json()).unwrap();

    assert_eq!(decoded.forge(), original.forge());
    assert_eq!(decoded.product(), original.product());
    assert_eq!(decoded.version(), original.version());
    assert_eq!(decoded.generator(), original.generator());
    assert_eq!(decoded.timestamp(), original.timestamp());
    assert_eq!(decoded.depset(), original.depset());
    assert_eq!(decoded.hierarchy(), original.hierarchy());
    assert_eq!(
        decoded.graph().external_calls(),
        original.graph().external_calls()
    );
    assert_eq!(decoded.all_methods().len(), 3);
}

#[test]
fn empty_graph_is_a_valid_non_error_outcome() {
    let mut cha = ClassHierarchy::new();
    let mut info = TypeInfo::new("A.java");
    info.add_method(MethodId(1), Uri::new("id:A#foo"));
    cha.insert(Uri::new("id:A"), info);

    let cg = RevisionCallGraph::builder()
        .forge("mvn")
        .product("trivial")
        .version("0.1.0")
        .generator("test-gen")
        .hierarchy(cha)
        .build()
        .unwrap();

    assert!(cg.is_call_graph_empty());
    let back = RevisionCallGraph::from_json_str(&cg.to_json_string()).unwrap();
    assert!(back.is_call_graph_empty());
}
