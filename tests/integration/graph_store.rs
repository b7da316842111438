#![allow(missing_docs)]

use nuon::storage::{Graph, PropertyFilter, MEMBER_EDGE};
use nuon::{Config, Database, NuonError};

fn seeded() -> Database {
    Database::with_config(Config::default().seed(11))
}

#[test]
fn instance_keys_count_up_in_creation_order() {
    let mut db = seeded();
    db.execute("CREATE (a:Person), (b:Person)").unwrap();
    db.execute("CREATE (c:Person)").unwrap();

    let graph = db.graph();
    for key in ["Person", "Person:0", "Person:1", "Person:2"] {
        assert!(graph.get_vertex(key).is_some(), "missing {key}");
    }
    assert!(graph.get_vertex("Person:3").is_none());

    let ty = graph.get_vertex("Person").unwrap();
    let members: Vec<_> = graph
        .vertex(ty)
        .unwrap()
        .edges()
        .iter()
        .filter(|e| e.label == MEMBER_EDGE)
        .map(|e| e.to)
        .collect();
    let expected: Vec<_> = ["Person:0", "Person:1", "Person:2"]
        .iter()
        .map(|k| graph.get_vertex(k).unwrap())
        .collect();
    assert_eq!(members, expected);
}

#[test]
fn property_overwrite_keeps_one_entry() {
    let mut graph = Graph::with_config(&Config::default().seed(1));
    let v = graph.set_vertex("Thing:0", None).unwrap();
    graph.set_property(v, "name", "first").unwrap();
    graph.set_property(v, "name", "second").unwrap();

    let props = graph.vertex(v).unwrap().properties();
    assert_eq!(props.len(), 1);
    assert_eq!(props[0].value, "second");
    assert_eq!(graph.get_property(v, "name"), Some("second"));

    assert_eq!(
        graph.remove_property(v, "name").unwrap().as_deref(),
        Some("second")
    );
    assert!(graph.vertex(v).unwrap().properties().is_empty());
}

#[test]
fn rebinding_a_key_leaves_old_vertex_reachable_by_id() {
    let mut graph = Graph::new();
    let old = graph.set_vertex("k", None).unwrap();
    graph.set_property(old, "v", "1").unwrap();
    let new = graph.set_vertex("k", None).unwrap();
    assert_ne!(old, new);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.get_vertex("k"), Some(new));
    assert_eq!(graph.get_property(old, "v"), Some("1"));
}

#[test]
fn prefix_filter_quirk() {
    let mut db = seeded();
    db.execute(r#"CREATE (m:Person {name:"Matthew"})"#).unwrap();
    let graph = db.graph();

    let hits = graph.scan_vertices(Some("Person"), Some(PropertyFilter::new("name", "Matt")));
    assert_eq!(hits.len(), 1);
    let misses = graph.scan_vertices(
        Some("Person"),
        Some(PropertyFilter::new("name", "Matthew2")),
    );
    assert!(misses.is_empty());
    assert!(graph
        .scan_vertices(Some("Person"), Some(PropertyFilter::new("age", "")))
        .is_empty());
}

#[test]
fn keys_walk_in_ascending_order() {
    let mut db = seeded();
    db.execute("CREATE (b:Beta), (a:Alpha), (c:Beta)").unwrap();
    let keys: Vec<&str> = db.graph().keys().collect();
    assert_eq!(
        keys,
        vec!["Alpha", "Alpha:0", "Beta", "Beta:0", "Beta:1"]
    );
}

#[test]
fn removal_is_not_wired() {
    let mut db = seeded();
    db.execute("CREATE (a:A)").unwrap();
    let graph = db.graph_mut();
    let a = graph.get_vertex("A:0").unwrap();
    assert!(matches!(
        graph.remove_vertex("A:0"),
        Err(NuonError::Unsupported(_))
    ));
    assert!(matches!(
        graph.remove_edge(a, MEMBER_EDGE),
        Err(NuonError::Unsupported(_))
    ));
}
