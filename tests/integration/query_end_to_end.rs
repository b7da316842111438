#![allow(missing_docs)]

use nuon::query::ast::Clause;
use nuon::query::parse;
use nuon::{Config, Database, NuonError, QueryError};

fn db() -> Database {
    Database::with_config(Config::default().seed(2024))
}

fn rows(db: &mut Database, statement: &str) -> Vec<String> {
    db.execute(statement)
        .unwrap()
        .rows()
        .map(str::to_owned)
        .collect()
}

const CANONICAL_CREATE: &str =
    r#"CREATE (p:Person {name:"Matt"}), (q:Person {name:"Jordan"}), (p)-[k:knows]->(q)"#;

#[test]
fn single_vertex_match() {
    let mut db = db();
    db.execute(r#"CREATE (p:Person {name:"Matt"})"#).unwrap();
    assert_eq!(
        rows(&mut db, r#"MATCH (p:Person {name:"Matt"})"#),
        vec![r#"{name:"Matt"}"#]
    );
}

#[test]
fn match_renders_outgoing_edges() {
    let mut db = db();
    db.execute(CANONICAL_CREATE).unwrap();
    assert_eq!(
        rows(&mut db, r#"MATCH (p:Person {name:"Matt"})"#),
        vec![r#"{name:"Matt",knows:{name:"Jordan"}}"#]
    );
}

#[test]
fn canonical_match_applies_sets_after_printing() {
    let mut db = db();
    db.execute(CANONICAL_CREATE).unwrap();
    let out = db
        .execute(
            r#"MATCH (p:Person {name:"Matt"})-[:knows]->(q) SET p.name = "jim" SET q.age = "25" SET (p)-[:hates]->(q) return p, q"#,
        )
        .unwrap();

    // p's filter scan, then q's unconstrained scan over every vertex with properties.
    assert_eq!(out.result_sets.len(), 2);
    assert_eq!(
        out.result_sets[0].rows,
        vec![r#"{name:"Matt",knows:{name:"Jordan"}}"#]
    );
    assert_eq!(out.result_sets[1].rows.len(), 2);

    let graph = db.graph();
    let matt = graph.get_vertex("Person:0").unwrap();
    let jordan = graph.get_vertex("Person:1").unwrap();
    assert_eq!(graph.get_property(matt, "name"), Some("jim"));
    assert_eq!(graph.get_property(matt, "age"), Some("25"));
    assert_eq!(graph.get_property(jordan, "age"), Some("25"));
    assert_eq!(
        graph.render_vertex(matt),
        r#"{name:"jim",age:"25",knows:{name:"Jordan",age:"25"},hates:{name:"Jordan",age:"25"}}"#
    );
    // Only p -> q pairs are linked, so nothing points back at Matt.
    assert_eq!(graph.render_vertex(jordan), r#"{name:"Jordan",age:"25"}"#);
}

#[test]
fn self_loop_creates_no_edge() {
    let mut db = db();
    db.execute("CREATE (p:X)-[:self]->(p)").unwrap();
    let graph = db.graph();
    let p = graph.get_vertex("X:0").unwrap();
    assert!(graph.vertex(p).unwrap().edges().is_empty());
}

#[test]
fn redeclared_identifier_is_one_declaration() {
    let stmt = parse(r#"CREATE (p:X {a:"1"}), (p:X), (q:X)"#, 16).unwrap();
    let Clause::Create(create) = &stmt.clauses[0] else {
        panic!("expected CREATE");
    };
    assert_eq!(create.pattern.nodes.len(), 2);

    let mut db = db();
    db.execute(r#"CREATE (p:X {a:"1"}), (p:X), (q:X)"#).unwrap();
    assert!(db.graph().get_vertex("X:1").is_some());
    assert!(db.graph().get_vertex("X:2").is_none());
}

#[test]
fn prefix_match_through_statements() {
    let mut db = db();
    db.execute(r#"CREATE (m:Person {name:"Matthew"})"#).unwrap();
    assert_eq!(
        rows(&mut db, r#"MATCH (p:Person {name:"Matt"})"#),
        vec![r#"{name:"Matthew"}"#]
    );
    assert!(rows(&mut db, r#"MATCH (p:Person {name:"Matthew2"})"#).is_empty());
}

#[test]
fn multiple_filters_rescan_independently() {
    let mut db = db();
    db.execute(r#"CREATE (a:P {x:"1", y:"1"}), (b:P {x:"1", y:"2"})"#)
        .unwrap();
    let out = db.execute(r#"MATCH (n:P {x:"1", y:"2"})"#).unwrap();
    let sizes: Vec<usize> = out.result_sets.iter().map(|s| s.rows.len()).collect();
    assert_eq!(sizes, vec![1, 2]);
    assert_eq!(out.result_sets[0].rows, vec![r#"{y:"2",x:"1"}"#]);
}

#[test]
fn set_after_multiple_filters_uses_first_declared_filter() {
    let mut db = db();
    db.execute(r#"CREATE (a:P {x:"1", y:"1"}), (b:P {x:"1", y:"2"})"#)
        .unwrap();
    db.execute(r#"MATCH (n:P {x:"1", y:"2"}) SET n.z = "hit""#)
        .unwrap();
    let graph = db.graph();
    let a = graph.get_vertex("P:0").unwrap();
    let b = graph.get_vertex("P:1").unwrap();
    assert_eq!(graph.get_property(a, "z"), Some("hit"));
    assert_eq!(graph.get_property(b, "z"), Some("hit"));
    assert_eq!(graph.render_vertex(a), r#"{y:"1",x:"1",z:"hit"}"#);
}

#[test]
fn created_properties_render_last_declared_first() {
    let mut db = db();
    db.execute(r#"CREATE (p:P {a:"1", b:"2"})"#).unwrap();
    assert_eq!(
        rows(&mut db, r#"MATCH (p:P {a:"1"})"#),
        vec![r#"{b:"2",a:"1"}"#]
    );
}

#[test]
fn match_without_filters_scans_everything_with_properties() {
    let mut db = db();
    db.execute(r#"CREATE (a:A {k:"a"}), (b:B {k:"b"}), (c:C)"#)
        .unwrap();
    assert_eq!(
        rows(&mut db, "MATCH (n)"),
        vec![r#"{k:"a"}"#, r#"{k:"b"}"#]
    );
}

#[test]
fn escapes_survive_into_values() {
    let mut db = db();
    db.execute(r#"CREATE (q:Quote {text:"say \"hi\""})"#).unwrap();
    assert_eq!(
        rows(&mut db, r#"MATCH (q:Quote {text:"say"})"#),
        vec![r#"{text:"say "hi""}"#]
    );
}

#[test]
fn errors_leave_graph_untouched() {
    let mut db = db();
    db.execute(CANONICAL_CREATE).unwrap();
    let before: Vec<String> = db.graph().keys().map(str::to_owned).collect();

    let cases = [
        (r#"CREATE (a:A {k:"v"}), (ghost)"#, "unidentified variable 'ghost'"),
        (r#"CREATE (a:A {k "v"})"#, "unexpected symbol 'string', expected ':'"),
        ("CREATE (a:A", "expected symbol ')' but reached end of input"),
        ("DESTROY (a)", "unknown command 'DESTROY'"),
        (
            r#"MATCH (p:Person {name:"Matt"}) SET z.name = "x""#,
            "unidentified variable 'z'",
        ),
    ];
    for (statement, message) in cases {
        let err = db.execute(statement).unwrap_err();
        assert!(matches!(err, NuonError::Query(_)), "{statement}");
        assert_eq!(err.to_string(), message);
    }

    let after: Vec<String> = db.graph().keys().map(str::to_owned).collect();
    assert_eq!(before, after);
    assert_eq!(
        rows(&mut db, r#"MATCH (p:Person {name:"Matt"})"#),
        vec![r#"{name:"Matt",knows:{name:"Jordan"}}"#]
    );
}

#[test]
fn keywords_are_case_insensitive() {
    let mut db = db();
    db.execute(r#"create (Person AS p {name:"Matt"})"#).unwrap();
    assert_eq!(
        rows(&mut db, r#"match (p:Person {name:"Matt"}) RETURN p.name"#),
        vec![r#"{name:"Matt"}"#]
    );
}

#[test]
fn nesting_limit_is_a_statement_error() {
    let mut db = Database::with_config(Config::default().max_parse_depth(8));
    let nodes = vec!["(:N)"; 32].join(", ");
    let err = db.execute(&format!("CREATE {nodes}")).unwrap_err();
    assert!(matches!(
        err,
        NuonError::Query(QueryError::NestingTooDeep { max: 8 })
    ));
    assert!(db.graph().is_empty());
}
