#![forbid(unsafe_code)]

//! Statement-scoped declarations produced by the parser.
//!
//! A statement is a sequence of clauses. Each clause owns its own node and
//! edge declarations; nothing here outlives the statement that built it.

/// Parsed statement: clauses in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Statement {
    /// Clauses in the order they appeared.
    pub clauses: Vec<Clause>,
}

/// One top-level command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clause {
    /// `CREATE` node list.
    Create(CreateClause),
    /// `MATCH` node list with its trailing `SET` and `RETURN` parts.
    Match(MatchClause),
}

/// `CREATE` clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateClause {
    /// Nodes and edges to materialize.
    pub pattern: Pattern,
}

/// `MATCH` clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchClause {
    /// Nodes to scan for. Edge patterns are kept but never evaluated.
    pub pattern: Pattern,
    /// `SET ident.key = "value"` items.
    pub node_sets: Vec<NodeSetDecl>,
    /// `SET (a)-[:label]->(b)` items.
    pub edge_sets: Vec<EdgeSetDecl>,
    /// `RETURN` items; parsed, not evaluated.
    pub returns: Vec<ReturnItem>,
}

/// Position of a node declaration inside its [`Pattern`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef(pub usize);

/// Node and edge declarations of one clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    /// Node declarations, deduplicated by identifier.
    pub nodes: Vec<NodeDecl>,
    /// Edge declarations in source order.
    pub edges: Vec<EdgeDecl>,
}

impl Pattern {
    /// Finds the declaration bound to `ident`.
    pub fn lookup(&self, ident: &str) -> Option<NodeRef> {
        self.nodes
            .iter()
            .position(|node| node.ident.as_deref() == Some(ident))
            .map(NodeRef)
    }

    /// Borrows the declaration behind `node`.
    pub fn node(&self, node: NodeRef) -> Option<&NodeDecl> {
        self.nodes.get(node.0)
    }

    /// Appends `decl`, or folds it into the declaration already bound to the
    /// same identifier. A folded label replaces the earlier one and folded
    /// properties are appended.
    pub fn add_node(&mut self, decl: NodeDecl) -> NodeRef {
        if let Some(existing) = decl.ident.as_deref().and_then(|i| self.lookup(i)) {
            let target = &mut self.nodes[existing.0];
            if decl.label.is_some() {
                target.label = decl.label;
            }
            target.props.extend(decl.props);
            return existing;
        }
        self.nodes.push(decl);
        NodeRef(self.nodes.len() - 1)
    }
}

/// `(ident:Label {key:"value"})`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDecl {
    /// Binding name; anonymous nodes have none.
    pub ident: Option<String>,
    /// Type label.
    pub label: Option<String>,
    /// Properties (CREATE) or filters (MATCH), in source order.
    pub props: Vec<(String, String)>,
}

impl NodeDecl {
    /// Declaration with the given identifier and label and no properties.
    pub fn new(ident: Option<String>, label: Option<String>) -> Self {
        Self {
            ident,
            label,
            props: Vec::new(),
        }
    }
}

/// `(left)-[label]->(right)` inside a node list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeDecl {
    /// Edge label.
    pub label: String,
    /// Source node.
    pub left: NodeRef,
    /// Destination node.
    pub right: NodeRef,
}

/// `SET ident.key = "value"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSetDecl {
    /// Node binding to update.
    pub ident: String,
    /// Property name.
    pub key: String,
    /// New value.
    pub value: String,
}

/// `SET (left)-[:label]->(right)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeSetDecl {
    /// Edge label.
    pub label: String,
    /// Binding of the source nodes.
    pub left: String,
    /// Binding of the destination nodes.
    pub right: String,
}

/// `RETURN ident` or `RETURN ident.property`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnItem {
    /// Node binding.
    pub ident: String,
    /// Projected property, if any.
    pub property: Option<String>,
}
