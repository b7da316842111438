//! Nested textual rendering of vertices.
//!
//! A vertex renders as `{key:"value",...,label:{...},...}`: properties first,
//! then one nested object per outgoing edge. Values are written verbatim.
//! The walk keeps no visited set, so a vertex that can reach itself never
//! finishes rendering.

use crate::storage::Graph;
use crate::types::VertexId;

impl Graph {
    /// Renders `id` and everything reachable from it.
    pub fn render_vertex(&self, id: VertexId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    fn render_into(&self, id: VertexId, out: &mut String) {
        out.push('{');
        if let Some(vertex) = self.vertex(id) {
            let mut first = true;
            for prop in vertex.properties() {
                if !first {
                    out.push(',');
                }
                first = false;
                out.push_str(&prop.key);
                out.push_str(":\"");
                out.push_str(&prop.value);
                out.push('"');
            }
            for edge in vertex.edges() {
                if !first {
                    out.push(',');
                }
                first = false;
                out.push_str(&edge.label);
                out.push(':');
                self.render_into(edge.to, out);
            }
        }
        out.push('}');
    }
}
