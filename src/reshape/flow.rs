//! Flow - Graph validation and column layout
//!
//! Links are resolved to node indices, nodes are assigned a column by their
//! longest path from a source, and node heights are proportional to the
//! larger of incoming and outgoing value.

use ahash::AHashMap;

use crate::domain::flow::{FlowGraph, NodeKind, NodeRef};
use crate::domain::medal::MedalType;
use crate::error::{Error, Result};

/// Node placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct FlowNodeView {
    pub name: String,
    pub kind: NodeKind,
    pub color: Option<String>,
    pub column: usize,
    pub incoming: f64,
    pub outgoing: f64,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl FlowNodeView {
    pub fn value(&self) -> f64 {
        self.incoming.max(self.outgoing)
    }
}

/// Link between two placed nodes
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLinkView {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    /// Stroke width
    pub width: f64,
    /// Vertical centre of the link at its source and target node
    pub y_source: f64,
    pub y_target: f64,
}

/// Laid-out flow diagram
#[derive(Debug, Clone, PartialEq)]
pub struct FlowView {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<FlowNodeView>,
    pub links: Vec<FlowLinkView>,
}

/// Geometry of the layout
#[derive(Debug, Clone, Copy)]
pub struct FlowGeometry {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_padding: f64,
}

/// Resolve every link endpoint to a node index
pub fn resolve_links(graph: &FlowGraph) -> Result<Vec<(usize, usize, f64)>> {
    if graph.nodes.is_empty() || graph.links.is_empty() {
        return Err(Error::data_shape("flow graph has no nodes or links"));
    }

    let ids: AHashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| n.id.as_deref().map(|id| (id, i)))
        .collect();
    let resolve = |r: &NodeRef| -> Result<usize> {
        match r {
            NodeRef::Index(i) if *i < graph.nodes.len() => Ok(*i),
            NodeRef::Index(i) => Err(Error::data_shape(format!("link refers to missing node {i}"))),
            NodeRef::Id(id) => ids
                .get(id.as_str())
                .copied()
                .ok_or_else(|| Error::data_shape(format!("link refers to unknown node {id:?}"))),
        }
    };

    graph
        .links
        .iter()
        .map(|link| {
            if !link.value.is_finite() || link.value < 0.0 {
                return Err(Error::data_shape(format!(
                    "link has invalid value {}",
                    link.value
                )));
            }
            Ok((resolve(&link.source)?, resolve(&link.target)?, link.value))
        })
        .collect()
}

/// Column of each node: longest path from any source node
fn columns(node_count: usize, links: &[(usize, usize, f64)]) -> Result<Vec<usize>> {
    let mut column = vec![0usize; node_count];
    // Relax at most node_count times; still changing after that means a cycle
    for _ in 0..=node_count {
        let mut changed = false;
        for &(s, t, _) in links {
            if column[t] < column[s] + 1 {
                column[t] = column[s] + 1;
                changed = true;
            }
        }
        if !changed {
            return Ok(column);
        }
    }
    Err(Error::data_shape("flow graph contains a cycle"))
}

pub fn layout_flow(
    graph: &FlowGraph,
    medal_type: MedalType,
    geometry: FlowGeometry,
) -> Result<FlowView> {
    let links = resolve_links(graph)?;
    let column = columns(graph.nodes.len(), &links)?;

    let mut incoming = vec![0.0; graph.nodes.len()];
    let mut outgoing = vec![0.0; graph.nodes.len()];
    for &(s, t, v) in &links {
        outgoing[s] += v;
        incoming[t] += v;
    }
    let value = |i: usize| f64::max(incoming[i], outgoing[i]);

    let column_count = column.iter().copied().max().unwrap_or(0) + 1;
    let mut by_column: Vec<Vec<usize>> = vec![Vec::new(); column_count];
    for (i, c) in column.iter().enumerate() {
        by_column[*c].push(i);
    }

    // Shared vertical scale: the tallest column must fit
    let scale = by_column
        .iter()
        .filter(|nodes| !nodes.is_empty())
        .filter_map(|nodes| {
            let total: f64 = nodes.iter().map(|&i| value(i)).sum();
            let room = geometry.height - (nodes.len() as f64 - 1.0) * geometry.node_padding;
            (total > 0.0).then(|| room.max(0.0) / total)
        })
        .fold(f64::INFINITY, f64::min);
    let scale = if scale.is_finite() { scale } else { 0.0 };

    let x_step = if column_count > 1 {
        (geometry.width - geometry.node_width) / (column_count as f64 - 1.0)
    } else {
        0.0
    };

    let mut y = vec![(0.0, 0.0); graph.nodes.len()];
    for nodes in &by_column {
        let used: f64 = nodes.iter().map(|&i| value(i) * scale).sum::<f64>()
            + (nodes.len().saturating_sub(1)) as f64 * geometry.node_padding;
        let mut cursor = ((geometry.height - used) / 2.0).max(0.0);
        for &i in nodes {
            let h = value(i) * scale;
            y[i] = (cursor, cursor + h);
            cursor += h + geometry.node_padding;
        }
    }

    let nodes: Vec<FlowNodeView> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let x0 = column[i] as f64 * x_step;
            FlowNodeView {
                name: n.name.clone(),
                kind: n.kind,
                color: n.color.clone(),
                column: column[i],
                incoming: incoming[i],
                outgoing: outgoing[i],
                x0,
                x1: x0 + geometry.node_width,
                y0: y[i].0,
                y1: y[i].1,
            }
        })
        .collect();

    // Stack links on each node in link order
    let mut out_cursor: Vec<f64> = nodes.iter().map(|n| n.y0).collect();
    let mut in_cursor = out_cursor.clone();
    let links = links
        .into_iter()
        .map(|(source, target, value)| {
            let width = value * scale;
            let y_source = out_cursor[source] + width / 2.0;
            let y_target = in_cursor[target] + width / 2.0;
            out_cursor[source] += width;
            in_cursor[target] += width;
            FlowLinkView {
                source,
                target,
                value,
                width,
                y_source,
                y_target,
            }
        })
        .collect();

    Ok(FlowView {
        title: format!(
            "Olympic Medal Flow - {} (All Olympic Years)",
            medal_type.label()
        ),
        width: geometry.width,
        height: geometry.height,
        nodes,
        links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::flow::{FlowLink, FlowNode};

    fn node(name: &str, kind: NodeKind, id: Option<&str>) -> FlowNode {
        FlowNode {
            id: id.map(String::from),
            name: name.into(),
            kind,
            color: None,
        }
    }

    fn link(source: NodeRef, target: NodeRef, value: f64) -> FlowLink {
        FlowLink {
            source,
            target,
            value,
        }
    }

    fn geometry() -> FlowGeometry {
        FlowGeometry {
            width: 960.0,
            height: 660.0,
            node_width: 15.0,
            node_padding: 10.0,
        }
    }

    fn graph() -> FlowGraph {
        FlowGraph {
            nodes: vec![
                node("2000", NodeKind::Year, None),
                node("Swimming", NodeKind::Sport, Some("sport-swim")),
                node("Rowing", NodeKind::Sport, None),
                node("USA", NodeKind::Country, Some("country-usa")),
            ],
            links: vec![
                link(NodeRef::Index(0), NodeRef::Id("sport-swim".into()), 30.0),
                link(NodeRef::Index(0), NodeRef::Index(2), 10.0),
                link(NodeRef::Id("sport-swim".into()), NodeRef::Index(3), 30.0),
                link(NodeRef::Index(2), NodeRef::Id("country-usa".into()), 10.0),
            ],
            years: vec![2000],
        }
    }

    #[test]
    fn test_layout_columns_and_values() {
        let view = layout_flow(&graph(), MedalType::Gold, geometry()).expect("layout");
        let columns: Vec<usize> = view.nodes.iter().map(|n| n.column).collect();
        assert_eq!(columns, vec![0, 1, 1, 2]);
        assert_eq!(view.nodes[0].value(), 40.0);
        assert_eq!(view.nodes[3].value(), 40.0);
        assert_eq!(view.nodes[3].x1, 960.0);

        for n in &view.nodes {
            assert!(n.y0 >= 0.0 && n.y1 <= 660.0 + 1e-9);
        }
        // Link widths at a node add up to the node height
        let first = &view.nodes[0];
        let out: f64 = view.links.iter().filter(|l| l.source == 0).map(|l| l.width).sum();
        assert!((out - (first.y1 - first.y0)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_nodes_is_data_shape() {
        let mut empty = graph();
        empty.nodes.clear();
        let err = layout_flow(&empty, MedalType::Total, geometry()).expect_err("empty");
        assert!(err.is_no_data());
    }

    #[test]
    fn test_dangling_link_is_data_shape() {
        let mut bad = graph();
        bad.links.push(link(NodeRef::Index(0), NodeRef::Id("nowhere".into()), 1.0));
        assert!(resolve_links(&bad).is_err());

        let mut out_of_range = graph();
        out_of_range.links.push(link(NodeRef::Index(9), NodeRef::Index(0), 1.0));
        assert!(resolve_links(&out_of_range).is_err());
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut cyclic = graph();
        cyclic.links.push(link(NodeRef::Index(3), NodeRef::Index(0), 1.0));
        assert!(layout_flow(&cyclic, MedalType::Total, geometry()).is_err());
    }
}
