use std::io::Write;

use indexmap::IndexMap;
use miette::Result;

use crate::error::UnwireError;
use crate::graph::{CycleGroup, DependencyEdge, DependencyGraph, InjectionKind};
use crate::model::{package_of, simple_name};

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const FIELD_EDGE: &str = "#64B5F6"; // Soft blue
    pub const SETTER_EDGE: &str = "#90A4AE"; // Blue-grey
    pub const CONSTRUCTOR_EDGE: &str = "#1565C0"; // Deep blue
    pub const FACTORY_EDGE: &str = "#81C784"; // Soft green
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(UnwireError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(UnwireError::from)
    };
}

/// Renders a dependency graph as ASCII, Mermaid or DOT, optionally
/// highlighting the strongly connected components passed in as `cycles`
pub struct GraphRenderer {
    highlight_cycles: bool,
    show_members: bool,
}

type EdgeGroups<'g> = IndexMap<(&'g str, &'g str, InjectionKind), Vec<&'g DependencyEdge>>;

impl GraphRenderer {
    pub fn new(highlight_cycles: bool, show_members: bool) -> Self {
        Self {
            highlight_cycles,
            show_members,
        }
    }

    pub fn render_ascii(
        &self,
        graph: &DependencyGraph,
        cycles: &[CycleGroup],
        output: &mut dyn Write,
    ) -> Result<()> {
        if graph.node_count() == 0 {
            writeln_out!(output, "No injection points found to visualize")?;
            return Ok(());
        }

        writeln_out!(output, "\n📊 Component Dependency Graph\n")?;

        let mut nodes: Vec<&str> = graph.adjacency().keys().map(String::as_str).collect();
        nodes.sort_unstable();

        for node in nodes {
            let in_cycle = self.in_cycle(node, cycles);
            if in_cycle && self.highlight_cycles {
                writeln_out!(output, "┌─────────────────────────────────────┐")?;
                writeln_out!(output, "│ {} ⚠️  IN CYCLE", node)?;
                writeln_out!(output, "└─────────────────────────────────────┘")?;
            } else {
                writeln_out!(output, "{}", node)?;
            }

            // Aggregate edges by target and injection kind
            let mut groups: Vec<_> = group_edges(graph)
                .into_iter()
                .filter(|((from, _, _), _)| *from == node)
                .collect();

            if groups.is_empty() {
                writeln_out!(output, "  └── (no injected components)")?;
            } else {
                groups.sort_by(|((_, a, ak), _), ((_, b, bk), _)| (a, ak).cmp(&(b, bk)));

                for (i, ((_, target, kind), edges)) in groups.iter().enumerate() {
                    let is_last = i == groups.len() - 1;
                    let prefix = if is_last { "└──" } else { "├──" };

                    let cycle_marker = if self.highlight_cycles && self.edge_in_cycle(node, target, cycles) {
                        " ⚠️  [CYCLE]"
                    } else {
                        ""
                    };

                    let count_str = if edges.len() > 1 {
                        format!(" ({} {} injections)", edges.len(), kind)
                    } else {
                        format!(" ({kind})")
                    };

                    writeln_out!(output, "  {} → {}{}{}", prefix, target, count_str, cycle_marker)?;

                    if self.show_members {
                        let detail_prefix = if is_last { "      " } else { "  │   " };
                        for (j, edge) in edges.iter().enumerate() {
                            let is_last_detail = j == edges.len() - 1;
                            writeln_out!(
                                output,
                                "{}{}── {} ({})",
                                detail_prefix,
                                if is_last_detail { "└" } else { "├" },
                                edge.member_name(),
                                edge.site()
                            )?;
                        }
                    }
                }
            }

            writeln_out!(output)?; // Empty line between components
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output, "⚠️  = Part of a dependency cycle")?;
        }

        Ok(())
    }

    pub fn render_mermaid(
        &self,
        graph: &DependencyGraph,
        cycles: &[CycleGroup],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "graph LR")?;

        // One subgraph per package
        let mut packages: IndexMap<&str, Vec<&str>> = IndexMap::new();
        for node in graph.adjacency().keys() {
            packages.entry(package_of(node)).or_default().push(node);
        }

        for (package, nodes) in &packages {
            writeln_out!(output)?;
            let indent = if package.is_empty() {
                "    "
            } else {
                writeln_out!(
                    output,
                    "    subgraph {}_pkg[\"{}\"]",
                    self.mermaid_id(package),
                    package
                )?;
                "        "
            };

            for &node in nodes {
                let node_id = self.mermaid_id(node);
                let label = simple_name(node);
                if self.in_cycle(node, cycles) && self.highlight_cycles {
                    writeln_out!(output, "{}{}((\"{}\"))", indent, node_id, label)?;
                    writeln_out!(
                        output,
                        "{}style {} fill:{},stroke:{},stroke-width:3px",
                        indent,
                        node_id,
                        colors::CYCLE_NODE_FILL,
                        colors::CYCLE_NODE_STROKE
                    )?;
                } else {
                    writeln_out!(output, "{}{}[\"{}\"]", indent, node_id, label)?;
                    writeln_out!(
                        output,
                        "{}style {} fill:{},stroke:{},stroke-width:2px",
                        indent,
                        node_id,
                        colors::NORMAL_NODE_FILL,
                        colors::NORMAL_NODE_STROKE
                    )?;
                }
            }

            if !package.is_empty() {
                writeln_out!(output, "    end")?;
            }
        }

        writeln_out!(output)?;

        for (link_style_index, ((source, target, kind), edges)) in
            group_edges(graph).into_iter().enumerate()
        {
            let label = self.edge_label(kind, &edges);
            let arrow = match kind {
                InjectionKind::Field => "-->",
                InjectionKind::Setter => "-.->",
                InjectionKind::Constructor => "==>",
                InjectionKind::FactoryMethod => "--o",
            };

            writeln_out!(
                output,
                "    {} {}|{}| {}",
                self.mermaid_id(source),
                arrow,
                label,
                self.mermaid_id(target)
            )?;

            let (color, width) = if self.highlight_cycles && self.edge_in_cycle(source, target, cycles) {
                (colors::CYCLE_EDGE, 3)
            } else {
                (edge_color(kind), 2)
            };
            writeln_out!(
                output,
                "    linkStyle {} stroke:{},stroke-width:{}px",
                link_style_index,
                color,
                width
            )?;
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Legend")?;
            writeln_out!(output, "        L1[Component]")?;
            writeln_out!(output, "        L2((Component in Cycle))")?;
            writeln_out!(
                output,
                "        style L1 fill:{},stroke:{},stroke-width:2px",
                colors::NORMAL_NODE_FILL,
                colors::NORMAL_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style L2 fill:{},stroke:{},stroke-width:3px",
                colors::CYCLE_NODE_FILL,
                colors::CYCLE_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style Legend fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        graph: &DependencyGraph,
        cycles: &[CycleGroup],
        output: &mut dyn Write,
    ) -> Result<()> {
        writeln_out!(output, "digraph component_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        for node in graph.adjacency().keys() {
            let (fill_color, stroke_color) = if self.in_cycle(node, cycles) && self.highlight_cycles {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [label="{}", style=filled, fillcolor="{}", color="{}", penwidth=2];"#,
                node,
                simple_name(node),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for ((source, target, kind), edges) in group_edges(graph) {
            let label = self.edge_label(kind, &edges);
            let (color, width) = if self.highlight_cycles && self.edge_in_cycle(source, target, cycles) {
                (colors::CYCLE_EDGE, 3)
            } else {
                (edge_color(kind), 2)
            };
            let style = match kind {
                InjectionKind::Setter => ", style=dashed",
                InjectionKind::FactoryMethod => ", style=dotted",
                InjectionKind::Field | InjectionKind::Constructor => "",
            };

            writeln_out!(
                output,
                r#"    "{}" -> "{}" [label="{}", color="{}", penwidth={}{}];"#,
                source,
                target,
                label,
                color,
                width,
                style
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn edge_label(&self, kind: InjectionKind, edges: &[&DependencyEdge]) -> String {
        if self.show_members {
            let names: Vec<&str> = edges.iter().map(|e| e.member_name()).collect();
            format!("{kind}: {}", names.join(", "))
        } else if edges.len() > 1 {
            format!("{} × {}", kind, edges.len())
        } else {
            kind.to_string()
        }
    }

    fn in_cycle(&self, node: &str, cycles: &[CycleGroup]) -> bool {
        cycles.iter().any(|group| group.contains(node))
    }

    fn edge_in_cycle(&self, from: &str, to: &str, cycles: &[CycleGroup]) -> bool {
        cycles
            .iter()
            .any(|group| group.contains(from) && group.contains(to))
    }

    fn mermaid_id(&self, name: &str) -> String {
        name.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

fn group_edges(graph: &DependencyGraph) -> EdgeGroups<'_> {
    let mut groups = EdgeGroups::new();
    for edge in graph.edges() {
        groups
            .entry((edge.from_component(), edge.to_component(), edge.injection_kind()))
            .or_default()
            .push(edge);
    }
    groups
}

fn edge_color(kind: InjectionKind) -> &'static str {
    match kind {
        InjectionKind::Field => colors::FIELD_EDGE,
        InjectionKind::Setter => colors::SETTER_EDGE,
        InjectionKind::Constructor => colors::CONSTRUCTOR_EDGE,
        InjectionKind::FactoryMethod => colors::FACTORY_EDGE,
    }
}
