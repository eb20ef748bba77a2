use std::io::Write;

use n2g_netlist::{
    BitCanonicalizer, CellDirections, Design, Module, SelectAll, Selection, SigBit, SigMap,
};
use tracing::debug;

use crate::emit::{Edge, EdgeEmitter};
use crate::error::GmlError;
use crate::escape::quote;
use crate::identity::{NodeAllocator, NodeId, SignalIdentityTable};
use crate::index::{ConnectivityIndex, Role};

#[derive(Debug, Clone, Copy, Default)]
pub struct GmlOptions {
    /// Skip every module, port, cell and wire the selection does not name.
    pub use_selection: bool,
    /// Accepted for command compatibility; AIG models are not part of the graph.
    pub aig: bool,
    /// Accepted for command compatibility; no parameter values are written.
    pub compat_int: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GmlStats {
    pub modules: usize,
    pub nodes: usize,
    pub edges: usize,
}

impl GmlStats {
    fn absorb(&mut self, other: GmlStats) {
        self.modules += other.modules;
        self.nodes += other.nodes;
        self.edges += other.edges;
    }
}

/// Everything one module pass owns. Built fresh for every module, so labels
/// and node ids restart at the reserved base each time.
struct ModuleContext<'m> {
    sigmap: &'m dyn BitCanonicalizer,
    table: SignalIdentityTable,
    nodes: NodeAllocator,
    index: ConnectivityIndex,
}

impl<'m> ModuleContext<'m> {
    fn new(sigmap: &'m dyn BitCanonicalizer) -> Self {
        Self {
            sigmap,
            table: SignalIdentityTable::new(),
            nodes: NodeAllocator::new(),
            index: ConnectivityIndex::new(),
        }
    }

    fn register(&mut self, bits: &[SigBit], node: NodeId, role: Role) {
        for &bit in bits {
            let label = self.table.label_of(self.sigmap.canonicalize(bit));
            self.index.register(label, node, role);
        }
    }
}

pub struct GmlWriter<'a, W: Write> {
    out: W,
    options: GmlOptions,
    selection: &'a dyn Selection,
}

impl<'a, W: Write> GmlWriter<'a, W> {
    pub fn new(out: W, options: GmlOptions) -> Self {
        Self {
            out,
            options,
            selection: &SelectAll,
        }
    }

    pub fn with_selection(mut self, selection: &'a dyn Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_design(
        &mut self,
        design: &Design,
        cell_types: &dyn CellDirections,
    ) -> Result<GmlStats, GmlError> {
        if self.options.aig {
            debug!("AIG models requested; the graph output does not carry them");
        }
        if self.options.compat_int {
            debug!("compat-int requested; the graph output has no parameter values");
        }

        writeln!(self.out, "graph [")?;
        writeln!(self.out, "    multigraph 1")?;

        let mut stats = GmlStats::default();
        for module in design.modules() {
            if self.options.use_selection && !self.selection.selects_module(module) {
                continue;
            }
            let sigmap = SigMap::from_module(module);
            stats.absorb(self.write_module(module, &sigmap, cell_types)?);
        }

        writeln!(self.out, "]")?;
        self.out.flush()?;
        Ok(stats)
    }

    /// Writes the nodes and edges of one module: ports, then cells, then one
    /// edge pass over the wires.
    pub fn write_module(
        &mut self,
        module: &Module,
        sigmap: &dyn BitCanonicalizer,
        cell_types: &dyn CellDirections,
    ) -> Result<GmlStats, GmlError> {
        if module.has_processes() {
            return Err(GmlError::UnsupportedConstruct {
                module: module.name.clone(),
                processes: module.processes().len(),
            });
        }

        let mut ctx = ModuleContext::new(sigmap);

        for &port in module.ports() {
            let wire = module.wire(port);
            let Some(dir) = wire.port else {
                continue;
            };
            if !self.selected(module, &wire.name) {
                continue;
            }
            let node = ctx.nodes.allocate();
            self.write_node(node, &quote(&wire.name), &quote(dir.as_str()))?;
            ctx.register(&module.wire_bits(port), node, Role::for_module_port(dir));
        }

        for cell in module.cells() {
            if !self.selected(module, &cell.name) {
                continue;
            }
            let node = ctx.nodes.allocate();
            self.write_node(node, &quote(&cell.name), &quote(&cell.kind))?;
            for (port, bits) in &cell.connections {
                match Role::for_cell_port(cell_types.direction(&cell.kind, port)) {
                    Some(role) => ctx.register(bits, node, role),
                    None => debug!(
                        module = %module.name,
                        cell = %cell.name,
                        port = %port,
                        "connection direction unknown; not registered"
                    ),
                }
            }
        }

        let emitter = EdgeEmitter::new(&ctx.index);
        let mut edges = 0usize;
        for (id, wire) in module.wires() {
            if !self.selected(module, &wire.name) {
                continue;
            }
            let labels = module
                .wire_bits(id)
                .into_iter()
                .filter_map(|bit| ctx.table.lookup(sigmap.canonicalize(bit)));
            for edge in emitter.wire_edges(labels) {
                self.write_edge(edge)?;
                edges += 1;
            }
        }

        let nodes = ctx.nodes.allocated();
        debug!(module = %module.name, nodes, edges, "wrote module graph");
        Ok(GmlStats {
            modules: 1,
            nodes,
            edges,
        })
    }

    fn selected(&self, module: &Module, member: &str) -> bool {
        !self.options.use_selection || self.selection.selects_member(module, member)
    }

    fn write_node(&mut self, id: NodeId, label: &str, kind: &str) -> Result<(), GmlError> {
        writeln!(self.out, "    node [ id {id} label {label}")?;
        writeln!(self.out, "        type {kind}")?;
        writeln!(self.out, "    ]")?;
        Ok(())
    }

    fn write_edge(&mut self, edge: Edge) -> Result<(), GmlError> {
        writeln!(
            self.out,
            "    edge [ source {} target {} ]",
            edge.source, edge.target
        )?;
        Ok(())
    }
}
