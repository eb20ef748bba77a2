use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use n2g_gml::{GmlOptions, GmlWriter};
use n2g_netlist::{CellTypes, NameSelection, SelectionEntry};
use tracing::info;
use yosys_bridge::load_yosys_json;

#[derive(ClapArgs, Debug, Clone)]
pub struct GmlArgs {
    /// Path to the Yosys JSON netlist
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    /// Output path for the GML graph (defaults to stdout)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Include AIG models for the gate types (accepted, no effect on the graph)
    #[arg(long)]
    pub aig: bool,

    /// Emit small fully-defined parameter values as numbers (accepted, no effect on the graph)
    #[arg(long)]
    pub compat_int: bool,

    /// Restrict the graph to `MODULE` or `MODULE/MEMBER`; repeatable
    #[arg(long = "select", value_name = "ENTRY")]
    pub select: Vec<SelectionEntry>,
}

pub fn run(args: GmlArgs) -> Result<()> {
    let design = load_yosys_json(&args.input)
        .with_context(|| format!("failed to load netlist `{}`", args.input.display()))?;

    let selection: NameSelection = args.select.iter().cloned().collect();
    let options = GmlOptions {
        use_selection: !selection.is_empty(),
        aig: args.aig,
        compat_int: args.compat_int,
    };

    let cell_types = CellTypes::for_design(&design);
    let mut writer = GmlWriter::new(Vec::new(), options).with_selection(&selection);
    let stats = writer
        .write_design(&design, &cell_types)
        .with_context(|| format!("failed to translate `{}`", args.input.display()))?;
    let graph = writer.into_inner();

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create parent directory `{}`", parent.display())
                    })?;
                }
            }
            let file = File::create(path)
                .with_context(|| format!("failed to open `{}` for writing", path.display()))?;
            let mut out = BufWriter::new(file);
            out.write_all(&graph)
                .and_then(|()| out.flush())
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            info!(
                modules = stats.modules,
                nodes = stats.nodes,
                edges = stats.edges,
                "wrote GML graph to {}",
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&graph)
                .and_then(|()| stdout.flush())
                .context("failed to write graph to stdout")?;
            info!(
                modules = stats.modules,
                nodes = stats.nodes,
                edges = stats.edges,
                "wrote GML graph to stdout"
            );
        }
    }

    Ok(())
}
