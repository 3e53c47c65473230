use crate::layout::{Layout, ShapeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Everything the painter needs, detached from the search structures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDump {
    pub layer_sizes: Vec<usize>,
    /// Node coordinates keyed by layer index.
    pub nodes: BTreeMap<usize, Vec<[f64; 2]>>,
    pub edges: Vec<EdgeDump>,
    pub shapes: Vec<ShapeDump>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDump {
    pub id: String,
    pub from: [f64; 2],
    pub to: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDump {
    pub kind: ShapeKind,
    pub transition: usize,
    pub points: Vec<[f64; 2]>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let layer_sizes = layout.layers.iter().map(|layer| layer.nodes.len()).collect();
        let nodes = layout
            .layers
            .iter()
            .map(|layer| {
                let points = layer.nodes.iter().map(|node| node.to_array()).collect();
                (layer.index, points)
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.to_string(),
                from: edge.start.to_array(),
                to: edge.end.to_array(),
            })
            .collect();

        let shapes = layout
            .shapes
            .iter()
            .map(|shape| ShapeDump {
                kind: shape.kind,
                transition: shape.transition,
                points: shape.vertices.iter().map(|v| v.to_array()).collect(),
            })
            .collect();

        LayoutDump {
            layer_sizes,
            nodes,
            edges,
            shapes,
        }
    }

    pub fn node_points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.nodes.values().flatten().copied()
    }
}

/// Writes the dump as pretty JSON to `path`, or stdout when absent.
pub fn write_layout_dump(dump: &LayoutDump, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

pub fn read_layout_dump(path: &Path) -> anyhow::Result<LayoutDump> {
    let file = File::open(path)?;
    let dump: LayoutDump = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| anyhow::anyhow!("invalid layout dump {}: {err}", path.display()))?;
    if dump.layer_sizes.len() != dump.nodes.len() {
        return Err(anyhow::anyhow!(
            "layout dump lists {} layer sizes but {} node layers",
            dump.layer_sizes.len(),
            dump.nodes.len()
        ));
    }
    Ok(dump)
}
