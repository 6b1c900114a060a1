use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::OutputMode;
use crate::core::{EdgeRecord, VertexRecord};
use crate::error::{Error, Result};

const WRITE_BUFFER_BYTES: usize = 1 << 20;

/// The vertex and edge files of one run, held open until the run ends.
pub struct EdgeListSink<W: Write = BufWriter<File>> {
    vertices: W,
    edges: W,
}

impl EdgeListSink<BufWriter<File>> {
    /// Open both output files, creating them when missing.
    pub fn open(vertex_path: &Path, edge_path: &Path, mode: OutputMode) -> Result<Self> {
        Ok(Self::new(open_output(vertex_path, mode)?, open_output(edge_path, mode)?))
    }
}

impl<W: Write> EdgeListSink<W> {
    pub fn new(vertices: W, edges: W) -> Self {
        Self { vertices, edges }
    }

    pub fn write_vertex(&mut self, name: &str, instance_type: &str) -> Result<()> {
        writeln!(self.vertices, "{}", VertexRecord { name, instance_type })?;
        Ok(())
    }

    pub fn write_edge(&mut self, source: &str, destination: &str, relation: &str) -> Result<()> {
        writeln!(self.edges, "{}", EdgeRecord { source, destination, relation })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.vertices.flush()?;
        self.edges.flush()?;
        Ok(())
    }

    /// Flush and hand back the vertex and edge writers.
    pub fn into_inner(mut self) -> Result<(W, W)> {
        self.flush()?;
        Ok((self.vertices, self.edges))
    }
}

fn open_output(path: &Path, mode: OutputMode) -> Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        OutputMode::Append => options.append(true),
        OutputMode::Truncate => options.write(true).truncate(true),
    };
    let file = options.open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    Ok(BufWriter::with_capacity(WRITE_BUFFER_BYTES, file))
}
