use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Descriptor read by the graph loader to bulk load the produced files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLoaderConfig {
    /// File names of the vertex file and the edge file, in that order.
    pub uris: Vec<String>,
    pub format: String,
    pub vertex_id_type: String,
    pub vertex_labels: bool,
    pub edge_label: bool,
    pub vertex_props: Vec<PropertySpec>,
    pub loading: LoadingOptions,
    pub separator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingOptions {
    pub load_vertex_labels: bool,
    pub load_edge_label: bool,
}

impl GraphLoaderConfig {
    /// Descriptor for an edge-list pair with string ids and a `type` vertex property.
    pub fn edge_list(vertex_path: &Path, edge_path: &Path) -> Self {
        Self {
            uris: vec![base_name(vertex_path), base_name(edge_path)],
            format: "edge_list".to_string(),
            vertex_id_type: "string".to_string(),
            vertex_labels: false,
            edge_label: true,
            vertex_props: vec![PropertySpec {
                name: "type".to_string(),
                property_type: "string".to_string(),
            }],
            loading: LoadingOptions { load_vertex_labels: false, load_edge_label: true },
            separator: " ".to_string(),
        }
    }

    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
