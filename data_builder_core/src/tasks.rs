use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{BuildError, Result};

/// One shader to run through the external tool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawShaderTask")]
pub struct ShaderTask {
    /// File name inside the source directory
    pub source: String,
    /// File name inside the output directory
    pub output: String,
}

impl ShaderTask {
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawShaderTask {
    source: String,
    #[serde(default)]
    output: Option<String>,
}

impl From<RawShaderTask> for ShaderTask {
    fn from(raw: RawShaderTask) -> Self {
        let output = raw.output.unwrap_or_else(|| raw.source.clone());
        Self::new(raw.source, output)
    }
}

/// One static file copied verbatim
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAssetTask")]
pub struct AssetTask {
    pub source: String,
    pub destination: String,
}

impl AssetTask {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Copy under the same name
    pub fn same_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), name)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAssetTask {
    source: String,
    #[serde(default)]
    destination: Option<String>,
}

impl From<RawAssetTask> for AssetTask {
    fn from(raw: RawAssetTask) -> Self {
        let destination = raw.destination.unwrap_or_else(|| raw.source.clone());
        Self::new(raw.source, destination)
    }
}

/// Ordered shader and asset lists for one build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskManifest {
    #[serde(default = "default_shaders")]
    pub shaders: Vec<ShaderTask>,
    #[serde(default = "default_assets")]
    pub assets: Vec<AssetTask>,
}

fn default_shaders() -> Vec<ShaderTask> {
    vec![
        ShaderTask::new("basic.vert", "basic.vert"),
        ShaderTask::new("basic.frag", "basic.frag"),
    ]
}

fn default_assets() -> Vec<AssetTask> {
    vec![
        AssetTask::same_name("texture.jpg"),
        AssetTask::same_name("viking_room.png"),
        AssetTask::same_name("viking_room.obj"),
    ]
}

impl Default for TaskManifest {
    fn default() -> Self {
        Self {
            shaders: default_shaders(),
            assets: default_assets(),
        }
    }
}

impl TaskManifest {
    /// Loads a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| BuildError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| BuildError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
