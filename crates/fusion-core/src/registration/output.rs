use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transform::Transform;

/// On-disk result: `{"transform": {...}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformDocument {
    pub transform: Transform,
}

/// Write `{"transform": ...}` as 2-space indented JSON, replacing any existing file.
pub fn write_transform_json(path: &Path, transform: &Transform) -> Result<()> {
    let doc = TransformDocument {
        transform: transform.clone(),
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

pub fn read_transform_json(path: &Path) -> Result<Transform> {
    let contents = std::fs::read_to_string(path)?;
    let doc: TransformDocument = serde_json::from_str(&contents)?;
    Ok(doc.transform)
}
