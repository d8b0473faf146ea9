//! Subject artifact serialization.
//!
//! One JSON document per subject; schema held stable across runs so
//! downstream diffing keeps working. All maps inside the artifact are
//! ordered, so equal state serializes to equal bytes.

use std::io::Write;

use lacuna_core::errors::LacunaResult;
use lacuna_core::models::SubjectArtifact;

/// Render the artifact as pretty-printed JSON.
pub fn render_artifact(artifact: &SubjectArtifact) -> LacunaResult<String> {
    Ok(serde_json::to_string_pretty(artifact)?)
}

/// Write the artifact to any sink (file, buffer, stdout).
pub fn write_artifact<W: Write>(artifact: &SubjectArtifact, mut sink: W) -> LacunaResult<()> {
    serde_json::to_writer_pretty(&mut sink, artifact)?;
    sink.write_all(b"\n").map_err(serde_json::Error::io)?;
    Ok(())
}
