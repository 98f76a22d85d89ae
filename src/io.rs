use crate::error::{Error, Result};
use crate::hike_data::HikeData;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn read_hike_data(path: &Path) -> Result<HikeData> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let reader = BufReader::new(file);
    let data: HikeData = serde_json::from_reader(reader).map_err(|e| Error::json(path, e))?;
    tracing::debug!(
        "Read {} features from {}",
        data.features.len(),
        path.display()
    );
    Ok(data)
}

pub fn write_hike_data(data: &HikeData, path: &Path) -> Result<()> {
    let payload = serde_json::to_string_pretty(data).map_err(|e| Error::json(path, e))?;
    write_payload(&payload, path)
}

/// Write `data` to the canonical artifact and, best effort, to a mirror copy.
///
/// A failed mirror write is logged and does not fail the call.
pub fn write_with_mirror(data: &HikeData, canonical: &Path, mirror: Option<&Path>) -> Result<()> {
    let payload = serde_json::to_string_pretty(data).map_err(|e| Error::json(canonical, e))?;
    write_payload(&payload, canonical)?;
    tracing::info!("Wrote {}", canonical.display());

    if let Some(mirror) = mirror {
        match write_payload(&payload, mirror) {
            Ok(()) => tracing::info!("Mirrored to {}", mirror.display()),
            Err(e) => tracing::warn!("Failed to mirror to {}: {}", mirror.display(), e),
        }
    }
    Ok(())
}

fn write_payload(payload: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, payload).map_err(|e| Error::io(path, e))
}
