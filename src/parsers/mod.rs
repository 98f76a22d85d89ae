pub mod fit;
pub mod gpx;

use self::fit::FitParser;
use self::gpx::GpxParser;
use crate::error::{Error, Result};
use crate::projection::GeoPoint;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// extract a single track path from different file types
pub trait Parser {
    fn parse(&self, file_path: &Path) -> Result<Vec<GeoPoint>>;

    fn name(&self) -> &'static str;

    /// File name suffixes handled by this parser, without the `.gz` variant.
    fn extensions(&self) -> &'static [&'static str];

    fn accepts(&self, file_path: &Path) -> bool {
        let file_name = file_name_lowercase(file_path);
        let stem = file_name.strip_suffix(".gz").unwrap_or(&file_name);
        self.extensions().iter().any(|ext| stem.ends_with(ext))
    }
}

pub fn parsers() -> Vec<Box<dyn Parser>> {
    vec![Box::new(GpxParser), Box::new(FitParser)]
}

fn file_name_lowercase(file_path: &Path) -> String {
    file_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Open a file, transparently decompressing it when it ends in `.gz`.
pub(crate) fn open_track(file_path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    if file_name_lowercase(file_path).ends_with(".gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Resolve `input` to one track file. Directories are searched recursively
/// and must contain exactly one supported file.
pub fn find_track_file(input: &Path) -> Result<PathBuf> {
    if !input.is_dir() {
        return Ok(input.to_path_buf());
    }

    tracing::info!("Searching for track files in {}...", input.display());
    let parsers = parsers();
    let mut candidates: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| parsers.iter().any(|p| p.accepts(path)))
        .collect();

    match candidates.len() {
        0 => Err(Error::InvalidInput(format!(
            "no track files found in {}",
            input.display()
        ))),
        1 => Ok(candidates.remove(0)),
        n => {
            candidates.sort();
            Err(Error::InvalidInput(format!(
                "found {} track files in {}, expected one: {}",
                n,
                input.display(),
                candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            )))
        }
    }
}

/// Read the track at `input` (a file or a directory holding one file).
pub fn read_track(input: &Path) -> Result<Vec<GeoPoint>> {
    let file_path = find_track_file(input)?;
    let parser = parsers()
        .into_iter()
        .find(|p| p.accepts(&file_path))
        .ok_or_else(|| Error::UnsupportedFormat(file_path.clone()))?;

    tracing::info!("Running {} on {}", parser.name(), file_path.display());
    let points = parser.parse(&file_path)?;
    if points.is_empty() {
        return Err(Error::InvalidInput(format!(
            "{} contains no track points",
            file_path.display()
        )));
    }
    tracing::info!(
        "{} extracted {} points from {}",
        parser.name(),
        points.len(),
        file_path.display()
    );
    Ok(points)
}
