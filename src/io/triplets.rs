use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::sparse::CscMatrix;

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let reader: Box<dyn Read> = if path.extension().map(|e| e == "gz").unwrap_or(false) {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(Box::new(BufReader::new(reader)))
}

/// Read a `k`x`k` wins matrix from `row col count` lines.
///
/// Indices are 0-based. Blank lines and lines starting with `#` are skipped.
/// Repeated pairs are summed. A `.gz` extension selects gzip decoding.
pub fn read_triplets(path: &Path, k: usize) -> Result<CscMatrix> {
    let reader = open_reader(path)?;
    let mut triplets = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {:?}", path))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            bail!(
                "line {}: expected `row col count`, found {} fields",
                lineno + 1,
                fields.len()
            );
        }
        let row: usize = fields[0]
            .parse()
            .with_context(|| format!("line {}: invalid row index {:?}", lineno + 1, fields[0]))?;
        let col: usize = fields[1]
            .parse()
            .with_context(|| format!("line {}: invalid column index {:?}", lineno + 1, fields[1]))?;
        let count: f64 = fields[2]
            .parse()
            .with_context(|| format!("line {}: invalid count {:?}", lineno + 1, fields[2]))?;
        triplets.push((row, col, count));
    }
    let m = CscMatrix::from_triplets(k, k, &triplets)
        .with_context(|| format!("invalid comparison matrix in {:?}", path))?;
    Ok(m)
}
