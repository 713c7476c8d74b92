use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::model::BtFit;
use crate::opt::EmConfig;

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {:?}", path))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("failed to open {:?}", path))?;
    let reader = BufReader::new(file);
    let value =
        serde_json::from_reader(reader).with_context(|| format!("failed to parse {:?}", path))?;
    Ok(value)
}

pub fn save_fit(path: &Path, fit: &BtFit) -> Result<()> {
    save_json(path, fit)
}

pub fn load_fit(path: &Path) -> Result<BtFit> {
    load_json(path)
}

pub fn save_config(path: &Path, config: &EmConfig) -> Result<()> {
    save_json(path, config)
}

/// Missing fields take their default values.
pub fn load_config(path: &Path) -> Result<EmConfig> {
    load_json(path)
}
