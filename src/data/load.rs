use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    data::model::{CurrentsFile, EventsFile, RepublicsFile},
    foundation::error::{HemicycleError, HemicycleResult},
};

fn read_json<T, R>(r: R, what: &str) -> HemicycleResult<T>
where
    T: serde::de::DeserializeOwned,
    R: std::io::Read,
{
    serde_json::from_reader(r)
        .map_err(|e| HemicycleError::serde(format!("parse {what} JSON: {e}")))
}

fn open_json<T>(path: &Path, what: &str) -> HemicycleResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let f = File::open(path)
        .with_context(|| format!("open {what} JSON '{}'", path.display()))
        .map_err(HemicycleError::from)?;
    read_json(BufReader::new(f), what)
}

impl RepublicsFile {
    /// Parse and validate a republics file from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HemicycleResult<Self> {
        let file: Self = read_json(r, "republics")?;
        file.validate()?;
        Ok(file)
    }

    /// Parse and validate a republics file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> HemicycleResult<Self> {
        let file: Self = open_json(path.as_ref(), "republics")?;
        file.validate()?;
        Ok(file)
    }
}

impl CurrentsFile {
    /// Parse and validate a currents file from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HemicycleResult<Self> {
        let file: Self = read_json(r, "currents")?;
        file.validate()?;
        Ok(file)
    }

    /// Parse and validate a currents file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> HemicycleResult<Self> {
        let file: Self = open_json(path.as_ref(), "currents")?;
        file.validate()?;
        Ok(file)
    }
}

impl EventsFile {
    /// Parse and validate an events file from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HemicycleResult<Self> {
        let file: Self = read_json(r, "events")?;
        file.validate()?;
        Ok(file)
    }

    /// Parse and validate an events file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> HemicycleResult<Self> {
        let file: Self = open_json(path.as_ref(), "events")?;
        file.validate()?;
        Ok(file)
    }
}
