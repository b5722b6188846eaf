//! JSON input and output for document trees and augmentations.
//!
//! The JSON shapes are the ones the serde derives on the model produce:
//! a document is an array of nodes tagged by `kind`, paths are arrays of
//! integers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::augment::Augmentation;
use crate::error::Result;
use crate::model::BooqNode;

/// Read a document (array of top-level nodes) from a JSON file.
pub fn read_nodes<P: AsRef<Path>>(path: P) -> Result<Vec<BooqNode>> {
    read_json_file(path)
}

/// Read a list of augmentations from a JSON file.
pub fn read_augmentations<P: AsRef<Path>>(path: P) -> Result<Vec<Augmentation>> {
    read_json_file(path)
}

/// Read any JSON value from a reader.
pub fn read_json_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write `value` as pretty-printed JSON to `writer`.
pub fn write_json_to_writer<T: Serialize + ?Sized, W: Write>(value: &T, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// Write `value` as pretty-printed JSON to a file.
pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_to_writer(value, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    read_json_from_reader(BufReader::new(file))
}
