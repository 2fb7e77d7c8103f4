use crate::utils::Result;
use std::{
    fs::File,
    io::{BufWriter, Write},
};

pub fn create_writer<T, F>(output_prefix: &str, output_suffix: &str, f: F) -> Result<T>
where
    F: FnOnce(&str) -> Result<T>,
{
    let output_path = format!("{}.{}", output_prefix, output_suffix);
    f(&output_path)
}

pub fn open_output_file(path: &str) -> Result<Box<dyn Write>> {
    let file = File::create(path).map_err(|e| format!("Failed to create {}: {}", path, e))?;
    log::debug!("Writing {}", path);
    Ok(Box::new(BufWriter::new(file)))
}
