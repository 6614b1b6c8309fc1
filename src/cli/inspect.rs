use std::fs;

use crate::classfile::ClassFile;
use crate::error::{Error, Result};

/// Run the inspect subcommand
pub fn inspect(input_path: &std::path::Path) -> Result<()> {
    let data = fs::read(input_path)
        .map_err(|e| Error::Io(format!("Failed to read file {}: {}", input_path.display(), e)))?;

    let class = ClassFile::parse(&data)?;

    match serde_json::to_string_pretty(&class) {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(_) => Err(Error::internal("Failed to serialize class file to JSON")),
    }
}
