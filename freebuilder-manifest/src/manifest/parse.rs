//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, lower::lower, tables::TypesFile, validate::ParseContext};
use crate::{Error, Result};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "types.toml")
    }
}

impl Manifest {
    /// Parse a declaration file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse declarations from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let file: TypesFile = toml::from_str(content).map_err(|e| ctx.source().parse_error(e))?;
    let model = lower(&file, &ctx)?;
    Ok(Manifest {
        features: file.features,
        model,
    })
}
