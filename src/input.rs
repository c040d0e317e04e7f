use anyhow::{Context, Result};
use std::{fs, io::Read, path::PathBuf};

/// Where the text to validate comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Literal(String),
    Stdin,
}

impl InputSource {
    /// A file path wins over literal text; with neither, read stdin.
    pub fn select(file: Option<PathBuf>, literal: Option<String>) -> Self {
        match (file, literal) {
            (Some(path), _) => InputSource::File(path),
            (None, Some(text)) => InputSource::Literal(text),
            (None, None) => InputSource::Stdin,
        }
    }
}

pub fn read_input<R: Read>(source: &InputSource, mut stdin: R) -> Result<String> {
    match source {
        InputSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("Unable to read file {}", path.display())),
        InputSource::Literal(text) => Ok(text.clone()),
        InputSource::Stdin => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("Unable to read from stdin")?;
            Ok(text)
        }
    }
}
