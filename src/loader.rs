//! This module provides the `DocumentLoader` struct, responsible for loading
//! persisted automaton documents from files and strings.

use crate::document::AutomatonDocument;
use crate::parser::parse;
use crate::types::AutomatonError;
use std::fs;
use std::path::{Path, PathBuf};

/// The file extension of persisted automaton documents.
pub const DOCUMENT_EXTENSION: &str = "zflap";

/// `DocumentLoader` is a utility struct for loading persisted automata.
/// It provides methods to load documents from individual files, from string
/// content, and to discover and load all `.zflap` files within a directory.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Loads a single automaton document from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(AutomatonDocument)` if the file is read, parsed, and validated.
    /// * `Err(AutomatonError::FileError)` if the file cannot be read.
    /// * `Err(AutomatonError::ParseError)` or
    ///   `Err(AutomatonError::ValidationError)` for invalid content.
    pub fn load_document(path: &Path) -> Result<AutomatonDocument, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single automaton document from string content, e.g. from an
    /// editor buffer that has not been saved yet.
    pub fn load_document_from_string(content: &str) -> Result<AutomatonDocument, AutomatonError> {
        parse(content)
    }

    /// Loads all `.zflap` documents from a given directory.
    ///
    /// Directories and files with other extensions are skipped. Each element
    /// of the returned vector reports one file: either the loaded document
    /// with its path, or the error that loading it produced.
    pub fn load_documents(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, AutomatonDocument), AutomatonError>> {
        if !directory.exists() {
            return vec![Err(AutomatonError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(AutomatonError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(AutomatonError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and files with other extensions
                if path.is_dir()
                    || path
                        .extension()
                        .is_none_or(|ext| ext != DOCUMENT_EXTENSION)
                {
                    return None;
                }

                match Self::load_document(&path) {
                    Ok(document) => Some(Ok((path, document))),
                    Err(e) => Some(Err(AutomatonError::FileError(format!(
                        "Failed to load document from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
