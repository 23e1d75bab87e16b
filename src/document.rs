//! The menu document and its persistence.
//!
//! A [`Document`] owns exactly one root menu and knows how to persist the
//! whole tree durably: the serialization is produced in a temporary file
//! first and only then moved over the destination, so a failure mid-write
//! never leaves a half-written file behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::component::ComponentId;
use crate::error::MenuResult;
use crate::tree::MenuTree;
use crate::xml::{self, DEFAULT_ROOT_NAME, DOCUMENT_TAG};

/// A menu definition document
#[derive(Debug, Clone)]
pub struct Document {
    tree: MenuTree,
}

impl Document {
    /// Top-level tag of the serialized document
    pub const TAG_NAME: &'static str = DOCUMENT_TAG;

    /// Create a document with an empty root menu.
    pub fn new() -> Self {
        // The default root name is a valid constant, so this cannot fail.
        let tree = MenuTree::new(DEFAULT_ROOT_NAME)
            .unwrap_or_else(|_| unreachable!("default root name is valid"));
        Self { tree }
    }

    /// Create a document whose root menu carries the given name.
    pub fn with_root_name(name: &str) -> MenuResult<Self> {
        Ok(Self {
            tree: MenuTree::new(name)?,
        })
    }

    /// The root menu of this document.
    pub fn root_id(&self) -> ComponentId {
        self.tree.root_id()
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MenuTree {
        &mut self.tree
    }

    /// Serialize the whole tree as an XML document string.
    pub fn to_xml_string(&self) -> MenuResult<String> {
        xml::tree_to_string(&self.tree, self.tree.root_id())
    }

    /// Reconstruct a document from an XML string.
    pub fn from_xml_str(contents: &str) -> MenuResult<Self> {
        Ok(Self {
            tree: xml::tree_from_str(contents)?,
        })
    }

    /// Save the document to `dest`, replacing any previous content.
    ///
    /// The serialization goes to a temporary file first; the destination
    /// is then deleted if present and the temporary file moved into
    /// place. When the move fails (a cross-device destination, say) the
    /// temporary file's contents are copied over instead; only a failure
    /// of that fallback is surfaced.
    pub fn save_to_file(&self, dest: &Path) -> MenuResult<()> {
        debug!(dest = %dest.display(), "saving document");
        let contents = self.to_xml_string()?;

        let mut temp = NamedTempFile::new()?;
        temp.write_all(contents.as_bytes())?;
        temp.flush()?;
        let temp_path = temp.into_temp_path();

        if dest.exists() {
            fs::remove_file(dest)?;
        }
        if let Err(move_error) = fs::rename(&temp_path, dest) {
            debug!(%move_error, "move failed, falling back to copy");
            fs::copy(&temp_path, dest)?;
        }
        Ok(())
    }

    /// Load a document from a previously saved file.
    pub fn load_from_file(path: &Path) -> MenuResult<Self> {
        debug!(path = %path.display(), "loading document");
        let contents = fs::read_to_string(path)?;
        Self::from_xml_str(&contents)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_document_has_empty_root() {
        let doc = Document::new();
        assert_eq!(doc.tree().name(doc.root_id()), DEFAULT_ROOT_NAME);
        assert!(doc.tree().children(doc.root_id()).is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut doc = Document::with_root_name("MyApp").unwrap();
        let root = doc.root_id();
        let stats = doc.tree_mut().add_menu(root, "Statistics").unwrap();
        doc.tree_mut().add_pdf_file(stats, "manual.pdf").unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.xml");
        doc.save_to_file(&path).unwrap();

        let loaded = Document::load_from_file(&path).unwrap();
        assert_eq!(loaded.to_xml_string().unwrap(), doc.to_xml_string().unwrap());
    }

    #[test]
    fn test_save_replaces_existing_content() {
        let doc = Document::with_root_name("Fresh").unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.xml");
        fs::write(&path, "stale content that should vanish").unwrap();

        doc.save_to_file(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains(r#"<Menue Name="Fresh">"#));
        assert!(!saved.contains("stale"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = Document::load_from_file(&dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, crate::error::MenuError::Io(_)));
    }
}
