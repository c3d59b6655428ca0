//! JSON document persistence.
//!
//! A [`FileRepository`] keeps one `repository.json` index (the metadata list
//! plus the last-edited pointer) and one `doc_<id>.json` file per document
//! under a root directory, resolved from the platform data dir or supplied
//! explicitly for tests. Unreadable or malformed files are logged and treated
//! as absent; the interactive session never dies on storage trouble.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{BoardResult, Error};
use crate::scene::Document;

const INDEX_FILE: &str = "repository.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A document together with its identity, the unit stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub metadata: DocumentMetadata,
    pub props: Document,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct RepositoryIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_edited_document_id: Option<String>,
    #[serde(default)]
    documents: Vec<DocumentMetadata>,
}

/// Persistence contract consumed by the hosting application, typically
/// subscribed to the controller's document-changed events.
pub trait DocumentRepository {
    fn list_documents(&self) -> Vec<DocumentMetadata>;

    /// Creates and persists a fresh empty document.
    fn create_document(&mut self) -> BoardResult<StoredDocument>;

    /// Fails with [`Error::NotFound`] when no document has that id.
    fn load_document_by_id(&self, id: &str) -> BoardResult<StoredDocument>;

    /// The last edited document, creating a fresh one when there is none or
    /// it cannot be loaded.
    fn last_document_used(&mut self) -> BoardResult<StoredDocument>;

    /// Upserts the document and moves the last-edited pointer to it.
    fn write_document(&mut self, document: &StoredDocument) -> BoardResult<()>;
}

pub struct FileRepository {
    root: PathBuf,
    index: RepositoryIndex,
}

impl FileRepository {
    /// Opens the repository under the platform data directory.
    pub fn open() -> BoardResult<Self> {
        let root = dirs::data_dir()
            .ok_or_else(|| Error::Configuration("no platform data directory".to_string()))?
            .join("doodleboard");
        Self::with_root(root)
    }

    /// Opens the repository under an explicit root, creating it if needed.
    pub fn with_root(root: impl Into<PathBuf>) -> BoardResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            Error::Configuration(format!("cannot create storage root {}: {err}", root.display()))
        })?;
        let index = load_index(&root);
        Ok(Self { root, index })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("doc_{id}.json"))
    }

    fn save_index(&self) -> BoardResult<()> {
        let raw = serde_json::to_string_pretty(&self.index)?;
        fs::write(self.root.join(INDEX_FILE), raw)?;
        Ok(())
    }
}

fn load_index(root: &Path) -> RepositoryIndex {
    let path = root.join(INDEX_FILE);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return RepositoryIndex::default(),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "could not read repository index");
            return RepositoryIndex::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(index) => index,
        Err(err) => {
            warn!(error = %err, path = %path.display(), "repository index is malformed, starting fresh");
            RepositoryIndex::default()
        }
    }
}

impl DocumentRepository for FileRepository {
    fn list_documents(&self) -> Vec<DocumentMetadata> {
        self.index.documents.clone()
    }

    fn create_document(&mut self) -> BoardResult<StoredDocument> {
        let document = StoredDocument {
            metadata: DocumentMetadata {
                id: Uuid::new_v4().to_string(),
                name: None,
            },
            props: Document::default(),
        };
        self.write_document(&document)?;
        Ok(document)
    }

    fn load_document_by_id(&self, id: &str) -> BoardResult<StoredDocument> {
        let path = self.document_path(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound { id: id.to_string() });
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn last_document_used(&mut self) -> BoardResult<StoredDocument> {
        if let Some(id) = self.index.last_edited_document_id.clone() {
            match self.load_document_by_id(&id) {
                Ok(document) => return Ok(document),
                Err(err) => {
                    error!(error = %err, id, "could not load last edited document, creating a new one");
                }
            }
        }
        self.create_document()
    }

    fn write_document(&mut self, document: &StoredDocument) -> BoardResult<()> {
        let raw = serde_json::to_string_pretty(document)?;
        fs::write(self.document_path(&document.metadata.id), raw)?;

        let id = document.metadata.id.clone();
        match self.index.documents.iter_mut().find(|meta| meta.id == id) {
            Some(existing) => *existing = document.metadata.clone(),
            None => self.index.documents.push(document.metadata.clone()),
        }
        self.index.last_edited_document_id = Some(id);
        self.save_index()
    }
}
