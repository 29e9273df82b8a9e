//! crates/skimmly_core/src/notes.rs
//!
//! The in-memory grid of note images uploaded during this session.

use crate::domain::{NoteItem, UploadFile};
use crate::ports::{Confirmer, FileDecoder};
use crate::services::Services;
use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this note?";

/// One rendered tile of the notes grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: String,
    pub title: String,
    pub image_src: String,
    pub uploaded_label: String,
}

pub struct NotesManager {
    decoder: Arc<dyn FileDecoder>,
    confirmer: Arc<dyn Confirmer>,
    notes: Vec<NoteItem>,
}

impl NotesManager {
    pub fn new(services: &Services) -> Self {
        Self {
            decoder: services.decoder.clone(),
            confirmer: services.confirmer.clone(),
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[NoteItem] {
        &self.notes
    }

    pub fn grid(&self) -> Vec<NoteCard> {
        self.notes
            .iter()
            .map(|note| NoteCard {
                id: note.id.clone(),
                title: note.file_name.clone(),
                image_src: note.image_src.clone(),
                uploaded_label: format!("Uploaded {}", note.uploaded_at.format("%-m/%-d/%Y")),
            })
            .collect()
    }

    /// Adds a single file. Returns whether a note was created.
    pub async fn add_note(&mut self, file: &UploadFile) -> bool {
        self.add_notes(std::slice::from_ref(file)).await == 1
    }

    /// Decodes every image file concurrently and appends each note as soon as
    /// its decode completes. Non-image files are skipped. Returns how many
    /// notes were added.
    pub async fn add_notes(&mut self, files: &[UploadFile]) -> usize {
        let decoder = self.decoder.clone();
        let mut pending: FuturesUnordered<_> = files
            .iter()
            .filter(|file| {
                if !file.is_image() {
                    debug!("Skipping non-image upload {} ({})", file.name, file.mime_type);
                }
                file.is_image()
            })
            .map(|file| {
                let decoder = decoder.clone();
                async move { (file, decoder.read_as_data_url(file).await) }
            })
            .collect();

        let mut added = 0;
        while let Some((file, result)) = pending.next().await {
            match result {
                Ok(image_src) => {
                    self.push(file, image_src);
                    added += 1;
                }
                Err(e) => warn!("Failed to read {}: {}", file.name, e),
            }
        }
        added
    }

    /// Drag-and-drop uploads take the same path as the file picker.
    pub async fn drop_files(&mut self, files: &[UploadFile]) -> usize {
        self.add_notes(files).await
    }

    /// Removes a note after the user confirms. Returns whether one was removed.
    pub fn delete_note(&mut self, id: &str) -> bool {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return false;
        };
        if !self.confirmer.confirm(DELETE_PROMPT) {
            return false;
        }
        let removed = self.notes.remove(index);
        info!("Deleted note {} ({})", removed.id, removed.file_name);
        true
    }

    fn push(&mut self, file: &UploadFile, image_src: String) {
        let note = NoteItem {
            // v7 ids are time-ordered and stay unique within a millisecond.
            id: format!("note_{}", Uuid::now_v7().simple()),
            file_name: file.name.clone(),
            image_src,
            uploaded_at: Utc::now(),
        };
        debug!("Added note {} ({})", note.id, note.file_name);
        self.notes.push(note);
    }
}
