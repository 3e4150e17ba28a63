//! Startup loader for the flashcard data file.

use super::types::{FlashcardDocument, LoadError};
use std::path::Path;

/// Read and parse the data file at `path`.
pub fn try_load(path: &Path) -> Result<FlashcardDocument, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the deck, substituting an empty document when the file is missing or malformed.
///
/// The failure is logged but never returned: the server keeps running with no cards.
pub fn load(path: &Path) -> FlashcardDocument {
    match try_load(path) {
        Ok(document) => {
            tracing::debug!(
                path = %path.display(),
                flashcards = document.flashcards.len(),
                "Loaded flashcard data"
            );
            document
        }
        Err(err) => {
            tracing::error!(error = %err, "Error loading flashcard data");
            tracing::warn!(
                path = %path.display(),
                "Serving an empty flashcard collection; check the data file location and contents"
            );
            FlashcardDocument::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_well_formed_file() {
        let file = write_temp(
            r#"{
                "metadata": { "title": "JS basics", "categories": ["js", "css"] },
                "flashcards": [
                    { "id": 3, "question": "q3", "answer": "a3", "category": "js", "difficulty": "easy", "tags": [] },
                    { "id": 1, "question": "q1", "answer": "a1", "category": "css", "difficulty": "hard", "tags": ["box"] }
                ]
            }"#,
        );

        let document = try_load(file.path()).expect("document loads");
        assert_eq!(document.flashcards.len(), 2);
        assert_eq!(document.flashcards[0].id(), Some(3));
        assert_eq!(document.flashcards[1].id(), Some(1));
        assert_eq!(document.metadata.categories(), serde_json::json!(["js", "css"]));
        assert_eq!(
            document.metadata.field("title"),
            Some(&serde_json::json!("JS basics"))
        );
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.json");

        let err = try_load(&path).expect_err("file is missing");
        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let file = write_temp("{ \"flashcards\": [ { \"id\": 1, ");
        let err = try_load(file.path()).expect_err("truncated json");
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn load_falls_back_to_empty_document() {
        let dir = tempfile::tempdir().expect("temp dir");
        let document = load(&dir.path().join("absent.json"));
        assert_eq!(document, FlashcardDocument::empty());

        let malformed = write_temp("not json at all");
        assert_eq!(load(malformed.path()), FlashcardDocument::empty());
    }

    #[test]
    fn partial_cards_still_load() {
        let file = write_temp(
            r#"{
                "metadata": { "categories": "everything" },
                "flashcards": [
                    { "id": 1, "question": "q", "answer": "a", "category": "c", "difficulty": "easy", "tags": [] },
                    { "id": 2, "question": "q", "answer": "a", "category": "c" },
                    { "id": "three", "question": "q", "answer": 3, "category": "c", "difficulty": "hard" }
                ]
            }"#,
        );

        let document = load(file.path());
        assert_eq!(document.flashcards.len(), 3);
        assert_eq!(document.flashcards[1].difficulty(), None);
        assert_eq!(document.flashcards[2].id(), None);
        assert_eq!(document.metadata.categories(), serde_json::json!("everything"));
    }

    #[test]
    fn non_array_flashcards_is_a_parse_error() {
        let file = write_temp(r#"{ "metadata": {}, "flashcards": "none" }"#);
        let err = try_load(file.path()).expect_err("flashcards must be a list");
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(load(file.path()).flashcards.is_empty());
    }
}
