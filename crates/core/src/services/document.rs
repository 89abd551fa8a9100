//! Student document metadata. The file bytes are stored elsewhere.

use std::path::Path;

use chrono::Utc;
use counselhub_common::{AppError, AppResult, IdGenerator};
use counselhub_db::{
    entities::student_document::{self, DocumentType, FileType},
    repositories::StudentDocumentRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Metadata for an uploaded file.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordDocumentInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub document_type: DocumentType,

    /// Where the upload was stored.
    #[validate(length(min = 1, max = 1024))]
    pub file_path: String,
}

/// Lowercase extension of `path`, if it is one we accept.
fn allowed_extension(path: &str) -> Option<String> {
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Document service for business logic.
#[derive(Clone)]
pub struct DocumentService {
    document_repo: StudentDocumentRepository,
    id_gen: IdGenerator,
}

impl DocumentService {
    /// Create a new document service.
    #[must_use]
    pub const fn new(document_repo: StudentDocumentRepository) -> Self {
        Self {
            document_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Record an uploaded document.
    pub async fn record(
        &self,
        student_id: &str,
        input: RecordDocumentInput,
    ) -> AppResult<student_document::Model> {
        input.validate()?;

        let ext = allowed_extension(&input.file_path).ok_or_else(|| {
            AppError::Validation(format!(
                "File type not allowed; use one of: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        let model = student_document::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(student_id.to_string()),
            title: Set(input.title),
            file_path: Set(input.file_path),
            document_type: Set(input.document_type),
            file_type: Set(FileType::from_extension(&ext)),
            uploaded_at: Set(Utc::now().into()),
        };

        let doc = self.document_repo.create(model).await?;
        info!(document_id = %doc.id, student_id, file_type = ?doc.file_type, "Document recorded");
        Ok(doc)
    }

    /// The student's documents, newest first.
    pub async fn list(&self, student_id: &str) -> AppResult<Vec<student_document::Model>> {
        self.document_repo.find_by_student(student_id).await
    }

    /// Delete one of the student's documents. Returns the stored path so
    /// the caller can remove the file.
    pub async fn delete(&self, student_id: &str, document_id: &str) -> AppResult<String> {
        let doc = self
            .document_repo
            .find_for_student(document_id, student_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

        let path = doc.file_path.clone();
        self.document_repo.delete(doc).await?;
        Ok(path)
    }
}
