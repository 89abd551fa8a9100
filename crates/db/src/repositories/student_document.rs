//! Student document repository.

use std::sync::Arc;

use crate::entities::{StudentDocument, student_document};
use counselhub_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Student document repository for database operations.
#[derive(Clone)]
pub struct StudentDocumentRepository {
    db: Arc<DatabaseConnection>,
}

impl StudentDocumentRepository {
    /// Create a new document repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a document by ID, scoped to its owner.
    pub async fn find_for_student(
        &self,
        id: &str,
        student_id: &str,
    ) -> AppResult<Option<student_document::Model>> {
        StudentDocument::find_by_id(id)
            .filter(student_document::Column::StudentId.eq(student_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Documents of a student, newest first.
    pub async fn find_by_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<student_document::Model>> {
        StudentDocument::find()
            .filter(student_document::Column::StudentId.eq(student_id))
            .order_by_desc(student_document::Column::UploadedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Record document metadata.
    pub async fn create(
        &self,
        model: student_document::ActiveModel,
    ) -> AppResult<student_document::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a document record.
    pub async fn delete(&self, doc: student_document::Model) -> AppResult<()> {
        doc.delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
