//! Student document metadata entity.
//!
//! Only the metadata is stored; file bytes live outside the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[sea_orm(string_value = "transcript")]
    Transcript,
    #[sea_orm(string_value = "resume")]
    Resume,
    #[sea_orm(string_value = "certificate")]
    Certificate,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Coarse file type derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[sea_orm(string_value = "pdf")]
    Pdf,
    #[sea_orm(string_value = "doc")]
    Doc,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "other")]
    Other,
}

impl FileType {
    /// Classify a lowercase file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Doc,
            "jpg" | "jpeg" | "png" => Self::Image,
            _ => Self::Other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_document")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub student_id: String,

    pub title: String,

    /// Storage path of the uploaded file
    pub file_path: String,

    pub document_type: DocumentType,

    pub file_type: FileType,

    pub uploaded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("docx"), FileType::Doc);
        assert_eq!(FileType::from_extension("jpeg"), FileType::Image);
        assert_eq!(FileType::from_extension("txt"), FileType::Other);
    }
}
