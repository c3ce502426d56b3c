use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Metadata row for an uploaded blob. The bytes themselves live in the blob
/// store under the same id.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stored_file")]
pub struct Model {
    /// Public file id returned by the upload endpoint (UUIDv7, store-generated).
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Original upload filename.
    pub filename: String,

    /// MIME content type as reported by the client, if any.
    pub content_type: Option<String>,

    pub size: i64,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
