use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An invoice record. Vendor and invoice sub-objects from the wire format
/// are flattened into columns; `line_items` stays a JSON array. No column
/// ties `total` to the sum of the line items, and `file_id` is not a foreign
/// key, so a record can outlive its blob.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoice")]
pub struct Model {
    /// UUIDv7 primary key, generated on insert.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Blob id as uploaded; never checked for existence.
    pub file_id: Option<String>,
    /// Original upload filename, display-only.
    pub file_name: Option<String>,

    pub vendor_name: String,
    pub vendor_address: Option<String>,
    pub vendor_tax_id: Option<String>,

    pub invoice_number: String,
    /// Free-form, expected ISO-8601; not parsed or validated as a date.
    pub invoice_date: Option<String>,
    pub currency: Option<String>,
    pub subtotal: Option<f64>,
    pub tax_percent: Option<f64>,
    pub total: Option<f64>,
    pub po_number: Option<String>,
    pub po_date: Option<String>,

    /// Ordered `[{description, unitPrice, quantity, total}]` array.
    pub line_items: Option<Json>,

    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
