use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::invoice;
use crate::error::AppError;

/// One line of an invoice. All fields are optional because extraction is
/// best-effort and clients may record partial rows.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

/// The `invoice` sub-object of the wire format.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFields {
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_date: Option<String>,
    #[serde(default)]
    pub line_items: Option<Vec<LineItem>>,
}

/// Field-level patch for the `invoice` sub-object. Every field is optional;
/// absent fields are left untouched by an update.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub number: Option<String>,
    pub date: Option<String>,
    pub currency: Option<String>,
    pub subtotal: Option<f64>,
    pub tax_percent: Option<f64>,
    pub total: Option<f64>,
    pub po_number: Option<String>,
    pub po_date: Option<String>,
    pub line_items: Option<Vec<LineItem>>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub vendor: Vendor,
    pub invoice: InvoiceFields,
}

/// Update payload. `vendor`, when present, replaces the stored vendor
/// wholesale; `invoice` is merged field by field.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub vendor: Option<Vendor>,
    pub invoice: Option<InvoicePatch>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub vendor: Vendor,
    pub invoice: InvoiceFields,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, IntoParams)]
pub struct InvoiceListQuery {
    /// Case-insensitive substring match on vendor name or invoice number.
    pub q: Option<String>,
}

pub fn validate_create(req: &CreateInvoiceRequest) -> Result<(), AppError> {
    validate_vendor(&req.vendor)?;
    if req.invoice.number.trim().is_empty() {
        return Err(AppError::Validation(
            "invoice.number must be a non-empty string".into(),
        ));
    }
    Ok(())
}

pub fn validate_update(req: &UpdateInvoiceRequest) -> Result<(), AppError> {
    if let Some(ref vendor) = req.vendor {
        validate_vendor(vendor)?;
    }
    if let Some(InvoicePatch {
        number: Some(ref number),
        ..
    }) = req.invoice
    {
        if number.trim().is_empty() {
            return Err(AppError::Validation(
                "invoice.number must be a non-empty string".into(),
            ));
        }
    }
    Ok(())
}

fn validate_vendor(vendor: &Vendor) -> Result<(), AppError> {
    if vendor.name.trim().is_empty() {
        return Err(AppError::Validation(
            "vendor.name must be a non-empty string".into(),
        ));
    }
    Ok(())
}

pub fn line_items_to_json(items: &[LineItem]) -> serde_json::Value {
    json!(items)
}

fn line_items_from_json(value: Option<serde_json::Value>) -> Option<Vec<LineItem>> {
    value.and_then(|v| serde_json::from_value(v).ok())
}

impl From<invoice::Model> for InvoiceResponse {
    fn from(m: invoice::Model) -> Self {
        Self {
            id: m.id,
            file_id: m.file_id,
            file_name: m.file_name,
            vendor: Vendor {
                name: m.vendor_name,
                address: m.vendor_address,
                tax_id: m.vendor_tax_id,
            },
            invoice: InvoiceFields {
                number: m.invoice_number,
                date: m.invoice_date,
                currency: m.currency,
                subtotal: m.subtotal,
                tax_percent: m.tax_percent,
                total: m.total,
                po_number: m.po_number,
                po_date: m.po_date,
                line_items: line_items_from_json(m.line_items),
            },
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Build the active model for an update, setting only the fields the request
/// names. The write itself decides whether the row still exists, so there is
/// no fetch-then-write window. The caller has already validated the request.
pub fn apply_update(
    id: Uuid,
    req: UpdateInvoiceRequest,
    now: DateTime<Utc>,
) -> invoice::ActiveModel {
    let mut active = invoice::ActiveModel {
        id: Set(id),
        updated_at: Set(Some(now)),
        ..Default::default()
    };

    if let Some(file_id) = req.file_id {
        active.file_id = Set(Some(file_id));
    }
    if let Some(file_name) = req.file_name {
        active.file_name = Set(Some(file_name));
    }
    if let Some(vendor) = req.vendor {
        active.vendor_name = Set(vendor.name);
        active.vendor_address = Set(vendor.address);
        active.vendor_tax_id = Set(vendor.tax_id);
    }
    if let Some(patch) = req.invoice {
        if let Some(number) = patch.number {
            active.invoice_number = Set(number);
        }
        if let Some(date) = patch.date {
            active.invoice_date = Set(Some(date));
        }
        if let Some(currency) = patch.currency {
            active.currency = Set(Some(currency));
        }
        if let Some(subtotal) = patch.subtotal {
            active.subtotal = Set(Some(subtotal));
        }
        if let Some(tax_percent) = patch.tax_percent {
            active.tax_percent = Set(Some(tax_percent));
        }
        if let Some(total) = patch.total {
            active.total = Set(Some(total));
        }
        if let Some(po_number) = patch.po_number {
            active.po_number = Set(Some(po_number));
        }
        if let Some(po_date) = patch.po_date {
            active.po_date = Set(Some(po_date));
        }
        if let Some(items) = patch.line_items {
            active.line_items = Set(Some(line_items_to_json(&items)));
        }
    }

    active
}
