use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use tracing::instrument;
use uuid::Uuid;

use crate::entity::invoice;
use crate::error::{AppError, ErrorBody};
use crate::extractors::AppJson;
use crate::models::invoice::{
    CreateInvoiceRequest, InvoiceListQuery, InvoiceResponse, UpdateInvoiceRequest, apply_update,
    line_items_to_json, validate_create, validate_update,
};
use crate::models::shared::{OkBody, escape_like};
use crate::state::AppState;

/// Hard cap on list results; there is no pagination.
const LIST_LIMIT: u64 = 100;

#[utoipa::path(
    get,
    path = "/invoices",
    tag = "Invoices",
    operation_id = "listInvoices",
    summary = "List invoice records",
    description = "Returns the newest records first, capped at 100. The optional `q` parameter \
        filters case-insensitively on vendor name or invoice number substring.",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Invoice list", body = Vec<InvoiceResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Result<Json<Vec<InvoiceResponse>>, AppError> {
    let mut select = invoice::Entity::find()
        .order_by_desc(invoice::Column::CreatedAt)
        .limit(LIST_LIMIT);

    if let Some(q) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
        let pattern = format!("%{}%", escape_like(&q.to_lowercase()));
        select = select.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(invoice::Column::VendorName)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(invoice::Column::InvoiceNumber)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                ),
        );
    }

    let records = select.all(&state.db).await?;
    Ok(Json(
        records.into_iter().map(InvoiceResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/invoices/{id}",
    tag = "Invoices",
    operation_id = "getInvoice",
    summary = "Fetch a single invoice record",
    params(("id" = String, Path, description = "Invoice ID (UUID)")),
    responses(
        (status = 200, description = "Invoice record", body = InvoiceResponse),
        (status = 400, description = "Malformed invoice ID", body = ErrorBody),
        (status = 404, description = "Invoice not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let invoice_id = parse_invoice_id(&id)?;
    let record = find_invoice(&state, invoice_id).await?;
    Ok(Json(InvoiceResponse::from(record)))
}

#[utoipa::path(
    post,
    path = "/invoices",
    tag = "Invoices",
    operation_id = "createInvoice",
    summary = "Create an invoice record",
    description = "Persists a reviewed invoice. `vendor.name` and `invoice.number` are required; \
        everything else is optional.",
    request_body = CreateInvoiceRequest,
    responses(
        (status = 201, description = "Invoice created", body = InvoiceResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, req))]
pub async fn create_invoice(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<CreateInvoiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create(&req)?;

    let line_items = req
        .invoice
        .line_items
        .take()
        .map(|items| line_items_to_json(&items));

    let now = Utc::now();
    let id = Uuid::now_v7();
    let model = invoice::ActiveModel {
        id: Set(id),
        file_id: Set(req.file_id),
        file_name: Set(req.file_name),
        vendor_name: Set(req.vendor.name),
        vendor_address: Set(req.vendor.address),
        vendor_tax_id: Set(req.vendor.tax_id),
        invoice_number: Set(req.invoice.number),
        invoice_date: Set(req.invoice.date),
        currency: Set(req.invoice.currency),
        subtotal: Set(req.invoice.subtotal),
        tax_percent: Set(req.invoice.tax_percent),
        total: Set(req.invoice.total),
        po_number: Set(req.invoice.po_number),
        po_date: Set(req.invoice.po_date),
        line_items: Set(line_items),
        created_at: Set(now),
        updated_at: Set(Some(now)),
    };
    invoice::Entity::insert(model).exec(&state.db).await?;

    let saved = find_invoice(&state, id).await?;
    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(saved))))
}

#[utoipa::path(
    put,
    path = "/invoices/{id}",
    tag = "Invoices",
    operation_id = "updateInvoice",
    summary = "Update an invoice record",
    description = "Partial update. A provided `vendor` object replaces the stored vendor \
        wholesale; a provided `invoice` object patches only the fields it names. \
        `invoice.lineItems`, when present, replaces the stored rows.",
    params(("id" = String, Path, description = "Invoice ID (UUID)")),
    request_body = UpdateInvoiceRequest,
    responses(
        (status = 200, description = "Updated invoice", body = InvoiceResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Invoice not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, req), fields(id))]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, AppError> {
    let invoice_id = parse_invoice_id(&id)?;
    validate_update(&req)?;

    // Single write; a row deleted concurrently surfaces as a 404, not a
    // storage error.
    let active = apply_update(invoice_id, req, Utc::now());
    let saved = match invoice::Entity::update(active).exec(&state.db).await {
        Ok(model) => model,
        Err(DbErr::RecordNotUpdated) => {
            return Err(AppError::NotFound("Invoice not found".into()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(InvoiceResponse::from(saved)))
}

#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "Invoices",
    operation_id = "deleteInvoice",
    summary = "Delete an invoice record",
    params(("id" = String, Path, description = "Invoice ID (UUID)")),
    responses(
        (status = 200, description = "Invoice deleted", body = OkBody),
        (status = 400, description = "Malformed invoice ID", body = ErrorBody),
        (status = 404, description = "Invoice not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkBody>, AppError> {
    let invoice_id = parse_invoice_id(&id)?;

    // The delete's affected-row count decides the 404, so a concurrent
    // delete cannot be reported as a success.
    let result = invoice::Entity::delete_by_id(invoice_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Invoice not found".into()));
    }

    Ok(Json(OkBody { ok: true }))
}

fn parse_invoice_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation("Invalid invoice ID".into()))
}

async fn find_invoice(state: &AppState, id: Uuid) -> Result<invoice::Model, AppError> {
    invoice::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Invoice not found".into()))
}
