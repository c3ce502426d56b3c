/// Instruction sent alongside the document. Declares the target JSON shape
/// and asks for bare JSON; unreadable optional fields are omitted, not null.
pub const EXTRACTION_PROMPT: &str = r#"You are an expert at parsing invoices from PDFs. Extract JSON exactly in this TypeScript-like shape without extra commentary:
{
  "vendor": { "name": "string", "address": "string?", "taxId": "string?" },
  "invoice": {
    "number": "string",
    "date": "string",
    "currency": "string?",
    "subtotal": "number?",
    "taxPercent": "number?",
    "total": "number?",
    "poNumber": "string?",
    "poDate": "string?",
    "lineItems": "Array<{ description: string, unitPrice: number, quantity: number, total: number }>"
  }
}
Rules:
- Only output minified JSON.
- Dates as ISO-8601 (YYYY-MM-DD if day known, else YYYY-MM).
- Numbers as numbers, not strings.
- If unknown, omit optional fields."#;
