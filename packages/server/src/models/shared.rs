use serde::Serialize;

/// Body of the plain `{"ok": true}` responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OkBody {
    #[schema(example = true)]
    pub ok: bool,
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
