/// Find the first balanced JSON object in `text` and return it as a slice.
///
/// Model replies frequently wrap the payload in prose or markdown fences, so
/// a plain `serde_json::from_str` on the whole reply fails. This scanner
/// tracks string and escape state, so braces inside string values do not
/// confuse the depth count.
pub fn first_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|&b| b == b'{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
