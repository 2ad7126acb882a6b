//! Shared query/form parsing for route handlers.

/// Parse a URL-encoded `key=value&key2=value2` string into decoded pairs.
pub fn parse_form_body(body: &str) -> Vec<(String, String)> {
    if body.is_empty() {
        return Vec::new();
    }
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next()?;
            let val = parts.next().unwrap_or("");
            Some((percent_decode(key), percent_decode(val)))
        })
        .collect()
}

/// Percent-decode a URL-encoded value. `+` is a space; malformed escapes
/// are kept literally; decoded bytes are read as UTF-8 so unit names like
/// "Líf" survive.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                match hex_pair(bytes.get(i + 1).copied(), bytes.get(i + 2).copied()) {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: Option<u8>, lo: Option<u8>) -> Option<u8> {
    let hi = (hi? as char).to_digit(16)?;
    let lo = (lo? as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Parse a query string (leading `?` optional).
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    parse_form_body(q)
}

/// First value for `key`.
pub fn get_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Error fragment shown in place of a panel.
pub fn error_span(message: &str) -> String {
    format!(
        r#"<span class="error">{}</span>"#,
        crate::render::escape_html(message)
    )
}
