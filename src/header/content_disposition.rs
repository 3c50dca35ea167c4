use crate::common::Disposition;

/// Characters that various browsers choke on inside a disposition filename.
/// They are dropped, not escaped.
const STRIPPED: [char; 6] = ['"', '\'', '\\', ';', '\n', '\r'];

static HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Builds the `Content-Disposition` value for `filename`.
///
/// The result is `<kind>; filename*=UTF-8''<name>` with the name reduced to
/// its last path segment, stripped and percent-encoded, or the bare `<kind>`
/// when nothing of the name survives.
pub fn content_disposition(filename: &str, disposition: Disposition) -> String {
    let name = sanitize_filename(filename);
    if name.is_empty() {
        return disposition.as_str().to_owned();
    }

    let mut value = String::with_capacity(disposition.as_str().len() + 19 + name.len() * 3);
    value.push_str(disposition.as_str());
    value.push_str("; filename*=UTF-8''");
    percent_encode(&name, &mut value);
    value
}

/// Reduces `filename` to a name that is safe to put in a header.
pub fn sanitize_filename(filename: &str) -> String {
    // only `/` separates segments, a `\` is stripped like any other bad char
    let base = filename.rsplit('/').next().unwrap_or_default();

    base.chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect::<String>()
        .trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
        .to_owned()
}

/// RFC 3986 percent-encoding: unreserved characters pass through, every
/// other UTF-8 byte becomes `%XX`.
pub fn percent_encode(s: &str, out: &mut String) {
    for &b in s.as_bytes() {
        if is_unreserved(b) {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
}

#[inline]
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~')
}
