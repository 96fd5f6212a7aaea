//! Parse collected response header lines.

/// Returns the `Content-Type` of the last response in `lines`.
///
/// With redirects followed, curl hands over the header block of every hop;
/// each block starts with a status line, so a new `HTTP/` line resets the value.
pub(crate) fn final_content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }

    content_type
}
