//! Final path segment extraction.

/// Returns the substring of `url` after its last `/`.
///
/// No URL parsing happens here: query strings and fragments stay part of the
/// segment, and a string without any `/` is returned whole.
pub fn final_path_segment(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}
