//! URL modeling and filename derivation.
//!
//! The saved filename is the final `/`-delimited segment of the URL, taken
//! verbatim. Sanitization for Linux filesystems is opt-in.

mod path;
mod sanitize;

pub use path::final_path_segment;
pub use sanitize::sanitize_filename_for_linux;

/// Derives the local filename for a URL.
///
/// Takes the substring after the last `/` and, when `sanitize` is set, cleans it
/// up for Linux. Returns `None` if nothing usable remains (empty, `.` or `..`),
/// e.g. for `https://example.com/forms/`.
///
/// Two URLs with the same final segment map to the same filename; the later
/// download overwrites the earlier one.
///
/// # Examples
///
/// - `derive_filename("https://example.com/a/RICH3108form.pdf", false)` → `Some("RICH3108form.pdf")`
/// - `derive_filename("https://example.com/dir/", false)` → `None`
pub fn derive_filename(url: &str, sanitize: bool) -> Option<String> {
    let segment = final_path_segment(url);
    let name = if sanitize {
        sanitize_filename_for_linux(segment)
    } else {
        segment.to_string()
    };

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}
