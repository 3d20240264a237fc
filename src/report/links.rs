//! README cross-link heuristic.
//!
//! A README that talks about a mirror or meta-project is expected to link
//! back to the canonical entry points. The check is advisory only.

use std::path::Path;

use tracing::debug;

use crate::ports::filesystem::FileSystem;

/// Returns `true` if the text mentions `meta-project` or `mirror`, ignoring
/// case.
#[must_use]
pub fn mentions_mirror(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("meta-project") || lower.contains("mirror")
}

/// Returns the entries of `links` that do not occur literally in `text`,
/// preserving order.
#[must_use]
pub fn missing_cross_links(text: &str, links: &[String]) -> Vec<String> {
    links.iter().filter(|link| !text.contains(link.as_str())).cloned().collect()
}

/// Checks `<root>/README.md`. Returns the missing links, or an empty list when
/// the README is absent, unreadable, or not mirror-flavoured.
pub fn check_readme(fs: &dyn FileSystem, root: &Path, links: &[String]) -> Vec<String> {
    let path = root.join("README.md");
    if !fs.is_file(&path) {
        return Vec::new();
    }
    let text = match fs.read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "README unreadable; skipping link check");
            return Vec::new();
        }
    };
    if !mentions_mirror(&text) {
        return Vec::new();
    }
    missing_cross_links(&text, links)
}

/// Formats the advisory warning for a non-empty list of missing links.
#[must_use]
pub fn format_missing_links(missing: &[String]) -> String {
    format!(
        "README.md mentions a mirror/meta-project but is missing links to: {}",
        missing.join(", ")
    )
}
