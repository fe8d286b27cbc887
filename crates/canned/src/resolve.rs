//! Fixture resolution.
//!
//! Maps a request (path, method, `_status` override) onto a fixture file
//! under the root, using the on-disk naming convention:
//!
//! - long form:  `<urlPath>.<METHOD>.response.<STATUS>.js`
//! - short form: `<urlPath>.<METHOD>.response.js` (status 200 implied)
//!
//! The long form always wins when both exist. The short form is only a
//! legitimate fallback for the default `"200"` override; a request for any
//! other status with no matching long-form file is a miss, never a silent
//! short-form hit.

use std::path::{Path, PathBuf};

/// File extension fixtures are authored with.
pub const FIXTURE_EXT: &str = "js";

/// Default status override when `_status` is absent or empty.
pub const DEFAULT_STATUS: &str = "200";

/// Resolve a request to an existing fixture file, or `None` on a miss.
///
/// A miss is an expected outcome (the request falls through to the next
/// handler), not an error. Existence checks are read-only; a check that
/// itself fails counts as absent.
pub async fn resolve(
    root: &Path,
    request_path: &str,
    method: &str,
    status: &str,
) -> Option<PathBuf> {
    let rel = request_path.trim_start_matches('/');
    // A lookup must never escape the fixture root.
    if rel.split('/').any(|segment| segment == "..") {
        return None;
    }

    let long = root.join(format!("{rel}.{method}.response.{status}.{FIXTURE_EXT}"));
    if exists(&long).await {
        tracing::debug!(path = %long.display(), "fixture hit (long form)");
        return Some(long);
    }

    if status == DEFAULT_STATUS {
        let short = root.join(format!("{rel}.{method}.response.{FIXTURE_EXT}"));
        if exists(&short).await {
            tracing::debug!(path = %short.display(), "fixture hit (short form)");
            return Some(short);
        }
    }

    tracing::debug!(request_path, method, status, "fixture miss");
    None
}

async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
