//! Catalog generation.
//!
//! Runs once at middleware construction: walks the fixture root, parses
//! every fixture, and publishes two derived artifacts under `mock-api/`:
//! the browsable `index.html` page and the aggregate
//! `all.GET.response.200.js` fixture. Both are disposable — the individual
//! fixture files stay authoritative and the catalog is fully rebuilt on
//! every construction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CannedError;
use crate::resolve::FIXTURE_EXT;
use crate::strip::strip_comments;

/// Reserved subdirectory for generated catalog artifacts.
pub const CATALOG_DIR: &str = "mock-api";

/// File name of the browsable catalog page.
pub const CATALOG_PAGE: &str = "index.html";

/// File name of the aggregate catalog fixture.
pub const CATALOG_FIXTURE: &str = "all.GET.response.200.js";

const PAGE_ASSET: &str = include_str!("../assets/index.html");

/// One catalog record: the fixture file's root-relative URL and its parsed
/// content (`null` for an empty file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub url: String,
    pub res: Value,
}

/// Build the catalog under `root/mock-api/`, overwriting prior artifacts.
///
/// Fails fatally on the first malformed fixture — a corrupt file must
/// surface at construction rather than silently vanish from the catalog.
pub fn build(root: &Path) -> Result<(), CannedError> {
    let catalog_dir = root.join(CATALOG_DIR);
    fs::create_dir_all(&catalog_dir).map_err(CannedError::Template)?;
    fs::write(catalog_dir.join(CATALOG_PAGE), PAGE_ASSET).map_err(CannedError::Template)?;

    let entries = scan(root)?;
    let json = serde_json::to_vec_pretty(&entries).context("serialize catalog entries")?;
    fs::write(catalog_dir.join(CATALOG_FIXTURE), json)
        .with_context(|| format!("write catalog fixture under {}", catalog_dir.display()))?;

    tracing::info!(root = %root.display(), fixtures = entries.len(), "mock catalog built");
    Ok(())
}

/// Walk `root` and parse every fixture outside `mock-api/` into a
/// [`CatalogEntry`], in deterministic depth-first, path-sorted order.
pub fn scan(root: &Path) -> Result<Vec<CatalogEntry>, CannedError> {
    let skip = root.join(CATALOG_DIR);
    let mut files = Vec::new();
    collect(root, &skip, &mut files)?;

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read fixture {}", path.display()))?;
        let stripped = strip_comments(&raw);
        let res = if stripped.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&stripped)
                .map_err(|source| CannedError::MalformedFixture {
                    path: path.clone(),
                    source,
                })?
        };
        entries.push(CatalogEntry {
            url: relative_url(root, &path),
            res,
        });
    }
    Ok(entries)
}

fn collect(dir: &Path, skip: &Path, out: &mut Vec<PathBuf>) -> Result<(), CannedError> {
    let mut children = Vec::new();
    let read = fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))?;
    for entry in read {
        let entry = entry.with_context(|| format!("read directory {}", dir.display()))?;
        children.push(entry.path());
    }
    children.sort();

    for child in children {
        if child == skip {
            continue;
        }
        if child.is_dir() {
            collect(&child, skip, out)?;
        } else if child.extension().is_some_and(|ext| ext == FIXTURE_EXT) {
            out.push(child);
        }
    }
    Ok(())
}

/// Root-relative path of `path` with a leading `/` and `/` separators.
fn relative_url(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut url = String::new();
    for component in rel.components() {
        url.push('/');
        url.push_str(&component.as_os_str().to_string_lossy());
    }
    url
}
