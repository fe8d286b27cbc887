//! The mock middleware: a tower [`Layer`]/[`Service`] pair.
//!
//! [`CannedLayer::new`] builds the catalog once, synchronously, and fails
//! fast on a broken fixture tree. The wrapped [`Canned`] service then
//! answers each request from the fixture tree, or passes it through to the
//! inner service (the `next()` leg of the classic middleware contract)
//! when nothing matches.

use std::convert::Infallible;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use anyhow::Context as _;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tower::{Layer, Service};

use crate::catalog::{self, CATALOG_DIR, CATALOG_PAGE};
use crate::error::CannedError;
use crate::resolve::{DEFAULT_STATUS, resolve};
use crate::strip::strip_comments;

/// Reserved for future options. Presence or absence must not change
/// behavior while it stays empty.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct CannedOptions {}

/// Layer that mounts the mock middleware over an inner service.
#[derive(Clone, Debug)]
pub struct CannedLayer {
    root: Arc<PathBuf>,
}

impl CannedLayer {
    /// Create the layer over a fixture root and build its catalog.
    ///
    /// The catalog build runs here, before any request is accepted; a
    /// malformed fixture or unwritable `mock-api/` directory surfaces as an
    /// error to the constructing caller.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CannedError> {
        Self::with_options(root, CannedOptions::default())
    }

    /// Same as [`CannedLayer::new`] with explicit (currently empty) options.
    pub fn with_options(
        root: impl Into<PathBuf>,
        _options: CannedOptions,
    ) -> Result<Self, CannedError> {
        let root = root.into();
        catalog::build(&root)?;
        Ok(Self {
            root: Arc::new(root),
        })
    }
}

impl<S> Layer<S> for CannedLayer {
    type Service = Canned<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Canned {
            inner,
            root: Arc::clone(&self.root),
        }
    }
}

/// Per-request service produced by [`CannedLayer`].
#[derive(Clone)]
pub struct Canned<S> {
    inner: S,
    root: Arc<PathBuf>,
}

impl<S> Service<Request> for Canned<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Take the service that was polled ready and leave the clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let root = Arc::clone(&self.root);

        Box::pin(async move {
            let path = req.uri().path().to_owned();
            if is_catalog_page(&path) {
                return Ok(catalog_page(&root).await);
            }

            let status = status_override(req.uri().query());
            match resolve(&root, &path, req.method().as_str(), &status).await {
                Some(fixture) => Ok(serve_fixture(&fixture, &status).await),
                None => inner.call(req).await,
            }
        })
    }
}

/// The catalog-page heuristic, preserved exactly: a literal substring test
/// on the path, not a route match. `mock-api/all...` deliberately fails it
/// and goes through the ordinary fixture lookup instead.
fn is_catalog_page(path: &str) -> bool {
    path.contains("mock-api") && !path.contains("all")
}

#[derive(Deserialize)]
struct StatusQuery {
    #[serde(rename = "_status")]
    status: Option<String>,
}

/// Extract the `_status` override from a raw query string; absent, empty,
/// or unparseable queries fall back to `"200"`.
fn status_override(query: Option<&str>) -> String {
    serde_qs::from_str::<StatusQuery>(query.unwrap_or(""))
        .ok()
        .and_then(|q| q.status)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_owned())
}

async fn catalog_page(root: &Path) -> Response {
    match read_catalog_page(root).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn read_catalog_page(root: &Path) -> Result<Response, CannedError> {
    let path = root.join(CATALOG_DIR).join(CATALOG_PAGE);
    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("read catalog page {}", path.display()))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

async fn serve_fixture(path: &Path, status: &str) -> Response {
    match read_fixture(path, status).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

/// Read, strip, and parse a resolved fixture, shaping the final response.
///
/// The resolver only checked existence; a file that vanished since, or that
/// holds invalid JSON, is reported here as a request-local error so authors
/// notice broken fixtures instead of receiving a silent default body.
async fn read_fixture(path: &Path, status: &str) -> Result<Response, CannedError> {
    let code = StatusCode::from_bytes(status.as_bytes())
        .map_err(|_| CannedError::InvalidStatus(status.to_owned()))?;

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read fixture {}", path.display()))?;
    let stripped = strip_comments(&raw);
    let value: serde_json::Value =
        serde_json::from_str(&stripped).map_err(|source| CannedError::MalformedFixture {
            path: path.to_path_buf(),
            source,
        })?;

    let body = serde_json::to_string(&value).context("serialize fixture body")?;
    Ok((
        code,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        Body::from(body),
    )
        .into_response())
}
