//! Development middleware that serves canned JSON responses from a
//! directory of fixture files.
//!
//! A fixture file's name encodes the request it answers:
//! `users.GET.response.200.js` serves `GET /users`, and the short form
//! `users.GET.response.js` implies status 200. A `_status` query parameter
//! selects a different status variant at request time. Construction scans
//! the fixture tree and publishes a browsable catalog under `mock-api/`.
//!
//! ```no_run
//! use axum::Router;
//! use canned::CannedLayer;
//!
//! let layer = CannedLayer::new("/srv/mocks").expect("fixture tree should build");
//! let app: Router = Router::new().layer(layer);
//! ```
//!
//! Requests no fixture matches pass through to the wrapped service.

pub mod catalog;
pub mod error;
pub mod middleware;
pub mod resolve;
pub mod strip;

pub use catalog::CatalogEntry;
pub use error::CannedError;
pub use middleware::{Canned, CannedLayer, CannedOptions};
