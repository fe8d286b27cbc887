use std::fs;
use std::path::Path;

use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use canned::CannedLayer;

/// Fresh empty fixture root.
pub fn fixture_root() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a fixture file at `rel` under `root`, creating parent directories.
pub fn write_fixture(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Mount the middleware over a bare router (default 404 fallback is the
/// pass-through target) and wrap it in a test server.
pub fn test_server(root: &Path) -> TestServer {
    let layer = CannedLayer::new(root).unwrap();
    let app = Router::new().layer(layer);
    TestServer::new(app).unwrap()
}
