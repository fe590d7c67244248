//! Static page routes
//!
//! Pages are served as-is from the templates directory. Any other path falls
//! through to the same directory so pages can load their assets.

use std::path::Path;

use axum::{Router, routing::get_service};
use tower_http::services::{ServeDir, ServeFile};

/// Page served for `/`
pub const HOME_PAGE: &str = "homepage.html";

/// Named pages, each served at `/<file>`
pub const PAGES: &[&str] = &[
    HOME_PAGE,
    "astronomy.html",
    "blogpage.html",
    "community.html",
    "missions.html",
    "pricing.html",
    "resources.html",
    "login.html",
];

/// Page routes plus the asset fallback
pub fn page_routes<S>(templates_dir: impl AsRef<Path>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let dir = templates_dir.as_ref();

    let mut router = Router::new().route("/", get_service(ServeFile::new(dir.join(HOME_PAGE))));
    for page in PAGES {
        router = router.route(
            &format!("/{}", page),
            get_service(ServeFile::new(dir.join(page))),
        );
    }

    router.fallback_service(ServeDir::new(dir))
}
