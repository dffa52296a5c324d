pub mod describe;
pub mod health;
pub mod solve;
pub mod version;

// ***************************************************************************
//                               Routing Table
// ***************************************************************************
// ---------------------------------------------------------------------------
// RouteEntry:
// ---------------------------------------------------------------------------
/// One (method, path) pair served by the API.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub method: &'static str,
    pub path: &'static str,
    pub summary: &'static str,
}

/** Every operation the API exposes.  The handlers themselves are bound by
 * the #[oai] attribute of the endpoint named in each comment, since that is
 * what puts them in the generated OpenAPI document.  make_app() assembles
 * them once at startup, the description endpoint renders this table, and
 * the tests in main.rs keep the table and the served operations identical
 * in both directions.
 */
pub const ROUTES: &[RouteEntry] = &[
    // describe::DescribeApi
    RouteEntry {method: "GET", path: "/", summary: "Describe the service"},
    // health::HealthApi
    RouteEntry {method: "GET", path: "/health", summary: "Health check"},
    // solve::SolveApi
    RouteEntry {method: "POST", path: "/twosum", summary: "Solve Two Sum problem"},
    // version::VersionApi
    RouteEntry {method: "GET", path: "/version", summary: "Server build information"},
];
