#![forbid(unsafe_code)]

use poem_openapi::{  OpenApi, payload::Json, Object };

// From cargo.toml.
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// Set by build.rs.
const GIT_BRANCH: Option<&str> = option_env!("GIT_BRANCH");
const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT_SHORT");
const GIT_DIRTY: Option<&str> = option_env!("GIT_DIRTY");
const RUSTC_VERSION: Option<&str> = option_env!("RUSTC_VERSION");

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct VersionApi;

#[derive(Object, Debug)]
pub struct RespVersion
{
    result_code: String,
    result_msg: String,
    server_version: String,
    git_branch: String,
    git_commit: String,
    git_dirty: String,
    rustc_version: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl VersionApi {
    #[oai(path = "/version", method = "get")]
    async fn get_version(&self) -> Json<RespVersion> {
        Json(RespVersion::process())
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespVersion {
    fn new(server: &str, branch: &str, commit: &str, dirty: &str, rustc: &str) -> Self {
        Self {result_code: "0".to_string(),
              result_msg: "success".to_string(),
              server_version: server.to_string(),
              git_branch: branch.to_string(),
              git_commit: commit.to_string(),
              git_dirty:  dirty.to_string(),
              rustc_version: rustc.to_string(),
        }
    }

    pub fn process() -> RespVersion {
        Self::new(SERVER_VERSION,
                  GIT_BRANCH.unwrap_or("unknown"),
                  GIT_COMMIT.unwrap_or("unknown"),
                  GIT_DIRTY.unwrap_or("unknown"),
                  RUSTC_VERSION.unwrap_or("unknown"))
    }

    /// One line summary used in the startup log.
    pub fn summary(&self) -> String {
        format!("VERSION={}, BRANCH={}, COMMIT={}, DIRTY={}, RUSTC={}",
                self.server_version, self.git_branch, self.git_commit,
                self.git_dirty, self.rustc_version)
    }
}
