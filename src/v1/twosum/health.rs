#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json, Object };

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct HealthApi;

#[derive(Object, Debug)]
struct RespHealth
{
    status: String,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HealthApi {
    /// Health check.  HEAD requests are answered by this route with no body.
    #[oai(path = "/health", method = "get")]
    async fn get_health(&self) -> Json<RespHealth> {
        Json(RespHealth::new())
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespHealth {
    fn new() -> Self {
        Self {status: "healthy".to_string()}
    }
}
