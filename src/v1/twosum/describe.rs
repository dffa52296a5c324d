#![forbid(unsafe_code)]

use poem_openapi::{ OpenApi, payload::Json, Object };

use crate::v1::twosum::ROUTES;
use crate::v1::twosum::solve::{solve_query, RespTwoSum, TwoSumQuery};

const DESCRIPTION: &str = "Two Sum API - Solve DSA problems via REST";

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct DescribeApi;

#[derive(Object, Debug)]
pub struct RespDescription
{
    message: String,
    endpoints: Vec<EndpointInfo>,
    example: ExampleExchange,
}

#[derive(Object, Debug)]
pub struct EndpointInfo
{
    method: String,
    path: String,
    summary: String,
}

#[derive(Object, Debug)]
pub struct ExampleExchange
{
    request: TwoSumQuery,
    response: Option<RespTwoSum>,
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl DescribeApi {
    /// Describe the available operations with an example exchange.
    #[oai(path = "/", method = "get")]
    async fn describe(&self) -> Json<RespDescription> {
        Json(RespDescription::process())
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespDescription {
    pub fn process() -> Self {
        let endpoints = ROUTES.iter()
            .map(|r| EndpointInfo {
                method: r.method.to_string(),
                path: r.path.to_string(),
                summary: r.summary.to_string(),
            })
            .collect();

        // The example response is computed, not hard coded.
        let request = TwoSumQuery {nums: vec![2, 7, 11, 15], target: 9};
        let response = solve_query(&request).ok();

        Self {
            message: DESCRIPTION.to_string(),
            endpoints,
            example: ExampleExchange {request, response},
        }
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::RespDescription;
    use crate::v1::twosum::ROUTES;

    #[test]
    fn description_lists_every_route() {
        let desc = RespDescription::process();
        assert_eq!(desc.endpoints.len(), ROUTES.len());
        assert!(desc.endpoints.iter().any(|e| e.method == "POST" && e.path == "/twosum"));
    }

    #[test]
    fn example_response_is_solved() {
        let desc = RespDescription::process();
        let resp = desc.example.response.expect("example should solve");
        assert_eq!(resp.indices, Some(vec![0, 1]));
        assert_eq!(resp.values, Some(vec![2, 7]));
        assert!(resp.found);
    }
}
