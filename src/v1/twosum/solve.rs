#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{ OpenApi, payload::Json, Object, ApiResponse };
use poem_openapi::registry::{MetaSchemaRef, Registry};
use poem_openapi::types::{ParseFromJSON, ParseResult, Type};
use serde_json::{Map, Value};
use std::borrow::Cow;
use log::{error, info};

use crate::pair_sum::{resolve, PairSum};
use crate::utils::errors::{Errors, HttpResult};
use crate::utils::twosum_utils::{self, RequestDebug};

// Reported with every response.
pub const ALGORITHM: &str = "Hash Map O(n)";

// Fewer values than this can't form a pair.
const MIN_NUMS: usize = 2;

// ***************************************************************************
//                          Request/Response Definiions
// ***************************************************************************
pub struct SolveApi;

// ---------------------------------------------------------------------------
// TwoSumQuery:
// ---------------------------------------------------------------------------
/// A validated request: the numbers to search and the sum to find.
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct TwoSumQuery
{
    /// Array of integers.
    pub nums: Vec<i64>,
    /// Target sum.
    pub target: i64,
}

// ---------------------------------------------------------------------------
// RespTwoSum:
// ---------------------------------------------------------------------------
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct RespTwoSum
{
    /// Indices of the two numbers, null when no pair exists.
    pub indices: Option<Vec<u64>>,
    /// Values at those indices, null when no pair exists.
    pub values: Option<Vec<i64>>,
    /// Whether a solution was found.
    pub found: bool,
    /// Result message.
    pub message: String,
    /// Algorithm used.
    pub algorithm: String,
}

// Raw request body wrapper for debug logging; malformed bodies get logged too.
struct RawBody<'a>(&'a Value);

// Implement the debug record trait for logging.
impl RequestDebug for RawBody<'_> {
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(255);
        s.push_str("  Request body:\n    ");
        s.push_str(&self.0.to_string());
        s
    }
}

// ---------------------------------------------------------------------------
// TwoSumBody:
// ---------------------------------------------------------------------------
/// The POST body as received.  It is documented with the TwoSumQuery schema
/// but deserialization is left to parse_query so that nothing is coerced.
#[derive(Debug)]
pub struct TwoSumBody(pub Value);

impl Type for TwoSumBody {
    const IS_REQUIRED: bool = true;

    type RawValueType = Self;

    type RawElementValueType = Self;

    fn name() -> Cow<'static, str> {
        <TwoSumQuery as Type>::name()
    }

    fn schema_ref() -> MetaSchemaRef {
        <TwoSumQuery as Type>::schema_ref()
    }

    fn register(registry: &mut Registry) {
        <TwoSumQuery as Type>::register(registry);
    }

    fn as_raw_value(&self) -> Option<&Self::RawValueType> {
        Some(self)
    }

    fn raw_element_iter<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self::RawElementValueType> + 'a> {
        Box::new(self.as_raw_value().into_iter())
    }
}

impl ParseFromJSON for TwoSumBody {
    fn parse_from_json(value: Option<Value>) -> ParseResult<Self> {
        Ok(Self(value.unwrap_or_default()))
    }
}

// ------------------- HTTP Status Codes -------------------
#[derive(Debug, ApiResponse)]
#[oai(bad_request_handler = "bad_request_handler")]
enum TwoSumResponse {
    #[oai(status = 200)]
    Http200(Json<RespTwoSum>),
    #[oai(status = 400)]
    Http400(Json<HttpResult>),
}

fn make_http_200(resp: RespTwoSum) -> TwoSumResponse {
    TwoSumResponse::Http200(Json(resp))
}
fn make_http_400(msg: String) -> TwoSumResponse {
    TwoSumResponse::Http400(Json(HttpResult::new(400.to_string(), msg)))
}

// Bodies that aren't JSON at all never reach the handler.
fn bad_request_handler(err: poem::Error) -> TwoSumResponse {
    let msg = Errors::MalformedInput(err.to_string()).to_string();
    error!("{}", msg);
    make_http_400(msg)
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl SolveApi {
    /// Solve the Two Sum problem.
    ///
    /// Given an array of integers and a target, find two numbers that add up
    /// to the target using a single pass over the array with a hash map
    /// (O(n) time, O(n) space).  The pair with the smallest second index is
    /// returned.
    #[oai(path = "/twosum", method = "post")]
    async fn solve_two_sum(&self, http_req: &Request, req: Json<TwoSumBody>) -> TwoSumResponse {
        match handle_request(http_req, &req.0.0) {
            Ok(r) => make_http_200(r),
            Err(e) => {
                let msg = e.to_string();
                error!("{}", msg);
                make_http_400(msg)
            }
        }
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespTwoSum {
    /// Translate a resolver outcome into the response body.
    pub fn from_pair_sum(result: PairSum, target: i64) -> Self {
        match result {
            PairSum::Found {first, second, first_value, second_value} => Self {
                indices: Some(vec![first as u64, second as u64]),
                values: Some(vec![first_value, second_value]),
                found: true,
                message: format!("Found: nums[{}] + nums[{}] = {} + {} = {}",
                                 first, second, first_value, second_value, target),
                algorithm: ALGORITHM.to_string(),
            },
            PairSum::NotFound => Self {
                indices: None,
                values: None,
                found: false,
                message: format!("No solution found for target {}", target),
                algorithm: ALGORITHM.to_string(),
            },
        }
    }
}

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// handle:
// ---------------------------------------------------------------------------
/** Parse, validate and solve a raw request body. */
pub fn handle(raw: &Value) -> Result<RespTwoSum, Errors> {
    let query = parse_query(raw)?;
    solve_query(&query)
}

// ---------------------------------------------------------------------------
// solve_query:
// ---------------------------------------------------------------------------
/** Reject queries too short to contain a pair, otherwise run the resolver. */
pub fn solve_query(query: &TwoSumQuery) -> Result<RespTwoSum, Errors> {
    if query.nums.len() < MIN_NUMS {
        return Err(Errors::InsufficientInput(query.nums.len()));
    }

    let result = resolve(&query.nums, query.target);
    Ok(RespTwoSum::from_pair_sum(result, query.target))
}

// ---------------------------------------------------------------------------
// parse_query:
// ---------------------------------------------------------------------------
/** Check every required field of the request body and its type.  Values are
 * never coerced: floats, strings, booleans and nulls are all rejected, as
 * are integers outside the i64 range.  Unknown fields are ignored.
 */
pub fn parse_query(raw: &Value) -> Result<TwoSumQuery, Errors> {
    let obj = match raw.as_object() {
        Some(o) => o,
        None => return Err(malformed(format!("request body must be a JSON object, found {}", type_name(raw)))),
    };

    let nums = match required(obj, "nums")? {
        Value::Array(elems) => {
            let mut nums = Vec::with_capacity(elems.len());
            for (i, elem) in elems.iter().enumerate() {
                match elem.as_i64() {
                    Some(n) => nums.push(n),
                    None => return Err(malformed(format!(
                        "field 'nums[{}]' must be a 64-bit integer, found {}", i, type_name(elem)))),
                }
            }
            nums
        },
        other => return Err(malformed(format!(
            "field 'nums' must be an array of integers, found {}", type_name(other)))),
    };

    let target_value = required(obj, "target")?;
    let target = match target_value.as_i64() {
        Some(t) => t,
        None => return Err(malformed(format!(
            "field 'target' must be a 64-bit integer, found {}", type_name(target_value)))),
    };

    Ok(TwoSumQuery {nums, target})
}

// ***************************************************************************
//                          Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// handle_request:
// ---------------------------------------------------------------------------
fn handle_request(http_req: &Request, raw: &Value) -> Result<RespTwoSum, Errors> {
    // Conditional logging depending on log level.
    twosum_utils::debug_request(http_req, &RawBody(raw));

    let resp = handle(raw)?;
    info!("Solved pair-sum: {}.", resp.message);
    Ok(resp)
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, Errors> {
    obj.get(field).ok_or_else(|| malformed(format!("missing required field '{}'", field)))
}

fn malformed(msg: String) -> Errors {
    Errors::MalformedInput(msg)
}

// Describe a JSON value in error messages.
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a floating point number",
        Value::Number(_) => "an integer out of range",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{handle, parse_query, RespTwoSum, TwoSumQuery, ALGORITHM};
    use crate::utils::errors::Errors;

    fn malformed_msg(raw: serde_json::Value) -> String {
        match parse_query(&raw) {
            Err(Errors::MalformedInput(msg)) => msg,
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn parse_valid_query() {
        let q = parse_query(&json!({"nums": [2, 7, 11, 15], "target": 9, "extra": "ignored"})).unwrap();
        assert_eq!(q, TwoSumQuery {nums: vec![2, 7, 11, 15], target: 9});
    }

    #[test]
    fn parse_rejects_non_object() {
        assert!(malformed_msg(json!([1, 2])).contains("must be a JSON object"));
        assert!(malformed_msg(json!(null)).contains("found null"));
    }

    #[test]
    fn parse_rejects_missing_fields() {
        assert_eq!(malformed_msg(json!({"target": 9})), "missing required field 'nums'");
        assert_eq!(malformed_msg(json!({"nums": [1, 2]})), "missing required field 'target'");
    }

    #[test]
    fn parse_rejects_wrong_types() {
        assert!(malformed_msg(json!({"nums": "1,2", "target": 3})).contains("'nums' must be an array"));
        assert!(malformed_msg(json!({"nums": [1, 2.5], "target": 3})).contains("'nums[1]'"));
        assert!(malformed_msg(json!({"nums": [1, "2"], "target": 3})).contains("found a string"));
        assert!(malformed_msg(json!({"nums": [1, 2], "target": "3"})).contains("'target'"));
        assert!(malformed_msg(json!({"nums": [1, 2], "target": 3.0})).contains("floating point"));
        assert!(malformed_msg(json!({"nums": [1, 2], "target": null})).contains("found null"));
        assert!(malformed_msg(json!({"nums": [true, 2], "target": 3})).contains("a boolean"));
    }

    #[test]
    fn parse_rejects_out_of_range_integers() {
        let msg = malformed_msg(json!({"nums": [u64::MAX, 1], "target": 3}));
        assert!(msg.contains("'nums[0]'"));
        assert!(msg.contains("out of range"));
    }

    #[test]
    fn handle_found() {
        let resp = handle(&json!({"nums": [3, 2, 4], "target": 6})).unwrap();
        assert_eq!(resp, RespTwoSum {
            indices: Some(vec![1, 2]),
            values: Some(vec![2, 4]),
            found: true,
            message: "Found: nums[1] + nums[2] = 2 + 4 = 6".to_string(),
            algorithm: ALGORITHM.to_string(),
        });
    }

    #[test]
    fn handle_not_found() {
        let resp = handle(&json!({"nums": [1, 2, 3], "target": 100})).unwrap();
        assert_eq!(resp.indices, None);
        assert_eq!(resp.values, None);
        assert!(!resp.found);
        assert_eq!(resp.message, "No solution found for target 100");
        assert_eq!(resp.algorithm, "Hash Map O(n)");
    }

    #[test]
    fn handle_insufficient_input() {
        assert!(matches!(handle(&json!({"nums": [5], "target": 5})), Err(Errors::InsufficientInput(1))));
        assert!(matches!(handle(&json!({"nums": [], "target": 0})), Err(Errors::InsufficientInput(0))));
    }

    #[test]
    fn malformed_wins_over_insufficient() {
        assert!(matches!(handle(&json!({"nums": [5]})), Err(Errors::MalformedInput(_))));
    }
}
