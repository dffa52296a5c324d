#![forbid(unsafe_code)]

use lazy_static::lazy_static;
use log::info;
use poem::{listener::TcpListener, Route};
use poem_openapi::OpenApiService;

// TwoSum Utilities
use crate::v1::twosum::describe::DescribeApi;
use crate::v1::twosum::health::HealthApi;
use crate::v1::twosum::solve::SolveApi;
use crate::v1::twosum::version::{RespVersion, VersionApi};
use crate::utils::config::{init_log, init_runtime_context, Config, RuntimeCtx};
use crate::utils::errors::Errors;

// Modules
mod pair_sum;
mod utils;
mod v1;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "TwoSumServer"; // for poem logging
const API_VERSION : &str = env!("CARGO_PKG_VERSION");

// Documentation mount points.
const SWAGGER_PATH   : &str = "/swagger";
const REDOC_PATH     : &str = "/redoc";
const SPEC_PATH      : &str = "/spec";
const SPEC_YAML_PATH : &str = "/spec_yaml";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the parameters variable so that is has a 'static lifetime.
// We exit if we can't read our parameters.
lazy_static! {
    static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting twosum_server!");

    // Initialize the server.
    twosum_init();

    // --------------- Main Loop Set Up ---------------
    let config = &RUNTIME_CTX.parms.config;
    let app = make_app(config);
    print_banner(config);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(config.listen_addr()))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Public Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// make_app:
// ---------------------------------------------------------------------------
/** Assemble the API endpoints and their documentation into the single route
 * tree served for the life of the process.
 */
pub fn make_app(config: &Config) -> Route {
    // Create a tuple with all the endpoint structs listed in ROUTES.
    let endpoints = (DescribeApi, HealthApi, SolveApi, VersionApi);
    let api_service =
        OpenApiService::new(endpoints, config.title.clone(), API_VERSION).server(config.server_url());

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let swagger = api_service.swagger_ui();
    let redoc = api_service.redoc();

    Route::new()
        .nest(SWAGGER_PATH, swagger)
        .nest(REDOC_PATH, redoc)
        .at(SPEC_PATH, spec)
        .at(SPEC_YAML_PATH, spec_yaml)
        .nest("/", api_service)
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// twosum_init:
// ---------------------------------------------------------------------------
/** Initialize logging and force the reading of the configuration.  Either
 * failing aborts the server.
 */
fn twosum_init() {
    // Configure our log.
    if let Err(e) = init_log() {
        panic!("{}", e);
    }

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    info!("\n*** Running {}", RespVersion::process().summary());
}

// ---------------------------------------------------------------------------
// print_banner:
// ---------------------------------------------------------------------------
fn print_banner(config: &Config) {
    let base = config.server_url();
    info!("{}", "=".repeat(60));
    info!("TwoSum API server listening on {}", config.listen_addr());
    info!("Swagger UI:  {}{}", base, SWAGGER_PATH);
    info!("ReDoc:       {}{}", base, REDOC_PATH);
    info!("Health:      {}/health", base);
    info!("{}", "=".repeat(60));
}
