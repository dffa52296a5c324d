#![forbid(unsafe_code)]

use anyhow::{Result, anyhow};
use log::{info, error, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::Deserialize;
use std::{env, fs, path::Path};
use lazy_static::lazy_static;
use structopt::StructOpt;

// TwoSum Utilities
use crate::utils::errors::Errors;
use crate::utils::twosum_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_TWOSUM_ROOT_DIR  : &str = "TWOSUM_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.twosum";
const CONFIG_DIR           : &str = "/config";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";  // relative to config dir
const TWOSUM_CONFIG_FILE   : &str = "/twosum.toml"; // relative to config dir

// Networking overrides applied after the configuration file is read.
const ENV_BIND_ADDR        : &str = "TWOSUM_BIND_ADDR";
const ENV_HTTP_PORT        : &str = "TWOSUM_HTTP_PORT";

// Networking defaults.
const DEFAULT_TITLE        : &str = "TwoSum";
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_BIND_ADDR    : &str = "0.0.0.0";
const DEFAULT_HTTP_PORT    : u16  = 8000;

// Used when no log4rs.yml exists.
const DEFAULT_LOG_PATTERN  : &str = "{d(%Y-%m-%dT%H:%M:%S%.3f%Z)} {l} {t} - {m}{n}";

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref TWOSUM_ARGS: TwoSumArgs = init_twosum_args();
}

// Calculate the data directories BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref TWOSUM_DIRS: TwoSumDirs = init_twosum_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// TwoSumDirs:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct TwoSumDirs {
    pub root_dir: String,
    pub config_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// TwoSumArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "twosum_args", about = "Command line arguments for the TwoSum server.")]
pub struct TwoSumArgs {
    /// Specify the server's root data directory.
    ///
    /// The configuration directory is located under this directory.  The
    /// root directory is calculated using the following priority order:
    ///
    ///   1. If set, the value of the TWOSUM_ROOT_DIR environment,
    ///
    ///   2. Otherwise, if set, the value of the --root-dir command line argument,
    ///
    ///   3. Otherwise, ~/.twosum
    ///
    #[structopt(short, long)]
    pub root_dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
#[allow(dead_code)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub twosum_args: &'static TwoSumArgs,
    pub twosum_dirs: &'static TwoSumDirs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    /// Public base URL advertised in the OpenAPI server list.
    pub http_addr: String,
    /// Local interface the listener binds to.
    pub bind_addr: String,
    pub http_port: u16,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }

    /// The URL advertised to OpenAPI clients.
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.http_addr, self.http_port)
    }

    /// The socket address the server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_twosum_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_twosum_args() -> TwoSumArgs {
    let args = TwoSumArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// init_twosum_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories.  Nothing is created; a missing
 * configuration directory simply means all defaults are used.
 */
fn init_twosum_dirs() -> TwoSumDirs {
    let root_dir = get_root_dir();
    let config_dir = root_dir.clone() + CONFIG_DIR;
    TwoSumDirs {root_dir, config_dir}
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_TWOSUM_ROOT_DIR).unwrap_or_else(
        |_| {
            match TWOSUM_ARGS.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the configuration directory's log4rs.yml or, when
 * that file doesn't exist, with a console appender at info level.
 */
pub fn init_log() -> Result<()> {
    let logconfig = TWOSUM_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE;
    if Path::new(&logconfig).is_file() {
        if let Err(e) = log4rs::init_file(&logconfig, Default::default()) {
            return Err(anyhow!("{}\n   {}", Errors::Log4rsInitialization(logconfig), e));
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        log4rs::init_config(default_log_config()?)
            .map_err(|e| anyhow!("{}\n   {}", Errors::Log4rsInitialization("console defaults".to_string()), e))?;
        info!("Log4rs initialized with console defaults, {} not found.", logconfig);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// default_log_config:
// ---------------------------------------------------------------------------
fn default_log_config() -> Result<LogConfig> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    let config = LogConfig::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
    Ok(config)
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * configuration directory, falling back to defaults when the file can't be
 * read.  The bind address and port can then be overridden by environment
 * variables.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from its data directory.
    let config_file = TWOSUM_DIRS.config_dir.clone() + TWOSUM_CONFIG_FILE;
    info!("{}", Errors::ReadingConfigFile(config_file.clone()));

    // Read the configuration file.
    let (config_file, config) = match fs::read_to_string(&config_file) {
        Ok(contents) => {
            let config = parse_config(&contents, &config_file)?;
            (config_file, config)
        },
        Err(_) => {
            info!("Unable to read configuration at {}. Using default values.", config_file);
            (Default::default(), Config::new())
        }
    };

    // Environment overrides.
    let config = apply_overrides(config,
                                 env::var(ENV_BIND_ADDR).ok(),
                                 env::var(ENV_HTTP_PORT).ok())?;

    Ok(Parms { config_file, config })
}

// ---------------------------------------------------------------------------
// parse_config:
// ---------------------------------------------------------------------------
/** Parse the toml configuration; file_name is only used in error messages. */
pub fn parse_config(contents: &str, file_name: &str) -> Result<Config> {
    match toml::from_str(contents) {
        Ok(c)  => Ok(c),
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(file_name.to_string()), e);
            error!("{}", msg);
            Err(anyhow!(msg))
        }
    }
}

// ---------------------------------------------------------------------------
// apply_overrides:
// ---------------------------------------------------------------------------
/** Replace the bind address and port with any values taken from the
 * environment.  A port that isn't a valid u16 is an error.
 */
pub fn apply_overrides(mut config: Config, bind_addr: Option<String>, http_port: Option<String>)
    -> Result<Config>
{
    if let Some(addr) = bind_addr {
        config.bind_addr = addr;
    }
    if let Some(port) = http_port {
        config.http_port = match port.trim().parse::<u16>() {
            Ok(p) => p,
            Err(e) => {
                let msg = Errors::InvalidConfig(format!("{}={} is not a valid port: {}", ENV_HTTP_PORT, port, e));
                error!("{}", msg);
                return Err(anyhow!(msg.to_string()));
            }
        };
    }
    Ok(config)
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx {parms, twosum_args: &TWOSUM_ARGS, twosum_dirs: &TWOSUM_DIRS}
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::config::{apply_overrides, parse_config, Config};

    #[test]
    fn default_config() {
        let config = Config::new();
        assert_eq!(config.title, "TwoSum");
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
        assert_eq!(config.server_url(), "http://localhost:8000");
    }

    #[test]
    fn parse_full_config() {
        let contents = r#"
            title = "Pairs"
            http_addr = "https://pairs.example.org"
            bind_addr = "127.0.0.1"
            http_port = 9443
        "#;
        let config = parse_config(contents, "twosum.toml").unwrap();
        assert_eq!(config.title, "Pairs");
        assert_eq!(config.server_url(), "https://pairs.example.org:9443");
        assert_eq!(config.listen_addr(), "127.0.0.1:9443");
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let config = parse_config("http_port = 8080", "twosum.toml").unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.title, "TwoSum");
    }

    #[test]
    fn parse_bad_config() {
        let err = parse_config("http_port = \"eighty\"", "twosum.toml").unwrap_err();
        assert!(err.to_string().contains("Unable to parse TOML file: twosum.toml"));
    }

    #[test]
    fn env_overrides() {
        let config = apply_overrides(Config::new(), Some("127.0.0.1".to_string()), Some(" 9000 ".to_string())).unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");

        let config = apply_overrides(Config::new(), None, None).unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn env_override_bad_port() {
        let err = apply_overrides(Config::new(), None, Some("70000".to_string())).unwrap_err();
        assert!(err.to_string().contains("TWOSUM_HTTP_PORT=70000"));
    }
}
