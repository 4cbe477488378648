//! Server option parsing and resolution.
//!
//! Values are resolved with a fixed precedence: command-line argument, then
//! environment variable, then config default. The result is an
//! [`IndifferentMap`] so callers can read `"Port"` or `:Port` alike.

use anyhow::{Context, Result};
use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use indifferent::{IndifferentMap, Map, Symbol, Value, WithIndifferentAccess, sym};
use tracing::debug;

use crate::config::LauncherConfig;
use crate::env::{APP_ENV, EnvVars, HOST, PORT, RACK_ENV};

const DEVELOPMENT: &str = "development";
const LOCAL_HOST: &str = "localhost";
const ANY_HOST: &str = "0.0.0.0";

/// Spellings of the options that consume the following argument.
const VALUE_OPTIONS: [&str; 10] = [
    "-p",
    "--port",
    "-b",
    "--binding",
    "-c",
    "--config",
    "-e",
    "--environment",
    "-P",
    "--pid",
];

/// Option ids in declaration order, paired with the key they populate.
const OPTION_KEYS: [(&str, &str); 8] = [
    ("port", "Port"),
    ("binding", "Host"),
    ("config", "config"),
    ("daemon", "daemonize"),
    ("environment", "environment"),
    ("pid", "pid"),
    ("dev_caching", "caching"),
    ("no_dev_caching", "caching"),
];

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "launcher",
    version,
    about = "Resolve server launch options from arguments, environment, and config"
)]
pub struct ServerArgs {
    /// Server handler to boot (e.g. `thin`, `puma`).
    pub server: Option<String>,

    /// Port to listen on.
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Address to bind.
    #[arg(short = 'b', long = "binding", value_name = "HOST")]
    pub binding: Option<String>,

    /// Rackup file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Run as a daemon.
    #[arg(short = 'd', long = "daemon")]
    pub daemon: bool,

    /// Application environment.
    #[arg(short = 'e', long, value_name = "NAME")]
    pub environment: Option<String>,

    /// Pid file.
    #[arg(short = 'P', long, value_name = "FILE")]
    pub pid: Option<String>,

    /// Enable development caching.
    #[arg(short = 'C', long = "dev-caching", overrides_with = "no_dev_caching")]
    pub dev_caching: bool,

    /// Disable development caching.
    #[arg(long = "no-dev-caching", overrides_with = "dev_caching")]
    pub no_dev_caching: bool,
}

impl ServerArgs {
    /// `Some(true)` / `Some(false)` for the last caching flag given, `None`
    /// when neither appears.
    pub fn caching(&self) -> Option<bool> {
        match (self.dev_caching, self.no_dev_caching) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }
}

/// Parse `args` (without the program name).
pub fn matches_from(args: &[String]) -> Result<ArgMatches, clap::Error> {
    let argv = std::iter::once("launcher").chain(args.iter().map(String::as_str));
    ServerArgs::command().try_get_matches_from(argv)
}

/// Parse and resolve `args` (without the program name) in one step.
pub fn parse_server_options(
    args: &[String],
    env: &EnvVars,
    config: &LauncherConfig,
) -> Result<IndifferentMap> {
    let matches = matches_from(args).context("parse server arguments")?;
    resolve_matches(&matches, args, env, config)
}

/// Options resolved without any command-line arguments.
pub fn default_options(env: &EnvVars, config: &LauncherConfig) -> Result<IndifferentMap> {
    parse_server_options(&[], env, config)
}

/// Resolve already-parsed `matches`; `args` is the raw argument list used
/// to build `restart_cmd`.
pub fn resolve_matches(
    matches: &ArgMatches,
    args: &[String],
    env: &EnvVars,
    config: &LauncherConfig,
) -> Result<IndifferentMap> {
    let parsed = ServerArgs::from_arg_matches(matches).context("read server arguments")?;
    let supplied = user_supplied_options(matches);
    resolve(&parsed, &supplied, args, env, config)
}

/// Keys of the options given explicitly on the command line, in
/// declaration order.
pub fn user_supplied_options(matches: &ArgMatches) -> Vec<Symbol> {
    let mut supplied = Vec::new();
    for (id, key) in OPTION_KEYS {
        if matches.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        let key = sym(key);
        if !supplied.contains(&key) {
            supplied.push(key);
        }
    }
    supplied
}

fn resolve(
    args: &ServerArgs,
    supplied: &[Symbol],
    raw_args: &[String],
    env: &EnvVars,
    config: &LauncherConfig,
) -> Result<IndifferentMap> {
    let environment = resolve_environment(args, env, config);
    let port = resolve_port(args, env, config)?;
    let host = resolve_host(args, env, &environment);
    let log_stdout = !args.daemon && environment == DEVELOPMENT;

    let mut options = Map::new();
    options.insert(
        sym("user_supplied_options").into(),
        Value::List(supplied.iter().copied().map(Value::Sym).collect()),
    );
    if let Some(server) = &args.server {
        options.insert(sym("server").into(), server.as_str().into());
    }
    options.insert(sym("log_stdout").into(), log_stdout.into());
    if let Some(caching) = args.caching() {
        options.insert(sym("caching").into(), caching.into());
    }
    options.insert(
        sym("restart_cmd").into(),
        restart_command(config, args.server.as_deref(), raw_args).into(),
    );
    options.insert(sym("Port").into(), port.into());
    options.insert(sym("Host").into(), host.into());
    options.insert(sym("environment").into(), environment.into());
    options.insert(sym("daemonize").into(), args.daemon.into());
    options.insert(
        sym("pid").into(),
        args.pid.as_deref().unwrap_or(&config.pid_file).into(),
    );
    options.insert(
        sym("config").into(),
        args.config.as_deref().unwrap_or(&config.rackup).into(),
    );

    Ok(options.with_indifferent_access())
}

fn resolve_environment(args: &ServerArgs, env: &EnvVars, config: &LauncherConfig) -> String {
    if let Some(environment) = &args.environment {
        debug!(environment, "environment from argument");
        return environment.clone();
    }
    for name in [APP_ENV, RACK_ENV] {
        if let Some(environment) = env.get(name) {
            debug!(environment, var = name, "environment from env");
            return environment.to_string();
        }
    }
    debug!(environment = %config.environment, "environment from config default");
    config.environment.clone()
}

fn resolve_port(args: &ServerArgs, env: &EnvVars, config: &LauncherConfig) -> Result<u16> {
    if let Some(port) = args.port {
        debug!(port, "port from argument");
        return Ok(port);
    }
    if let Some(raw) = env.get(PORT) {
        let port: u16 = raw
            .trim()
            .parse()
            .with_context(|| format!("parse {PORT}={raw} as a port number"))?;
        debug!(port, "port from env");
        return Ok(port);
    }
    debug!(port = config.port, "port from config default");
    Ok(config.port)
}

fn resolve_host(args: &ServerArgs, env: &EnvVars, environment: &str) -> String {
    if let Some(host) = &args.binding {
        debug!(host, "host from argument");
        return host.clone();
    }
    if let Some(host) = env.get(HOST) {
        debug!(host, "host from env");
        return host.to_string();
    }
    let host = if environment == DEVELOPMENT {
        LOCAL_HOST
    } else {
        ANY_HOST
    };
    debug!(host, environment, "host from environment default");
    host.to_string()
}

/// `<executable> <server> <args...>`; an absent server leaves an empty slot.
///
/// The positional server is dropped from the argument tail so it appears
/// exactly once.
fn restart_command(config: &LauncherConfig, server: Option<&str>, raw_args: &[String]) -> String {
    format!(
        "{} {} {}",
        config.restart_executable,
        server.unwrap_or_default(),
        args_without_server(raw_args, server).join(" ")
    )
}

/// `raw_args` minus the first positional token equal to `server`. Values
/// following an option that takes one are never treated as positionals.
fn args_without_server<'a>(raw_args: &'a [String], server: Option<&str>) -> Vec<&'a str> {
    let mut tail = Vec::with_capacity(raw_args.len());
    let mut pending_value = false;
    let mut server = server;
    for arg in raw_args {
        let arg = arg.as_str();
        if pending_value {
            pending_value = false;
        } else if VALUE_OPTIONS.contains(&arg) {
            pending_value = true;
        } else if !arg.starts_with('-') && server == Some(arg) {
            server = None;
            continue;
        }
        tail.push(arg);
    }
    tail
}
