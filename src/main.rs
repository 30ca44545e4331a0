//! Purpose: `sm-hostname` CLI entry point.
//! Role: Binary crate root; parses args, runs one lookup, prints the host on stdout.
//! Invariants: Successful lookups print exactly one line on stdout.
//! Invariants: Errors are emitted on stderr, as JSON when `--json` is set or stderr is not a TTY.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{Map, Value, json};
use sm_hostname::api::{
    self, Error, ErrorKind, HostSource, config_host, env_host, resource_config_path, to_exit_code,
};
use std::error::Error as StdError;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEN: usize = 40;

#[derive(Parser)]
#[command(
    name = "sm-hostname",
    version,
    about = "Print the current host of a training cluster",
    long_about = None,
    after_help = r#"EXAMPLES
  $ SM_CURRENT_HOST=algo-1 sm-hostname env
  $ sm-hostname config                       # reads /opt/ml/input/config/resourceconfig.json
  $ sm-hostname config --path ./resourceconfig.json --len 8

ENVIRONMENT
  SAGEMAKER_BASE_DIR   replaces /opt/ml when resolving resourceconfig.json
  RUST_LOG             tracing filter for diagnostics on stderr (default: warn)"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, global = true, help = "Emit results and errors as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Read the host from $SM_CURRENT_HOST")]
    Env(LenArgs),
    #[command(about = "Read `current_host` from resourceconfig.json")]
    Config(ConfigArgs),
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ sm-hostname completion bash > ~/.local/share/bash-completion/completions/sm-hostname
  $ sm-hostname completion zsh > ~/.zfunc/_sm-hostname"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Args)]
struct LenArgs {
    #[arg(
        long,
        default_value_t = DEFAULT_LEN,
        help = "Buffer capacity in bytes; at most len - 1 bytes are printed"
    )]
    len: usize,
}

#[derive(Args)]
struct ConfigArgs {
    #[command(flatten)]
    len: LenArgs,
    #[arg(
        long,
        help = "Resource config file (default: resolved from SAGEMAKER_BASE_DIR)",
        value_hint = ValueHint::FilePath
    )]
    path: Option<PathBuf>,
}

#[derive(Serialize)]
struct HostOutput<'a> {
    host: &'a str,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

fn main() {
    init_tracing();
    let (result, json_mode) = run(std::env::args_os());
    let exit_code = match result {
        Ok(()) => 0,
        Err(err) => {
            debug!(kind = ?err.kind(), "lookup failed");
            emit_error(&err, json_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run<I>(args: I) -> (Result<(), Error>, bool)
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => return (handle_clap_error(err), false),
    };
    let json_mode = cli.json;
    (dispatch(cli.command, json_mode), json_mode)
}

fn handle_clap_error(err: clap::Error) -> Result<(), Error> {
    match err.kind() {
        ClapErrorKind::DisplayHelp
        | ClapErrorKind::DisplayVersion
        | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            err.print().map_err(|io_err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write help")
                    .with_source(io_err)
            })?;
            if matches!(
                err.kind(),
                ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                return Err(Error::new(ErrorKind::Usage).with_message("missing subcommand"));
            }
            Ok(())
        }
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message(clap_error_summary(&err))
            .with_hint("Try `sm-hostname --help`.")),
    }
}

fn dispatch(command: Command, json_mode: bool) -> Result<(), Error> {
    match command {
        Command::Env(args) => {
            let host = env_host::current_host(args.len)?;
            emit_host(&host, HostSource::Env, None, json_mode)
        }
        Command::Config(args) => {
            let path = args.path.unwrap_or_else(resource_config_path);
            debug!(path = %path.display(), len = args.len.len, "reading resource config");
            let host = config_host::current_host(&path, args.len.len)?;
            let path = path.display().to_string();
            emit_host(&host, HostSource::ResourceConfig, Some(path), json_mode)
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "sm-hostname", &mut io::stdout());
            Ok(())
        }
    }
}

fn emit_host(
    host: &str,
    source: HostSource,
    path: Option<String>,
    json_mode: bool,
) -> Result<(), Error> {
    if !json_mode {
        println!("{host}");
        return Ok(());
    }
    let output = HostOutput {
        host,
        source: source.as_str(),
        path,
    };
    let line = serde_json::to_string(&output).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to serialize host")
            .with_source(err)
    })?;
    println!("{line}");
    Ok(())
}

fn emit_error(err: &Error, json_mode: bool) {
    if !json_mode && io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::VariableNotSet => format!("{} is not set", api::CURRENT_HOST_ENV),
        ErrorKind::FileNotFound => "resource config not found".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::Parse => "invalid resource config".to_string(),
        ErrorKind::FieldNotFound => format!("`{}` not found", api::CURRENT_HOST_FIELD),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(line) = err.line() {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some(column) = err.column() {
        inner.insert("column".to_string(), json!(column));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(line) = err.line() {
        match err.column() {
            Some(column) => lines.push(format!("at: line {line}, column {column}")),
            None => lines.push(format!("at: line {line}")),
        }
    }
    for cause in error_causes(err) {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, error_json, error_text, run};
    use clap::{CommandFactory, Parser};
    use sm_hostname::api::{Error, ErrorKind};
    use std::ffi::OsString;
    use std::io;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn len_defaults_to_forty() {
        let cli = Cli::try_parse_from(args(&["sm-hostname", "env"])).expect("parse");
        match cli.command {
            Command::Env(len) => assert_eq!(len.len, 40),
            _ => panic!("expected env command"),
        }
    }

    #[test]
    fn bad_flag_is_usage_error() {
        let (result, json_mode) = run(args(&["sm-hostname", "env", "--len", "abc"]));
        assert!(!json_mode);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Usage);
    }

    #[test]
    fn error_json_carries_context() {
        let err = Error::new(ErrorKind::Parse)
            .with_message("invalid resource config json")
            .with_hint("parse category: syntax")
            .with_path("/opt/ml/input/config/resourceconfig.json")
            .with_position(2, 3)
            .with_source(io::Error::other("boom"));
        let value = error_json(&err);
        let inner = &value["error"];
        assert_eq!(inner["kind"], "Parse");
        assert_eq!(inner["message"], "invalid resource config json");
        assert_eq!(inner["hint"], "parse category: syntax");
        assert_eq!(inner["path"], "/opt/ml/input/config/resourceconfig.json");
        assert_eq!(inner["line"], 2);
        assert_eq!(inner["column"], 3);
        assert_eq!(inner["causes"][0], "boom");
    }

    #[test]
    fn error_text_falls_back_to_kind_message() {
        let text = error_text(&Error::new(ErrorKind::FieldNotFound));
        assert_eq!(text, "error: `current_host` not found");
    }
}
