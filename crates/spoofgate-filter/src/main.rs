//! spoofgate-filter: offline evaluation of the ip spoofing filter.
//!
//! Prints the annotated request on stdout. Logs go to stderr (`RUST_LOG`).

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use spoofgate_core::error::{Result, SpoofGateError};
use spoofgate_core::model::ProvisionRequest;
use spoofgate_filter::{config, ProvisionFilter, ProvisionHook};

#[derive(Parser)]
#[command(name = "spoofgate-filter")]
#[command(version)]
#[command(about = "Apply the allow_ip_spoofing policy to a provisioning request", long_about = None)]
struct Args {
    /// Host plugin list (JSON array) or a bare plugin config
    config: PathBuf,

    /// Provisioning opts as JSON; read from stdin when omitted
    request: Option<PathBuf>,
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // clap exits with 2 on usage errors; the host contract is 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    match run(&args.config, args.request.as_deref()) {
        Ok(out) => {
            println!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "evaluation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cfg_path: &Path, req_path: Option<&Path>) -> Result<String> {
    let plugin = config::load_any_from_file(cfg_path)?;
    let filter = ProvisionFilter::from_plugin(&plugin)?;

    let raw = match req_path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| {
            SpoofGateError::InvalidRequest(format!("read request failed ({}): {e}", p.display()))
        })?,
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|e| SpoofGateError::InvalidRequest(format!("read stdin failed: {e}")))?;
            s
        }
    };

    let mut req = ProvisionRequest::from_json(&raw)?;
    if let Some(f) = &filter {
        f.apply(&mut req)?;
    }

    serde_json::to_string_pretty(&req)
        .map_err(|e| SpoofGateError::InvalidRequest(format!("encode request failed: {e}")))
}
