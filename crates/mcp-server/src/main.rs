//! Bundle Triage MCP Server
//!
//! Answers triage questions about an extracted Kubernetes (k3s/RKE2) support bundle over
//! line-delimited JSON-RPC on stdio. Every response is bounded so it fits an agent's context.
//!
//! ## Tools
//!
//! - `auto_diagnose` - Nodes, pods and events analysis in one call
//! - `analyze_nodes` / `analyze_pods` / `analyze_events` - One analyzer at a time
//! - `read_file` - Read one bundle file with a hard size cap (head + tail)
//! - `list_files` - Bounded listing of the bundle tree
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "bundle-triage": {
//!       "command": "bundle-mcp",
//!       "args": ["--max-items", "15"]
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod stdio;
mod tools;

use cli::Cli;
use stdio::StdioServer;
use tools::BundleService;

fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let service = BundleService::new(cli.limits());
    log::info!(
        "Starting bundle triage MCP server ({:?})",
        service.limits()
    );

    install_interrupt_handler()?;

    let server = StdioServer::new(service);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    server.serve(stdin.lock(), stdout.lock())?;

    log::info!("Bundle triage MCP server stopped");
    Ok(())
}

/// Ends the process with exit code 0 on SIGINT. Replies are flushed as they are written, so
/// nothing is pending when the handler fires.
fn install_interrupt_handler() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    #[cfg(unix)]
    let mut interrupt = {
        let _guard = runtime.enter();
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?
    };

    std::thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            #[cfg(unix)]
            let received = runtime.block_on(interrupt.recv()).is_some();
            #[cfg(not(unix))]
            let received = runtime.block_on(tokio::signal::ctrl_c()).is_ok();

            if received {
                log::info!("Interrupted, bundle triage MCP server stopped");
                std::process::exit(0);
            }
            log::warn!("Interrupt listener closed");
        })?;
    Ok(())
}
