use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

pub fn locate_bundle_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_bundle-mcp") {
        return Ok(PathBuf::from(path));
    }

    // Try to resolve from the current test executable location.
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("bundle-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/bundle-mcp", "target/release/bundle-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate bundle-mcp binary; build with: cargo build -p bundle-mcp")
}

pub struct ServerProcess {
    pub child: Child,
    pub stdin: ChildStdin,
    pub stdout: BufReader<ChildStdout>,
}

pub fn spawn_server(args: &[&str]) -> Result<ServerProcess> {
    let mut cmd = Command::new(locate_bundle_mcp_bin()?);
    cmd.args(args);
    cmd.env("RUST_LOG", "warn");
    cmd.env_remove("BUNDLE_MCP_MAX_ITEMS");
    cmd.env_remove("BUNDLE_MCP_MAX_FILE_CHARS");
    cmd.env_remove("BUNDLE_MCP_MAX_LINE_CHARS");
    cmd.stdin(std::process::Stdio::piped());
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::null());

    let mut child = cmd.spawn().context("spawn bundle-mcp")?;
    let stdin = child.stdin.take().context("stdin")?;
    let stdout = BufReader::new(child.stdout.take().context("stdout")?);
    Ok(ServerProcess {
        child,
        stdin,
        stdout,
    })
}

pub async fn send_raw(stdin: &mut ChildStdin, bytes: &[u8]) -> Result<()> {
    stdin.write_all(bytes).await?;
    stdin.flush().await?;
    Ok(())
}

pub async fn send_line(stdin: &mut ChildStdin, value: &Value) -> Result<()> {
    let mut json = serde_json::to_vec(value)?;
    json.push(b'\n');
    send_raw(stdin, &json).await
}

pub async fn read_line_json(stdout: &mut BufReader<ChildStdout>) -> Result<Value> {
    loop {
        let mut line = String::new();
        let n = tokio::time::timeout(Duration::from_secs(10), stdout.read_line(&mut line))
            .await
            .context("timeout reading json line")??;
        if n == 0 {
            anyhow::bail!("EOF while reading json line");
        }
        if line.trim().is_empty() {
            continue;
        }
        return Ok(serde_json::from_str(&line)?);
    }
}

pub fn tool_payload(response: &Value) -> Result<Value> {
    let text = response
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
        .context("missing text payload")?;
    Ok(serde_json::from_str(text)?)
}
