use bundle_protocol::Limits;
use clap::builder::TypedValueParser;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "bundle-mcp")]
#[command(about = "MCP stdio server for bounded cluster bundle triage", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Maximum entries in any finding list before the remainder collapses into one marker
    #[arg(
        long,
        env = "BUNDLE_MCP_MAX_ITEMS",
        default_value_t = Limits::DEFAULT_MAX_ITEMS,
        value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize)
    )]
    pub max_items: usize,

    /// Character cap for any single file read
    #[arg(
        long,
        env = "BUNDLE_MCP_MAX_FILE_CHARS",
        default_value_t = Limits::DEFAULT_MAX_FILE_CHARS,
        value_parser = clap::value_parser!(u64)
            .range(Limits::MIN_FILE_CHARS as u64..)
            .map(|v| v as usize)
    )]
    pub max_file_chars: usize,

    /// Character cap for any single finding line
    #[arg(
        long,
        env = "BUNDLE_MCP_MAX_LINE_CHARS",
        default_value_t = Limits::DEFAULT_MAX_LINE_CHARS,
        value_parser = clap::value_parser!(u64).range(1..).map(|v| v as usize)
    )]
    pub max_line_chars: usize,
}

impl Cli {
    pub fn limits(&self) -> Limits {
        Limits {
            max_items: self.max_items,
            max_file_chars: self.max_file_chars,
            max_line_chars: self.max_line_chars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_protocol_limits() {
        let cli = Cli::try_parse_from(["bundle-mcp"]).expect("parse");
        assert_eq!(cli.limits(), Limits::default());
    }

    #[test]
    fn flags_override_limits() {
        let cli = Cli::try_parse_from([
            "bundle-mcp",
            "--max-items",
            "5",
            "--max-file-chars",
            "4096",
            "--max-line-chars",
            "120",
        ])
        .expect("parse");
        assert_eq!(
            cli.limits(),
            Limits {
                max_items: 5,
                max_file_chars: 4096,
                max_line_chars: 120,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Cli::try_parse_from(["bundle-mcp", "--max-items", "0"]).is_err());
        assert!(Cli::try_parse_from(["bundle-mcp", "--max-file-chars", "100"]).is_err());
        assert!(Cli::try_parse_from(["bundle-mcp", "--max-line-chars", "-3"]).is_err());
    }
}
