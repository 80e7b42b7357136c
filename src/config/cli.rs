use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "parsverse")]
#[command(about = "ParsVerse: weave a Persian-inspired myth scroll from a name and a region")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on (overrides config)")]
    pub bind: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "parsverse",
            "--config",
            "parsverse.toml",
            "--bind",
            "127.0.0.1:3000",
            "--verbose",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("parsverse.toml")));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:3000"));
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }
}
