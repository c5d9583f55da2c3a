//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// キューエントリをインデックスサービスへバッチアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "livesync")]
#[command(about = "Upload queued livesync records to a remote indexing service", long_about = None)]
pub struct Args {
    /// Dry run mode - render batches but don't upload or mark anything processed
    #[arg(long)]
    pub dry_run: bool,

    /// Run the initial export from the objects directory instead of the queue
    #[arg(long)]
    pub initial: bool,

    /// Config file path
    #[arg(short, long, default_value = "./.livesync/config.json")]
    pub config: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config() {
        let args = Args::parse_from(["livesync"]);
        assert_eq!(args.config, "./.livesync/config.json");
        assert!(!args.dry_run);
        assert!(!args.initial);
    }

    #[test]
    fn test_args_dry_run() {
        let args = Args::parse_from(["livesync", "--dry-run"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_args_initial() {
        let args = Args::parse_from(["livesync", "--initial"]);
        assert!(args.initial);
    }

    #[test]
    fn test_args_custom_config() {
        let args = Args::parse_from(["livesync", "-c", "/etc/livesync.json"]);
        assert_eq!(args.config, "/etc/livesync.json");
    }

    #[test]
    fn test_args_combined() {
        let args = Args::parse_from(["livesync", "--dry-run", "--initial"]);
        assert!(args.dry_run);
        assert!(args.initial);
    }
}
