use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Statistics files in CSV format
    #[arg(long, value_name = "PATH", num_args = 1.., required = true)]
    pub stat: Vec<PathBuf>,
    /// C++ header file to be generated
    #[arg(long, value_name = "cc.h")]
    pub out: PathBuf,
    /// JSON file overriding domain tags and macro prefixes
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_several_stat_files() {
        let cli = Cli::try_parse_from(["ccheader", "--stat", "a.csv", "b.csv", "--out", "cc.h"])
            .unwrap();
        assert_eq!(cli.stat, [PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(cli.out, PathBuf::from("cc.h"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn stat_and_out_are_required() {
        assert!(Cli::try_parse_from(["ccheader", "--out", "cc.h"]).is_err());
        assert!(Cli::try_parse_from(["ccheader", "--stat", "a.csv"]).is_err());
    }
}
