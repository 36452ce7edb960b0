use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vref_codec::Encoding;

#[derive(Parser)]
#[command(
    name = "vref",
    about = "vref — encode, decode and inspect virtual references",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Hash store configuration (TOML); defaults to the built-in tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Turn a reference (JSON) into its wire string
    Stringify(StringifyArgs),
    /// Parse a wire string back into a reference
    Parse(ParseArgs),
    /// Show a wire string token by token
    Inspect(InspectArgs),
    /// Re-encode a local id
    HashId(HashIdArgs),
    /// Decode a re-encoded local id
    UnhashId(UnhashIdArgs),
}

#[derive(Args)]
pub struct StringifyArgs {
    /// Reference as JSON
    pub json: String,
    #[arg(short, long, default_value = "hashed")]
    pub encoding: Encoding,
    /// Prefix the encoding token so the output is self-describing
    #[arg(long)]
    pub envelope: bool,
    /// Print the reference embedded in a content locator
    #[arg(long, conflicts_with = "envelope")]
    pub locator: bool,
}

#[derive(Args)]
pub struct ParseArgs {
    pub wire: String,
    #[arg(short, long, default_value = "hashed")]
    pub encoding: Encoding,
    /// Input carries its own encoding token
    #[arg(long)]
    pub envelope: bool,
    /// Input is a content locator with an embedded reference
    #[arg(long, conflicts_with = "envelope")]
    pub locator: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    pub wire: String,
    #[arg(short, long, default_value = "hashed")]
    pub encoding: Encoding,
}

#[derive(Args)]
pub struct HashIdArgs {
    pub id: String,
    /// Overrides the configured radix
    #[arg(short, long)]
    pub radix: Option<u32>,
}

#[derive(Args)]
pub struct UnhashIdArgs {
    pub hash: String,
    /// Overrides the configured radix
    #[arg(short, long)]
    pub radix: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stringify_defaults() {
        let cli = Cli::try_parse_from(["vref", "stringify", "{}"]).unwrap();
        if let Command::Stringify(args) = cli.command {
            assert_eq!(args.json, "{}");
            assert_eq!(args.encoding, Encoding::Hashed);
            assert!(!args.envelope);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_literal_encoding() {
        let cli = Cli::try_parse_from(["vref", "parse", "-e", "literal", "v-3-/t-r-6-/p"]).unwrap();
        if let Command::Parse(args) = cli.command {
            assert_eq!(args.encoding, Encoding::Literal);
            assert_eq!(args.wire, "v-3-/t-r-6-/p");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_unknown_encoding() {
        assert!(Cli::try_parse_from(["vref", "parse", "-e", "compact", "x"]).is_err());
    }

    #[test]
    fn envelope_conflicts_with_locator() {
        assert!(Cli::try_parse_from(["vref", "parse", "--envelope", "--locator", "x"]).is_err());
    }

    #[test]
    fn parse_hash_id_radix() {
        let cli = Cli::try_parse_from(["vref", "hash-id", "people", "--radix", "16"]).unwrap();
        if let Command::HashId(args) = cli.command {
            assert_eq!(args.id, "people");
            assert_eq!(args.radix, Some(16));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_unhash_id() {
        let cli = Cli::try_parse_from(["vref", "unhash-id", "Xabc"]).unwrap();
        assert!(matches!(cli.command, Command::UnhashId(_)));
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::try_parse_from(["vref", "inspect", "n-1-11x"]).unwrap();
        assert!(matches!(cli.command, Command::Inspect(_)));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "vref", "--verbose", "--config", "stores.toml", "--format", "json", "inspect", "v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("stores.toml")));
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
