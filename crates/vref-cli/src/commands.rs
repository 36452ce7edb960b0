use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use vref_codec::{tokens, CodecError, ReferenceCodec};
use vref_hash::{canonical_uuid, HashConfig, HashRegistry, LocalIdHasher};
use vref_types::{ContentLocator, Protocol, Reference};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, config, format, .. } = cli;
    let config = load_config(config.as_deref())?;
    match command {
        Command::Stringify(args) => cmd_stringify(&codec(&config)?, args, &format),
        Command::Parse(args) => cmd_parse(&codec(&config)?, args, &format),
        Command::Inspect(args) => cmd_inspect(&codec(&config)?, args, &format),
        Command::HashId(args) => cmd_hash_id(&config, args, &format),
        Command::UnhashId(args) => cmd_unhash_id(&config, args, &format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<HashConfig> {
    match path {
        Some(path) => HashConfig::load(path)
            .with_context(|| format!("loading hash config from {}", path.display())),
        None => Ok(HashConfig::default()),
    }
}

fn codec(config: &HashConfig) -> anyhow::Result<ReferenceCodec> {
    let registry = HashRegistry::from_config(config).context("bootstrapping hash stores")?;
    Ok(ReferenceCodec::new(registry))
}

fn cmd_stringify(codec: &ReferenceCodec, args: StringifyArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reference: Reference =
        serde_json::from_str(&args.json).context("reading reference JSON")?;
    let output = if args.locator {
        codec.to_locator(&reference, args.encoding)?.to_string()
    } else if args.envelope {
        codec.encode(&reference, args.encoding)?
    } else {
        codec.stringifier(args.encoding).stringify(&reference)?
    };
    match format {
        OutputFormat::Text => println!("{output}"),
        OutputFormat::Json => {
            println!("{}", json!({ "wire": output, "encoding": args.encoding }))
        }
    }
    Ok(())
}

fn cmd_parse(codec: &ReferenceCodec, args: ParseArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let reference = if args.locator {
        let locator: ContentLocator = args.wire.parse()?;
        codec.from_locator(&locator)?
    } else if args.envelope {
        codec.decode(&args.wire)?
    } else {
        codec.parser(args.encoding).parse(&args.wire)?
    };
    match format {
        OutputFormat::Text => {
            let mut lines = Vec::new();
            describe(&reference, 0, &mut lines);
            for line in lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reference)?),
    }
    Ok(())
}

/// Indented, labelled rendering of a reference tree.
fn describe(reference: &Reference, indent: usize, out: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    out.push(format!(
        "{pad}{} {}",
        reference.protocol().name().bold(),
        reference.resource().to_string().yellow()
    ));
    match reference.protocol() {
        Protocol::Node => {
            if let Some(parent) = reference.parent() {
                out.push(format!("{pad}  parent:"));
                describe(parent, indent + 2, out);
            }
        }
        Protocol::Virtual | Protocol::Vanilla => {
            if let Some(path) = reference.template_path() {
                out.push(format!("{pad}  template path: {}", path.cyan()));
            }
            out.push(format!("{pad}  actual: {}", reference.actual_resource()));
            if let Some(vanilla) = reference.vanilla_template() {
                out.push(format!("{pad}  vanilla template: {vanilla}"));
            }
        }
    }
}

fn cmd_inspect(codec: &ReferenceCodec, args: InspectArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let wire_tokens = tokens::tokenize(&args.wire);
    let result = codec.parser(args.encoding).parse(&args.wire);
    let failed_at = match &result {
        Err(CodecError::Parse(e)) => Some(e.position()),
        _ => None,
    };

    match format {
        OutputFormat::Text => {
            for (position, token) in wire_tokens.iter().enumerate() {
                let marker = if failed_at == Some(position) { "✗".red().bold() } else { " ".normal() };
                match tokens::unescape_literal(token) {
                    Ok(text) if text != *token => {
                        println!("{marker} {position:>3}  {token}  {}", format!("{text:?}").dimmed())
                    }
                    _ => println!("{marker} {position:>3}  {token}"),
                }
            }
            if failed_at == Some(wire_tokens.len()) {
                println!("{} {:>3}  {}", "✗".red().bold(), wire_tokens.len(), "<end>".dimmed());
            }
            match &result {
                Ok(reference) => println!(
                    "{} valid {} reference ({} encoding)",
                    "✓".green().bold(),
                    reference.protocol(),
                    args.encoding
                ),
                Err(e) => println!("{} {e}", "✗".red().bold()),
            }
        }
        OutputFormat::Json => {
            let listing: Vec<_> = wire_tokens
                .iter()
                .enumerate()
                .map(|(position, token)| {
                    json!({
                        "position": position,
                        "token": token,
                        "text": tokens::unescape_literal(token).ok(),
                    })
                })
                .collect();
            let report = json!({
                "tokens": listing,
                "valid": result.is_ok(),
                "error": result.as_ref().err().map(ToString::to_string),
                "position": failed_at,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn cmd_hash_id(config: &HashConfig, args: HashIdArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let radix = args.radix.unwrap_or(config.radix);
    let hasher = LocalIdHasher::new(radix)?;
    let hash = hasher.hash(&args.id);
    let uuid = canonical_uuid(&args.id).is_some();
    match format {
        OutputFormat::Text => println!("{hash}"),
        OutputFormat::Json => {
            println!("{}", json!({ "id": args.id, "hash": hash, "radix": radix, "uuid": uuid }))
        }
    }
    Ok(())
}

fn cmd_unhash_id(config: &HashConfig, args: UnhashIdArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let radix = args.radix.unwrap_or(config.radix);
    let hasher = LocalIdHasher::new(radix)?;
    let id = hasher
        .lookup(&args.hash)
        .with_context(|| format!("decoding {} in radix {radix}", args.hash))?;
    match format {
        OutputFormat::Text => println!("{id}"),
        OutputFormat::Json => {
            println!("{}", json!({ "hash": args.hash, "id": id, "radix": radix }))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use vref_codec::Encoding;
    use vref_types::{Resource, StoreId};

    #[test]
    fn describe_nested_reference() {
        colored::control::set_override(false);
        let folder = Reference::vanilla(
            Resource::classpath("/t"),
            "/1",
            Resource::path("/p"),
            Resource::classpath("/v"),
        );
        let node = Reference::node(ContentLocator::new(StoreId::workspace(), "doc"), folder);
        let mut lines = Vec::new();
        describe(&node, 0, &mut lines);
        assert_eq!(
            lines,
            [
                "node workspace://SpacesStore/doc",
                "  parent:",
                "    vanilla classpath:/t",
                "      template path: /1",
                "      actual: path:/p",
                "      vanilla template: classpath:/v",
            ]
        );
    }

    #[test]
    fn config_file_feeds_the_codec() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[paths]\n\"/app:company_home\" = \"A\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        let codec = codec(&config).unwrap();

        let reference = Reference::virtual_ref(
            Resource::classpath("/t"),
            "/",
            Resource::path("/app:company_home/cm:foo"),
        );
        let wire = codec.stringifier(Encoding::Hashed).stringify(&reference).unwrap();
        assert!(wire.ends_with("-7-A-/cm:foo"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/stores.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/stores.toml"));
    }

    #[test]
    fn default_config_without_flag() {
        assert_eq!(load_config(None).unwrap(), HashConfig::default());
    }
}
