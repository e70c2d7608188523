//! Swatch command line
//!
//! ```text
//! swatch [--config swatch.toml] [--content-dir DIR] [-v] [--json-logs] <COMMAND>
//!
//!   assemble   print the assembled theme as JSON
//!   css        print CSS custom properties
//!   style      print the image renderer style as JSON
//!   validate   check one fragment file
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{bail, Context as _};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};
use swatch_core::FragmentKind;
use swatch_loader::{AssemblerConfig, FragmentStore, ThemeAssembler, ThemeSelection, TokenOverride};
use swatch_schema::validate;
use swatch_style::translate;
use tracing_subscriber::EnvFilter;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the command definition
#[must_use]
pub fn command() -> Command {
    Command::new("swatch")
        .version(VERSION)
        .about("Assemble themes from fragment presets")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to swatch.toml"),
        )
        .arg(
            Arg::new("content-dir")
                .long("content-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Content directory (overrides the config file)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(selection_args(
            Command::new("assemble").about("Print the assembled theme as JSON"),
        ))
        .subcommand(selection_args(
            Command::new("css").about("Print CSS custom properties").arg(
                Arg::new("selector")
                    .long("selector")
                    .default_value(":root")
                    .help("Selector for the rule block"),
            ),
        ))
        .subcommand(selection_args(
            Command::new("style").about("Print the image renderer style as JSON"),
        ))
        .subcommand(
            Command::new("validate")
                .about("Check one fragment file against the theme schema")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Fragment file (.json, .yaml or .yml)"),
                ),
        )
}

fn selection_args(cmd: Command) -> Command {
    let preset = |name: &'static str, help: &'static str| Arg::new(name).long(name).help(help);
    cmd.arg(preset("base", "Base theme name"))
        .arg(preset("colors", "Color preset name"))
        .arg(preset("fonts", "Font preset name"))
        .arg(preset("radius", "Radius preset name"))
        .arg(
            Arg::new("set")
                .long("set")
                .action(ArgAction::Append)
                .value_parser(value_parser!(TokenOverride))
                .help("Token override, e.g. colors.primary=222.2 47.4% 11.2%"),
        )
        .arg(
            Arg::new("order")
                .long("order")
                .value_delimiter(',')
                .help("Section order, comma separated"),
        )
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `verbose` when set.
pub fn init_tracing(verbose: u8, json: bool) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    // a subscriber may already be installed (tests)
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Load configuration from `--config` and `--content-dir`
///
/// # Errors
/// Returns error if the config file cannot be read or parsed
pub fn load_config(matches: &ArgMatches) -> anyhow::Result<AssemblerConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AssemblerConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AssemblerConfig::default(),
    };
    if let Some(dir) = matches.get_one::<PathBuf>("content-dir") {
        config.content_dir.clone_from(dir);
    }
    Ok(config)
}

/// Default selection overlaid with the command's selection flags
#[must_use]
pub fn selection_from_args(args: &ArgMatches, default: &ThemeSelection) -> ThemeSelection {
    let mut selection = default.clone();
    for (flag, kind) in [
        ("base", FragmentKind::Base),
        ("colors", FragmentKind::Colors),
        ("fonts", FragmentKind::Fonts),
        ("radius", FragmentKind::Radius),
    ] {
        if let Some(name) = args.get_one::<String>(flag) {
            selection = selection.with_preset(kind, name.as_str());
        }
    }
    if let Some(overrides) = args.get_many::<TokenOverride>("set") {
        selection.overrides.extend(overrides.cloned());
    }
    if let Some(order) = args.get_many::<String>("order") {
        selection = selection.with_section_order(order.cloned());
    }
    selection
}

/// Run the parsed command and return what it prints
///
/// # Errors
/// Returns error if assembly or validation fails
pub async fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let config = load_config(matches)?;
    let assembler = ThemeAssembler::new(&config);

    match matches.subcommand() {
        Some(("assemble", args)) => {
            let selection = selection_from_args(args, &config.default_selection);
            let assembly = assembler.assemble(&selection).await?;
            for missing in &assembly.missing {
                tracing::info!(kind = %missing.kind, name = %missing.name, "preset not applied");
            }
            Ok(serde_json::to_string_pretty(&assembly.theme.to_value())?)
        }
        Some(("css", args)) => {
            let selection = selection_from_args(args, &config.default_selection);
            let selector = args
                .get_one::<String>("selector")
                .map_or(":root", String::as_str);
            Ok(assembler.css(&selection, selector).await?)
        }
        Some(("style", args)) => {
            let selection = selection_from_args(args, &config.default_selection);
            let assembly = assembler.assemble(&selection).await?;
            Ok(serde_json::to_string_pretty(&translate(&assembly.theme))?)
        }
        Some(("validate", args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                bail!("missing fragment file");
            };
            validate_file(assembler.store(), file).await
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}

async fn validate_file(store: &FragmentStore, file: &Path) -> anyhow::Result<String> {
    let label = file.display().to_string();
    let fragment = store.load_path(FragmentKind::Base, label.as_str(), file).await?;
    validate(fragment.tokens()).with_context(|| format!("{label} is not a valid fragment"))?;
    Ok(format!("{label}: ok"))
}
