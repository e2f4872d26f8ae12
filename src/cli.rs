//! Command-line interface for valuelens.
//!
//! Lists, previews and edits the renderer configuration stored on disk.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::{ActiveTheme, ViewerConfig};
use crate::debug::DebugLevel;
use crate::rendering::{
    AnsiSink, DefaultRenderers, LabelTemplate, MatcherRenderer, PatternKind, PersistenceCodec,
    RendererRegistry, TypePattern, TypeShape, ValueDescriptor, ValuePayload, load_registry,
    save_registry, types::display_type_name,
};

/// valuelens - Debugger value renderer configuration
#[derive(Parser, Debug)]
#[command(name = "valuelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Renderer file (default: ~/.config/valuelens/debugger.renderers.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub renderers: Option<PathBuf>,

    /// Viewer settings file (default: ~/.config/valuelens/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides DEBUG_LEVEL)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for DebugLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Off => DebugLevel::Off,
            LogLevelArg::Error => DebugLevel::Error,
            LogLevelArg::Info => DebugLevel::Info,
            LogLevelArg::Debug => DebugLevel::Debug,
            LogLevelArg::Trace => DebugLevel::Trace,
        }
    }
}

/// Pattern kind argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PatternKindArg {
    Exact,
    Glob,
    Regex,
}

impl From<PatternKindArg> for PatternKind {
    fn from(arg: PatternKindArg) -> Self {
        match arg {
            PatternKindArg::Exact => PatternKind::Exact,
            PatternKindArg::Glob => PatternKind::Glob,
            PatternKindArg::Regex => PatternKind::Regex,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every renderer in selection order
    List,

    /// Render a value with the renderer selected for its type
    Render {
        /// Runtime type name, display (`int[]`) or signature (`[I`) form.
        /// Renderer patterns are matched against the name as given.
        #[arg(long = "type", value_name = "TYPE")]
        type_name: String,

        /// Value text; arrays take comma-separated elements
        #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
        value: String,

        /// Print without colors
        #[arg(long)]
        plain: bool,
    },

    /// Append a user renderer and save
    Add {
        #[arg(long)]
        name: String,

        /// Type pattern
        #[arg(long)]
        pattern: String,

        #[arg(long, value_enum, default_value = "exact")]
        kind: PatternKindArg,

        /// Label template, e.g. "({field:x}, {field:y})"
        #[arg(long)]
        template: String,

        /// String length ceiling for `{value}` placeholders
        #[arg(long, value_name = "CHARS")]
        max_length: Option<usize>,
    },

    /// Remove the first user renderer with this name and save
    Remove {
        #[arg(long)]
        name: String,
    },
}

/// Parse arguments, set up logging and run the chosen command.
pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    crate::debug::init_log_bridge(cli.log_level.map(DebugLevel::from));
    execute(&cli, &mut std::io::stdout().lock())
}

/// Run `cli` writing human-readable output to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let viewer = match &cli.config {
        Some(path) => ViewerConfig::load_from(path),
        None => ViewerConfig::load(),
    }
    .context("failed to load viewer settings")?;

    let renderers_path = cli
        .renderers
        .clone()
        .unwrap_or_else(crate::config::renderers_path);
    let codec = PersistenceCodec::default();
    let registry = RendererRegistry::new(DefaultRenderers::from_config(&viewer));
    load_registry(&renderers_path, &codec, &registry)
        .with_context(|| format!("failed to read {}", renderers_path.display()))?;

    match &cli.command {
        Commands::List => {
            for (i, renderer) in registry.all_renderers().iter().enumerate() {
                let default_tag = if registry.is_default(renderer.as_ref()) {
                    " (default)"
                } else {
                    ""
                };
                writeln!(
                    out,
                    "{:>3}  {:<24} [{}]{}",
                    i,
                    renderer.name(),
                    renderer.provider_id(),
                    default_tag
                )?;
            }
            let disabled = registry
                .auto_nodes()
                .iter()
                .filter(|n| !n.is_enabled())
                .count();
            if disabled > 0 {
                writeln!(out, "{disabled} disabled")?;
            }
        }
        Commands::Render {
            type_name,
            value,
            plain,
        } => {
            let value = parse_value(type_name, value)?;
            let theme = ActiveTheme::new(viewer.resolve_theme());
            let mut sink = if *plain { AnsiSink::plain() } else { AnsiSink::new() };
            crate::rendering::render(&registry, &value, &mut sink, &theme);
            writeln!(out, "{}", sink.as_str())?;
        }
        Commands::Add {
            name,
            pattern,
            kind,
            template,
            max_length,
        } => {
            if registry.auto_nodes().iter().any(|n| n.renderer().name() == name) {
                bail!("a renderer named '{name}' already exists");
            }
            let pattern = TypePattern::new((*kind).into(), pattern.as_str())
                .context("invalid type pattern")?;
            let template = LabelTemplate::parse(template).context("invalid label template")?;
            let renderer = MatcherRenderer::new(name.as_str(), pattern, template)
                .with_string_max_length(max_length.or(viewer.string_max_length));
            registry.add_renderer(Arc::new(renderer));
            save_registry(&renderers_path, &codec, &registry)?;
            writeln!(out, "Added '{}' ({} user renderers)", name, registry.len())?;
        }
        Commands::Remove { name } => {
            let Some(target) = registry
                .auto_nodes()
                .iter()
                .find(|n| n.renderer().name() == name)
                .map(|n| Arc::clone(n.renderer()))
            else {
                bail!("no user renderer named '{name}'");
            };
            registry.remove_renderer(target.as_ref());
            save_registry(&renderers_path, &codec, &registry)?;
            writeln!(out, "Removed '{}'", name)?;
        }
    }
    Ok(())
}

/// Build a descriptor for `raw` interpreted as a value of `type_name`.
///
/// The descriptor keeps `type_name` exactly as given, so signature-form
/// patterns match values typed in signature form. `null` is accepted for
/// non-primitive types. Objects cannot be described on the command line, so
/// other class types carry `raw` as their string content.
pub fn parse_value(type_name: &str, raw: &str) -> Result<ValueDescriptor> {
    let type_name = type_name.trim();
    let shape = TypeShape::of(type_name);

    if raw == "null" && shape != TypeShape::Primitive {
        return Ok(ValueDescriptor::null(type_name));
    }

    let payload = match shape {
        TypeShape::Array => {
            let element = type_name
                .strip_prefix('[')
                .or_else(|| type_name.strip_suffix("[]"))
                .unwrap_or(type_name);
            let items = if raw.trim().is_empty() {
                Vec::new()
            } else {
                raw.split(',')
                    .map(|item| parse_value(element, item.trim()))
                    .collect::<Result<Vec<_>>>()?
            };
            ValuePayload::Array(items)
        }
        TypeShape::Primitive => match display_type_name(type_name).as_ref() {
            "boolean" => ValuePayload::Bool(
                raw.parse()
                    .with_context(|| format!("'{raw}' is not a boolean"))?,
            ),
            "char" => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ValuePayload::Char(c),
                    _ => bail!("'{raw}' is not a single character"),
                }
            }
            "float" | "double" => ValuePayload::Float(
                raw.parse()
                    .with_context(|| format!("'{raw}' is not a number"))?,
            ),
            _ => ValuePayload::Int(
                raw.parse()
                    .with_context(|| format!("'{raw}' is not an integer"))?,
            ),
        },
        TypeShape::Class => ValuePayload::Str(raw.to_string()),
    };
    Ok(ValueDescriptor::new(type_name, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(
            parse_value("I", "-7").unwrap(),
            ValueDescriptor::new("I", ValuePayload::Int(-7))
        );
        assert_eq!(parse_value("boolean", "true").unwrap(), ValueDescriptor::boolean(true));
        assert_eq!(parse_value("char", "x").unwrap(), ValueDescriptor::char('x'));
        assert_eq!(parse_value("double", "1.5").unwrap(), ValueDescriptor::double(1.5));
        assert!(parse_value("int", "seven").is_err());
        assert!(parse_value("char", "xy").is_err());
        assert!(parse_value("int", "null").is_err());
    }

    #[test]
    fn test_parse_arrays_and_strings() {
        let arr = parse_value("[I", "1, 2,3").unwrap();
        assert_eq!(arr.type_name, "[I");
        assert_eq!(arr.display_type_name(), "int[]");
        assert_eq!(arr.length(), Some(3));
        let ValuePayload::Array(items) = &arr.payload else {
            panic!("expected array payload");
        };
        assert_eq!(items[0], ValueDescriptor::new("I", ValuePayload::Int(1)));

        let nested = parse_value("int[][]", "").unwrap();
        assert_eq!(nested.type_name, "int[][]");
        assert_eq!(parse_value("int[]", "").unwrap().length(), Some(0));

        let sig = parse_value("Ljava/lang/String;", "hi").unwrap();
        assert_eq!(sig.type_name, "Ljava/lang/String;");
        assert_eq!(sig.payload, ValuePayload::Str("hi".to_string()));
        assert_eq!(
            parse_value("java.lang.String", "hi").unwrap(),
            ValueDescriptor::string("hi")
        );
        assert_eq!(
            parse_value("java.lang.Object", "null").unwrap(),
            ValueDescriptor::null("java.lang.Object")
        );
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "valuelens",
            "add",
            "--name",
            "Lists",
            "--pattern",
            "java.util.*List",
            "--kind",
            "glob",
            "--template",
            "size={length}",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Add { .. }));

        let cli = Cli::try_parse_from([
            "valuelens", "render", "--type", "int", "--value", "-3", "--plain",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Render { plain: true, .. }));
    }
}
