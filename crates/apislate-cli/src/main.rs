use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apislate_core::config::{self, CONFIG_FILE_NAME, SlateConfig};
use apislate_core::model::{Model, Specification};
use apislate_core::parse;
use apislate_core::transform;
use apislate_core::GeneratedFile;
use apislate_slate::generator::OUTPUT_FILE;
use apislate_slate::{Language, SlateGenerator};

#[derive(Parser)]
#[command(
    name = "apislate",
    about = "Swagger 2.0 to Slate API reference generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Slate markdown document
    Generate {
        /// Path to the Swagger spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Target languages, comma separated (java, python, php)
        #[arg(short, long, value_delimiter = ',')]
        languages: Option<Vec<String>>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Folder with hand-written definition descriptions
        #[arg(long)]
        descriptions: Option<PathBuf>,

        /// Folder with `{language}_api_example.j2` template overrides
        #[arg(long)]
        templates: Option<PathBuf>,
    },

    /// Validate a Swagger spec
    Validate {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Inspect the loaded model of a Swagger spec
    Inspect {
        /// Path to the Swagger spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apislate configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

/// Command-line values that take precedence over the config file.
#[derive(Default)]
struct Overrides {
    input: Option<PathBuf>,
    languages: Option<Vec<String>>,
    output: Option<PathBuf>,
    descriptions: Option<PathBuf>,
    templates: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            languages,
            output,
            descriptions,
            templates,
        } => cmd_generate(Overrides {
            input,
            languages,
            output,
            descriptions,
            templates,
        }),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apislate", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<SlateConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))?;
    if cfg.is_some() {
        log::info!("loaded {}", config_path.display());
    }
    Ok(cfg)
}

fn path_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

fn apply_overrides(mut cfg: SlateConfig, overrides: Overrides) -> SlateConfig {
    if let Some(input) = overrides.input {
        cfg.input = path_string(input);
    }
    if let Some(languages) = overrides.languages {
        cfg.languages = languages
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
    }
    if let Some(output) = overrides.output {
        cfg.output = path_string(output);
    }
    if let Some(dir) = overrides.descriptions {
        cfg.descriptions = Some(path_string(dir));
    }
    if let Some(dir) = overrides.templates {
        cfg.templates = Some(path_string(dir));
    }
    cfg
}

fn load_spec(path: &Path) -> Result<Specification> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    let spec = transform::transform(&parsed)?;
    Ok(spec)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(overrides: Overrides) -> Result<()> {
    let cfg = apply_overrides(try_load_config()?.unwrap_or_default(), overrides);
    let spec = load_spec(Path::new(&cfg.input))?;

    eprintln!(
        "Generating {} [{}] -> {}",
        cfg.input,
        cfg.languages.join(", "),
        cfg.output
    );
    // Nothing touches the output directory until the whole document is built.
    let (content, report) = SlateGenerator::from_config(&cfg).build(&spec)?;
    for key in &report.skipped {
        eprintln!("  skipped {key}");
    }

    let files = vec![GeneratedFile {
        path: OUTPUT_FILE.to_string(),
        content,
    }];
    let output_dir = PathBuf::from(&cfg.output);
    write_files(&output_dir, &files)?;

    eprintln!(
        "Documented {} operation section(s), {} definition(s), {} skipped",
        report.documented,
        report.definitions.len(),
        report.skipped.len()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let content = fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let ext = input.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };

    eprintln!(
        "Valid Swagger {} spec: {}",
        parsed.swagger, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    eprintln!("  Definitions: {}", parsed.definitions.len());

    let spec = transform::transform(&parsed)?;
    eprintln!("  Operations: {}", spec.operation_count());
    eprintln!("  Tags: {}", spec.tags.len());

    let untagged = spec
        .operations()
        .filter(|(_, op)| {
            !op.tags
                .iter()
                .any(|t| spec.tags.iter().any(|declared| &declared.name == t))
        })
        .count();
    if untagged > 0 {
        eprintln!("  warning: {untagged} operation(s) carry no declared tag and won't be documented");
    }

    let supported: Vec<&str> = Language::SUPPORTED.iter().map(Language::as_str).collect();
    eprintln!("  Supported languages: {}", supported.join(", "));

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;

    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &Specification) -> serde_json::Value {
    let definitions: Vec<serde_json::Value> = spec
        .definitions
        .iter()
        .map(|(name, model)| {
            let kind = match model {
                Model::Plain(_) => "plain",
                Model::Reference(_) => "reference",
                Model::Composed(_) => "composed",
                Model::Array(_) => "array",
            };
            serde_json::json!({ "name": name, "kind": kind })
        })
        .collect();

    let operations: Vec<serde_json::Value> = spec
        .operations()
        .map(|(key, op)| {
            serde_json::json!({
                "method": key.method.as_str(),
                "path": key.path,
                "summary": op.summary,
                "tags": op.tags,
                "parameters": op.parameters.len(),
                "responses": op.responses.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "tags": spec.tags.iter().map(|t| &t.name).collect::<Vec<_>>(),
        "definitions": definitions,
        "operations": operations,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let cfg = apply_overrides(
            SlateConfig::default(),
            Overrides {
                languages: Some(vec!["php".to_string(), " ".to_string()]),
                output: Some(PathBuf::from("site")),
                ..Default::default()
            },
        );
        assert_eq!(cfg.languages, vec!["php"]);
        assert_eq!(cfg.output, "site");
        assert_eq!(cfg.input, "swagger.yaml");
        assert!(cfg.templates.is_none());
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("docs");
        let files = vec![GeneratedFile {
            path: "slate.md".to_string(),
            content: "# Introduction\n".to_string(),
        }];
        write_files(&base, &files).unwrap();
        assert_eq!(
            fs::read_to_string(base.join("slate.md")).unwrap(),
            "# Introduction\n"
        );
    }
}
