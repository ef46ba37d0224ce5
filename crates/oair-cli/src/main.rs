use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::info;

use oair_core::config::{self, CONFIG_FILE_NAME, Mode, OairConfig};
use oair_core::ir::IrSpec;
use oair_core::parse::{self, ApiDocument};
use oair_core::transform::normalize_document;
use oair_core::{CodeGenerator, GeneratedFile};
use oair_split::JsonSplitGenerator;
use oair_ts_client::TsClientGenerator;

#[derive(Parser)]
#[command(
    name = "oair",
    about = "Swagger 2.0 / OpenAPI 3.x to TypeScript client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the spec into JSON records and render TypeScript sources
    Generate {
        /// Path to the spec file (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Which outputs to produce
        #[arg(short, long)]
        mode: Option<ModeArg>,

        /// API name used in output directories and import paths
        #[arg(short = 'n', long)]
        api_name: Option<String>,

        /// Directory for the split JSON records
        #[arg(short = 'S', long)]
        swagger_out_dir: Option<String>,

        /// Directory for the TypeScript sources
        #[arg(short = 'r', long)]
        src_out_dir: Option<String>,

        /// Only write these output paths (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,
    },

    /// Validate a spec and check that it normalizes
    Validate {
        /// Path to the spec file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print a summary of the normalized IR
    Inspect {
        /// Path to the spec file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new oair configuration
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

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Json,
    Ts,
    Both,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Json => Mode::Json,
            ModeArg::Ts => Mode::Ts,
            ModeArg::Both => Mode::Both,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

/// Command-line values that take precedence over the config file.
#[derive(Default)]
struct GenerateOverrides {
    input: Option<PathBuf>,
    mode: Option<Mode>,
    api_name: Option<String>,
    swagger_out_dir: Option<String>,
    src_out_dir: Option<String>,
    filter: Vec<String>,
}

impl GenerateOverrides {
    fn apply(self, mut cfg: OairConfig) -> OairConfig {
        if let Some(input) = self.input {
            cfg.input = input.to_string_lossy().into_owned();
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(api_name) = self.api_name {
            cfg.normalize.api_name = api_name;
        }
        if let Some(dir) = self.swagger_out_dir {
            cfg.swagger_out_dir = dir;
        }
        if let Some(dir) = self.src_out_dir {
            cfg.src_out_dir = dir;
        }
        if !self.filter.is_empty() {
            cfg.filter = self.filter;
        }
        cfg
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            mode,
            api_name,
            swagger_out_dir,
            src_out_dir,
            filter,
        } => {
            let overrides = GenerateOverrides {
                input,
                mode: mode.map(Mode::from),
                api_name,
                swagger_out_dir,
                src_out_dir,
                filter,
            };
            let cfg = overrides.apply(try_load_config()?.unwrap_or_default());
            cmd_generate(&cfg)
        }

        Commands::Validate { input } => {
            cmd_validate(&input, &try_load_config()?.unwrap_or_default())
        }

        Commands::Inspect { input, format } => {
            cmd_inspect(&input, format, &try_load_config()?.unwrap_or_default())
        }

        Commands::Init { force } => cmd_init(Path::new(CONFIG_FILE_NAME), force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oair", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<OairConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Parse a spec file, choosing the syntax by extension.
fn read_document(path: &Path) -> Result<ApiDocument> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let parsed = match ext {
        "yaml" | "yml" => parse::from_yaml(&content),
        _ => parse::from_json(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(parsed)
}

fn load_ir(path: &Path, cfg: &OairConfig) -> Result<IrSpec> {
    let document = read_document(path)?;
    normalize_document(&document, &cfg.normalize)
        .with_context(|| format!("failed to normalize {}", path.display()))
}

/// Whether `path` passes the configured output filter.
fn is_selected(path: &Path, filter: &[String]) -> bool {
    filter.is_empty() || filter.iter().any(|f| Path::new(f) == path)
}

/// Write generated files under `base`, creating parent directories.
/// Returns how many files were written.
fn write_files(base: &Path, files: &[GeneratedFile], filter: &[String]) -> Result<usize> {
    let mut written = 0;
    for file in files {
        let path = base.join(&file.path);
        if !is_selected(&path, filter) {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
        written += 1;
    }
    Ok(written)
}

fn cmd_generate(cfg: &OairConfig) -> Result<()> {
    let ir = load_ir(Path::new(&cfg.input), cfg)?;
    info!(
        "normalized {} paths and {} definitions",
        ir.paths.len(),
        ir.definitions.len()
    );

    if cfg.mode.emits_json() {
        let out_dir = PathBuf::from(&cfg.swagger_out_dir);
        eprintln!("Splitting JSON → {}", out_dir.display());
        let files = JsonSplitGenerator.generate(&ir, &cfg.normalize)?;
        let written = write_files(&out_dir, &files, &cfg.filter)?;
        eprintln!("Generated {written} files in {}", out_dir.display());
    }

    if cfg.mode.emits_ts() {
        let out_dir = PathBuf::from(&cfg.src_out_dir);
        eprintln!("Rendering TypeScript → {}", out_dir.display());
        let files = TsClientGenerator.generate(&ir, &cfg.normalize)?;
        let written = write_files(&out_dir, &files, &cfg.filter)?;
        eprintln!("Generated {written} files in {}", out_dir.display());
    }

    Ok(())
}

fn cmd_validate(input: &Path, cfg: &OairConfig) -> Result<()> {
    let document = read_document(input)?;
    let dialect = match &document {
        ApiDocument::Swagger(_) => "Swagger",
        ApiDocument::OpenApi(_) => "OpenAPI",
    };
    eprintln!(
        "Valid {dialect} {} spec: {}",
        document.version(),
        document.title()
    );

    let ir = normalize_document(&document, &cfg.normalize)?;
    let operations: usize = ir.paths.values().map(|p| p.operations.len()).sum();
    eprintln!("  Version: {}", ir.version);
    eprintln!("  Base URL: {}", ir.base_url);
    eprintln!("  Paths: {}", ir.paths.len());
    eprintln!("  Operations: {operations}");
    eprintln!("  Definitions: {}", ir.definitions.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: &Path, format: InspectFormat, cfg: &OairConfig) -> Result<()> {
    let ir = load_ir(input, cfg)?;
    let summary = build_inspect_summary(&ir);

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

fn build_inspect_summary(ir: &IrSpec) -> serde_json::Value {
    let definitions: Vec<serde_json::Value> = ir
        .definitions
        .values()
        .map(|d| {
            serde_json::json!({
                "name": d.key,
                "kind": d.kind,
                "type": d.ts_type,
                "imports": d.ts_refs.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    let operations: Vec<serde_json::Value> = ir
        .paths
        .values()
        .flat_map(|p| p.operations.values())
        .map(|op| {
            serde_json::json!({
                "operation_id": op.operation_id,
                "method": op.method.as_str(),
                "path": op.path_key,
                "body": op.body_expr,
                "responses": op.responses.keys().collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": ir.title,
            "version": ir.version,
            "base_url": ir.base_url,
        },
        "definitions": definitions,
        "operations": operations,
    })
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
