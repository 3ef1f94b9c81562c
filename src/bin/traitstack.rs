use std::{io::IsTerminal as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "traitstack", version)]
struct Cli {
    /// Log debug details (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one PNG per table row, skipping rows whose output exists.
    Generate(GenerateArgs),
    /// Print the layer order for a design string without loading any asset.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// JSON config file; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV table with `NFTDesign`, `NFTNumber` and `Signature` columns.
    #[arg(long)]
    table: Option<PathBuf>,

    /// Directory of `{prefix}{category}{index}` layer images.
    #[arg(long)]
    layers: Option<PathBuf>,

    /// File-name prefix shared by layer images.
    #[arg(long)]
    layer_prefix: Option<String>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Signature overlay image.
    #[arg(long)]
    signature: Option<PathBuf>,

    /// Logo image.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Label font (TrueType).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Layer positioning on the canvas.
    #[arg(long, value_enum)]
    position: Option<PositionChoice>,

    /// Generate everything, or ask before each item.
    #[arg(long, value_enum, default_value_t = ModeChoice::All)]
    mode: ModeChoice,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Comma separated selectors, one per category `a`..`g`.
    design: String,

    /// Append the signature overlay.
    #[arg(long)]
    signature: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositionChoice {
    Centered,
    Origin,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    All,
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &GenerateArgs) -> anyhow::Result<traitstack::GeneratorConfig> {
    let mut cfg = match &args.config {
        Some(path) => traitstack::GeneratorConfig::from_path(path)?,
        None => traitstack::GeneratorConfig::default(),
    };
    if let Some(p) = &args.table {
        cfg.table_path = p.clone();
    }
    if let Some(p) = &args.layers {
        cfg.layers_dir = p.clone();
    }
    if let Some(p) = &args.layer_prefix {
        cfg.layer_prefix = p.clone();
    }
    if let Some(p) = &args.out {
        cfg.output_dir = p.clone();
    }
    if let Some(p) = &args.signature {
        cfg.signature_path = p.clone();
    }
    if let Some(p) = &args.logo {
        cfg.logo_path = p.clone();
    }
    if let Some(p) = &args.font {
        cfg.font_path = p.clone();
    }
    if let Some(choice) = args.position {
        cfg.position = match choice {
            PositionChoice::Centered => traitstack::PositionPolicy::Centered,
            PositionChoice::Origin => traitstack::PositionPolicy::Origin,
        };
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = build_config(&args)?;
    let mode = match args.mode {
        ModeChoice::All => traitstack::RunMode::All,
        ModeChoice::Interactive => traitstack::RunMode::Interactive,
    };

    tracing::info!(
        table = %cfg.table_path.display(),
        layers = %cfg.layers_dir.display(),
        out = %cfg.output_dir.display(),
        ?mode,
        "starting"
    );

    let report = match mode {
        traitstack::RunMode::All => traitstack::run_batch(cfg, &mut traitstack::AcceptAll)?,
        traitstack::RunMode::Interactive => {
            let stdin = std::io::stdin();
            let mut prompter = traitstack::LinePrompter::new(stdin.lock(), std::io::stderr());
            traitstack::run_batch(cfg, &mut prompter)?
        }
    };

    tracing::info!(
        generated = report.generated,
        already_present = report.already_present,
        skipped = report.skipped,
        failed = report.failed.len(),
        quit = report.quit,
        "done"
    );

    if !report.is_clean() {
        for (label, err) in &report.failed {
            eprintln!("  {label}: {err}");
        }
        anyhow::bail!("{} item(s) failed", report.failed.len());
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let selectors = traitstack::Selectors::parse(&args.design)
        .with_context(|| format!("parse design '{}'", args.design))?;
    for (depth, slot) in traitstack::plan_slots(selectors, args.signature)
        .into_iter()
        .enumerate()
    {
        match slot {
            traitstack::Slot::Trait { category, selector } => {
                println!("{depth}: {category}{selector}")
            }
            traitstack::Slot::Signature => println!("{depth}: signature"),
        }
    }
    Ok(())
}
