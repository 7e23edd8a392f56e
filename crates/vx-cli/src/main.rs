mod server;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use vx_core::{HarmonicEngine, PairRelation, RelationCatalog, export_json};
use vx_store::{DataDir, export_json_file};

#[derive(Parser)]
#[command(name = "vx", about = "Digit-pair harmonic engine CLI and MCP server")]
struct Cli {
    /// Multiplier convention: "relation" (default) or "main"
    #[arg(long, global = true)]
    convention: Option<String>,

    /// Cap color saturation and lightness at 100%
    #[arg(long, global = true)]
    clamp_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server on stdio transport
    Serve,

    /// Derive the relation for an ordered digit pair
    Relation {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Print the 10x10 interaction matrix for an anchor digit
    Matrix {
        #[arg(allow_hyphen_values = true)]
        anchor: i64,
    },

    /// Print the HSL color for an ordered digit pair
    Color {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Print the sound frequency for an ordered digit pair
    Sound {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },

    /// Print the vortex flow for a digit
    Flow {
        #[arg(allow_hyphen_values = true)]
        digit: i64,
    },

    /// Show the active multiplier table and convention discrepancies
    Table,

    /// Precompute every relation and matrix into the catalog database
    Catalog,

    /// Export the full catalog to a JSON file
    Export {
        /// Output file path
        path: PathBuf,
    },

    /// Import a JSON catalog export into the catalog database
    Import {
        /// Input file path
        path: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn build_engine(cli: &Cli, dir: &DataDir) -> Result<HarmonicEngine> {
    let config = dir
        .load_config()
        .context("failed to load config")?
        .with_overrides(cli.convention.as_deref(), cli.clamp_color);
    let engine = config.build_engine().context("invalid configuration")?;
    tracing::debug!(
        "engine: convention={}, policy={:?}",
        engine.table().label(),
        engine.policy()
    );
    Ok(engine)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let dir = DataDir::resolve(None);
    let engine = build_engine(&cli, &dir)?;

    match &cli.command {
        Commands::Serve => cmd_serve(engine).await,
        Commands::Relation { a, b } => cmd_relation(&cli, &engine, *a, *b),
        Commands::Matrix { anchor } => cmd_matrix(&cli, &engine, *anchor),
        Commands::Color { a, b } => {
            let color = engine.color_for(*a, *b)?;
            println!("{color}");
            Ok(())
        }
        Commands::Sound { a, b } => {
            let sound = engine.sound_for(*a, *b)?;
            println!("{sound:.2}");
            Ok(())
        }
        Commands::Flow { digit } => cmd_flow(&cli, &engine, *digit),
        Commands::Table => cmd_table(&cli, &engine),
        Commands::Catalog => cmd_catalog(&dir, &engine),
        Commands::Export { path } => cmd_export(&engine, path),
        Commands::Import { path } => cmd_import(&dir, path),
    }
}

async fn cmd_serve(engine: HarmonicEngine) -> Result<()> {
    tracing::info!(
        "starting MCP server (convention {})",
        engine.table().label()
    );

    let server = server::VxServer::new(engine);
    // A client that closes stdin before the handshake is a normal exit.
    let service = match server.serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::warn!("MCP session ended before initialization: {e}");
            return Ok(());
        }
    };

    tokio::select! {
        quit = service.waiting() => {
            quit.context("MCP server task failed")?;
            tracing::info!("MCP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
        }
    }
    Ok(())
}

fn print_relation(r: &PairRelation) {
    let flow = r
        .vortex_flow
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("relation:      {}", r.relation_label);
    println!("result:        {}", r.result);
    println!("consciousness: {}", r.consciousness);
    println!("harmonic:      {}", r.harmonic);
    println!("frequency_hz:  {}", r.frequency_hz);
    println!("vortex_flow:   {flow}");
    println!("color:         {}", r.color_hsl);
    println!("sound_hz:      {:.2}", r.sound_hz);
}

fn cmd_relation(cli: &Cli, engine: &HarmonicEngine, a: i64, b: i64) -> Result<()> {
    let relation = engine.relation_for(a, b)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&relation)?);
    } else {
        print_relation(&relation);
    }
    Ok(())
}

fn cmd_matrix(cli: &Cli, engine: &HarmonicEngine, anchor: i64) -> Result<()> {
    let matrix = engine.matrix_for(anchor)?;
    if cli.json {
        println!("{}", serde_json::to_string(&matrix.to_values())?);
        return Ok(());
    }
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
    Ok(())
}

fn cmd_flow(cli: &Cli, engine: &HarmonicEngine, digit: i64) -> Result<()> {
    let flow = engine.vortex_flow_for(digit)?;
    if cli.json {
        println!("{}", serde_json::to_string(&flow)?);
    } else {
        let line = flow
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }
    Ok(())
}

fn cmd_table(cli: &Cli, engine: &HarmonicEngine) -> Result<()> {
    let table = engine.table();
    let discrepancies = table.discrepancy_report();

    if cli.json {
        let json = serde_json::json!({
            "label": table.label(),
            "table": table,
            "discrepancies": discrepancies,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("convention: {}", table.label());
    println!("digit  name        multiplier  base  hue  source");
    for row in table.rows() {
        println!(
            "{:<5}  {:<10}  {:<10}  {:<4}  {:<3}  {}",
            row.digit,
            row.name,
            row.multiplier.to_string(),
            row.base_resonance,
            row.hue,
            row.source
        );
    }
    for d in &discrepancies {
        println!(
            "discrepancy: digit {} multiplier {} ({}) vs {} ({})",
            d.digit, d.left_multiplier, d.left, d.right_multiplier, d.right
        );
    }
    Ok(())
}

fn cmd_catalog(dir: &DataDir, engine: &HarmonicEngine) -> Result<()> {
    let catalog = RelationCatalog::build(engine);
    let store = dir.open_catalog().context("failed to open catalog")?;
    store
        .save_catalog(&catalog)
        .context("failed to save catalog")?;
    if let Err(e) = store.checkpoint_truncate() {
        tracing::warn!("WAL checkpoint failed: {e}");
    }
    println!(
        "saved {} relations, {} matrices ({}) to {}",
        catalog.relations().len(),
        catalog.matrices().len(),
        catalog.table.label(),
        dir.catalog_path().display()
    );
    Ok(())
}

fn cmd_export(engine: &HarmonicEngine, path: &Path) -> Result<()> {
    let catalog = RelationCatalog::build(engine);
    if path.as_os_str() == "-" {
        println!("{}", export_json(&catalog).context("failed to serialize catalog")?);
        return Ok(());
    }
    export_json_file(&catalog, path)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(dir: &DataDir, path: &Path) -> Result<()> {
    let store = dir.open_catalog().context("failed to open catalog")?;
    let catalog = store
        .import_json_file(path)
        .context("failed to import JSON")?;
    println!(
        "imported from {}. relations={}, convention={}",
        path.display(),
        catalog.relations().len(),
        catalog.table.label()
    );
    Ok(())
}
