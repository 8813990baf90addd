//! jnrgen - generate JNR-FFI Java bindings from the wgpu-native C header.
//!
//! This tool reads a restricted subset of `wgpu.h` (enum/struct/alias
//! typedefs plus `#define` integer constants) and writes one Java source
//! unit per declaration into `<output>/jnr-gen/`, plus a single aggregated
//! constants class.

use anyhow::{Context, Result};
use clap::Parser;
use jnrgen_core::{GeneratorConfig, HookSet, Lexer, Registry, RunStats};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Generate JNR-FFI Java bindings from the wgpu-native C header
#[derive(Parser, Debug)]
#[command(name = "jnrgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory that receives the generated `jnr-gen/` tree.
    ///
    /// An existing `jnr-gen/` directory under it is deleted and recreated.
    output: PathBuf,

    /// Path to the header to read
    #[arg(long, default_value = "wgpu.h")]
    header: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Render every unit and print what would be written, without touching
    /// the output directory
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; declaration-level failures surface as warnings,
    // which the default level keeps visible.
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let header = fs::read_to_string(&cli.header)
        .with_context(|| format!("failed to read header: {}", cli.header.display()))?;

    let tokens = Lexer::new(&header).tokenize();
    debug!("lexed {} tokens", tokens.len());

    let declarations = jnrgen_core::Parser::new(tokens).parse();
    info!(
        "parsed {} declarations from {}",
        declarations.len(),
        cli.header.display()
    );

    let mut registry = Registry::new(GeneratorConfig::default(), declarations);
    registry.register_all().context("registration failed")?;
    registry
        .apply_hooks(&HookSet::standard())
        .context("patch step failed")?;

    if cli.dry_run {
        let outcome = registry.render_units();
        for unit in &outcome.units {
            println!("Would write: jnr-gen/{}", unit.filename);
        }
        if outcome.skipped > 0 {
            warn!("{} declaration(s) skipped", outcome.skipped);
        }
        return Ok(());
    }

    let out_dir = prepare_output_directory(&cli.output)?;
    let stats = registry
        .emit_all(&out_dir)
        .context("emission failed")?;

    print_summary(&stats, &out_dir);
    Ok(())
}

/// Creates a clean `<root>/jnr-gen/` directory, deleting any previous one.
///
/// A clean directory is a precondition of the run; failure to remove or
/// create it is fatal.
fn prepare_output_directory(root: &Path) -> Result<PathBuf> {
    let dir = root.join("jnr-gen");

    if dir.exists() {
        info!("output directory {} already exists, deleting", dir.display());
        fs::remove_dir_all(&dir)
            .with_context(|| format!("failed to remove output directory: {}", dir.display()))?;
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;

    Ok(dir)
}

fn print_summary(stats: &RunStats, out_dir: &Path) {
    println!(
        "Summary: {} declarations, {} registered, {} constants, {} files written to {}, {} skipped",
        stats.declarations,
        stats.registered,
        stats.constants,
        stats.files_written,
        out_dir.display(),
        stats.skipped
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_for(root: &Path, header: &Path) -> Cli {
        Cli {
            output: root.to_path_buf(),
            header: header.to_path_buf(),
            verbose: 0,
            dry_run: false,
        }
    }

    #[test]
    fn test_prepare_output_directory_recreates() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("jnr-gen");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.java"), "old").unwrap();

        let recreated = prepare_output_directory(temp.path()).unwrap();

        assert_eq!(recreated, dir);
        assert!(recreated.exists());
        assert!(!recreated.join("stale.java").exists());
    }

    #[test]
    fn test_run_end_to_end() {
        let temp = TempDir::new().unwrap();
        let header_path = temp.path().join("wgpu.h");
        fs::write(
            &header_path,
            "#define WGPUMAX_BIND_GROUPS 4\n\
             typedef enum {\n  WGPUAdapterType_DiscreteGpu,\n  WGPUAdapterType_Cpu,\n} WGPUAdapterType;\n\
             typedef struct WGPUColor {\n  double r;\n  double g;\n} WGPUColor;\n",
        )
        .unwrap();

        run(&cli_for(temp.path(), &header_path)).unwrap();

        let out = temp.path().join("jnr-gen");
        assert!(out.join("WgpuAdapterType.java").exists());
        assert!(out.join("WgpuColor.java").exists());
        assert!(out.join("WgpuConstants.java").exists());

        let color = fs::read_to_string(out.join("WgpuColor.java")).unwrap();
        assert!(color.contains("public class WgpuColor extends WgpuJavaStruct {"));
    }

    #[test]
    fn test_run_fails_on_missing_header() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.h");
        assert!(run(&cli_for(temp.path(), &missing)).is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
