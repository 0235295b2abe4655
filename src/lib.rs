pub mod args;
pub mod calculator;
pub mod config;
pub mod errors;
pub mod generator;
pub mod scanner;
pub mod shorthand;
pub mod unit_value;
pub mod utilities;

pub use args::{CalcArgs, Cli, Commands, GenerateArgs, PipeArgs};
pub use calculator::{calculate_fluid_sizing, FluidSizingCalculator, DEFAULT_ROOT_FONT_SIZE_PIXEL};
pub use config::{FluidSizingConfig, NamedValue};
pub use errors::{CalculateError, FluidError, Result, ShorthandError, Side, UnitParseError};
pub use generator::{parse_candidate, Candidate, CandidateValue, FluidSizingGenerator};
pub use scanner::{collect_files, extract_candidates_from_content, extract_candidates_parallel};
pub use shorthand::{parse_shorthand, Anchor, AnchorPair, ScreenTable, DEFAULT_FROM, DEFAULT_TO};
pub use unit_value::{Unit, UnitValue};
pub use utilities::{CssRule, Utility, UtilityKind, UTILITIES};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of the generation process
#[derive(Debug)]
pub struct GenerationResult {
    pub css_content: String,
    pub total_classes: usize,
    pub total_candidates: usize,
    pub total_files_processed: usize,
}

/// Load the configuration file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<FluidSizingConfig> {
    match path {
        Some(path) => FluidSizingConfig::from_file(path),
        None => Ok(FluidSizingConfig::default()),
    }
}

/// Compute the CSS value for a shorthand, as the `calc` command does
pub fn calculate(args: &CalcArgs) -> Result<String> {
    args.validate().map_err(FluidError::InvalidInput)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(root_font_size) = args.root_font_size {
        config.root_font_size_pixel = root_font_size;
    }

    let pair = parse_shorthand(&args.shorthand, &config.screen_table())?;
    Ok(config.calculator().calculate(&pair)?)
}

/// Main generation entry point
pub fn generate(args: GenerateArgs) -> Result<GenerationResult> {
    let start_time = Instant::now();

    args.validate().map_err(FluidError::InvalidInput)?;

    let config = load_config(args.config.as_deref())?;

    tracing::debug!(
        input = ?args.input,
        output = %args.output_css.display(),
        "starting fluid sizing generation"
    );

    let files = scanner::collect_files(&args.input, &args.exclude)?;
    if files.is_empty() {
        return Err(FluidError::NoFilesFound);
    }
    tracing::debug!("found {} files to process", files.len());

    let candidates = scanner::extract_candidates_parallel(&files, args.jobs)?;
    tracing::debug!("extracted {} unique candidates", candidates.len());

    let mut generator = FluidSizingGenerator::with_config(config);
    generator.add_classes(&candidates);
    let css_content = generator.generate_css(args.minify);

    let result = GenerationResult {
        css_content,
        total_classes: generator.class_count(),
        total_candidates: candidates.len(),
        total_files_processed: files.len(),
    };

    if !args.dry_run {
        write_output_file(&args.output_css, &result.css_content)?;
    }

    tracing::info!(
        files = result.total_files_processed,
        classes = result.total_classes,
        elapsed = ?start_time.elapsed(),
        "generation complete"
    );

    Ok(result)
}

/// Generate CSS for every fluid class found in `content`
pub fn generate_css_for_content(content: &str, config: FluidSizingConfig, minify: bool) -> String {
    let candidates = extract_candidates_from_content(content);
    let mut generator = FluidSizingGenerator::with_config(config);
    generator.add_classes(&candidates);
    generator.generate_css(minify)
}

/// Write the CSS output, creating parent directories as needed
fn write_output_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    write_atomic(path, content).map_err(|e| FluidError::OutputError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write file atomically by writing to temp file then renaming
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    use std::io::Write;

    let temp_path: PathBuf = path.with_extension("tmp");

    let mut file = std::fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;

    std::fs::rename(&temp_path, path)?;

    Ok(())
}

/// Handle pipe command - read markup from stdin, output CSS to stdout
#[cfg(feature = "cli")]
pub async fn handle_pipe_command(args: PipeArgs) -> Result<()> {
    use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

    let config = load_config(args.config.as_deref())?;

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .await
        .map_err(|e| FluidError::InputError(format!("Failed to read from stdin: {}", e)))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let css_content = generate_css_for_content(&input, config, args.minify);

    let mut stdout = io::stdout();
    stdout
        .write_all(css_content.as_bytes())
        .await
        .map_err(|e| FluidError::OutputError {
            path: "stdout".to_string(),
            message: e.to_string(),
        })?;

    stdout.flush().await.map_err(|e| FluidError::OutputError {
        path: "stdout".to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}
