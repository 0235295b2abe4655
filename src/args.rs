use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fluid sizing CLI - generates clamp() based CSS from fluid utility classes
#[derive(Parser, Debug)]
#[command(name = "fluid-sizing")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the CSS value for a single shorthand
    Calc(CalcArgs),
    /// Scan source files for fluid utility classes and write their CSS
    Generate(GenerateArgs),
    /// Read markup from stdin and output CSS to stdout
    Pipe(PipeArgs),
}

/// Arguments for the calc command
#[derive(Parser, Debug, Clone)]
pub struct CalcArgs {
    /// Shorthand such as "768px 32px, 1280px 64px"
    #[arg(value_name = "SHORTHAND")]
    pub shorthand: String,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Root font size in pixels, overriding the configuration
    #[arg(
        long = "root-font-size",
        value_name = "PIXELS",
        env = "FLUID_SIZING_ROOT_FONT_SIZE",
        help = "Pixels per rem used for unit conversion (defaults to 16)"
    )]
    pub root_font_size: Option<f64>,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Input file patterns to scan for fluid utility classes"
    )]
    pub input: Vec<String>,

    /// Output CSS file path
    #[arg(
        short = 'o',
        long = "output-css",
        value_name = "PATH",
        required = true,
        help = "Path where the generated CSS file will be written"
    )]
    pub output_css: PathBuf,

    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Enable CSS minification
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Enable minification of the output CSS"
    )]
    pub minify: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "Enable verbose output"
    )]
    pub verbose: bool,

    /// Number of parallel threads to use
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "NUM",
        help = "Number of parallel threads to use (defaults to number of CPU cores)"
    )]
    pub jobs: Option<usize>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from scanning"
    )]
    pub exclude: Vec<String>,

    /// Dry run (don't write output files)
    #[arg(
        long = "dry-run",
        default_value_t = false,
        help = "Perform generation but don't write the output file"
    )]
    pub dry_run: bool,
}

/// Arguments for the pipe command
#[derive(Parser, Debug, Clone)]
pub struct PipeArgs {
    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Enable CSS minification
    #[arg(
        long = "minify",
        default_value_t = false,
        help = "Enable minification of the output CSS"
    )]
    pub minify: bool,
}

impl GenerateArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }

        if let Some(jobs) = self.jobs {
            if jobs == 0 {
                return Err("Number of jobs must be at least 1".to_string());
            }
        }

        Ok(())
    }
}

impl CalcArgs {
    pub fn validate(&self) -> Result<(), String> {
        match self.root_font_size {
            Some(size) if !size.is_finite() || size <= 0.0 => {
                Err(format!("Root font size must be a positive number, got {}", size))
            }
            _ => Ok(()),
        }
    }
}
