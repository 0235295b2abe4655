use clap::Parser;
use fluid_sizing::{calculate, generate, handle_pipe_command, Cli, Commands};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(&cli.command, Commands::Generate(args) if args.verbose);
    init_logging(verbose)?;

    match cli.command {
        Commands::Calc(args) => match calculate(&args) {
            Ok(value) => {
                println!("{}", value);
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Generate(args) => {
            let dry_run = args.dry_run;
            match generate(args) {
                Ok(result) => {
                    if dry_run {
                        print!("{}", result.css_content);
                    } else {
                        eprintln!("Generation successful!");
                        eprintln!("  - Processed {} files", result.total_files_processed);
                        eprintln!("  - Generated {} fluid utilities", result.total_classes);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Pipe(args) => {
            handle_pipe_command(args).await?;
            Ok(())
        }
    }
}

/// Log to stderr so CSS on stdout stays clean; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "fluid_sizing=debug" } else { "fluid_sizing=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
    Ok(())
}
