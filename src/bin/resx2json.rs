use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resx2json::{BuildStamp, ResourceConverter, inputs::collect_resource_files};
use tracing::{Level, error};

#[derive(Parser, Debug)]
#[command(
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    /// Log every decision, including culture detection
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(short_flag = 'c')]
    /// Convert .resx files into JSON, writing each into the output directory and the project
    /// directory
    Convert {
        /// The .resx files to convert, or directories to search for them
        #[arg(value_name = "RESX")]
        inputs: Vec<PathBuf>,

        /// The project root
        #[arg(short = 'p', long, value_name = "DIR")]
        project: PathBuf,

        /// The output directory, relative to the project root. Must already exist.
        #[arg(short = 'o', long, value_name = "DIR")]
        output: PathBuf,

        /// The assembly the resources belong to
        #[arg(long, value_name = "NAME")]
        assembly_name: Option<String>,

        /// Indent the generated JSON
        #[arg(long)]
        pretty: bool,

        /// Use a fixed build marker (a Windows FILETIME) instead of the current time
        #[arg(long, value_name = "FILETIME")]
        timestamp: Option<u64>,
    },

    #[command(short_flag = 'd')]
    /// Print the JSON document for a single .resx file
    Dump {
        /// The .resx file to read
        #[arg(value_name = "RESX")]
        resx_file: PathBuf,

        /// Indent the generated JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            inputs,
            project,
            output,
            assembly_name,
            pretty,
            timestamp,
        } => {
            let resource_files = match collect_resource_files(&inputs) {
                Ok(files) => files,
                Err(e) => {
                    error!("Unable to collect resource files. Error: {e}");
                    error_exit();
                }
            };

            let stamp = timestamp
                .map(BuildStamp::from_filetime)
                .unwrap_or_else(BuildStamp::now);

            let converter = ResourceConverter::new(project, output, stamp)
                .with_assembly_name(assembly_name)
                .with_pretty(pretty);

            match converter.run(&resource_files) {
                Ok(outcome) if outcome.success => {
                    println!(
                        "Successfully converted {} resource files.",
                        outcome.generated.len()
                    );
                }
                // Nothing to convert is not a failure, the reason has already been logged
                Ok(_) => (),
                Err(e) => {
                    error!("Conversion failed. Error: {e}");
                    error_exit();
                }
            }
        }
        Commands::Dump { resx_file, pretty } => {
            let converter = ResourceConverter::new(".", ".", BuildStamp::now());

            let json = converter
                .document_for(&resx_file)
                .and_then(|document| {
                    document
                        .to_json(pretty)
                        .map_err(|source| resx2json::ConvertError::Serialize {
                            path: resx_file.clone(),
                            source,
                        })
                });

            match json {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    error!("Unable to read {}. Error: {e}", resx_file.display());
                    error_exit();
                }
            }
        }
    }
}

fn error_exit() -> ! {
    eprintln!("\nUnable to continue.");

    std::process::exit(1);
}
