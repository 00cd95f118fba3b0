use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "r1cs")]
#[command(about = "Inspect and validate rank-1 constraint system files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version and format information
    Info,

    /// Decode a constraint-system file and print a summary
    Inspect {
        /// Encoded constraint-system file
        file: PathBuf,
    },

    /// Check a witness against a constraint-system file
    Validate {
        /// Encoded constraint-system file
        file: PathBuf,

        /// Witness file (JSON object: wire index -> value)
        #[arg(short, long)]
        witness: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info => {
            println!("r1cs {}", env!("CARGO_PKG_VERSION"));
            println!("binary format version: {}", r1cs::codec::VERSION);
        }

        Commands::Inspect { file } => {
            let bytes = std::fs::read(&file)?;
            let system = r1cs::decode(&bytes)?;
            let field = system.field();

            println!("{}", file.display());
            println!("  modulus:        {}", field.modulus());
            println!(
                "  field width:    {} byte(s) ({} bits)",
                field.element_width(),
                field.modulus().bits()
            );
            println!("  wires:          {}", system.wire_count());
            println!("    public in:    {}", system.public_input_count());
            println!("    public out:   {}", system.public_output_count());
            println!("    private:      {}", system.private_count());
            println!("  labels:         {}", system.label_count());
            println!("  constraints:    {}", system.constraint_count());
            println!("  encoded size:   {} byte(s)", r1cs::codec::encoded_len(&system));
        }

        Commands::Validate { file, witness } => {
            let bytes = std::fs::read(&file)?;
            let system = r1cs::decode(&bytes)?;
            let json = std::fs::read_to_string(&witness)?;
            let witness = r1cs::witness_from_json(&json, system.field())?;

            let report = r1cs::validate(&system, &witness)?;
            if report.is_satisfied() {
                println!("OK: {} constraint(s) satisfied", report.checked());
            } else {
                println!(
                    "FAILED: {} of {} constraint(s) violated",
                    report.violations().len(),
                    report.checked()
                );
                for violation in report.violations() {
                    println!(
                        "  constraint {}: ({}) * ({}) != {}",
                        violation.constraint, violation.a, violation.b, violation.c
                    );
                }
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
