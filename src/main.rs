//! tinya51 command-line shell.
//!
//! Usage:
//!   tinya51 encrypt --data 111 --key 10010101001110100110000
//!   tinya51 decrypt --data 011 --key 10010101001110100110000 --verbose
//!   tinya51 encrypt --data H --key 10010101001110100110000 --char
//!   tinya51 keygen

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use tinya51::journal::{Direction, FileJournalSink, Journal};
use tinya51::register::{self, Register};
use tinya51::{codec, CipherState, Key, RunResult, StepRecord, TinyA51Error};

/// TinyA5/1 stream cipher.
#[derive(Parser)]
#[command(author, version, about, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encrypt data.
    Encrypt(RunArgs),
    /// Decrypt data.
    Decrypt(RunArgs),
    /// Print a random 23-bit key.
    Keygen,
}

#[derive(Args)]
struct RunArgs {
    /// Data to process: binary digits, or letters A-H with --char.
    #[arg(short, long)]
    data: String,

    /// 23-bit binary key.
    #[arg(short, long)]
    key: String,

    /// Treat --data as letters A-H instead of binary.
    #[arg(long)]
    char: bool,

    /// Show every step.
    #[arg(short, long)]
    verbose: bool,

    /// Print the result (and trace, with --verbose) as JSON.
    #[arg(long)]
    json: bool,

    /// Append a JSON-lines record of the run to this file.
    #[arg(long, value_name = "PATH")]
    journal: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Encrypt(args) => run(Direction::Encrypt, &args),
        Command::Decrypt(args) => run(Direction::Decrypt, &args),
        Command::Keygen => keygen(),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn keygen() -> Result<(), Box<dyn std::error::Error>> {
    let key = tinya51::generate_key()?;
    println!("{}", key.to_bit_string());
    Ok(())
}

fn run(direction: Direction, args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let key: Key = args.key.parse()?;
    let data = if args.char {
        codec::letters_to_bits(&args.data)?
    } else {
        codec::parse_bits(&args.data)?
    };

    let result = tinya51::run(&key, &data, args.verbose)?;

    if let Some(path) = &args.journal {
        let mut journal = Journal::new();
        journal.add_forward_sink(Box::new(FileJournalSink::new(path)?));
        journal.record(direction, &result)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(trace) = &result.trace {
        println!("Initial register state:");
        print_state(trace.initial(), "");
        for record in trace {
            print_step(record);
        }
        println!("\n{}", "=".repeat(50));
        println!("FINAL RESULT");
        println!("{}", "=".repeat(50));
    }

    print_summary(direction, args, &result)?;
    Ok(())
}

fn print_summary(
    direction: Direction,
    args: &RunArgs,
    result: &RunResult,
) -> Result<(), TinyA51Error> {
    let (from, to) = match direction {
        Direction::Encrypt => ("Plaintext", "Ciphertext"),
        Direction::Decrypt => ("Ciphertext", "Plaintext"),
    };
    println!("{from}: {}", args.data);
    if args.char {
        println!("{from} (binary): {}", codec::format_bits(&result.input)?);
    }
    println!("{to} (binary): {}", codec::format_bits(&result.output)?);
    if args.char {
        match codec::bits_to_letters(&result.output) {
            Ok(letters) => println!("{to} (characters): {letters}"),
            Err(e) => println!("{to} cannot be shown as characters: {e}"),
        }
    }
    Ok(())
}

fn spaced(register: &Register) -> String {
    register
        .bits()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_state(state: &CipherState, indent: &str) {
    for register in state.registers() {
        println!("{indent}{}: {}", register.name(), spaced(register));
    }
}

fn print_step(record: &StepRecord) {
    let c = record.control;
    let (xc, yc, zc) = (register::X.control, register::Y.control, register::Z.control);

    println!("\n{}", "=".repeat(50));
    println!("STEP {}", record.step);
    println!("{}", "=".repeat(50));

    println!("Control bits: x{xc}={}, y{yc}={}, z{zc}={}", c.x, c.y, c.z);
    println!(
        "Majority function: maj({}, {}, {}) = {}",
        c.x, c.y, c.z, record.majority
    );

    println!("\nRegister rotations:");
    println!("  Rotate X: {}", record.rotated.x);
    println!("  Rotate Y: {}", record.rotated.y);
    println!("  Rotate Z: {}", record.rotated.z);

    println!("\nRegister states:");
    println!("  Before rotation:");
    print_state(&record.before, "    ");
    println!("  After rotation:");
    print_state(&record.after, "    ");

    let after = &record.after;
    println!("\nKeystream generation:");
    println!(
        "  s = x{} ^ y{} ^ z{} = {} ^ {} ^ {} = {}",
        register::X.output,
        register::Y.output,
        register::Z.output,
        after.x().output_bit(),
        after.y().output_bit(),
        after.z().output_bit(),
        record.keystream_bit
    );

    println!("\nData bit: {}", record.data_bit);
    println!(
        "Output bit: {} ^ {} = {}",
        record.data_bit, record.keystream_bit, record.output_bit
    );
}
