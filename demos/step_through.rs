//! Minimal example: encrypt a word and play the trace back.
//!
//! Run with: `cargo run --example step_through`
//!
//! - Encrypts the letters "HEAD" under a freshly generated key
//! - Walks the trace forward, then backward, the way a visualizer would
//! - Decrypts and checks the round trip
//! - Writes a journal line to a temp file

use tinya51::journal::{Direction, FileJournalSink, Journal};
use tinya51::{codec, generate_key, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Setup
    let key = generate_key()?;
    println!("Key: {}", key.to_bit_string());

    let journal_path = std::env::temp_dir().join("tinya51_journal.jsonl");
    let mut journal = Journal::new();
    journal.add_forward_sink(Box::new(FileJournalSink::new(&journal_path)?));

    // 2. Encrypt with a trace
    let plaintext = codec::letters_to_bits("HEAD")?;
    let encrypted = run(&key, &plaintext, true)?;
    journal.record(Direction::Encrypt, &encrypted)?;
    println!(
        "HEAD -> {} ({})",
        codec::bits_to_letters(&encrypted.output)?,
        codec::format_bits(&encrypted.output)?
    );

    // 3. Play the trace forward, then step back twice
    if let Some(trace) = &encrypted.trace {
        let mut cursor = trace.cursor();
        loop {
            if let Some(record) = cursor.current() {
                println!(
                    "  step {:>2}: control {:?} maj {} clocked {} s={}",
                    record.step,
                    record.control.as_array(),
                    record.majority,
                    record.rotated.count(),
                    record.keystream_bit
                );
            }
            if !cursor.forward() {
                break;
            }
        }
        cursor.back();
        cursor.back();
        println!("  rewound to step {}", cursor.index());
    }

    // 4. Decrypt
    let decrypted = run(&key, &encrypted.output, false)?;
    journal.record(Direction::Decrypt, &decrypted)?;
    assert_eq!(decrypted.output, plaintext);
    println!("Decrypted: {}", codec::bits_to_letters(&decrypted.output)?);

    println!("Journal: {} record(s) written to {}", journal.len(), journal_path.display());
    Ok(())
}
