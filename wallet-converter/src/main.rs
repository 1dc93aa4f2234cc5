//! Interactive wallet key-format converter
//!
//! Flagless menu: choice 1 decodes a base58 secret key into the JSON
//! byte-array wallet format, choice 2 does the reverse. Malformed input is
//! reported and never crashes the process.

use anyhow::Result;
use enroll_sdk::wallet;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Wallet format converter");
    println!("1. base58 secret key -> wallet byte array");
    println!("2. wallet byte array -> base58 secret key");
    print!("Enter your choice (1 or 2): ");
    io::stdout().flush()?;

    let choice = next_line(&mut lines)?;
    match choice.trim() {
        "1" => {
            println!("Enter your base58 secret key:");
            let input = next_line(&mut lines)?;
            match wallet::base58_to_wallet(&input) {
                Ok(bytes) => {
                    println!("Wallet file format:");
                    println!("{}", wallet::format_byte_array(&bytes));
                }
                Err(e) => println!("Could not decode base58 input: {e}"),
            }
        }
        "2" => {
            println!("Enter your wallet byte array (e.g. [12,34,...]):");
            let input = next_line(&mut lines)?;
            match wallet::parse_byte_array(&input) {
                Ok(bytes) => {
                    println!("Base58 secret key:");
                    println!("{}", wallet::wallet_to_base58(&bytes));
                }
                Err(e) => println!("Could not parse byte array: {e}"),
            }
        }
        other => println!("Invalid choice {other:?}, expected 1 or 2."),
    }

    Ok(())
}

fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<String> {
    Ok(lines.next().transpose()?.unwrap_or_default())
}
