#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Builds a random card number of `length` digits that starts with
/// `prefix` and carries a valid Luhn check digit.
pub fn luhn_valid_number<R: Rng>(rng: &mut R, prefix: &str, length: usize) -> String {
    let mut body: Vec<u32> = prefix.chars().filter_map(|c| c.to_digit(10)).collect();
    while body.len() < length - 1 {
        body.push(rng.gen_range(0..10));
    }

    // The check digit sits at position 0 from the right, so the body's
    // rightmost digit is the first one to double.
    let sum: u32 = body
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    let check = (10 - sum % 10) % 10;

    body.iter()
        .chain(std::iter::once(&check))
        .map(|d| char::from_digit(*d, 10).unwrap_or('0'))
        .collect()
}

/// Writes an entry script with the standard `action,value` header.
pub fn write_script(path: &Path, rows: &[(&str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["action", "value"])?;
    for (action, value) in rows {
        wtr.write_record([*action, *value])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a script that types `number` one digit at a time, then fills
/// in the expiration and the CVV the same way.
pub fn write_keystroke_script(
    path: &Path,
    number: &str,
    expiration: &str,
    cvv: &str,
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["action", "value"])?;

    for (action, text) in [("number", number), ("expiration", expiration), ("cvv", cvv)] {
        for end in 1..=text.len() {
            wtr.write_record([action, &text[..end]])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
