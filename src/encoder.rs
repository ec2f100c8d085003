//! Unary encoding of transition tables and words for the universal machine.
//!
//! Everything is rendered over the two-symbol alphabet `{0, 1}`: unary blocks
//! of `1`s carry the payload, a single `0` separates fields, and `000`
//! separates whole transitions. Word encodings only ever use the single-`0`
//! separator, which is the structural property the decoder relies on to tell
//! the two layers apart.

use std::collections::HashMap;

use crate::types::{Action, Direction, MachineError, DEFAULT_BLANK_SYMBOL};

/// The unary code of the initial state (state index 0).
pub const INITIAL_STATE_CODE: &str = "1";

/// One encodable transition: `(state_index, read, next_state_index, write,
/// direction)`.
pub type EncodableTransition = (usize, char, usize, char, Direction);

/// Renders a state index as a unary block of length `index + 1`.
fn encode_state(index: usize) -> String {
    "1".repeat(index + 1)
}

/// The fixed symbol map: `a`, `b`, and the blank.
fn encode_symbol(symbol: char) -> Result<&'static str, MachineError> {
    match symbol {
        'a' => Ok("1"),
        'b' => Ok("11"),
        DEFAULT_BLANK_SYMBOL => Ok("111"),
        other => Err(MachineError::InvalidDefinition(format!(
            "symbol `{}` has no unary encoding",
            other
        ))),
    }
}

fn decode_symbol(code: &str) -> Option<char> {
    match code {
        "1" => Some('a'),
        "11" => Some('b'),
        "111" => Some(DEFAULT_BLANK_SYMBOL),
        _ => None,
    }
}

/// Right is a length-1 block, Left a length-2 block. `Stay` has no unary
/// representation and cannot appear in an encoded machine.
fn encode_direction(direction: Direction) -> Result<&'static str, MachineError> {
    match direction {
        Direction::Right => Ok("1"),
        Direction::Left => Ok("11"),
        Direction::Stay => Err(MachineError::InvalidDefinition(
            "direction `Stay` has no unary encoding".to_string(),
        )),
    }
}

fn decode_direction(segment: &str, code: &str) -> Result<Direction, MachineError> {
    match code {
        "1" => Ok(Direction::Right),
        "11" => Ok(Direction::Left),
        _ => Err(MachineError::MalformedEncoding {
            segment: segment.to_string(),
            reason: format!("`{}` is not a direction block", code),
        }),
    }
}

/// Encodes a transition list into a single bitstring: five `0`-separated
/// fields per transition, transitions joined by `000`.
pub fn encode(transitions: &[EncodableTransition]) -> Result<String, MachineError> {
    let encoded: Vec<String> = transitions
        .iter()
        .map(|&(state, read, next_state, write, direction)| {
            Ok(format!(
                "{}0{}0{}0{}0{}",
                encode_state(state),
                encode_symbol(read)?,
                encode_state(next_state),
                encode_symbol(write)?,
                encode_direction(direction)?
            ))
        })
        .collect::<Result<_, MachineError>>()?;

    Ok(encoded.join("000"))
}

/// Decodes a bitstring back into a deterministic lookup table keyed on
/// `(unary state, symbol)`. States stay in their unary form (`"1"`, `"11"`,
/// ...); symbols are mapped back through the fixed symbol map.
///
/// A record without exactly five fields, an empty field, a non-unary block,
/// or an unknown symbol or direction block is a [`MachineError::MalformedEncoding`]
/// naming the offending segment.
pub fn decode(bits: &str) -> Result<HashMap<(String, char), Action>, MachineError> {
    let mut table = HashMap::new();

    for record in bits.split("000") {
        if record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split('0').collect();
        if fields.len() != 5 {
            return Err(MachineError::MalformedEncoding {
                segment: record.to_string(),
                reason: format!("expected 5 fields, found {}", fields.len()),
            });
        }

        for field in &fields {
            if field.is_empty() {
                return Err(MachineError::MalformedEncoding {
                    segment: record.to_string(),
                    reason: "empty field".to_string(),
                });
            }
            if field.chars().any(|c| c != '1') {
                return Err(MachineError::MalformedEncoding {
                    segment: record.to_string(),
                    reason: format!("`{}` is not a unary block", field),
                });
            }
        }

        let read = decode_symbol(fields[1]).ok_or_else(|| MachineError::MalformedEncoding {
            segment: record.to_string(),
            reason: format!("`{}` is not a symbol block", fields[1]),
        })?;
        let write = decode_symbol(fields[3]).ok_or_else(|| MachineError::MalformedEncoding {
            segment: record.to_string(),
            reason: format!("`{}` is not a symbol block", fields[3]),
        })?;
        let direction = decode_direction(record, fields[4])?;

        table.insert(
            (fields[0].to_string(), read),
            Action {
                write,
                direction,
                next_state: fields[2].to_string(),
            },
        );
    }

    Ok(table)
}

/// Encodes a word symbol by symbol, joined by single `0` separators. Never
/// produces a `000` transition separator.
pub fn encode_word(word: &str) -> Result<String, MachineError> {
    let encoded: Vec<&str> = word
        .chars()
        .map(encode_symbol)
        .collect::<Result<_, MachineError>>()?;

    Ok(encoded.join("0"))
}

/// Decodes a word bitstring back into its symbols.
pub fn decode_word(bits: &str) -> Result<String, MachineError> {
    if bits.is_empty() {
        return Ok(String::new());
    }

    bits.split('0')
        .map(|code| {
            decode_symbol(code).ok_or_else(|| MachineError::MalformedEncoding {
                segment: code.to_string(),
                reason: "not a symbol block".to_string(),
            })
        })
        .collect()
}
