//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                                    |
//! |------|------------------------------------------------------------|
//! | 0    | Success                                                    |
//! | 1    | General error (unspecified)                                |
//! | 2    | Usage error (bad arguments, conflicting options)           |
//! | 3    | Input file unreadable, unsupported or malformed            |
//! | 4    | Input parsed but empty (no template or on-hand items)      |
//! | 5    | Template store error (unknown id, unreadable store)        |
//! | 6    | Could not write an output, report or export file           |
//! | 7    | Configuration file unreadable or invalid                   |
//!
//! A run that finds discrepancies still exits 0; the report is the result.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Template or on-hand file could not be read or parsed.
pub const EXIT_INPUT: u8 = 3;

/// Template or on-hand file has no usable rows.
pub const EXIT_EMPTY_INPUT: u8 = 4;

/// Template store failure, including unknown template ids.
pub const EXIT_STORE: u8 = 5;

/// Writing JSON output, a report or the adjustment export failed.
pub const EXIT_EXPORT: u8 = 6;

/// Config file could not be read, parsed or validated.
pub const EXIT_CONFIG: u8 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INPUT,
            EXIT_EMPTY_INPUT,
            EXIT_STORE,
            EXIT_EXPORT,
            EXIT_CONFIG,
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
