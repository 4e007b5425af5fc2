mod error;
mod grammar;

pub use error::ParseError;

use winnow::Parser;

/// Parse a dotted decimal version string into its components.
///
/// # Errors
///
/// Returns [`ParseError`] unless the whole input is one or more dot-separated
/// 16-bit decimal components.
pub fn parse_version(input: &str) -> Result<Vec<u16>, ParseError> {
    grammar::version
        .parse(input)
        .map_err(|e| ParseError::new(input, e.to_string()))
}

/// Parse a hexadecimal PCI id, with or without a `0x` prefix.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a hex number fitting in 32 bits.
pub fn parse_hex_id(input: &str) -> Result<u32, ParseError> {
    grammar::hex_id
        .parse(input)
        .map_err(|e| ParseError::new(input, e.to_string()))
}
