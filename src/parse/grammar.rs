use winnow::ascii::{digit1, hex_digit1};
use winnow::combinator::{alt, opt, preceded, separated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;

// -- Versions ---------------------------------------------------------------

fn component(input: &mut &str) -> ModalResult<u16> {
    digit1
        .try_map(str::parse::<u16>)
        .context(StrContext::Expected(StrContextValue::Description(
            "16-bit version component",
        )))
        .parse_next(input)
}

/// `1.2.3`: one or more decimal components separated by single dots.
pub(crate) fn version(input: &mut &str) -> ModalResult<Vec<u16>> {
    separated(1.., component, '.').parse_next(input)
}

// -- Hex ids ----------------------------------------------------------------

/// `0x10de`, `0X10DE` or bare `10de`.
pub(crate) fn hex_id(input: &mut &str) -> ModalResult<u32> {
    preceded(
        opt(alt(("0x", "0X"))),
        hex_digit1.try_map(|digits: &str| u32::from_str_radix(digits, 16)),
    )
    .context(StrContext::Expected(StrContextValue::Description("hex id")))
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_single_component() {
        assert_eq!(version.parse("7").unwrap(), vec![7]);
    }

    #[test]
    fn version_many_components() {
        assert_eq!(version.parse("8.1.0.3").unwrap(), vec![8, 1, 0, 3]);
    }

    #[test]
    fn version_leading_zeros() {
        assert_eq!(version.parse("2013.03.21").unwrap(), vec![2013, 3, 21]);
    }

    #[test]
    fn version_rejects_garbage() {
        assert!(version.parse("").is_err());
        assert!(version.parse("1.").is_err());
        assert!(version.parse(".1").is_err());
        assert!(version.parse("1..2").is_err());
        assert!(version.parse("1.2a").is_err());
        assert!(version.parse("-1").is_err());
        assert!(version.parse("1 .2").is_err());
    }

    #[test]
    fn version_component_overflow() {
        assert_eq!(version.parse("65535").unwrap(), vec![65535]);
        assert!(version.parse("65536").is_err());
    }

    #[test]
    fn hex_with_and_without_prefix() {
        assert_eq!(hex_id.parse("0x10de").unwrap(), 0x10de);
        assert_eq!(hex_id.parse("0X10DE").unwrap(), 0x10de);
        assert_eq!(hex_id.parse("8086").unwrap(), 0x8086);
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(hex_id.parse("").is_err());
        assert!(hex_id.parse("0x").is_err());
        assert!(hex_id.parse("0xzz").is_err());
        assert!(hex_id.parse("0x1ffffffff").is_err());
    }
}
