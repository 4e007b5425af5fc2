use std::fmt;

/// Operators shared by version, date and float-range criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
    Any,
    Between,
}

/// Operators for case-insensitive string criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringOp {
    Eq,
    Contains,
    BeginWith,
    EndWith,
}

/// How a criterion's version strings are interpreted before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionStyle {
    #[default]
    Numerical,
    /// Digits after the first dot are separate components (`8.103` is `8.1.0.3`).
    Lexical,
}

impl NumericOp {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "=" => NumericOp::Eq,
            "<" => NumericOp::Lt,
            "<=" => NumericOp::Le,
            ">" => NumericOp::Gt,
            ">=" => NumericOp::Ge,
            "any" => NumericOp::Any,
            "between" => NumericOp::Between,
            _ => return None,
        })
    }

    /// Whether the operator reads `number` / `value` at all.
    #[must_use]
    pub(crate) fn needs_bound(self) -> bool {
        self != NumericOp::Any
    }
}

impl StringOp {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "=" => StringOp::Eq,
            "contains" => StringOp::Contains,
            "beginwith" => StringOp::BeginWith,
            "endwith" => StringOp::EndWith,
            _ => return None,
        })
    }
}

impl VersionStyle {
    /// An empty style string means numerical.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "" | "numerical" => Some(VersionStyle::Numerical),
            "lexical" => Some(VersionStyle::Lexical),
            _ => None,
        }
    }
}

impl fmt::Display for NumericOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumericOp::Eq => "=",
            NumericOp::Lt => "<",
            NumericOp::Le => "<=",
            NumericOp::Gt => ">",
            NumericOp::Ge => ">=",
            NumericOp::Any => "any",
            NumericOp::Between => "between",
        })
    }
}

impl fmt::Display for StringOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StringOp::Eq => "=",
            StringOp::Contains => "contains",
            StringOp::BeginWith => "beginwith",
            StringOp::EndWith => "endwith",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens_round_trip() {
        let ops = [
            NumericOp::Eq,
            NumericOp::Lt,
            NumericOp::Le,
            NumericOp::Gt,
            NumericOp::Ge,
            NumericOp::Any,
            NumericOp::Between,
        ];
        for op in ops {
            assert_eq!(NumericOp::from_token(&op.to_string()), Some(op));
        }
    }

    #[test]
    fn unknown_tokens() {
        assert_eq!(NumericOp::from_token("=="), None);
        assert_eq!(NumericOp::from_token(""), None);
        assert_eq!(StringOp::from_token("startswith"), None);
        assert_eq!(VersionStyle::from_token("semver"), None);
    }

    #[test]
    fn string_tokens() {
        assert_eq!(StringOp::from_token("="), Some(StringOp::Eq));
        assert_eq!(StringOp::from_token("contains"), Some(StringOp::Contains));
        assert_eq!(StringOp::from_token("beginwith"), Some(StringOp::BeginWith));
        assert_eq!(StringOp::from_token("endwith"), Some(StringOp::EndWith));
    }

    #[test]
    fn empty_style_is_numerical() {
        assert_eq!(VersionStyle::from_token(""), Some(VersionStyle::Numerical));
        assert_eq!(VersionStyle::from_token("lexical"), Some(VersionStyle::Lexical));
    }
}
