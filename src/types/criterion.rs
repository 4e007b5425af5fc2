use std::fmt;

use super::error::CriterionError;
use super::op::{NumericOp, StringOp, VersionStyle};
use super::version::{numerical_to_lexical, Version};

/// Operating system families a rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OsType {
    Windows,
    MacOs,
    Linux,
    ChromeOs,
    #[default]
    Any,
}

impl OsType {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "win" => OsType::Windows,
            "macosx" => OsType::MacOs,
            "linux" => OsType::Linux,
            "chromeos" => OsType::ChromeOs,
            "any" => OsType::Any,
            _ => return None,
        })
    }

    /// The platform this crate was compiled for. Unrecognized platforms report
    /// [`OsType::Any`], which only OS-agnostic rules accept.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            OsType::Windows
        } else if cfg!(target_os = "macos") {
            OsType::MacOs
        } else if cfg!(any(target_os = "linux", target_os = "openbsd")) {
            OsType::Linux
        } else {
            OsType::Any
        }
    }

    /// `Any` in a hardware snapshot means the current platform.
    pub(crate) fn resolve(self) -> Self {
        match self {
            OsType::Any => Self::current(),
            other => other,
        }
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OsType::Windows => "win",
            OsType::MacOs => "macosx",
            OsType::Linux => "linux",
            OsType::ChromeOs => "chromeos",
            OsType::Any => "any",
        })
    }
}

/// Dual-GPU configurations a rule can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultiGpuStyle {
    #[default]
    None,
    Optimus,
    AmdSwitchable,
}

impl MultiGpuStyle {
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "optimus" => Some(MultiGpuStyle::Optimus),
            "amd_switchable" => Some(MultiGpuStyle::AmdSwitchable),
            _ => None,
        }
    }
}

/// A comparison against a dotted version (or a driver date encoded as one).
#[derive(Debug, Clone, PartialEq)]
pub struct VersionCriterion {
    op: NumericOp,
    style: VersionStyle,
    bound: Option<Version>,
    bound2: Option<Version>,
}

impl VersionCriterion {
    /// A criterion that accepts every version.
    #[must_use]
    pub fn any() -> Self {
        Self {
            op: NumericOp::Any,
            style: VersionStyle::Numerical,
            bound: None,
            bound2: None,
        }
    }

    /// Build a criterion from its textual operator, style and bounds.
    ///
    /// Bounds are only read when the operator needs them; `number2` only for
    /// `between`. With [`VersionStyle::Lexical`] the bounds are re-encoded with
    /// [`numerical_to_lexical`] before parsing.
    ///
    /// # Errors
    ///
    /// Returns [`CriterionError`] for an unknown operator or style, or a bound
    /// that does not parse as a version.
    pub fn parse(
        op: &str,
        style: &str,
        number: &str,
        number2: &str,
    ) -> Result<Self, CriterionError> {
        Self::parse_with(op, style, number, number2, |s, style| match style {
            VersionStyle::Numerical => s.parse(),
            VersionStyle::Lexical => numerical_to_lexical(s).parse(),
        })
    }

    /// Build a driver-date criterion; bounds are `mm-dd-yyyy` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CriterionError`] for an unknown operator or a malformed date.
    pub fn parse_date(op: &str, date: &str, date2: &str) -> Result<Self, CriterionError> {
        Self::parse_with(op, "", date, date2, |s, _| Version::from_date(s))
    }

    fn parse_with(
        op: &str,
        style: &str,
        number: &str,
        number2: &str,
        parse_bound: impl Fn(&str, VersionStyle) -> Result<Version, crate::parse::ParseError>,
    ) -> Result<Self, CriterionError> {
        let op = NumericOp::from_token(op)
            .ok_or_else(|| CriterionError::UnknownOperator(op.to_owned()))?;
        let style = VersionStyle::from_token(style)
            .ok_or_else(|| CriterionError::UnknownStyle(style.to_owned()))?;
        let bound = if op.needs_bound() {
            Some(parse_bound(number, style)?)
        } else {
            None
        };
        let bound2 = if op == NumericOp::Between {
            Some(parse_bound(number2, style)?)
        } else {
            None
        };
        Ok(Self {
            op,
            style,
            bound,
            bound2,
        })
    }

    #[must_use]
    pub fn op(&self) -> NumericOp {
        self.op
    }

    #[must_use]
    pub fn style(&self) -> VersionStyle {
        self.style
    }

    #[must_use]
    pub fn is_lexical(&self) -> bool {
        self.style == VersionStyle::Lexical
    }

    /// Test a candidate version.
    ///
    /// `Eq` only compares as many components as the bound has, so `10.6`
    /// contains `10.6.3`. `Between` is inclusive and expects ascending bounds;
    /// reversed bounds match nothing.
    #[must_use]
    pub fn contains(&self, version: &Version) -> bool {
        match (self.op, &self.bound, &self.bound2) {
            (NumericOp::Any, _, _) => true,
            (NumericOp::Eq, Some(bound), _) => bound.is_prefix_of(version),
            (NumericOp::Lt, Some(bound), _) => version < bound,
            (NumericOp::Le, Some(bound), _) => version <= bound,
            (NumericOp::Gt, Some(bound), _) => version > bound,
            (NumericOp::Ge, Some(bound), _) => version >= bound,
            (NumericOp::Between, Some(low), Some(high)) => version >= low && version <= high,
            _ => false,
        }
    }
}

/// A case-insensitive string test. The stored value is already lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCriterion {
    op: StringOp,
    value: String,
}

impl StringCriterion {
    #[must_use]
    pub fn new(op: StringOp, value: &str) -> Self {
        Self {
            op,
            value: value.to_ascii_lowercase(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CriterionError::UnknownOperator`] for an unrecognized operator.
    pub fn parse(op: &str, value: &str) -> Result<Self, CriterionError> {
        let parsed = StringOp::from_token(op)
            .ok_or_else(|| CriterionError::UnknownOperator(op.to_owned()))?;
        Ok(Self::new(parsed, value))
    }

    #[must_use]
    pub fn op(&self) -> StringOp {
        self.op
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        let candidate = candidate.to_ascii_lowercase();
        match self.op {
            StringOp::Eq => candidate == self.value,
            StringOp::Contains => candidate.contains(self.value.as_str()),
            StringOp::BeginWith => candidate.starts_with(self.value.as_str()),
            StringOp::EndWith => candidate.ends_with(self.value.as_str()),
        }
    }
}

/// A comparison against a performance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatCriterion {
    op: NumericOp,
    value: f32,
    value2: f32,
}

impl FloatCriterion {
    #[must_use]
    pub fn new(op: NumericOp, value: f32, value2: f32) -> Self {
        Self { op, value, value2 }
    }

    /// # Errors
    ///
    /// Returns [`CriterionError`] for an unknown operator or an operand that
    /// does not parse as a number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn parse(op: &str, value: &str, value2: &str) -> Result<Self, CriterionError> {
        let parsed = NumericOp::from_token(op)
            .ok_or_else(|| CriterionError::UnknownOperator(op.to_owned()))?;
        let number = |s: &str| {
            s.trim()
                .parse::<f64>()
                .map(|n| n as f32)
                .map_err(|_| CriterionError::InvalidNumber(s.to_owned()))
        };
        let first = if parsed.needs_bound() { number(value)? } else { 0.0 };
        let second = if parsed == NumericOp::Between {
            number(value2)?
        } else {
            0.0
        };
        Ok(Self::new(parsed, first, second))
    }

    #[must_use]
    pub fn op(&self) -> NumericOp {
        self.op
    }

    /// `Between` accepts the bounds in either order.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn contains(&self, value: f32) -> bool {
        match self.op {
            NumericOp::Any => true,
            NumericOp::Eq => value == self.value,
            NumericOp::Lt => value < self.value,
            NumericOp::Le => value <= self.value,
            NumericOp::Gt => value > self.value,
            NumericOp::Ge => value >= self.value,
            NumericOp::Between => {
                let low = self.value.min(self.value2);
                let high = self.value.max(self.value2);
                low <= value && value <= high
            }
        }
    }
}

/// An operating system family plus a version test on the OS release.
#[derive(Debug, Clone, PartialEq)]
pub struct OsCriterion {
    os_type: OsType,
    version: VersionCriterion,
}

impl OsCriterion {
    #[must_use]
    pub fn new(os_type: OsType, version: VersionCriterion) -> Self {
        Self { os_type, version }
    }

    /// # Errors
    ///
    /// Returns [`CriterionError`] for an unknown OS type or a malformed version test.
    pub fn parse(
        os_type: &str,
        op: &str,
        number: &str,
        number2: &str,
    ) -> Result<Self, CriterionError> {
        let parsed = OsType::from_token(os_type)
            .ok_or_else(|| CriterionError::UnknownOsType(os_type.to_owned()))?;
        let version = VersionCriterion::parse(op, "", number, number2)?;
        Ok(Self::new(parsed, version))
    }

    #[must_use]
    pub fn os_type(&self) -> OsType {
        self.os_type
    }

    /// An unknown OS release only satisfies an `any` version test.
    #[must_use]
    pub fn contains(&self, os_type: OsType, version: Option<&Version>) -> bool {
        if self.os_type != os_type && self.os_type != OsType::Any {
            return false;
        }
        match version {
            Some(version) => self.version.contains(version),
            None => self.version.op() == NumericOp::Any,
        }
    }
}
