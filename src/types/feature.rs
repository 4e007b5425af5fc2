use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Bit set of graphics features to disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureMask(u32);

impl FeatureMask {
    pub const NONE: FeatureMask = FeatureMask(0);
    pub const ACCELERATED_2D_CANVAS: FeatureMask = FeatureMask(1 << 0);
    pub const ACCELERATED_COMPOSITING: FeatureMask = FeatureMask(1 << 1);
    pub const WEBGL: FeatureMask = FeatureMask(1 << 2);
    pub const MULTISAMPLING: FeatureMask = FeatureMask(1 << 3);
    pub const FLASH_3D: FeatureMask = FeatureMask(1 << 4);
    pub const FLASH_STAGE3D: FeatureMask = FeatureMask(1 << 5);
    pub const ALL: FeatureMask = FeatureMask((1 << 6) - 1);

    const NAMED: [(&'static str, FeatureMask); 6] = [
        ("accelerated_2d_canvas", Self::ACCELERATED_2D_CANVAS),
        ("accelerated_compositing", Self::ACCELERATED_COMPOSITING),
        ("webgl", Self::WEBGL),
        ("multisampling", Self::MULTISAMPLING),
        ("flash_3d", Self::FLASH_3D),
        ("flash_stage3d", Self::FLASH_STAGE3D),
    ];

    /// Look up a feature by its configuration name; `all` selects every feature.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "all" {
            return Some(Self::ALL);
        }
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, mask)| mask)
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every flag in `other` is set here.
    #[must_use]
    pub fn contains(self, other: FeatureMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn intersects(self, other: FeatureMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Names of the individual flags that are set.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |&(_, mask)| self.contains(mask))
            .map(|(name, _)| name)
    }
}

impl BitOr for FeatureMask {
    type Output = FeatureMask;

    fn bitor(self, rhs: FeatureMask) -> FeatureMask {
        FeatureMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for FeatureMask {
    fn bitor_assign(&mut self, rhs: FeatureMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FeatureMask {
    type Output = FeatureMask;

    fn bitand(self, rhs: FeatureMask) -> FeatureMask {
        FeatureMask(self.0 & rhs.0)
    }
}

impl fmt::Display for FeatureMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve() {
        assert_eq!(FeatureMask::from_name("webgl"), Some(FeatureMask::WEBGL));
        assert_eq!(
            FeatureMask::from_name("accelerated_2d_canvas"),
            Some(FeatureMask::ACCELERATED_2D_CANVAS)
        );
        assert_eq!(FeatureMask::from_name("all"), Some(FeatureMask::ALL));
        assert_eq!(FeatureMask::from_name("WebGL"), None);
        assert_eq!(FeatureMask::from_name("3d_css"), None);
    }

    #[test]
    fn all_covers_every_flag() {
        for (_, mask) in FeatureMask::NAMED {
            assert!(FeatureMask::ALL.contains(mask));
        }
        assert_eq!(FeatureMask::ALL.names().count(), 6);
    }

    #[test]
    fn union_and_intersection() {
        let mask = FeatureMask::WEBGL | FeatureMask::MULTISAMPLING;
        assert!(mask.contains(FeatureMask::WEBGL));
        assert!(!mask.contains(FeatureMask::WEBGL | FeatureMask::FLASH_3D));
        assert!(mask.intersects(FeatureMask::WEBGL | FeatureMask::FLASH_3D));
        assert_eq!(mask & FeatureMask::WEBGL, FeatureMask::WEBGL);
    }

    #[test]
    fn display() {
        assert_eq!(FeatureMask::NONE.to_string(), "none");
        assert_eq!(
            (FeatureMask::WEBGL | FeatureMask::ACCELERATED_COMPOSITING).to_string(),
            "accelerated_compositing, webgl"
        );
    }
}
