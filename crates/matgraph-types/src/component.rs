//! Vector component selectors used by swizzles and write masks.

use std::fmt;

/// One lane of a vector value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Component {
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
}

impl Component {
    /// Maximum number of components in a swizzle or write mask.
    pub const MAX: usize = 4;

    /// All lanes in index order.
    pub const ALL: [Component; Component::MAX] =
        [Component::X, Component::Y, Component::Z, Component::W];

    /// Resolve a mask character. Accepts both `xyzw` and `rgba` spellings.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'r' => Some(Component::X),
            'y' | 'g' => Some(Component::Y),
            'z' | 'b' => Some(Component::Z),
            'w' | 'a' => Some(Component::W),
            _ => None,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Component::X),
            1 => Some(Component::Y),
            2 => Some(Component::Z),
            3 => Some(Component::W),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_char(self) -> char {
        match self {
            Component::X => 'x',
            Component::Y => 'y',
            Component::Z => 'z',
            Component::W => 'w',
        }
    }

    /// Parse a whole mask such as `"zyx"` or `"rgb"`.
    ///
    /// Returns `None` for an empty mask, a mask longer than [`Component::MAX`],
    /// or any unrecognized character. Order is preserved as written.
    pub fn parse_mask(mask: &str) -> Option<Vec<Component>> {
        if mask.is_empty() || mask.chars().count() > Self::MAX {
            return None;
        }
        mask.chars().map(Component::from_char).collect()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_spellings_resolve() {
        assert_eq!(Component::from_char('x'), Some(Component::X));
        assert_eq!(Component::from_char('r'), Some(Component::X));
        assert_eq!(Component::from_char('g'), Some(Component::Y));
        assert_eq!(Component::from_char('b'), Some(Component::Z));
        assert_eq!(Component::from_char('a'), Some(Component::W));
        assert_eq!(Component::from_char('v'), None);
    }

    #[test]
    fn parse_mask_preserves_order() {
        assert_eq!(
            Component::parse_mask("zyx"),
            Some(vec![Component::Z, Component::Y, Component::X])
        );
        assert_eq!(
            Component::parse_mask("abgr"),
            Some(vec![Component::W, Component::Z, Component::Y, Component::X])
        );
    }

    #[test]
    fn parse_mask_rejects_bad_masks() {
        assert_eq!(Component::parse_mask(""), None);
        assert_eq!(Component::parse_mask("xyzvw"), None);
        assert_eq!(Component::parse_mask("xyzwx"), None);
        assert_eq!(Component::parse_mask("xq"), None);
    }

    #[test]
    fn index_round_trips() {
        for i in 0..Component::MAX {
            assert_eq!(Component::from_index(i).map(Component::index), Some(i));
        }
        assert_eq!(Component::from_index(4), None);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_valid_masks_keep_order(mask in "[xyzwrgba]{1,4}") {
                let parsed = Component::parse_mask(&mask).unwrap();
                prop_assert_eq!(parsed.len(), mask.len());
                for (c, component) in mask.chars().zip(&parsed) {
                    prop_assert_eq!(Component::from_char(c), Some(*component));
                }
            }

            #[test]
            fn prop_long_masks_rejected(mask in "[xyzw]{5,8}") {
                prop_assert_eq!(Component::parse_mask(&mask), None);
            }

            #[test]
            fn prop_foreign_characters_rejected(
                prefix in "[xyzw]{0,1}",
                bad in "[c-fh-qs-vA-Z0-9]",
            ) {
                let mask = format!("{prefix}{bad}");
                prop_assert_eq!(Component::parse_mask(&mask), None);
            }
        }
    }
}
