#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The image type recorded in an ICO file header.
///
/// Only plain icons are written by this crate.  Cursor files (type 2) store
/// hotspot coordinates where icons store planes and bit depth, and are not
/// supported.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ResourceType {
    /// Plain images (ICO files)
    Icon,
}

impl ResourceType {
    pub(crate) fn from_number(number: u16) -> Option<ResourceType> {
        match number {
            1 => Some(ResourceType::Icon),
            _ => None,
        }
    }

    pub(crate) fn number(&self) -> u16 {
        match *self {
            ResourceType::Icon => 1,
        }
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::ResourceType;

    #[test]
    fn icon_is_type_one() {
        assert_eq!(ResourceType::Icon.number(), 1);
        assert_eq!(ResourceType::from_number(1), Some(ResourceType::Icon));
    }

    #[test]
    fn cursor_type_is_not_recognized() {
        assert_eq!(ResourceType::from_number(0), None);
        assert_eq!(ResourceType::from_number(2), None);
    }
}

//===========================================================================//
