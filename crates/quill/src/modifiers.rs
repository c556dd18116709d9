//! Declaration modifiers
//!
//! Modifiers are tracked during traversal as a compact [`ModifierSet`] and
//! frozen into a [`Modifiers`] record when a declaration gets documented.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single declaration modifier keyword
///
/// The discriminant is the bit index used by [`ModifierSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Public = 0,
    Protected = 1,
    Private = 2,
    Static = 3,
    Final = 4,
    Inline = 5,
    Property = 6,
    Abstract = 7,
    Virtual = 8,
    Override = 9,
}

impl Modifier {
    /// Every modifier, in bit order
    pub const ALL: [Modifier; 10] = [
        Modifier::Public,
        Modifier::Protected,
        Modifier::Private,
        Modifier::Static,
        Modifier::Final,
        Modifier::Inline,
        Modifier::Property,
        Modifier::Abstract,
        Modifier::Virtual,
        Modifier::Override,
    ];

    /// Get the source keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Inline => "inline",
            Modifier::Property => "property",
            Modifier::Abstract => "abstract",
            Modifier::Virtual => "virtual",
            Modifier::Override => "override",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Active modifiers during traversal, one bit per [`Modifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(u16);

impl ModifierSet {
    /// An empty set
    pub fn empty() -> Self {
        Self(0)
    }

    /// Return a copy with `modifier` set
    pub fn with(self, modifier: Modifier) -> Self {
        Self(self.0 | modifier.bit())
    }

    /// Check whether `modifier` is set
    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// Check whether no modifier is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate set modifiers in bit order
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), ModifierSet::with)
    }
}

/// Modifiers in effect on a documented declaration
///
/// A flat record: visibility flags are not mutually exclusive here, the
/// record just reflects whichever keywords were active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifiers {
    pub is_public: bool,
    pub is_protected: bool,
    pub is_private: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub is_inline: bool,
    pub is_property: bool,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
}

impl Modifiers {
    /// Check a single flag
    pub fn has(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Public => self.is_public,
            Modifier::Protected => self.is_protected,
            Modifier::Private => self.is_private,
            Modifier::Static => self.is_static,
            Modifier::Final => self.is_final,
            Modifier::Inline => self.is_inline,
            Modifier::Property => self.is_property,
            Modifier::Abstract => self.is_abstract,
            Modifier::Virtual => self.is_virtual,
            Modifier::Override => self.is_override,
        }
    }

    /// Active flags in declaration keyword order
    pub fn active(&self) -> Vec<Modifier> {
        Modifier::ALL
            .into_iter()
            .filter(|m| self.has(*m))
            .collect()
    }

    /// Check whether no flag is set
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

impl From<ModifierSet> for Modifiers {
    fn from(set: ModifierSet) -> Self {
        Self {
            is_public: set.contains(Modifier::Public),
            is_protected: set.contains(Modifier::Protected),
            is_private: set.contains(Modifier::Private),
            is_static: set.contains(Modifier::Static),
            is_final: set.contains(Modifier::Final),
            is_inline: set.contains(Modifier::Inline),
            is_property: set.contains(Modifier::Property),
            is_abstract: set.contains(Modifier::Abstract),
            is_virtual: set.contains(Modifier::Virtual),
            is_override: set.contains(Modifier::Override),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_order_matches_keyword_order() {
        for (index, modifier) in Modifier::ALL.iter().enumerate() {
            assert_eq!(*modifier as usize, index);
        }
    }

    #[test]
    fn test_modifier_set() {
        let set = ModifierSet::empty()
            .with(Modifier::Static)
            .with(Modifier::Public);

        assert!(set.contains(Modifier::Public));
        assert!(set.contains(Modifier::Static));
        assert!(!set.contains(Modifier::Private));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![Modifier::Public, Modifier::Static]
        );
        assert!(ModifierSet::default().is_empty());
    }

    #[test]
    fn test_modifiers_from_set() {
        let set: ModifierSet = [Modifier::Protected, Modifier::Override].into_iter().collect();
        let modifiers = Modifiers::from(set);

        assert!(modifiers.is_protected);
        assert!(modifiers.is_override);
        assert!(!modifiers.is_public);
        assert_eq!(
            modifiers.active(),
            vec![Modifier::Protected, Modifier::Override]
        );
        assert!(Modifiers::default().is_empty());
    }

    #[test]
    fn test_visibility_flags_are_not_exclusive() {
        let set: ModifierSet = [Modifier::Public, Modifier::Private].into_iter().collect();
        let modifiers = Modifiers::from(set);
        assert!(modifiers.is_public && modifiers.is_private);
    }
}
