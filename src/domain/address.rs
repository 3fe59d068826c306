// SPDX-License-Identifier: MPL-2.0
//! Navigation address codec.
//!
//! An address is the colon-delimited location fragment that decides what a
//! screen shows, e.g. `albumId:imageId` for the viewer or `3` for the third
//! bookshelf page. Positional meaning is defined by the screen, not here.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Component separator inside a location fragment.
pub const SEPARATOR: char = ':';

/// Parsed location fragment: an ordered list of string components.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Address {
    components: Vec<String>,
}

impl Address {
    /// Parses a location fragment. Never fails.
    ///
    /// A single leading `#` is ignored so raw `location.hash` values can be
    /// passed through unchanged. Empty input yields an empty address.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        if raw.is_empty() {
            return Self::default();
        }

        Self {
            components: raw.split(SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Builds an address from already-separated components.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns component `index`, or `None` when the address is shorter.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&str> {
        self.components.get(index).map(String::as_str)
    }

    /// Interprets component `index` as a 1-based page number.
    ///
    /// Absent, non-numeric and zero components all resolve to page 1.
    #[must_use]
    pub fn page(&self, index: usize) -> u32 {
        self.component(index)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_address() {
        let address = Address::parse("");
        assert!(address.is_empty());
        assert_eq!(address.component(0), None);

        assert!(Address::parse("#").is_empty());
    }

    #[test]
    fn splits_on_colon() {
        let address = Address::parse("42:7");
        assert_eq!(address.len(), 2);
        assert_eq!(address.component(0), Some("42"));
        assert_eq!(address.component(1), Some("7"));
        assert_eq!(address.component(2), None);
    }

    #[test]
    fn leading_hash_is_ignored() {
        assert_eq!(Address::parse("#abc:def"), Address::parse("abc:def"));
    }

    #[test]
    fn empty_components_are_preserved() {
        let address = Address::parse("a::b");
        assert_eq!(address.len(), 3);
        assert_eq!(address.component(1), Some(""));
    }

    #[test]
    fn display_round_trips_components() {
        let address = Address::from_components(["album", "image"]);
        assert_eq!(address.to_string(), "album:image");
        assert_eq!(address.to_string().parse::<Address>().unwrap(), address);
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(Address::parse("").page(0), 1);
        assert_eq!(Address::parse("abc").page(0), 1);
        assert_eq!(Address::parse("0").page(0), 1);
        assert_eq!(Address::parse("5").page(0), 5);
        assert_eq!(Address::parse("author:3").page(1), 3);
    }
}
