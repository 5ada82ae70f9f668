//! The closed set of shape templates.

use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;

/// A named procedural shape recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Template {
    #[default]
    Heart,
    Flower,
    Saturn,
    Buddha,
    Fireworks,
}

impl Template {
    /// All templates in menu order.
    pub const ALL: [Template; 5] = [
        Template::Heart,
        Template::Flower,
        Template::Saturn,
        Template::Buddha,
        Template::Fireworks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Heart     => "Heart",
            Template::Flower    => "Flower",
            Template::Saturn    => "Saturn",
            Template::Buddha    => "Buddha",
            Template::Fireworks => "Fireworks",
        }
    }

    /// Zero-based position in [`Template::ALL`].
    pub fn index(self) -> usize {
        match self {
            Template::Heart     => 0,
            Template::Flower    => 1,
            Template::Saturn    => 2,
            Template::Buddha    => 3,
            Template::Fireworks => 4,
        }
    }

    /// The template after this one, wrapping around.
    pub fn next(self) -> Template {
        Template::ALL[(self.index() + 1) % Template::ALL.len()]
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts template names in any case, or the 1-based menu digits `1`–`5`.
impl FromStr for Template {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "heart"     => Ok(Template::Heart),
            "2" | "flower"    => Ok(Template::Flower),
            "3" | "saturn"    => Ok(Template::Saturn),
            "4" | "buddha"    => Ok(Template::Buddha),
            "5" | "fireworks" => Ok(Template::Fireworks),
            _ => Err(ShapeError::UnknownTemplate(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_digits() {
        assert_eq!("FLOWER".parse::<Template>().unwrap(), Template::Flower);
        assert_eq!(" saturn ".parse::<Template>().unwrap(), Template::Saturn);
        assert_eq!("5".parse::<Template>().unwrap(), Template::Fireworks);
    }

    #[test]
    fn parse_unknown_fails() {
        let err = "teapot".parse::<Template>().unwrap_err();
        assert_eq!(err, ShapeError::UnknownTemplate("teapot".into()));
    }

    #[test]
    fn index_matches_all_order() {
        for (i, t) in Template::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
        }
    }

    #[test]
    fn next_wraps() {
        assert_eq!(Template::Fireworks.next(), Template::Heart);
        assert_eq!(Template::Heart.next(), Template::Flower);
    }
}
