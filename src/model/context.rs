//! Per-base presentation context (name and accent color)
//!
//! Set when navigating into a base, cleared when leaving it, and handed to
//! rendering as an explicit parameter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Accent color assigned to a base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl BaseColor {
    pub const ALL: [BaseColor; 5] = [
        BaseColor::Red,
        BaseColor::Blue,
        BaseColor::Green,
        BaseColor::Yellow,
        BaseColor::Purple,
    ];

    /// Pick a color at random for a newly created base
    pub fn random() -> Self {
        use rand::seq::SliceRandom;
        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&BaseColor::Blue)
    }

    /// ANSI foreground escape used by the terminal renderer
    pub fn ansi(self) -> &'static str {
        match self {
            BaseColor::Red => "\x1b[31m",
            BaseColor::Blue => "\x1b[34m",
            BaseColor::Green => "\x1b[32m",
            BaseColor::Yellow => "\x1b[33m",
            BaseColor::Purple => "\x1b[35m",
        }
    }
}

impl fmt::Display for BaseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BaseColor::Red => "red",
            BaseColor::Blue => "blue",
            BaseColor::Green => "green",
            BaseColor::Yellow => "yellow",
            BaseColor::Purple => "purple",
        };
        f.write_str(name)
    }
}

/// Scoped context for the base currently being viewed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseContext {
    pub base_name: String,
    pub color: BaseColor,
}

impl BaseContext {
    pub fn new(base_name: impl Into<String>, color: BaseColor) -> Self {
        Self {
            base_name: base_name.into(),
            color,
        }
    }
}
