//! Synthetic cell values for bulk population
//!
//! Well-known column names get plausible data (`Name`, `Age`, `Address`);
//! anything else falls back to lorem words or a small integer.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::table::{CellValue, Column, ColumnType};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Chiara", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
    "Keiko", "Liam", "Maya", "Nils", "Olga", "Pablo", "Quinn", "Rosa", "Sven", "Tara",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Baker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Haugen",
    "Ivanova", "Jensen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Olsen", "Petrov",
];

const STREETS: &[&str] = &[
    "Maple Street", "Oak Avenue", "Harbor Road", "Mill Lane", "Station Road", "King Street",
    "Park Avenue", "Church Lane", "River Road", "Elm Court",
];

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
];

/// Random value source; seedable for reproducible runs
#[derive(Debug)]
pub struct SyntheticData {
    rng: StdRng,
}

impl SyntheticData {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, words: &[&'static str]) -> &'static str {
        words.choose(&mut self.rng).copied().unwrap_or("")
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    pub fn street_address(&mut self) -> String {
        let number: u32 = self.rng.gen_range(1..=9999);
        format!("{} {}", number, self.pick(STREETS))
    }

    pub fn lorem_words(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.pick(LOREM))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A value suited to the column's name and type
    pub fn value_for(&mut self, column: &Column) -> CellValue {
        match (column.column_type, column.name.as_str()) {
            (ColumnType::Text, "Name") => CellValue::Text(Some(self.full_name())),
            (ColumnType::Text, "Address") => CellValue::Text(Some(self.street_address())),
            (ColumnType::Text, _) => CellValue::Text(Some(self.lorem_words(3))),
            (ColumnType::Number, "Age") => {
                CellValue::Number(Some(self.rng.gen_range(18..=69) as f64))
            }
            (ColumnType::Number, _) => CellValue::Number(Some(self.rng.gen_range(1..=1000) as f64)),
        }
    }
}

impl Default for SyntheticData {
    fn default() -> Self {
        Self::new()
    }
}
