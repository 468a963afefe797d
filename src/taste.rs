//! Taste impressions
//!
//! A visit (or a venue) is described by five subjective levels from 1 to 5.
//! Averages of many impressions are kept as fractional profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lowest accepted taste level
pub const MIN_LEVEL: u8 = 1;
/// Highest accepted taste level
pub const MAX_LEVEL: u8 = 5;
/// Number of taste dimensions
pub const DIMENSIONS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TasteError {
    #[error("{dimension} must be between 1 and 5, got {value}")]
    OutOfRange { dimension: Dimension, value: u8 },

    #[error("expected five comma-separated levels (spiciness,sweetness,saltiness,acidity,richness), got '{0}'")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Spiciness,
    Sweetness,
    Saltiness,
    Acidity,
    Richness,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSIONS] = [
        Dimension::Spiciness,
        Dimension::Sweetness,
        Dimension::Saltiness,
        Dimension::Acidity,
        Dimension::Richness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Spiciness => "spiciness",
            Dimension::Sweetness => "sweetness",
            Dimension::Saltiness => "saltiness",
            Dimension::Acidity => "acidity",
            Dimension::Richness => "richness",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialized shape of a taste vector, validated on the way in
#[derive(Deserialize)]
struct RawTaste {
    spiciness: u8,
    sweetness: u8,
    saltiness: u8,
    acidity: u8,
    richness: u8,
}

/// One recorded taste impression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTaste")]
pub struct TasteVector {
    spiciness: u8,
    sweetness: u8,
    saltiness: u8,
    acidity: u8,
    richness: u8,
}

impl TryFrom<RawTaste> for TasteVector {
    type Error = TasteError;

    fn try_from(raw: RawTaste) -> Result<Self, Self::Error> {
        TasteVector::new(
            raw.spiciness,
            raw.sweetness,
            raw.saltiness,
            raw.acidity,
            raw.richness,
        )
    }
}

impl TasteVector {
    pub fn new(
        spiciness: u8,
        sweetness: u8,
        saltiness: u8,
        acidity: u8,
        richness: u8,
    ) -> Result<Self, TasteError> {
        Self::from_levels([spiciness, sweetness, saltiness, acidity, richness])
    }

    /// Build from levels ordered as [`Dimension::ALL`]
    pub fn from_levels(levels: [u8; DIMENSIONS]) -> Result<Self, TasteError> {
        for (dimension, value) in Dimension::ALL.into_iter().zip(levels) {
            if !(MIN_LEVEL..=MAX_LEVEL).contains(&value) {
                return Err(TasteError::OutOfRange { dimension, value });
            }
        }

        let [spiciness, sweetness, saltiness, acidity, richness] = levels;
        Ok(Self {
            spiciness,
            sweetness,
            saltiness,
            acidity,
            richness,
        })
    }

    pub fn levels(&self) -> [u8; DIMENSIONS] {
        [
            self.spiciness,
            self.sweetness,
            self.saltiness,
            self.acidity,
            self.richness,
        ]
    }

    pub fn level(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Spiciness => self.spiciness,
            Dimension::Sweetness => self.sweetness,
            Dimension::Saltiness => self.saltiness,
            Dimension::Acidity => self.acidity,
            Dimension::Richness => self.richness,
        }
    }
}

impl fmt::Display for TasteVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e] = self.levels();
        write!(f, "{},{},{},{},{}", a, b, c, d, e)
    }
}

impl FromStr for TasteVector {
    type Err = TasteError;

    /// Parse the `spiciness,sweetness,saltiness,acidity,richness` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != DIMENSIONS {
            return Err(TasteError::Malformed(s.to_string()));
        }

        let mut levels = [0u8; DIMENSIONS];
        for (slot, part) in levels.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| TasteError::Malformed(s.to_string()))?;
        }

        Self::from_levels(levels)
    }
}

/// Per-dimension averages over a set of taste vectors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TasteProfile {
    pub spiciness: f32,
    pub sweetness: f32,
    pub saltiness: f32,
    pub acidity: f32,
    pub richness: f32,
}

impl TasteProfile {
    pub fn values(&self) -> [f32; DIMENSIONS] {
        [
            self.spiciness,
            self.sweetness,
            self.saltiness,
            self.acidity,
            self.richness,
        ]
    }

    /// Arithmetic mean of each dimension, or `None` for an empty input.
    pub fn average<'a, I>(vectors: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a TasteVector>,
    {
        let mut sums = [0u32; DIMENSIONS];
        let mut count = 0u32;

        for vector in vectors {
            for (sum, level) in sums.iter_mut().zip(vector.levels()) {
                *sum += u32::from(level);
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }

        let mean = |sum: u32| sum as f32 / count as f32;
        Some(Self {
            spiciness: mean(sums[0]),
            sweetness: mean(sums[1]),
            saltiness: mean(sums[2]),
            acidity: mean(sums[3]),
            richness: mean(sums[4]),
        })
    }

    /// Dimension with the highest average (first one wins on ties)
    pub fn dominant(&self) -> Dimension {
        let values = self.values();
        let mut best = 0;
        for i in 1..DIMENSIONS {
            if values[i] > values[best] {
                best = i;
            }
        }
        Dimension::ALL[best]
    }
}

impl From<TasteVector> for TasteProfile {
    fn from(vector: TasteVector) -> Self {
        let [a, b, c, d, e] = vector.levels();
        Self {
            spiciness: f32::from(a),
            sweetness: f32::from(b),
            saltiness: f32::from(c),
            acidity: f32::from(d),
            richness: f32::from(e),
        }
    }
}

impl fmt::Display for TasteProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spiciness {:.1}, sweetness {:.1}, saltiness {:.1}, acidity {:.1}, richness {:.1}",
            self.spiciness, self.sweetness, self.saltiness, self.acidity, self.richness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taste(levels: [u8; 5]) -> TasteVector {
        TasteVector::from_levels(levels).unwrap()
    }

    // --- TasteVector ---

    #[test]
    fn test_new_accepts_bounds() {
        assert!(TasteVector::new(1, 1, 1, 1, 1).is_ok());
        assert!(TasteVector::new(5, 5, 5, 5, 5).is_ok());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(
            TasteVector::new(3, 0, 3, 3, 3),
            Err(TasteError::OutOfRange {
                dimension: Dimension::Sweetness,
                value: 0
            })
        );
        assert_eq!(
            TasteVector::new(3, 3, 3, 3, 6),
            Err(TasteError::OutOfRange {
                dimension: Dimension::Richness,
                value: 6
            })
        );
    }

    #[test]
    fn test_parse_text_form() {
        let parsed: TasteVector = "4, 2,3,1 ,5".parse().unwrap();
        assert_eq!(parsed.levels(), [4, 2, 3, 1, 5]);
        assert_eq!(parsed.to_string(), "4,2,3,1,5");
        assert_eq!(parsed.level(Dimension::Acidity), 1);
    }

    #[test]
    fn test_parse_rejects_wrong_arity_and_garbage() {
        assert!(matches!(
            "1,2,3,4".parse::<TasteVector>(),
            Err(TasteError::Malformed(_))
        ));
        assert!(matches!(
            "1,2,x,4,5".parse::<TasteVector>(),
            Err(TasteError::Malformed(_))
        ));
        assert!(matches!(
            "1,2,3,4,9".parse::<TasteVector>(),
            Err(TasteError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_deserialize_validates_levels() {
        let ok: TasteVector = serde_json::from_str(
            r#"{"spiciness":1,"sweetness":2,"saltiness":3,"acidity":4,"richness":5}"#,
        )
        .unwrap();
        assert_eq!(ok.levels(), [1, 2, 3, 4, 5]);

        let bad = serde_json::from_str::<TasteVector>(
            r#"{"spiciness":1,"sweetness":2,"saltiness":3,"acidity":4,"richness":7}"#,
        );
        assert!(bad.is_err());
    }

    // --- TasteProfile ---

    #[test]
    fn test_average_empty_is_none() {
        let none: [TasteVector; 0] = [];
        assert_eq!(TasteProfile::average(&none), None);
    }

    #[test]
    fn test_average_is_per_dimension_mean() {
        let vectors = [taste([1, 2, 3, 4, 5]), taste([3, 2, 1, 4, 4])];
        let profile = TasteProfile::average(&vectors).unwrap();
        assert_eq!(profile.values(), [2.0, 2.0, 2.0, 4.0, 4.5]);
    }

    #[test]
    fn test_profile_from_vector_is_lossless() {
        let profile = TasteProfile::from(taste([5, 1, 2, 3, 4]));
        assert_eq!(profile.values(), [5.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_dominant_prefers_first_on_tie() {
        let profile = TasteProfile::from(taste([2, 4, 4, 1, 3]));
        assert_eq!(profile.dominant(), Dimension::Sweetness);
    }
}
