//! Typed form of one effect parameter segment.
//!
//! ## Grammar
//!
//! | Segment | Instruction |
//! |---------|-------------|
//! | `VP:<n>` | `VictoryPoints(n)` |
//! | `COINS:<n>` | `Coins(n)` |
//! | `MIL:<n>` | `Military(n)` |
//! | `PRICE:<side>:<n>` | `PriceRule` (side 0 left base, 1 right base, 2 both advanced) |
//! | `<i>:<n>` with `i` in 0-8 | `ResourceGrant` of `RESOURCE_ORDER[i]` |
//! | `<i>:<n>` with `i` in 9-12 | `ScienceGrant` of `SCIENCE_ORDER[i - 9]` |
//! | `<i>_<j>:<n>` with `i`, `j` in 0-3 | `MutablePairGrant` |
//! | `VINEYARD`, `LIGHTHOUSE`, `HAVEN`, `CHAMBER_OF_COMMERCE`, `BUILD_FROM_DISCARD`, `PLAY_LAST_CARDS` | `SpecialKeyword` |
//!
//! Anything else that parses (an out-of-range index, an unknown price side,
//! an invalid pair, an unknown word) becomes `Ignored`: applying it succeeds
//! and does nothing. Only malformed numbers are errors.
//!
//! ```
//! use wonders_engine::effects::{Instruction, Keyword};
//! use wonders_engine::resources::ResourceKind;
//!
//! assert_eq!(Instruction::parse("VP:3"), Ok(Instruction::VictoryPoints(3)));
//! assert_eq!(
//!     Instruction::parse("2:1"),
//!     Ok(Instruction::ResourceGrant { kind: ResourceKind::Ore, count: 1 })
//! );
//! assert_eq!(Instruction::parse("HAVEN"), Ok(Instruction::SpecialKeyword(Keyword::Haven)));
//! assert!(Instruction::parse("COINS:x").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resources::{ResourceKind, ResourcePair, ScienceKind};

/// Offset of the science table in the positional grant index.
pub const SCIENCE_INDEX_OFFSET: i64 = 9;

/// Which price multipliers a `PRICE` rule sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceSide {
    /// Side code 0: left base price.
    LeftBase,
    /// Side code 1: right base price.
    RightBase,
    /// Side code 2: advanced price on both sides.
    ///
    /// Codes 0 and 1 set base prices while 2 sets advanced ones. The card
    /// data relies on this encoding.
    BothAdvanced,
}

impl PriceSide {
    /// Decode a side code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(PriceSide::LeftBase),
            1 => Some(PriceSide::RightBase),
            2 => Some(PriceSide::BothAdvanced),
            _ => None,
        }
    }
}

/// Named special computations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// 1 coin per brown card owned by the player and both neighbours.
    Vineyard,
    /// 1 coin per own yellow card.
    Lighthouse,
    /// 1 coin per own brown card.
    Haven,
    /// 2 coins per own yellow card.
    ChamberOfCommerce,
    /// No immediate change; the owner must pick a card from the discard pile.
    BuildFromDiscard,
    /// Standing ability: the owner plays the last card of each age instead
    /// of discarding it. Stays queued for the rest of the game.
    PlayLastCards,
}

impl Keyword {
    /// Match an exact keyword.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "VINEYARD" => Some(Keyword::Vineyard),
            "LIGHTHOUSE" => Some(Keyword::Lighthouse),
            "HAVEN" => Some(Keyword::Haven),
            "CHAMBER_OF_COMMERCE" => Some(Keyword::ChamberOfCommerce),
            "BUILD_FROM_DISCARD" => Some(Keyword::BuildFromDiscard),
            "PLAY_LAST_CARDS" => Some(Keyword::PlayLastCards),
            _ => None,
        }
    }
}

/// One parsed segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    VictoryPoints(i32),
    Coins(i32),
    Military(i32),
    PriceRule { side: PriceSide, price: i32 },
    ResourceGrant { kind: ResourceKind, count: i32 },
    ScienceGrant { kind: ScienceKind, count: i32 },
    MutablePairGrant { pair: ResourcePair, count: i32 },
    SpecialKeyword(Keyword),
    /// Well-formed but meaningless here; applying it is a no-op.
    Ignored(String),
}

/// A segment that could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid number {text:?} in segment {segment:?}")]
    InvalidNumber { segment: String, text: String },

    #[error("missing field in segment {segment:?}")]
    MissingField { segment: String },
}

impl Instruction {
    /// Parse one segment. Surrounding whitespace is ignored.
    pub fn parse(segment: &str) -> Result<Self, ParseError> {
        let segment = segment.trim();

        if let Some(rest) = segment.strip_prefix("VP:") {
            return Ok(Instruction::VictoryPoints(int(segment, Some(rest))?));
        }
        if let Some(rest) = segment.strip_prefix("COINS:") {
            return Ok(Instruction::Coins(int(segment, Some(rest))?));
        }
        if let Some(rest) = segment.strip_prefix("MIL:") {
            return Ok(Instruction::Military(int(segment, Some(rest))?));
        }
        if let Some(rest) = segment.strip_prefix("PRICE:") {
            let mut fields = rest.split(':');
            let side: i64 = int(segment, fields.next())?;
            let price = int(segment, fields.next())?;
            return Ok(match PriceSide::from_code(side) {
                Some(side) => Instruction::PriceRule { side, price },
                None => Instruction::Ignored(segment.to_string()),
            });
        }

        if let Some((head, tail)) = segment.split_once(':') {
            let count_text = tail.split(':').next();
            if head.contains('_') {
                let mut indices = head.split('_');
                let a: i64 = int(segment, indices.next())?;
                let b: i64 = int(segment, indices.next())?;
                let count = int(segment, count_text)?;
                if let Some(pair) = pair_from(a, b) {
                    return Ok(Instruction::MutablePairGrant { pair, count });
                }
            } else {
                let index: i64 = int(segment, Some(head))?;
                let count = int(segment, count_text)?;
                if let Some(kind) = usize::try_from(index).ok().and_then(ResourceKind::from_index) {
                    return Ok(Instruction::ResourceGrant { kind, count });
                }
                if let Some(kind) = index
                    .checked_sub(SCIENCE_INDEX_OFFSET)
                    .and_then(|i| usize::try_from(i).ok())
                    .and_then(ScienceKind::from_index)
                {
                    return Ok(Instruction::ScienceGrant { kind, count });
                }
            }
        }

        Ok(match Keyword::parse(segment) {
            Some(keyword) => Instruction::SpecialKeyword(keyword),
            None => Instruction::Ignored(segment.to_string()),
        })
    }
}

fn pair_from(a: i64, b: i64) -> Option<ResourcePair> {
    let a = usize::try_from(a).ok()?;
    let b = usize::try_from(b).ok()?;
    ResourcePair::from_indices(a, b)
}

fn int<T: std::str::FromStr>(segment: &str, field: Option<&str>) -> Result<T, ParseError> {
    let text = field.ok_or_else(|| ParseError::MissingField {
        segment: segment.to_string(),
    })?;
    text.parse().map_err(|_| ParseError::InvalidNumber {
        segment: segment.to_string(),
        text: text.to_string(),
    })
}
