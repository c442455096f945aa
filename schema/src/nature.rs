use crate::StatType;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    /// The stat this nature raises by 10%, if any.
    pub fn increased_stat(self) -> Option<StatType> {
        use Nature::*;
        match self {
            Lonely | Adamant | Naughty | Brave => Some(StatType::Attack),
            Bold | Impish | Lax | Relaxed => Some(StatType::Defense),
            Modest | Mild | Rash | Quiet => Some(StatType::SpecialAttack),
            Calm | Gentle | Careful | Sassy => Some(StatType::SpecialDefense),
            Timid | Hasty | Jolly | Naive => Some(StatType::Speed),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    /// The stat this nature lowers by 10%, if any.
    pub fn decreased_stat(self) -> Option<StatType> {
        use Nature::*;
        match self {
            Bold | Modest | Calm | Timid => Some(StatType::Attack),
            Lonely | Mild | Gentle | Hasty => Some(StatType::Defense),
            Adamant | Impish | Careful | Jolly => Some(StatType::SpecialAttack),
            Naughty | Lax | Rash | Naive => Some(StatType::SpecialDefense),
            Brave | Relaxed | Quiet | Sassy => Some(StatType::Speed),
            Hardy | Docile | Serious | Bashful | Quirky => None,
        }
    }

    /// Percentage applied to a stat: 110, 100 or 90.
    pub fn modifier_percent(self, stat: StatType) -> u32 {
        if self.increased_stat() == Some(stat) {
            110
        } else if self.decreased_stat() == Some(stat) {
            90
        } else {
            100
        }
    }
}
