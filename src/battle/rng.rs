use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::Die;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    /// Replays a fixed list of draw results in order.
    #[cfg(test)]
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// Deterministic random source owned by a battle.
///
/// Every draw is a domain-specific helper so a log of `trace!` lines reads
/// like the battle itself. Cloning (or [`BattleRng::fork`]) continues an
/// identical stream from the current position without touching the original.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
    draws: u64,
}

impl BattleRng {
    /// Seeds the stream from an opaque string.
    pub fn from_seed_str(seed: &str) -> Self {
        let hashed = seed.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        });
        Self::from_seed_u64(hashed)
    }

    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
            draws: 0,
        }
    }

    /// Returns a stream whose draws are exactly `outcomes`, in order.
    /// Panics once the list is exhausted.
    #[cfg(test)]
    pub fn scripted(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
            draws: 0,
        }
    }

    /// Independent copy continuing from the same position, for look-ahead search.
    pub fn fork(&self) -> Self {
        self.clone()
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    fn next_in_range(&mut self, min: u32, max: u32, reason: &str) -> u32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(low..=high),
            #[cfg(test)]
            RngSource::Scripted { outcomes, index } => {
                let Some(outcome) = outcomes.get(*index).copied() else {
                    panic!("Scripted RNG exhausted while drawing for '{}'", reason);
                };
                *index += 1;
                outcome.clamp(low, high)
            }
        };
        self.draws += 1;
        trace!("[RNG] {} in {}..={} -> {}", reason, low, high, value);
        value
    }

    /// Uniform integer in `min..=max`.
    pub fn uniform_between(&mut self, min: u32, max: u32) -> u32 {
        self.next_in_range(min, max, "uniform")
    }

    /// True with probability `percent / 100`. Certain outcomes consume no draw.
    pub fn percent_chance(&mut self, percent: i32) -> bool {
        if percent <= 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.next_in_range(1, 100, "percent chance") <= percent as u32
    }

    pub fn roll(&mut self, die: Die) -> u32 {
        let reason = match die {
            Die::D3 => "d3",
            Die::D5 => "d5",
            Die::D6 => "d6",
            Die::D10 => "d10",
        };
        self.next_in_range(1, die.faces(), reason)
    }

    pub fn d3(&mut self) -> u32 {
        self.roll(Die::D3)
    }

    pub fn d5(&mut self) -> u32 {
        self.roll(Die::D5)
    }

    pub fn d6(&mut self) -> u32 {
        self.roll(Die::D6)
    }

    pub fn d10(&mut self) -> u32 {
        self.roll(Die::D10)
    }

    /// Turns of confusion, 1..=4.
    pub fn confusion_duration(&mut self) -> u32 {
        self.next_in_range(1, 4, "confusion duration")
    }

    /// Damage band, 85..=100 percent.
    pub fn damage_roll_percent(&mut self) -> u32 {
        self.next_in_range(85, 100, "damage roll")
    }
}
