use std::collections::HashSet;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::{GameError, Result};

/// Rejections tolerated per draw before picking directly among the values
/// still left in the cycle.
const MAX_REJECTIONS: usize = 64;

/// Values already handed out in the current cycle for one bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawPool {
    drawn: HashSet<u32>,
    bound: Option<u32>,
}

impl DrawPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    pub fn contains(&self, value: u32) -> bool {
        self.drawn.contains(&value)
    }

    /// Bound the current cycle was drawn under, if any.
    pub fn bound(&self) -> Option<u32> {
        self.bound
    }

    /// Draws a value in `1..=bound` not yet handed out this cycle. The cycle
    /// restarts once every value has been drawn, or when `bound` differs from
    /// the one the cycle was started with.
    pub fn draw<R: Rng>(&mut self, bound: u32, rng: &mut R) -> Result<u32> {
        if bound < 1 {
            return Err(GameError::InvalidConfiguration(format!(
                "draw bound must be at least 1, got {}",
                bound
            )));
        }
        if self.bound != Some(bound) {
            if !self.drawn.is_empty() {
                trace!(target: "draw_pool", "Bound changed {:?} -> {}; starting a new cycle", self.bound, bound);
            }
            self.drawn.clear();
            self.bound = Some(bound);
        } else if self.drawn.len() >= bound as usize {
            trace!(target: "draw_pool", "Pool exhausted at {} values; starting a new cycle", bound);
            self.drawn.clear();
        }

        for _ in 0..MAX_REJECTIONS {
            let candidate = rng.random_range(1..=bound);
            if self.drawn.insert(candidate) {
                return Ok(candidate);
            }
        }

        let remaining: Vec<u32> = (1..=bound).filter(|v| !self.drawn.contains(v)).collect();
        let value = remaining[rng.random_range(0..remaining.len())];
        self.drawn.insert(value);
        Ok(value)
    }
}

/// Functional form: consumes the pool and hands back the updated one.
pub fn draw<R: Rng>(
    bound: u32,
    mut pool: DrawPool,
    rng: &mut R,
) -> Result<(u32, DrawPool)> {
    let value = pool.draw(bound, rng)?;
    Ok((value, pool))
}

/// Where the controller gets each round's secret from.
pub trait SecretSource {
    fn next_secret(&mut self, bound: u32) -> Result<u32>;
}

/// Non-repeating random draw. The pool follows the bound: switching to a
/// different bound starts a fresh cycle.
#[derive(Debug)]
pub struct RandomDraw {
    rng: StdRng,
    pool: DrawPool,
}

impl RandomDraw {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().next_u64());
        trace!(target: "draw_pool", "Seeding secret draw with {}", seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
            pool: DrawPool::new(),
        }
    }

    pub fn pool(&self) -> &DrawPool {
        &self.pool
    }
}

impl SecretSource for RandomDraw {
    fn next_secret(&mut self, bound: u32) -> Result<u32> {
        self.pool.draw(bound, &mut self.rng)
    }
}

/// Always the same secret. Clamped into range so it never breaks a round.
#[derive(Debug, Clone, Copy)]
pub struct FixedSecret(pub u32);

impl SecretSource for FixedSecret {
    fn next_secret(&mut self, bound: u32) -> Result<u32> {
        if bound < 1 {
            return Err(GameError::InvalidConfiguration(format!(
                "draw bound must be at least 1, got {}",
                bound
            )));
        }
        Ok(self.0.clamp(1, bound))
    }
}
