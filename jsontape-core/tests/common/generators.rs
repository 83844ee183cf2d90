//! Random JSON trees for stochastic tests
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use jsontape_core::Value;

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from `JSONTAPE_TEST_SEED` or a random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("JSONTAPE_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Count until rand > alpha: 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Short string drawn from ASCII, a few multi-byte characters and
    /// characters that need escaping in JSON text.
    pub fn string(&mut self) -> String {
        const PIECES: &[&str] = &["a", "b", "z", "0", " ", "\"", "\\", "\n", "é", "日", "🦀", "\u{0}"];
        let len = self.geometric(0.6);
        (0..len)
            .map(|_| PIECES[self.rng.gen_range(0..PIECES.len())])
            .collect()
    }

    /// Any scalar value.
    pub fn scalar(&mut self) -> Value {
        match self.rng.gen_range(0..6) {
            0 => Value::Integer(self.rng.gen()),
            1 => Value::Double(self.rng.gen_range(-1.0e9..1.0e9)),
            2 => Value::Null,
            3 => Value::Bool(self.rng.gen()),
            _ => Value::String(self.string()),
        }
    }

    /// Random tree no deeper than `depth`.
    pub fn value(&mut self, depth: usize) -> Value {
        if depth == 0 || self.chance(0.4) {
            return self.scalar();
        }
        if self.chance(0.5) {
            self.array(depth)
        } else {
            self.object(depth)
        }
    }

    pub fn array(&mut self, depth: usize) -> Value {
        let len = self.geometric(0.7);
        Value::Array((0..len).map(|_| self.value(depth - 1)).collect())
    }

    pub fn object(&mut self, depth: usize) -> Value {
        let len = self.geometric(0.7);
        let mut members = BTreeMap::new();
        for _ in 0..len {
            members.insert(self.string(), self.value(depth - 1));
        }
        Value::Object(members)
    }

    /// Random array or object root, as JSON text accepts.
    pub fn document(&mut self, depth: usize) -> Value {
        let depth = depth.max(1);
        if self.chance(0.5) {
            self.array(depth)
        } else {
            self.object(depth)
        }
    }
}
