use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of TCL variable names for stored nodes.
pub trait NodeIds {
    fn next_id(&mut self, name: &str) -> String;
}

/// `N<crc32(name + random)>`, unique enough to avoid clashing with names
/// already in a script.
#[derive(Debug)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NodeIds for RandomIds {
    fn next_id(&mut self, name: &str) -> String {
        let salt: f64 = self.rng.gen();
        let hash = crc32fast::hash(format!("{name}{salt}").as_bytes());
        format!("N{hash}")
    }
}

/// `N1`, `N2`, ... in call order. Deterministic output for tests and diffs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u32,
}

impl NodeIds for SequentialIds {
    fn next_id(&mut self, _name: &str) -> String {
        self.next += 1;
        format!("N{}", self.next)
    }
}
