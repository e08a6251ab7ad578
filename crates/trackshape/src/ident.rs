//! Identifier service: random (version 4) UUIDs behind a swappable generator.
//!
//! - `IdGenerator`: anything that can hand out ids from several threads.
//! - `RandomIdGenerator`: a `rand` RNG behind a mutex. `seeded` gives a
//!   reproducible sequence, `from_entropy` is the default.
//! - A process-wide default generator, created on first use and replaceable
//!   with `set_generator` (e.g. a seeded one for reproducible runs).

use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

/// Source of unique identifiers. Implementations must be callable concurrently.
pub trait IdGenerator: Send + Sync {
    fn generate_id(&self) -> Uuid;
}

/// Version-4 UUIDs drawn from a random generator.
#[derive(Debug)]
pub struct RandomIdGenerator<R = StdRng> {
    rng: Mutex<R>,
}

impl<R: RngCore> RandomIdGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl RandomIdGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Same seed, same id sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomIdGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore + Send> IdGenerator for RandomIdGenerator<R> {
    fn generate_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

fn slot() -> &'static RwLock<Arc<dyn IdGenerator>> {
    static SLOT: OnceLock<RwLock<Arc<dyn IdGenerator>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(Arc::new(RandomIdGenerator::from_entropy())))
}

/// Current process-wide generator.
pub fn generator() -> Arc<dyn IdGenerator> {
    slot()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Install `g` as the process-wide generator; returns the previous one.
pub fn set_generator(g: Arc<dyn IdGenerator>) -> Arc<dyn IdGenerator> {
    let mut guard = slot().write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *guard, g)
}

/// Fresh id from the process-wide generator.
pub fn generate_id() -> Uuid {
    generator().generate_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    // Tests that swap the global generator must not interleave.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn ids_are_version_4() {
        let id = RandomIdGenerator::seeded(7).generate_id();
        assert_eq!(id.get_version_num(), 4);
        assert_eq!(id.get_variant(), uuid::Variant::RFC4122);
    }

    #[test]
    fn seeded_generators_repeat() {
        let a = RandomIdGenerator::seeded(42);
        let b = RandomIdGenerator::seeded(42);
        let c = RandomIdGenerator::seeded(43);
        let xs: Vec<Uuid> = (0..5).map(|_| a.generate_id()).collect();
        let ys: Vec<Uuid> = (0..5).map(|_| b.generate_id()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs[0], c.generate_id());
    }

    #[test]
    fn concurrent_ids_are_unique() {
        let g: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::from_entropy());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let g = Arc::clone(&g);
                thread::spawn(move || (0..500).map(|_| g.generate_id()).collect::<Vec<_>>())
            })
            .collect();
        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 4000);
    }

    #[test]
    fn global_generator_can_be_swapped() {
        let _guard = TEST_LOCK.lock().unwrap();
        let prev = set_generator(Arc::new(RandomIdGenerator::seeded(99)));
        let first = generate_id();
        set_generator(Arc::new(RandomIdGenerator::seeded(99)));
        assert_eq!(generate_id(), first);
        set_generator(prev);
    }

    struct Fixed(Uuid);

    impl IdGenerator for Fixed {
        fn generate_id(&self) -> Uuid {
            self.0
        }
    }

    #[test]
    fn custom_generator_is_used() {
        let _guard = TEST_LOCK.lock().unwrap();
        let prev = set_generator(Arc::new(Fixed(Uuid::nil())));
        assert!(generate_id().is_nil());
        set_generator(prev);
        assert!(!generate_id().is_nil());
    }
}
