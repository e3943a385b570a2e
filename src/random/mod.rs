//! Independently seeded random number streams held by the `Context`.
//!
//! Each component defines its own stream with [`define_rng!`]. All streams are derived from a
//! single base seed (see [`ContextRandomExt::init_random`]), so a run is reproducible given the
//! seed while draws in one component never shift the sequence seen by another.
mod context_ext;
mod sampling_algorithms;

use std::any::{Any, TypeId};
use std::cell::RefCell;

pub use context_ext::ContextRandomExt;
pub use crate::define_rng;
pub use sampling_algorithms::{
    sample_multiple_from_known_length, sample_single_from_known_length,
};

use crate::rand::SeedableRng;
use crate::{define_data_plugin, HashMap, HashMapExt};

/// Names a random number stream. Implemented by [`define_rng!`].
pub trait RngId: Copy + Clone {
    type RngType: SeedableRng;
    fn get_name() -> &'static str;
}

struct RngData {
    base_seed: u64,
    /// One generator per stream, created on first use and keyed by the
    /// `RngId` type. Interior mutability lets sampling take `&Context`.
    streams: RefCell<HashMap<TypeId, Box<dyn Any>>>,
}

define_data_plugin!(
    RngPlugin,
    RngData,
    RngData {
        base_seed: 0,
        streams: RefCell::new(HashMap::new()),
    }
);
