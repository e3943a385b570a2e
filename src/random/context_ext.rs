use std::any::{Any, TypeId};
use std::cell::RefMut;

use log::trace;

use crate::error::EpiabmError;
use crate::hashing::hash_str;
use crate::rand::distr::uniform::{SampleRange, SampleUniform};
use crate::rand::distr::weighted::{Weight, WeightedIndex};
use crate::rand::distr::Distribution;
use crate::rand::{Rng, SeedableRng};
use crate::random::RngPlugin;
use crate::{Context, RngId};

/// The generator of stream `R`, seeded from the base seed and the stream's
/// name the first time it is used.
///
/// # Panics
///
/// Panics if `init_random` has not been called.
fn get_rng<R: RngId + 'static>(context: &Context) -> RefMut<R::RngType> {
    let data_container = context
        .get_data(RngPlugin)
        .expect("You must initialize the random number generator with a base seed");

    let streams = data_container
        .streams
        .try_borrow_mut()
        .expect("random number generators are not borrowed re-entrantly");
    RefMut::map(streams, |streams| {
        streams
            .entry(TypeId::of::<R>())
            .or_insert_with(|| {
                let seed = data_container
                    .base_seed
                    .wrapping_add(hash_str(R::get_name()));
                trace!("creating RNG {} with seed {seed}", R::get_name());
                let rng: Box<dyn Any> = Box::new(R::RngType::seed_from_u64(seed));
                rng
            })
            .downcast_mut::<R::RngType>()
            .expect("each stream is stored under the type of its RngId")
    })
}

// This is a trait extension on Context for
// random number generation functionality.
pub trait ContextRandomExt {
    /// Initializes the `RngPlugin` data container to store rngs as well as a base
    /// seed. Note that rngs are created lazily when they are first sampled from.
    fn init_random(&mut self, base_seed: u64);

    /// Gets a random sample from the random number generator associated with the given
    /// [`RngId`] by applying the specified sampler function. If the Rng has not been used
    /// before, one will be created with the base seed you defined in `init_random`.
    /// Note that this will panic if `init_random` was not called yet.
    fn sample<R: RngId + 'static, T>(
        &self,
        rng_type: R,
        sampler: impl FnOnce(&mut R::RngType) -> T,
    ) -> T;

    /// Gets a random sample from the specified distribution using a random number generator
    /// associated with the given [`RngId`].
    fn sample_distr<R: RngId + 'static, T>(
        &self,
        rng_type: R,
        distribution: impl Distribution<T>,
    ) -> T
    where
        R::RngType: Rng;

    /// Gets a random sample within the range provided by `range`
    /// using the generator associated with the given [`RngId`].
    fn sample_range<R: RngId + 'static, S, T>(&self, rng_id: R, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform;

    /// Gets a random boolean value which is true with probability `p`
    /// using the generator associated with the given [`RngId`].
    /// `p` is clamped to `[0, 1]`.
    fn sample_bool<R: RngId + 'static>(&self, rng_id: R, p: f64) -> bool
    where
        R::RngType: Rng;

    /// Draws a random index out of the list provided in `weights`
    /// with the given weights using the generator associated with the
    /// given [`RngId`].
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if the weights are empty, negative,
    /// or all zero.
    fn sample_weighted<R: RngId + 'static, T>(
        &self,
        rng_id: R,
        weights: &[T],
    ) -> Result<usize, EpiabmError>
    where
        R::RngType: Rng,
        T: Clone
            + Default
            + SampleUniform
            + for<'a> std::ops::AddAssign<&'a T>
            + PartialOrd
            + Weight;
}

impl ContextRandomExt for Context {
    fn init_random(&mut self, base_seed: u64) {
        trace!("initializing random module");
        let data_container = self.get_data_mut(RngPlugin);
        data_container.base_seed = base_seed;

        // Clear any existing Rngs to ensure they get re-seeded when they are next used
        data_container.streams.get_mut().clear();
    }

    fn sample<R: RngId + 'static, T>(
        &self,
        _rng_type: R,
        sampler: impl FnOnce(&mut R::RngType) -> T,
    ) -> T {
        let mut rng = get_rng::<R>(self);
        sampler(&mut rng)
    }

    fn sample_distr<R: RngId + 'static, T>(
        &self,
        _rng_type: R,
        distribution: impl Distribution<T>,
    ) -> T
    where
        R::RngType: Rng,
    {
        let mut rng = get_rng::<R>(self);
        distribution.sample::<R::RngType>(&mut rng)
    }

    fn sample_range<R: RngId + 'static, S, T>(&self, rng_id: R, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample(rng_id, |rng| rng.random_range(range))
    }

    fn sample_bool<R: RngId + 'static>(&self, rng_id: R, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| rng.random_bool(p.clamp(0.0, 1.0)))
    }

    fn sample_weighted<R: RngId + 'static, T>(
        &self,
        _rng_id: R,
        weights: &[T],
    ) -> Result<usize, EpiabmError>
    where
        R::RngType: Rng,
        T: Clone
            + Default
            + SampleUniform
            + for<'a> std::ops::AddAssign<&'a T>
            + PartialOrd
            + Weight,
    {
        let index = WeightedIndex::new(weights).map_err(|e| {
            EpiabmError::ConfigurationError(format!("invalid sampling weights: {e}"))
        })?;
        let mut rng = get_rng::<R>(self);
        Ok(index.sample(&mut *rng))
    }
}
