//! Algorithms for uniform random sampling from the membership lists of cells, microcells and
//! places. These are written to be generic over the container type so that callers can sample
//! from filtered iterators without collecting them first.

use crate::rand::seq::index::sample as choose_range;
use crate::rand::Rng;

/// Sample a random element uniformly from a container of known length.
///
/// We do not assume the container is randomly indexable, only that it can be iterated over.
pub fn sample_single_from_known_length<I, R, T>(rng: &mut R, mut iter: I) -> Option<T>
where
    R: Rng,
    I: Iterator<Item = T> + ExactSizeIterator<Item = T>,
{
    let len = iter.len();
    if len == 0 {
        return None;
    }
    // This little trick with `u32` makes this function 30% faster.
    let index = rng.random_range(0..len as u32) as usize;
    // The set need not be randomly indexable, so we have to use the `nth` method.
    iter.nth(index)
}

/// Sample multiple random elements uniformly without replacement from a container of known length.
/// If more samples are requested than the container holds, every element is returned.
///
/// We do not assume the container is randomly indexable, only that it can be iterated over.
/// The selected elements keep the order in which the iterator yields them.
pub fn sample_multiple_from_known_length<I, R, T>(
    rng: &mut R,
    iter: I,
    requested: usize,
) -> Vec<T>
where
    R: Rng,
    I: IntoIterator<Item = T> + ExactSizeIterator<Item = T>,
{
    let requested = requested.min(iter.len());
    if requested == 0 {
        return Vec::new();
    }
    let mut indexes = Vec::with_capacity(requested);
    indexes.extend(choose_range(rng, iter.len(), requested));
    indexes.sort_unstable();
    let mut index_iterator = indexes.into_iter();
    let Some(mut next_idx) = index_iterator.next() else {
        return Vec::new();
    };
    let mut selected = Vec::with_capacity(requested);

    for (idx, item) in iter.enumerate() {
        if idx == next_idx {
            selected.push(item);
            if let Some(i) = index_iterator.next() {
                next_idx = i;
            } else {
                break;
            }
        }
    }

    selected
}
