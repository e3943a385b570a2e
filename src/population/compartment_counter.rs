use strum::EnumCount;

use crate::InfectionStatus;

/// Number of people in each infection status, maintained incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompartmentCounter {
    counts: [usize; InfectionStatus::COUNT],
}

impl CompartmentCounter {
    pub(super) fn increment(&mut self, status: InfectionStatus) {
        self.counts[status.ordinal()] += 1;
    }

    /// # Panics
    ///
    /// Panics if the bucket is already empty, which means a status change
    /// bypassed `Population::update_status`.
    pub(super) fn decrement(&mut self, status: InfectionStatus) {
        let count = &mut self.counts[status.ordinal()];
        assert!(*count > 0, "compartment counter for {status} would go negative");
        *count -= 1;
    }

    /// Adds the counts of `other` to this counter.
    pub fn add(&mut self, other: &CompartmentCounter) {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts) {
            *count += other_count;
        }
    }

    #[must_use]
    pub fn count(&self, status: InfectionStatus) -> usize {
        self.counts[status.ordinal()]
    }

    #[must_use]
    pub fn counts(&self) -> &[usize; InfectionStatus::COUNT] {
        &self.counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn number_infectious(&self) -> usize {
        self.counts
            .iter()
            .enumerate()
            .filter(|(ordinal, _)| InfectionStatus::from_ordinal(*ordinal).is_infectious())
            .map(|(_, count)| count)
            .sum()
    }

    #[must_use]
    pub fn number_icu(&self) -> usize {
        self.count(InfectionStatus::InfectICU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_statuses() {
        let mut counter = CompartmentCounter::default();
        counter.increment(InfectionStatus::Susceptible);
        counter.increment(InfectionStatus::Susceptible);
        counter.increment(InfectionStatus::InfectICU);
        counter.decrement(InfectionStatus::Susceptible);
        counter.increment(InfectionStatus::InfectMild);

        assert_eq!(counter.count(InfectionStatus::Susceptible), 1);
        assert_eq!(counter.total(), 3);
        assert_eq!(counter.number_infectious(), 2);
        assert_eq!(counter.number_icu(), 1);
    }

    #[test]
    #[should_panic(expected = "would go negative")]
    fn decrement_empty_bucket() {
        let mut counter = CompartmentCounter::default();
        counter.decrement(InfectionStatus::Exposed);
    }
}
