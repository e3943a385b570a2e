use log::debug;

use super::Intervention;
use crate::error::EpiabmError;
use crate::parameters::{ActivationWindow, SocialDistancingParams};
use crate::population::{MicrocellId, PersonId};
use crate::{
    define_rng, Context, ContextParametersExt, ContextPopulationExt, ContextRandomExt,
};

define_rng!(SocialDistancingRng);

/// Microcells with enough infectious residents start distancing. When ages
/// are modelled, each compliant resident distances strictly with the
/// probability of their age group and normally otherwise; without ages
/// everyone distances normally.
pub struct SocialDistancing {
    params: SocialDistancingParams,
}

impl SocialDistancing {
    #[must_use]
    pub fn new(params: SocialDistancingParams) -> SocialDistancing {
        SocialDistancing { params }
    }

    /// The distancing level of each resident of `microcell` who is assigned
    /// one. Non-compliant residents keep whatever they had.
    fn assign(&self, context: &Context, microcell: MicrocellId) -> Vec<(PersonId, bool)> {
        let use_ages = context.parameters().use_ages;
        let population = context.population();
        let mut assigned = Vec::new();
        for person_id in population.microcell(microcell).persons() {
            if !use_ages {
                assigned.push((*person_id, false));
                continue;
            }
            if !context.sample_bool(SocialDistancingRng, self.params.distancing_compliant) {
                continue;
            }
            let age_group = population.person(*person_id).age_group;
            let enhanced_prob = self
                .params
                .distancing_enhanced_prob
                .get(age_group)
                .copied()
                .unwrap_or(0.0);
            let enhanced = context.sample_bool(SocialDistancingRng, enhanced_prob);
            assigned.push((*person_id, enhanced));
        }
        assigned
    }
}

impl Intervention for SocialDistancing {
    fn name(&self) -> &'static str {
        "social_distancing"
    }

    fn window(&self) -> &ActivationWindow {
        &self.params.window
    }

    fn apply(&mut self, context: &mut Context, time: f64) -> Result<(), EpiabmError> {
        let population = context.population();
        let mut stopping = Vec::new();
        let mut starting = Vec::new();
        for microcell_id in population.microcell_ids() {
            let microcell = population.microcell(microcell_id);
            match microcell.distancing_start_time {
                Some(start) if time > start + self.params.distancing_duration => {
                    stopping.push(microcell_id);
                }
                Some(_) => {}
                None if microcell.count_infectious() >= self.params.case_microcell_threshold => {
                    starting.push((microcell_id, self.assign(context, microcell_id)));
                }
                None => {}
            }
        }
        if !starting.is_empty() {
            debug!("{} microcells start distancing at {time}", starting.len());
        }

        let population = context.population_mut();
        for microcell in stopping {
            population.microcell_mut(microcell).distancing_start_time = None;
        }
        for (microcell, assigned) in starting {
            population.microcell_mut(microcell).distancing_start_time =
                Some(time + self.params.distancing_delay);
            for (person, enhanced) in assigned {
                population.person_mut(person).distancing_enhanced = Some(enhanced);
            }
        }
        Ok(())
    }

    fn turn_off(&mut self, context: &mut Context) {
        let population = context.population_mut();
        let microcells: Vec<MicrocellId> = population.microcell_ids().collect();
        for microcell in microcells {
            population.microcell_mut(microcell).distancing_start_time = None;
        }
    }
}
