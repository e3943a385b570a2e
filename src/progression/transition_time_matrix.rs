//! Delays between consecutive infection statuses.
use strum::EnumCount;

use super::inverse_cdf::InverseCdf;
use crate::error::EpiabmError;
use crate::parameters::Parameters;
use crate::{define_rng, Context, ContextRandomExt, InfectionStatus};

define_rng!(TransitionTimeRng);

const N: usize = InfectionStatus::COUNT;

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionTime {
    Constant(f64),
    InverseCdf(InverseCdf),
}

/// One optional delay sampler per (from, to) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTimeMatrix {
    times: Vec<Option<TransitionTime>>,
    /// Added to the latent period when the first infectious status shows
    /// symptoms.
    latent_to_sympt_delay: f64,
}

impl TransitionTimeMatrix {
    /// A matrix with no samplers configured.
    #[must_use]
    pub fn empty() -> TransitionTimeMatrix {
        TransitionTimeMatrix {
            times: vec![None; N * N],
            latent_to_sympt_delay: 0.0,
        }
    }

    /// Every pair takes `delay`, with no latency added for symptoms.
    #[must_use]
    pub fn constant(delay: f64) -> TransitionTimeMatrix {
        TransitionTimeMatrix {
            times: vec![Some(TransitionTime::Constant(delay)); N * N],
            latent_to_sympt_delay: 0.0,
        }
    }

    /// Builds the samplers from the tabulated distributions of `parameters`.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if a table is malformed.
    pub fn from_parameters(parameters: &Parameters) -> Result<TransitionTimeMatrix, EpiabmError> {
        use InfectionStatus::{
            Dead, Exposed, InfectASympt, InfectGP, InfectHosp, InfectICU, InfectICURecov,
            InfectMild, Recovered, Susceptible,
        };
        let t = &parameters.transition_times;
        let mut matrix = TransitionTimeMatrix::empty();
        matrix.latent_to_sympt_delay = parameters.latent_to_sympt_delay;
        matrix.set(Susceptible, Exposed, TransitionTime::Constant(0.0));

        let tables = [
            (Exposed, InfectASympt, t.latent_period, &t.latent_period_icdf),
            (Exposed, InfectMild, t.latent_period, &t.latent_period_icdf),
            (Exposed, InfectGP, t.latent_period, &t.latent_period_icdf),
            (
                InfectASympt,
                Recovered,
                t.asympt_infect_period,
                &t.asympt_infect_icdf,
            ),
            (InfectMild, Recovered, t.mean_mild_to_recov, &t.mild_to_recov_icdf),
            (InfectGP, Recovered, t.mean_gp_to_recov, &t.gp_to_recov_icdf),
            (InfectGP, InfectHosp, t.mean_gp_to_hosp, &t.gp_to_hosp_icdf),
            (InfectGP, Dead, t.mean_gp_to_death, &t.gp_to_death_icdf),
            (InfectHosp, Recovered, t.mean_hosp_to_recov, &t.hosp_to_recov_icdf),
            (InfectHosp, InfectICU, t.mean_hosp_to_icu, &t.hosp_to_icu_icdf),
            (InfectHosp, Dead, t.mean_hosp_to_death, &t.hosp_to_death_icdf),
            (
                InfectICU,
                InfectICURecov,
                t.mean_icu_to_icurecov,
                &t.icu_to_icurecov_icdf,
            ),
            (InfectICU, Dead, t.mean_icu_to_death, &t.icu_to_death_icdf),
            (
                InfectICURecov,
                Recovered,
                t.mean_icurecov_to_recov,
                &t.icurecov_to_recov_icdf,
            ),
        ];
        for (from, to, mean, icdf) in tables {
            let sampler = InverseCdf::new(mean, icdf.clone()).map_err(|e| {
                EpiabmError::ConfigurationError(format!("{from} -> {to}: {e}"))
            })?;
            matrix.set(from, to, TransitionTime::InverseCdf(sampler));
        }
        Ok(matrix)
    }

    pub fn set(&mut self, from: InfectionStatus, to: InfectionStatus, time: TransitionTime) {
        self.times[from.ordinal() * N + to.ordinal()] = Some(time);
    }

    #[must_use]
    pub fn get(&self, from: InfectionStatus, to: InfectionStatus) -> Option<&TransitionTime> {
        self.times[from.ordinal() * N + to.ordinal()].as_ref()
    }

    /// Samples how long a person stays in `from` before moving to `to`.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if the pair has no sampler
    /// and `EpiabmError::InvariantViolation` if the sampled delay is negative.
    pub fn sample(
        &self,
        context: &Context,
        from: InfectionStatus,
        to: InfectionStatus,
    ) -> Result<f64, EpiabmError> {
        let delay = match self.get(from, to) {
            None => {
                return Err(EpiabmError::ConfigurationError(format!(
                    "no transition time configured from {from} to {to}"
                )))
            }
            Some(TransitionTime::Constant(delay)) => *delay,
            Some(TransitionTime::InverseCdf(icdf)) => {
                let u = context.sample_range(TransitionTimeRng, 0.0..1.0);
                icdf.icdf_choose_noexp(u)?
            }
        };
        if delay < 0.0 || delay.is_nan() {
            return Err(EpiabmError::InvariantViolation(format!(
                "negative transition time {delay} from {from} to {to}"
            )));
        }
        if from == InfectionStatus::Exposed
            && matches!(to, InfectionStatus::InfectMild | InfectionStatus::InfectGP)
        {
            return Ok(delay + self.latent_to_sympt_delay);
        }
        Ok(delay)
    }
}
