//! Parameters of a simulation run.
//!
//! `Parameters` is a plain serde structure that can be loaded from JSON. Every
//! field has a default, so a configuration file only needs to list what it
//! overrides. The parameters are stored in the `Context` and read by sweeps
//! when they are bound and run.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::EpiabmError;
use crate::{define_data_plugin, Context, PlaceType};

/// A transition probability given either for everyone or per age group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coefficient {
    Scalar(f64),
    PerAge(Vec<f64>),
}

impl Coefficient {
    /// The value for `age_group`. A per-age list shorter than the age group
    /// yields `None`.
    #[must_use]
    pub fn for_age(&self, age_group: usize) -> Option<f64> {
        match self {
            Coefficient::Scalar(value) => Some(*value),
            Coefficient::PerAge(values) => values.get(age_group).copied(),
        }
    }

    /// Scalars are returned as is; per-age lists are averaged.
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self {
            Coefficient::Scalar(value) => *value,
            Coefficient::PerAge(values) if values.is_empty() => 0.0,
            #[allow(clippy::cast_precision_loss)]
            Coefficient::PerAge(values) => values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

impl From<f64> for Coefficient {
    fn from(value: f64) -> Self {
        Coefficient::Scalar(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub simulation_start_time: f64,
    pub simulation_end_time: f64,
    pub initial_infected_number: usize,
    /// Seed all initial infections inside one randomly chosen cell.
    pub initial_infect_cell: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            simulation_start_time: 0.0,
            simulation_end_time: 60.0,
            initial_infected_number: 10,
            initial_infect_cell: false,
        }
    }
}

/// Means and tabulated inverse CDFs of the delay between two statuses.
/// Every table is sampled at `CDF_RES + 1` evenly spaced quantiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTimeParams {
    pub latent_period: f64,
    pub latent_period_icdf: Vec<f64>,
    pub asympt_infect_period: f64,
    pub asympt_infect_icdf: Vec<f64>,
    pub mean_mild_to_recov: f64,
    pub mild_to_recov_icdf: Vec<f64>,
    pub mean_gp_to_recov: f64,
    pub gp_to_recov_icdf: Vec<f64>,
    pub mean_gp_to_hosp: f64,
    pub gp_to_hosp_icdf: Vec<f64>,
    pub mean_gp_to_death: f64,
    pub gp_to_death_icdf: Vec<f64>,
    pub mean_hosp_to_recov: f64,
    pub hosp_to_recov_icdf: Vec<f64>,
    pub mean_hosp_to_icu: f64,
    pub hosp_to_icu_icdf: Vec<f64>,
    pub mean_hosp_to_death: f64,
    pub hosp_to_death_icdf: Vec<f64>,
    pub mean_icu_to_icurecov: f64,
    pub icu_to_icurecov_icdf: Vec<f64>,
    pub mean_icu_to_death: f64,
    pub icu_to_death_icdf: Vec<f64>,
    pub mean_icurecov_to_recov: f64,
    pub icurecov_to_recov_icdf: Vec<f64>,
}

pub const CDF_RES: usize = 20;

const LATENT_PERIOD_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.098616903, 0.171170649, 0.239705594, 0.307516598, 0.376194441, 0.446827262,
    0.520343677, 0.597665592, 0.679808341, 0.767974922, 0.863671993, 0.968878064, 1.086313899,
    1.219915022, 1.37573215, 1.563841395, 1.803041398, 2.135346254, 2.694118208, 3.964172493,
];

const ASYMPT_INFECT_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.171566836, 0.424943468, 0.464725594, 0.50866631, 0.55773764, 0.613298069, 0.67732916,
    0.752886568, 0.843151261, 0.895791527, 0.955973422, 1.026225109, 1.110607115, 1.216272375,
    1.336349102, 1.487791911, 1.701882384, 1.865779085, 2.126940581, 2.524164972,
];

// Shared by mild, GP to recovery and GP to hospital.
const MILD_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.341579599, 0.436192391, 0.509774887, 0.574196702, 0.633830053, 0.690927761,
    0.74691114, 0.802830695, 0.859578883, 0.918015187, 0.97906363, 1.043815683, 1.113669859,
    1.190557274, 1.277356871, 1.378761429, 1.50338422, 1.670195767, 1.938414132, 2.511279379,
];

const GP_TO_DEATH_ICDF: [f64; CDF_RES + 1] = [
    0.0, 2.257735908, 3.171065856, 3.924183798, 4.608738224, 5.260437017, 5.898728066,
    6.53669783, 7.184755068, 7.852438367, 8.549591424, 9.287408763, 10.07967529, 10.94457146,
    11.90769274, 13.00769447, 14.3081531, 15.92655201, 18.12320384, 21.71626849, 29.58154704,
];

const HOSP_TO_RECOV_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.634736097, 1.217461548, 1.805695261, 2.41206761, 3.044551205, 3.71010552, 4.415905623,
    5.170067405, 5.982314035, 6.864787504, 7.833196704, 8.908589322, 10.12027655, 11.51100029,
    13.14682956, 15.13821107, 17.69183155, 21.27093904, 27.35083955, 41.35442157,
];

const HOSP_TO_ICU_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.108407687, 0.220267228, 0.337653773, 0.46159365, 0.593106462, 0.733343356, 0.88367093,
    1.045760001, 1.221701998, 1.414175806, 1.62669998, 1.864032461, 2.132837436, 2.442868902,
    2.809242289, 3.257272257, 3.834402667, 4.647120033, 6.035113821, 9.253953212,
];

const HOSP_TO_DEATH_ICDF: [f64; CDF_RES + 1] = [
    0.0, 1.703470233, 2.39742257, 2.970367222, 3.491567676, 3.988046604, 4.474541783,
    4.960985883, 5.455292802, 5.964726999, 6.496796075, 7.06004732, 7.665014091, 8.325595834,
    9.061367792, 9.901900127, 10.8958347, 12.133068, 13.81280888, 16.56124574, 22.5803431,
];

const ICU_TO_ICURECOV_ICDF: [f64; CDF_RES + 1] = [
    0.0, 1.308310071, 1.87022015, 2.338694632, 2.76749788, 3.177830401, 3.581381361,
    3.986127838, 4.398512135, 4.824525291, 5.270427517, 5.743406075, 6.252370864, 6.809125902,
    7.430338867, 8.141231404, 8.983341913, 10.03350866, 11.46214198, 13.80540164, 18.95469153,
];

const ICU_TO_DEATH_ICDF: [f64; CDF_RES + 1] = [
    0.0, 1.60649128, 2.291051747, 2.860938008, 3.382077741, 3.880425012, 4.37026577, 4.861330415,
    5.361460943, 5.877935626, 6.4183471, 6.991401405, 7.607881726, 8.282065409, 9.034104744,
    9.894486491, 10.91341144, 12.18372915, 13.9113346, 16.74394356, 22.96541429,
];

const ICURECOV_TO_RECOV_ICDF: [f64; CDF_RES + 1] = [
    0.0, 0.133993315, 0.265922775, 0.402188416, 0.544657341, 0.694774487, 0.853984373,
    1.023901078, 1.206436504, 1.403942719, 1.619402771, 1.856711876, 2.121118605, 2.419957988,
    2.763950408, 3.169692564, 3.664959893, 4.301777536, 5.196849239, 6.7222126, 10.24997697,
];

impl Default for TransitionTimeParams {
    fn default() -> Self {
        TransitionTimeParams {
            latent_period: 4.59,
            latent_period_icdf: LATENT_PERIOD_ICDF.to_vec(),
            asympt_infect_period: 14.0,
            asympt_infect_icdf: ASYMPT_INFECT_ICDF.to_vec(),
            mean_mild_to_recov: 7.0,
            mild_to_recov_icdf: MILD_ICDF.to_vec(),
            mean_gp_to_recov: 7.0,
            gp_to_recov_icdf: MILD_ICDF.to_vec(),
            mean_gp_to_hosp: 5.0,
            gp_to_hosp_icdf: MILD_ICDF.to_vec(),
            mean_gp_to_death: 7.0,
            gp_to_death_icdf: GP_TO_DEATH_ICDF.to_vec(),
            mean_hosp_to_recov: 1.0,
            hosp_to_recov_icdf: HOSP_TO_RECOV_ICDF.to_vec(),
            mean_hosp_to_icu: 1.0,
            hosp_to_icu_icdf: HOSP_TO_ICU_ICDF.to_vec(),
            mean_hosp_to_death: 1.0,
            hosp_to_death_icdf: HOSP_TO_DEATH_ICDF.to_vec(),
            mean_icu_to_icurecov: 1.0,
            icu_to_icurecov_icdf: ICU_TO_ICURECOV_ICDF.to_vec(),
            mean_icu_to_death: 1.0,
            icu_to_death_icdf: ICU_TO_DEATH_ICDF.to_vec(),
            mean_icurecov_to_recov: 1.0,
            icurecov_to_recov_icdf: ICURECOV_TO_RECOV_ICDF.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceParams {
    /// Expected number of people a person meets at a place of each type.
    /// Missing types count as a group of one.
    pub mean_group_size: BTreeMap<PlaceType, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialParams {
    /// Microcells at least this far apart never infect each other.
    pub infection_radius: f64,
    pub spatial_transmission: f64,
    pub kernel_scale: f64,
    pub kernel_shape: f64,
}

impl Default for SpatialParams {
    fn default() -> Self {
        SpatialParams {
            infection_radius: 1.0,
            spatial_transmission: 0.05,
            kernel_scale: 1.0,
            kernel_shape: 3.0,
        }
    }
}

/// When an intervention applies: between `start_time` and
/// `start_time + policy_duration`, once at least `case_threshold` people
/// are infectious.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationWindow {
    pub start_time: f64,
    pub policy_duration: f64,
    pub case_threshold: usize,
}

impl Default for ActivationWindow {
    fn default() -> Self {
        ActivationWindow {
            start_time: 0.0,
            policy_duration: f64::MAX,
            case_threshold: 0,
        }
    }
}

impl ActivationWindow {
    #[must_use]
    pub fn is_active(&self, time: f64, cases: usize) -> bool {
        self.start_time <= time
            && time <= self.start_time + self.policy_duration
            && cases >= self.case_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseIsolationParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub isolation_duration: f64,
    pub isolation_probability: f64,
    pub isolation_delay: f64,
    /// Scales place and spatial infectiousness of an isolating person.
    pub isolation_effectiveness: f64,
    /// Scales household infectiousness of an isolating person.
    pub isolation_house_effectiveness: f64,
}

impl Default for CaseIsolationParams {
    fn default() -> Self {
        CaseIsolationParams {
            window: ActivationWindow::default(),
            isolation_duration: 7.0,
            isolation_probability: 1.0,
            isolation_delay: 0.0,
            isolation_effectiveness: 0.5,
            isolation_house_effectiveness: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceClosureParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub closure_duration: f64,
    pub closure_delay: f64,
    pub case_microcell_threshold: usize,
    pub closure_place_type: Vec<PlaceType>,
    /// Scales household infectiousness of people kept home by a closure.
    pub closure_household_infectiousness: f64,
}

impl Default for PlaceClosureParams {
    fn default() -> Self {
        PlaceClosureParams {
            window: ActivationWindow::default(),
            closure_duration: 21.0,
            closure_delay: 0.0,
            case_microcell_threshold: 1,
            closure_place_type: vec![
                PlaceType::PrimarySchool,
                PlaceType::SecondarySchool,
                PlaceType::SixthForm,
            ],
            closure_household_infectiousness: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdQuarantineParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub quarantine_duration: f64,
    pub quarantine_delay: f64,
    pub quarantine_house_compliant: f64,
    pub quarantine_individual_compliant: f64,
    pub quarantine_house_effectiveness: f64,
    pub quarantine_place_effectiveness: BTreeMap<PlaceType, f64>,
    pub quarantine_spatial_effectiveness: f64,
}

impl Default for HouseholdQuarantineParams {
    fn default() -> Self {
        HouseholdQuarantineParams {
            window: ActivationWindow::default(),
            quarantine_duration: 14.0,
            quarantine_delay: 0.0,
            quarantine_house_compliant: 1.0,
            quarantine_individual_compliant: 1.0,
            quarantine_house_effectiveness: 1.5,
            quarantine_place_effectiveness: BTreeMap::new(),
            quarantine_spatial_effectiveness: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialDistancingParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub distancing_duration: f64,
    pub distancing_delay: f64,
    pub case_microcell_threshold: usize,
    pub distancing_compliant: f64,
    /// Probability, per age group, that a compliant person distances strictly.
    pub distancing_enhanced_prob: Vec<f64>,
    pub distancing_house_susc: f64,
    pub distancing_house_enhanced_susc: f64,
    pub distancing_place_susc: BTreeMap<PlaceType, f64>,
    pub distancing_place_enhanced_susc: BTreeMap<PlaceType, f64>,
    pub distancing_spatial_susc: f64,
    pub distancing_spatial_enhanced_susc: f64,
}

impl Default for SocialDistancingParams {
    fn default() -> Self {
        SocialDistancingParams {
            window: ActivationWindow::default(),
            distancing_duration: 30.0,
            distancing_delay: 0.0,
            case_microcell_threshold: 1,
            distancing_compliant: 1.0,
            distancing_enhanced_prob: Vec::new(),
            distancing_house_susc: 1.0,
            distancing_house_enhanced_susc: 1.0,
            distancing_place_susc: BTreeMap::new(),
            distancing_place_enhanced_susc: BTreeMap::new(),
            distancing_spatial_susc: 0.25,
            distancing_spatial_enhanced_susc: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccinationParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub daily_doses: usize,
    /// Fraction by which vaccination reduces susceptibility.
    pub vacc_protectiveness: f64,
    /// Lowest age group of each priority level, highest priority first.
    pub min_age_groups: Vec<usize>,
    /// Probability of accepting a dose, per priority level.
    pub prob_vaccinated: Vec<f64>,
}

impl Default for VaccinationParams {
    fn default() -> Self {
        VaccinationParams {
            window: ActivationWindow::default(),
            daily_doses: 100,
            vacc_protectiveness: 0.8,
            min_age_groups: vec![15, 12, 8, 4],
            prob_vaccinated: vec![0.95, 0.9, 0.85, 0.8],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelIsolationParams {
    #[serde(flatten)]
    pub window: ActivationWindow,
    pub isolation_duration: f64,
    pub isolation_probability: f64,
    pub isolation_delay: f64,
    /// Only travellers who would test positive, taken to be the symptomatic
    /// ones, are asked to isolate.
    pub use_testing: bool,
    /// Travellers sharing a household isolate in one of their own.
    pub hotel_isolate: bool,
}

impl Default for TravelIsolationParams {
    fn default() -> Self {
        TravelIsolationParams {
            window: ActivationWindow::default(),
            isolation_duration: 14.0,
            isolation_probability: 1.0,
            isolation_delay: 0.0,
            use_testing: false,
            hotel_isolate: false,
        }
    }
}

/// Interventions enabled for the run. Absent entries are never applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterventionParams {
    pub case_isolation: Option<CaseIsolationParams>,
    pub place_closure: Option<PlaceClosureParams>,
    pub household_quarantine: Option<HouseholdQuarantineParams>,
    pub social_distancing: Option<SocialDistancingParams>,
    pub vaccination: Option<VaccinationParams>,
    pub travel_isolation: Option<TravelIsolationParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelParams {
    /// Visitors introduced per infectious case in the population.
    pub ratio_introduce_cases: f64,
    pub prob_existing_household: f64,
    pub min_stay: u32,
    pub max_stay: u32,
}

impl Default for TravelParams {
    fn default() -> Self {
        TravelParams {
            ratio_introduce_cases: 0.05,
            prob_existing_household: 0.5,
            min_stay: 2,
            max_stay: 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    pub simulation: SimulationParams,
    pub use_ages: bool,
    /// Share of the population in each age group.
    pub age_proportions: Vec<f64>,
    pub time_steps_per_day: f64,
    pub host_progression_lists: BTreeMap<String, Coefficient>,
    pub transition_times: TransitionTimeParams,
    pub sympt_infectiousness: f64,
    pub asympt_infectiousness: f64,
    /// Delay between becoming infectious and showing symptoms.
    pub latent_to_sympt_delay: f64,
    pub household_transmission: f64,
    pub place_transmission: f64,
    pub false_positive_rate: f64,
    pub place_params: PlaceParams,
    pub spatial_params: SpatialParams,
    pub intervention_params: InterventionParams,
    pub travel_params: Option<TravelParams>,
}

const PROB_SYMPTOMATIC: f64 = 0.66;
const PROB_GP: f64 = 0.378_695_381_4;
const PROB_GP_TO_HOSP: f64 = 0.162_888_424_7;
const PROB_HOSP_TO_ICU: f64 = 0.396_928_454_4;
const MORTALITY_PROB_GP: f64 = 0.0;
const MORTALITY_PROB_HOSP: f64 = 0.267_637_6;
const MORTALITY_PROB_ICU: f64 = 0.523_489_6;

fn default_host_progression_lists() -> BTreeMap<String, Coefficient> {
    let entries = [
        ("prob_exposed_to_asympt", 1.0 - PROB_SYMPTOMATIC),
        ("prob_exposed_to_mild", PROB_SYMPTOMATIC * (1.0 - PROB_GP)),
        ("prob_exposed_to_gp", PROB_SYMPTOMATIC * PROB_GP),
        (
            "prob_gp_to_recov",
            1.0 - PROB_GP_TO_HOSP - MORTALITY_PROB_GP,
        ),
        ("prob_gp_to_hosp", PROB_GP_TO_HOSP),
        ("prob_gp_to_death", MORTALITY_PROB_GP),
        (
            "prob_hosp_to_recov",
            1.0 - PROB_HOSP_TO_ICU - MORTALITY_PROB_HOSP,
        ),
        ("prob_hosp_to_icu", PROB_HOSP_TO_ICU),
        ("prob_hosp_to_death", MORTALITY_PROB_HOSP),
        ("prob_icu_to_icurecov", 1.0 - MORTALITY_PROB_ICU),
        ("prob_icu_to_death", MORTALITY_PROB_ICU),
    ];
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), Coefficient::Scalar(value)))
        .collect()
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            simulation: SimulationParams::default(),
            use_ages: false,
            age_proportions: vec![1.0],
            time_steps_per_day: 1.0,
            host_progression_lists: default_host_progression_lists(),
            transition_times: TransitionTimeParams::default(),
            sympt_infectiousness: 1.5,
            asympt_infectiousness: 1.0,
            latent_to_sympt_delay: 0.5,
            household_transmission: 0.1,
            place_transmission: 0.1,
            false_positive_rate: 0.0,
            place_params: PlaceParams::default(),
            spatial_params: SpatialParams::default(),
            intervention_params: InterventionParams::default(),
            travel_params: None,
        }
    }
}

impl Parameters {
    /// Checks the values that are not validated by the component consuming them.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), EpiabmError> {
        if !(self.time_steps_per_day.is_finite() && self.time_steps_per_day > 0.0) {
            return Err(EpiabmError::ConfigurationError(format!(
                "time_steps_per_day must be positive, got {}",
                self.time_steps_per_day
            )));
        }
        if !(0.0..1.0).contains(&self.false_positive_rate) {
            return Err(EpiabmError::ConfigurationError(format!(
                "false_positive_rate must be in [0, 1), got {}",
                self.false_positive_rate
            )));
        }
        if self.age_proportions.is_empty() || self.age_proportions.iter().any(|p| *p < 0.0) {
            return Err(EpiabmError::ConfigurationError(
                "age_proportions must be a non-empty list of non-negative weights".to_string(),
            ));
        }
        for (name, value) in [
            ("sympt_infectiousness", self.sympt_infectiousness),
            ("asympt_infectiousness", self.asympt_infectiousness),
            ("household_transmission", self.household_transmission),
            ("place_transmission", self.place_transmission),
            (
                "spatial_transmission",
                self.spatial_params.spatial_transmission,
            ),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(EpiabmError::ConfigurationError(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if let Some(travel) = &self.travel_params {
            if travel.min_stay > travel.max_stay {
                return Err(EpiabmError::ConfigurationError(format!(
                    "travel min_stay {} exceeds max_stay {}",
                    travel.min_stay, travel.max_stay
                )));
            }
        }
        Ok(())
    }

    /// Correction applied to infectiousness for cases that are false positives.
    #[must_use]
    pub fn false_positive_correction(&self) -> f64 {
        1.0 / (1.0 - self.false_positive_rate)
    }
}

static DEFAULT_PARAMETERS: LazyLock<Parameters> = LazyLock::new(Parameters::default);

define_data_plugin!(ParametersPlugin, Option<Parameters>, None);

pub trait ContextParametersExt {
    /// Reads parameters from a JSON file and stores them in the context.
    ///
    /// # Errors
    ///
    /// Returns an `EpiabmError` if the file cannot be read, is not valid JSON for
    /// `Parameters`, or fails validation.
    fn load_parameters_from_json(&mut self, file_name: &Path) -> Result<(), EpiabmError>;

    /// # Errors
    ///
    /// Returns `EpiabmError::ConfigurationError` if `parameters` fails validation.
    fn set_parameters(&mut self, parameters: Parameters) -> Result<(), EpiabmError>;

    /// The parameters of the run, or the defaults if none were set.
    fn parameters(&self) -> &Parameters;

    /// Mutable access for interventions and tests. Starts from the defaults
    /// if no parameters were set.
    fn parameters_mut(&mut self) -> &mut Parameters;
}

impl ContextParametersExt for Context {
    fn load_parameters_from_json(&mut self, file_name: &Path) -> Result<(), EpiabmError> {
        info!("Loading parameters from: {}", file_name.display());
        let config_file = fs::read_to_string(file_name)?;
        let parameters: Parameters = serde_json::from_str(&config_file)?;
        self.set_parameters(parameters)
    }

    fn set_parameters(&mut self, parameters: Parameters) -> Result<(), EpiabmError> {
        parameters.validate()?;
        *self.get_data_mut(ParametersPlugin) = Some(parameters);
        Ok(())
    }

    fn parameters(&self) -> &Parameters {
        self.get_data(ParametersPlugin)
            .and_then(Option::as_ref)
            .unwrap_or(&DEFAULT_PARAMETERS)
    }

    fn parameters_mut(&mut self) -> &mut Parameters {
        self.get_data_mut(ParametersPlugin)
            .get_or_insert_with(Parameters::default)
    }
}
