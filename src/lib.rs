//! A stochastic agent-based epidemic simulator
//!
//! Epiabm advances a population of individuals through discrete time steps.
//! Individuals live in households, attend places, and are grouped spatially
//! into microcells and cells. At every step an ordered sequence of *sweeps*
//! transforms the population: infection is propagated through households,
//! places and spatial proximity, newly infected people are committed to the
//! exposed state, and everyone whose next transition is due is advanced
//! through the disease progression state machine. After each step the
//! aggregate count of every infection status is written to an output sink.
//!
//! The central object is the [`Context`], which holds:
//! * the current simulation time
//! * the [`Parameters`](parameters::Parameters) of the run
//! * the [`Population`](population::Population)
//! * independently seeded random number streams
//!
//! A typical model is assembled from the following pieces:
//! * A population constructor such as
//!   [`ToyPopulationFactory`](population::ToyPopulationFactory).
//! * A list of initialization sweeps, for example seeding infections and
//!   assigning people to places.
//! * A list of per-timestep sweeps, in an order where infection detection
//!   precedes the queue sweep, which precedes host progression.
//! * An [`OutputSink`](report::OutputSink) receiving one
//!   [`CompartmentRecord`](report::CompartmentRecord) per step.
//!
//! These are handed to [`Simulation::configure`](simulation::Simulation::configure)
//! and executed with [`Simulation::run_sweeps`](simulation::Simulation::run_sweeps).
pub mod context;
pub use context::{Context, DataPlugin};

pub mod error;
pub use error::EpiabmError;

pub mod hashing;
pub use hashing::{HashMap, HashMapExt, HashSet, HashSetExt};

pub mod infection;
pub mod infection_status;
pub use infection_status::InfectionStatus;

pub mod intervention;
pub mod log;
mod macros;
pub mod numeric;

pub mod parameters;
pub use parameters::{ContextParametersExt, Parameters};

pub mod place_type;
pub use place_type::PlaceType;

pub mod population;
pub use population::{ContextPopulationExt, Population};

pub mod progression;

pub mod random;
pub use random::{ContextRandomExt, RngId};

pub mod report;
pub mod runner;
pub mod simulation;
pub use simulation::Simulation;

pub mod sweep;

// Re-export for macros
pub use paste;
pub use rand;
