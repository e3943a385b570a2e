use std::fs;

use clap::Args;
use epiabm::population::{ToyPopulationConfig, ToyPopulationFactory};
use epiabm::runner::{run_with_custom_args, ModelSetup};
use epiabm::sweep::{
    HostProgressionSweep, HouseholdSweep, InitialInfectedSweep, InitialVaccineQueueSweep,
    InitialisePlaceSweep, InterventionSweep, PlaceSweep, QueueSweep, SpatialSweep, TravelSweep,
    UpdatePlaceSweep,
};
use epiabm::{Context, ContextPopulationExt, EpiabmError, InfectionStatus};
use log::info;

#[derive(Args, Debug)]
struct ToyArgs {
    /// Optional path for a toy population config file
    #[arg(long, default_value = "")]
    population: String,
}

fn setup(context: &mut Context, population: &str) -> Result<ModelSetup, EpiabmError> {
    let config = if population.is_empty() {
        ToyPopulationConfig::default()
    } else {
        serde_json::from_str(&fs::read_to_string(population)?)?
    };
    let population = ToyPopulationFactory::new(config).build(context)?;
    info!("built a population of {}", population.size());
    context.set_population(population);

    Ok(ModelSetup {
        initial_sweeps: vec![
            Box::new(InitialisePlaceSweep),
            Box::new(InitialVaccineQueueSweep),
            Box::new(InitialInfectedSweep),
        ],
        sweeps: vec![
            Box::new(InterventionSweep::new()),
            Box::new(UpdatePlaceSweep),
            Box::new(HouseholdSweep),
            Box::new(PlaceSweep),
            Box::new(SpatialSweep),
            Box::new(TravelSweep),
            Box::new(QueueSweep),
            Box::new(HostProgressionSweep),
        ],
    })
}

fn main() -> anyhow::Result<()> {
    let simulation = run_with_custom_args(|context, _, custom: Option<ToyArgs>| {
        let population = custom.map(|args| args.population).unwrap_or_default();
        setup(context, &population)
    })
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let counts = simulation.context().population().compartment_counts();
    println!(
        "Finished with {} recovered and {} dead",
        counts.count(InfectionStatus::Recovered),
        counts.count(InfectionStatus::Dead)
    );
    Ok(())
}
