use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Command, FromArgMatches as _};

use crate::error::EpiabmError;
use crate::log::{set_log_level, LevelFilter};
use crate::parameters::ContextParametersExt;
use crate::random::ContextRandomExt;
use crate::report::CsvOutputSink;
use crate::sweep::Sweep;
use crate::{Context, Simulation};

/// Name of the compartment report written to the output directory.
pub const OUTPUT_FILE: &str = "output.csv";

/// Default cli arguments for epiabm runner
#[derive(Args, Debug)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Optional path for a parameters config file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Optional path for report output
    #[arg(short, long, default_value = "")]
    pub output_dir: String,

    /// Enable logging at the given level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Args)]
pub struct PlaceholderCustom {}

/// The sweeps of a model, as returned by its setup function.
pub struct ModelSetup {
    pub initial_sweeps: Vec<Box<dyn Sweep>>,
    pub sweeps: Vec<Box<dyn Sweep>>,
}

fn create_epiabm_cli() -> Command {
    let cli = Command::new("epiabm");
    BaseArgs::augment_args(cli)
}

/// Runs a simulation with custom cli arguments.
///
/// This function allows you to define custom arguments and a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Context`, a `BaseArgs` struct,
///   an Option<A> where A is the custom cli arguments struct, and builds the population
///   and the sweeps of the model
///
/// # Errors
/// Returns an error if argument parsing, the setup function or the simulation fails
pub fn run_with_custom_args<A, F>(
    setup_fn: F,
) -> Result<Simulation<CsvOutputSink>, Box<dyn std::error::Error>>
where
    A: Args,
    F: FnOnce(&mut Context, &BaseArgs, Option<A>) -> Result<ModelSetup, EpiabmError>,
{
    let mut cli = create_epiabm_cli();
    cli = A::augment_args(cli);
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    let custom_matches = A::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, Some(custom_matches), setup_fn)
}

/// Runs a simulation with default cli arguments
///
/// This function parses command line arguments and allows you to define a setup function
///
/// # Parameters
/// - `setup_fn`: A function that takes a mutable reference to a `Context` and `BaseArgs` struct
///
/// # Errors
/// Returns an error if argument parsing, the setup function or the simulation fails
pub fn run_with_args<F>(
    setup_fn: F,
) -> Result<Simulation<CsvOutputSink>, Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Context, &BaseArgs, Option<PlaceholderCustom>) -> Result<ModelSetup, EpiabmError>,
{
    let cli = create_epiabm_cli();
    let matches = cli.get_matches();

    let base_args_matches = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(base_args_matches, None, setup_fn)
}

fn run_with_args_internal<A, F>(
    args: BaseArgs,
    custom_args: Option<A>,
    setup_fn: F,
) -> Result<Simulation<CsvOutputSink>, Box<dyn std::error::Error>>
where
    F: FnOnce(&mut Context, &BaseArgs, Option<A>) -> Result<ModelSetup, EpiabmError>,
{
    if let Some(level) = &args.log_level {
        let level = LevelFilter::from_str(level).map_err(|_| {
            EpiabmError::InputValidationError(format!("unknown log level {level}"))
        })?;
        set_log_level(level);
    }

    // Instantiate a context
    let mut context = Context::new();

    // Optionally set parameters from a file
    if !args.config.is_empty() {
        context.load_parameters_from_json(Path::new(&args.config))?;
    }

    context.init_random(args.random_seed);

    // Run the provided Fn
    let setup = setup_fn(&mut context, &args, custom_args)?;

    let output_path = PathBuf::from(&args.output_dir).join(OUTPUT_FILE);
    let sink = CsvOutputSink::new(&output_path)?;

    let mut simulation = Simulation::configure(context, setup.initial_sweeps, setup.sweeps, sink)?;
    simulation.run_sweeps()?;
    Ok(simulation)
}
