//! Drives a run: binds the sweeps, runs the initial ones once, then runs
//! the per-step sweeps once per unit of time and reports the compartment
//! counts after every step.
use log::{debug, info};

use crate::error::EpiabmError;
use crate::report::{CompartmentRecord, OutputSink};
use crate::sweep::Sweep;
use crate::{Context, ContextParametersExt, ContextPopulationExt};

pub struct Simulation<S: OutputSink> {
    context: Context,
    initial_sweeps: Vec<Box<dyn Sweep>>,
    sweeps: Vec<Box<dyn Sweep>>,
    sink: S,
    start_time: f64,
    end_time: f64,
}

impl<S: OutputSink> Simulation<S> {
    /// Binds every sweep to `context`, which must already hold the
    /// parameters and the population.
    ///
    /// # Errors
    ///
    /// Returns `EpiabmError::InputValidationError` if the start and end times
    /// are not finite, the start comes after the end, or the start precedes
    /// the current time of `context`. Errors raised by a sweep while binding
    /// are returned as is.
    pub fn configure(
        mut context: Context,
        mut initial_sweeps: Vec<Box<dyn Sweep>>,
        mut sweeps: Vec<Box<dyn Sweep>>,
        sink: S,
    ) -> Result<Simulation<S>, EpiabmError> {
        let simulation = &context.parameters().simulation;
        let (start_time, end_time) = (
            simulation.simulation_start_time,
            simulation.simulation_end_time,
        );
        if !(start_time.is_finite() && end_time.is_finite()) {
            return Err(EpiabmError::InputValidationError(format!(
                "simulation times must be finite, got {start_time} and {end_time}"
            )));
        }
        if start_time > end_time {
            return Err(EpiabmError::InputValidationError(format!(
                "simulation_start_time {start_time} is after simulation_end_time {end_time}"
            )));
        }
        if start_time < context.get_current_time() {
            return Err(EpiabmError::InputValidationError(format!(
                "simulation_start_time {start_time} precedes the current time {}",
                context.get_current_time()
            )));
        }

        for sweep in initial_sweeps.iter_mut().chain(sweeps.iter_mut()) {
            debug!("binding {} sweep", sweep.name());
            sweep.bind(&mut context)?;
        }
        Ok(Simulation {
            context,
            initial_sweeps,
            sweeps,
            sink,
            start_time,
            end_time,
        })
    }

    /// Runs the simulation to completion. The first record holds the state
    /// after the initial sweeps.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error raised by a sweep or the sink.
    pub fn run_sweeps(&mut self) -> Result<(), EpiabmError> {
        let mut time = self.start_time;
        self.context.set_current_time(time);
        for sweep in &mut self.initial_sweeps {
            sweep.run(&mut self.context, time)?;
        }
        self.write_record(time)?;
        time += 1.0;

        while time < self.end_time {
            self.context.set_current_time(time);
            for sweep in &mut self.sweeps {
                sweep.run(&mut self.context, time)?;
            }
            self.write_record(time)?;
            time += 1.0;
        }
        info!(
            "simulation finished at {} with {} people",
            self.context.get_current_time(),
            self.context.population().size()
        );
        Ok(())
    }

    fn write_record(&mut self, time: f64) -> Result<(), EpiabmError> {
        let record = CompartmentRecord::new(time, &self.context.population().compartment_counts());
        self.sink.write(&record)
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
