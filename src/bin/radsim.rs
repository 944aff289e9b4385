use clap::{Parser, ValueEnum};
use log::{info, warn, LevelFilter};
use radmoment::mesh::Mesh;
use radmoment::problems::{self, marshak, Profile, Scenario};
use radmoment::radiation::{EnergyLedger, Error, Grid, RadSystem};
use radmoment::reference::ReferenceTable;
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Problem {
    SuOlson,
    Marshak,
    Pulse,
}

impl From<Problem> for Scenario {
    fn from(problem: Problem) -> Self {
        match problem {
            Problem::SuOlson => Scenario::SuOlson,
            Problem::Marshak => Scenario::Marshak,
            Problem::Pulse => Scenario::Pulse,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(version = "0.1", author = "J. Zrake <jzrake@clemson.edu>")]
#[clap(about = "Run a radiation transport benchmark and compare it with its reference solution")]
struct Opts {
    #[clap(value_enum)]
    problem: Problem,

    /// Number of grid cells (defaults to the benchmark's resolution)
    #[clap(long)]
    nx: Option<usize>,

    #[clap(long, default_value = "0.4")]
    cfl: f64,

    /// Override the benchmark's step budget
    #[clap(long)]
    max_steps: Option<usize>,

    /// Text profile to write; a CBOR snapshot is written next to it
    #[clap(short, long, default_value = "solution.dat")]
    output: PathBuf,

    /// Tabulated reference solution (required to validate the Marshak wave)
    #[clap(short, long)]
    reference: Option<PathBuf>,

    #[clap(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Serialize)]
struct State<'a> {
    problem: &'static str,
    time: f64,
    iteration: usize,
    mesh: &'a Mesh,
    grid: &'a Grid,
    ledger: &'a EnergyLedger,
}

fn write_profile(system: &RadSystem, path: &Path) -> Result<(), Error> {
    let profile = Profile::from_system(system);
    let file = std::fs::File::create(path)?;
    let mut buffer = std::io::BufWriter::new(file);

    writeln!(buffer, "# t = {:+.8e}", system.time())?;
    writeln!(buffer, "# x Erad F Tgas Trad")?;

    for i in 0..profile.x.len() {
        writeln!(
            buffer,
            "{:+.8e} {:+.8e} {:+.8e} {:+.8e} {:+.8e}",
            profile.x[i], profile.rad_energy[i], profile.rad_flux[i], profile.gas_temperature[i], profile.rad_temperature[i]
        )?;
    }
    Ok(())
}

fn write_snapshot(state: &State, path: &Path) -> Result<(), Error> {
    let file = std::fs::File::create(path)?;
    let mut buffer = std::io::BufWriter::new(file);

    ciborium::ser::into_writer(state, &mut buffer).map_err(|e| match e {
        ciborium::ser::Error::Io(e) => Error::Io(e),
        ciborium::ser::Error::Value(what) => Error::InvalidArgument(what),
    })
}

/// Run the selected benchmark; return whether it passed validation.
fn run(opts: &Opts) -> Result<bool, Error> {
    let scenario = Scenario::from(opts.problem);
    let nx = opts.nx.unwrap_or_else(|| scenario.default_nx());
    let reference = opts.reference.as_ref().map(ReferenceTable::from_file).transpose()?;

    let mut settings = scenario.run_settings();
    if let Some(max_steps) = opts.max_steps {
        settings.max_steps = max_steps;
    }

    info!("{} problem with nx = {}, cfl = {}", scenario.name(), nx, opts.cfl);
    let mut system = scenario.setup(nx, opts.cfl)?;
    let parameters = system.parameters();
    info!(
        "flux limit {:?}, reaction tolerance {:e} within {} iterations",
        parameters.flux_limit, parameters.reaction_tolerance, parameters.max_reaction_iterations
    );
    let e0 = system.total_energy();
    let iteration = problems::run(&mut system, &settings)?;
    let e1 = system.total_energy();

    info!("energy change = {:+.6e}, accounted = {:+.6e}", e1 - e0, system.ledger().net());
    info!("write {}", opts.output.display());
    write_profile(&system, &opts.output)?;

    let snapshot = opts.output.with_extension("cbor");
    info!("write {}", snapshot.display());
    write_snapshot(
        &State {
            problem: scenario.name(),
            time: system.time(),
            iteration,
            mesh: system.mesh(),
            grid: system.grid(),
            ledger: system.ledger(),
        },
        &snapshot,
    )?;

    if let (Scenario::Marshak, Some(table)) = (scenario, reference.as_ref()) {
        info!("{}", marshak::validate_material(&system, table)?);
    }

    match scenario.validate(&system, reference.as_ref())? {
        Some(validation) => {
            info!("{}", validation);
            Ok(validation.passed())
        }
        None => {
            warn!("no reference solution given; skipping validation");
            Ok(true)
        }
    }
}

fn main() {
    let opts = Opts::parse();

    if let Err(e) = SimpleLogger::new().with_level(opts.log_level).init() {
        eprintln!("{}", e);
    }

    match run(&opts) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}
