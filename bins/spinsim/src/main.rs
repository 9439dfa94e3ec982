mod output;
mod system;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;

use spin::build_hamiltonian;
use spin::information::entanglement_entropy_per_site_gs;
use thermo::{entropy_workflow, expected_value_workflow, specific_heat_workflow, Schedule};

use output::write_csv;
use system::{parse_temperatures, SystemConfig, SystemError};

/// Thermodynamics of finite spin Hamiltonians
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML system description (default: spin-1/2 Heisenberg dimer)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Observable to compute
    #[arg(long, value_enum, default_value_t = Observable::SpecificHeat)]
    observable: Observable,

    /// Comma-separated temperatures in K, overriding the system file
    #[arg(long)]
    temperatures: Option<String>,

    /// Number of Rayon worker threads (0 = Rayon default, 1 = sequential)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Decimal digits of the arbitrary-precision path
    #[arg(long)]
    precision_digits: Option<u32>,

    /// Output CSV file
    #[arg(long, default_value = "spinsim.csv")]
    out: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Observable {
    SpecificHeat,
    Entropy,
    Magnetization,
    Entanglement,
}

fn main() {
    let args = Args::parse();

    let level = args
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SystemError> {
    let mut system = match args.config.as_deref() {
        Some(path) => {
            info!("Loading system from {}", path.display());
            SystemConfig::from_file(path)?
        }
        None => {
            info!("No --config given, using the spin-1/2 Heisenberg dimer");
            SystemConfig::heisenberg_dimer()
        }
    };
    if let Some(list) = &args.temperatures {
        system.temperatures = parse_temperatures(list)?;
    }
    if let Some(digits) = args.precision_digits {
        system.thermal.precision_digits = digits;
    }
    system.validate()?;

    let threads = match args.threads {
        0 => system.threads.unwrap_or(0),
        n => n,
    };
    if threads > 1 {
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!(threads, %err, "keeping the default Rayon pool");
        }
    }
    let schedule = if threads == 1 {
        Schedule::Sequential
    } else {
        Schedule::Parallel { threads: 0 }
    };

    let spins = system.spins()?;
    let h = build_hamiltonian(&system.terms()?, &spins)?;
    info!(sites = spins.len(), dim = h.dim(), real = h.is_real(), "Hamiltonian assembled");

    let (header, rows) = match args.observable {
        Observable::Entanglement => {
            let entropies = entanglement_entropy_per_site_gs(&h, &spins)?;
            for (traced, s) in entropies.iter().enumerate() {
                println!("traced = {:>3}  S = {:.6}", traced, s);
            }
            let rows = entropies
                .iter()
                .enumerate()
                .map(|(traced, &s)| (traced as f64, s))
                .collect();
            (["traced_sites", "entropy"], rows)
        }
        observable => {
            let temps = system.temperatures();
            let cfg = system.thermal;
            let (name, sweep) = match observable {
                Observable::SpecificHeat => {
                    ("specific_heat", specific_heat_workflow(&h, &temps, &cfg, schedule)?)
                }
                Observable::Entropy => ("entropy", entropy_workflow(&h, &temps, &cfg, schedule)?),
                _ => {
                    let m = build_hamiltonian(&system.magnetization_terms(), &spins)?;
                    (
                        "magnetization",
                        expected_value_workflow(&h, &m, &temps, &cfg, schedule)?,
                    )
                }
            };

            let mut rows = Vec::with_capacity(temps.len());
            for (&t, value) in temps.iter().zip(sweep) {
                match value {
                    Ok(v) => {
                        println!("T = {:>10.4} K  {} = {:.6e}", t, name, v);
                        rows.push((t, v));
                    }
                    Err(err) => warn!(t, %err, "skipping temperature"),
                }
            }
            (["temperature", name], rows)
        }
    };

    write_csv(&args.out, header, &rows).map_err(|source| SystemError::Io {
        path: args.out.clone(),
        source,
    })?;
    info!("Wrote {} rows to {}", rows.len(), args.out.display());
    Ok(())
}
