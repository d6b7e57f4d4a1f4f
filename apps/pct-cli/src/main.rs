use clap::{Parser, Subcommand, ValueEnum};
use pct_sim::{SimConfig, SimResult, Simulation, TickOutcome, TuningForm};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pct-cli")]
#[command(about = "Process control tutor - headless PID loop simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the closed loop for a number of ticks and print the time series
    Run {
        /// Simulation config YAML (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Proportional gain
        #[arg(long, allow_hyphen_values = true)]
        kp: Option<String>,
        /// Integral gain
        #[arg(long, allow_hyphen_values = true)]
        ki: Option<String>,
        /// Derivative gain
        #[arg(long, allow_hyphen_values = true)]
        kd: Option<String>,
        /// Setpoint
        #[arg(long, allow_hyphen_values = true)]
        setpoint: Option<String>,
        /// Number of ticks to simulate
        #[arg(long, default_value_t = 500)]
        ticks: usize,
        /// Pace ticks at one step interval of wall-clock time each
        #[arg(long)]
        realtime: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the default simulation config as YAML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> SimResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            kp,
            ki,
            kd,
            setpoint,
            ticks,
            realtime,
            format,
            output,
        } => {
            let config = match config {
                Some(path) => SimConfig::load_yaml(&path)?,
                None => SimConfig::default(),
            };
            let mut form = TuningForm::from(&config.tuning);
            if let Some(kp) = kp {
                form.kp = kp;
            }
            if let Some(ki) = ki {
                form.ki = ki;
            }
            if let Some(kd) = kd {
                form.kd = kd;
            }
            if let Some(setpoint) = setpoint {
                form.setpoint = setpoint;
            }
            cmd_run(&config, &form, ticks, realtime, format, output.as_deref())
        }
        Commands::Config => {
            print!("{}", SimConfig::default().to_yaml_string()?);
            Ok(())
        }
    }
}

fn cmd_run(
    config: &SimConfig,
    form: &TuningForm,
    ticks: usize,
    realtime: bool,
    format: Format,
    output: Option<&Path>,
) -> SimResult<()> {
    let mut sim = Simulation::from_config(config)?;
    sim.start(form)?;

    let started = Instant::now();
    let mut done = 0;
    while done < ticks {
        let outcome = if realtime {
            let now = Instant::now();
            if let Some(wait) = sim.trigger().time_until(now) {
                std::thread::sleep(wait);
            }
            sim.poll(Instant::now())
        } else {
            Some(sim.tick())
        };
        match outcome {
            Some(TickOutcome::Advanced(sample)) => {
                done += 1;
                if realtime {
                    eprint!(
                        "\rt = {:>8.2} s  pv = {:>10.5}  sp = {:>8.3}",
                        sample.time, sample.process_value, sample.setpoint
                    );
                    // Progress line only; a failed flush just delays it
                    let _ = io::stderr().flush();
                }
            }
            Some(_) | None => {}
        }
    }
    sim.stop();
    if realtime {
        eprintln!();
    }

    tracing::info!(
        ticks,
        final_output = sim.process_output(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "run complete"
    );

    let text = match format {
        Format::Csv => sim.series().to_csv(),
        Format::Json => serde_json::to_string_pretty(sim.series())?,
    };
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("✓ Wrote {} samples to {}", sim.series().len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
