use gravsim::configuration::config::build_from_yaml;
use gravsim::{build_from_script, run, write_bmp, Exposure, IntegratorConfig, RawFrameEncoder, RunOptions};
use gravsim::{Body, SimulationConfig};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

/// Simulate a scripted gravitational system and write raw RGB frames
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Command script or scenario document; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Where frames go; `-` or omitted writes stdout (never a terminal)
    output: Option<PathBuf>,

    /// Input format; guessed from the input extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Integration scheme: `euler` or `verlet`
    #[arg(long, default_value_t = IntegratorConfig::SymplecticEuler)]
    integrator: IntegratorConfig,

    /// Simulate the next frame while the current one is rendered
    #[arg(long)]
    pipeline: bool,

    /// Also write a long-exposure composite of every frame as a BMP
    #[arg(long, value_name = "PATH")]
    exposure: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Whitespace-separated commands
    Script,
    /// YAML or JSON scenario document
    Yaml,
}

/// `None` for stdio
fn named(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut source = String::new();
    match named(path) {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("unable to open input file for reading ({})", path.display()))?
                .read_to_string(&mut source)
                .with_context(|| format!("unable to read {}", path.display()))?;
        }
        None => {
            io::stdin().read_to_string(&mut source).context("unable to read stdin")?;
        }
    }
    Ok(source)
}

fn guess_format(path: Option<&Path>) -> InputFormat {
    let ext = named(path).and_then(Path::extension).and_then(|e| e.to_str());
    match ext {
        Some("yaml" | "yml" | "json") => InputFormat::Yaml,
        _ => InputFormat::Script,
    }
}

// load here to keep main clean
fn load_system(args: &Args) -> Result<(SimulationConfig, Vec<Body>)> {
    let source = read_input(args.input.as_deref())?;
    let format = args.format.unwrap_or_else(|| guess_format(args.input.as_deref()));

    let built = match format {
        InputFormat::Script => build_from_script(&source).map_err(anyhow::Error::from),
        InputFormat::Yaml => build_from_yaml(&source).map_err(anyhow::Error::from),
    };
    built.context("invalid input")
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match named(path) {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to open output file for writing ({})", path.display()))?;
            if file.is_terminal() {
                bail!("output is a terminal");
            }
            Ok(Box::new(BufWriter::new(file)))
        }
        None => {
            let stdout = io::stdout();
            if stdout.is_terminal() {
                bail!("output is a terminal");
            }
            Ok(Box::new(BufWriter::new(stdout.lock())))
        }
    }
}

fn create_exposure(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("unable to create exposure file ({})", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    // nothing is written until the whole input has been validated
    let (cfg, bodies) = load_system(&args)?;

    // every output is opened before the first frame is simulated
    let mut exposure_out = args.exposure.as_deref().map(create_exposure).transpose()?;
    let mut encoder = RawFrameEncoder::new(open_output(args.output.as_deref())?);
    let mut exposure = exposure_out.as_ref().map(|_| Exposure::from_config(&cfg));

    let options = RunOptions {
        integrator: args.integrator,
        pipelined: args.pipeline,
    };
    run(&cfg, &bodies, options, &mut encoder, exposure.as_mut())?;

    if let (Some(path), Some(out), Some(exposure)) = (&args.exposure, exposure_out.as_mut(), &exposure) {
        write_bmp(exposure.raster(), out)
            .with_context(|| format!("unable to write {}", path.display()))?;
        out.flush()
            .with_context(|| format!("unable to write {}", path.display()))?;
        info!("exposure written to {}", path.display());
    }

    Ok(())
}
