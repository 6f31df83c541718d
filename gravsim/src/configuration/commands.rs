//! Command stream: tokenizer and config/object builder
//!
//! A script is a whitespace-separated list of commands, each followed by its
//! arguments. Option commands override any previous instance of themselves;
//! every `OBJECT` adds one body at `t = TI`.
//!
//! ```text
//! DIMENSIONS 512 512
//! ZOOM 100
//! G 1
//! DT 0.001
//! OBJECT 1 0.05 -1 0 0  0.5   # mass radius x y vx vy
//! OBJECT 1 0.05  1 0 0 -0.5
//! ```

use std::str::FromStr;

use log::debug;

use crate::configuration::config::SimulationConfig;
use crate::error::{BuildError, ConstructionError, ParseError};
use crate::simulation::states::{Body, NVec2};

/// One tokenized command with its position in the stream
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub index: usize,
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<S: Into<String>>(index: usize, name: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            index,
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split script text into commands.
///
/// A token starting with an ASCII letter opens a new command; everything up to
/// the next such token is its argument list. `#` comments out the rest of the
/// line.
pub fn tokenize(source: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands: Vec<Command> = Vec::new();

    let tokens = source
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace);

    for token in tokens {
        let starts_command = token.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if starts_command {
            commands.push(Command::new(commands.len(), token, Vec::<String>::new()));
            continue;
        }
        match commands.last_mut() {
            Some(command) => command.args.push(token.to_owned()),
            None => {
                return Err(ParseError::new(0, token, "argument appears before any command"));
            }
        }
    }

    Ok(commands)
}

/// Fold a command stream into the final config and the initial bodies.
///
/// Stops at the first bad command.
pub fn build(commands: &[Command]) -> Result<(SimulationConfig, Vec<Body>), BuildError> {
    let mut builder = Builder::default();
    for command in commands {
        builder.apply(command)?;
    }
    debug!(
        "built config from {} commands: {} bodies, {} frames",
        commands.len(),
        builder.bodies.len(),
        builder.config.frames
    );
    Ok((builder.config, builder.bodies))
}

/// Tokenize and build in one go
pub fn build_from_script(source: &str) -> Result<(SimulationConfig, Vec<Body>), BuildError> {
    build(&tokenize(source)?)
}

#[derive(Default)]
struct Builder {
    config: SimulationConfig,
    bodies: Vec<Body>,
}

impl Builder {
    fn apply(&mut self, cmd: &Command) -> Result<(), BuildError> {
        let cfg = &mut self.config;
        match cmd.name.as_str() {
            "DIMENSIONS" => {
                let [width, height] = args::<2>(cmd)?;
                let width = parse_positive_int(cmd, width, "width")?;
                let height = parse_positive_int(cmd, height, "height")?;
                cfg.width = width;
                cfg.height = height;
            }
            "CENTRE" => {
                let [x, y] = args::<2>(cmd)?;
                cfg.centre_x = parse_real(cmd, x)?;
                cfg.centre_y = parse_real(cmd, y)?;
            }
            "FRAMES" => {
                let [frames] = args::<1>(cmd)?;
                cfg.frames = parse_int::<u64>(cmd, frames)?;
            }
            "ZOOM" => {
                let [zoom] = args::<1>(cmd)?;
                let zoom = parse_real(cmd, zoom)?;
                if zoom <= 0.0 {
                    return Err(ParseError::new(cmd.index, &cmd.name, format!("magnification must be positive, got {zoom}")).into());
                }
                cfg.zoom = zoom;
            }
            "DT" => {
                let [dt] = args::<1>(cmd)?;
                cfg.dt = parse_real(cmd, dt)?;
            }
            "TI" => {
                let [t0] = args::<1>(cmd)?;
                cfg.t0 = parse_real(cmd, t0)?;
            }
            "G" => {
                let [g] = args::<1>(cmd)?;
                cfg.g = parse_real(cmd, g)?;
            }
            "MERGING" => {
                let [flag] = args::<1>(cmd)?;
                cfg.merge = match flag {
                    "0" => false,
                    "1" => true,
                    other => {
                        return Err(ParseError::new(cmd.index, &cmd.name, format!("expected 0 or 1, got `{other}`")).into());
                    }
                };
            }
            "OBJECT" => {
                let values = args::<6>(cmd)?;
                let mut parsed = [0.0; 6];
                for (slot, token) in parsed.iter_mut().zip(values) {
                    *slot = parse_real(cmd, token)?;
                }
                let [mass, radius, x, y, vx, vy] = parsed;

                if mass <= 0.0 {
                    return Err(ConstructionError::NonPositiveMass { index: cmd.index, mass }.into());
                }
                if radius <= 0.0 {
                    return Err(ConstructionError::NonPositiveRadius { index: cmd.index, radius }.into());
                }

                let id = self.bodies.len() as u64;
                self.bodies.push(Body {
                    id,
                    x: NVec2::new(x, y),
                    v: NVec2::new(vx, vy),
                    m: mass,
                    radius,
                });
            }
            _ => return Err(ParseError::new(cmd.index, &cmd.name, "unrecognized command").into()),
        }
        Ok(())
    }
}

fn args<const N: usize>(cmd: &Command) -> Result<[&str; N], ParseError> {
    let found = cmd.args.len();
    let mut out = [""; N];
    if found != N {
        return Err(ParseError::new(cmd.index, &cmd.name, format!("expected {N} arguments, got {found}")));
    }
    for (slot, arg) in out.iter_mut().zip(&cmd.args) {
        *slot = arg.as_str();
    }
    Ok(out)
}

fn parse_real(cmd: &Command, token: &str) -> Result<f64, ParseError> {
    let value: f64 = token
        .parse()
        .map_err(|_| ParseError::new(cmd.index, &cmd.name, format!("`{token}` is not a number")))?;
    if !value.is_finite() {
        return Err(ParseError::new(cmd.index, &cmd.name, format!("`{token}` is not a finite number")));
    }
    Ok(value)
}

fn parse_int<T: FromStr>(cmd: &Command, token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::new(cmd.index, &cmd.name, format!("`{token}` is not a non-negative integer")))
}

fn parse_positive_int(cmd: &Command, token: &str, what: &str) -> Result<u32, ParseError> {
    match parse_int::<u32>(cmd, token)? {
        0 => Err(ParseError::new(cmd.index, &cmd.name, format!("{what} must be positive"))),
        n => Ok(n),
    }
}
