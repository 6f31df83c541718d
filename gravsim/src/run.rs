//! Drive a whole run: simulate, render and encode every frame in order.
//!
//! The sequential path does everything on the calling thread. The pipelined
//! path moves the simulator onto a scoped thread and hands snapshots over a
//! bounded channel, so step N+1 overlaps rendering and encoding of frame N.
//! Both write the same bytes.

use std::sync::mpsc;
use std::thread;

use log::info;

use crate::configuration::config::SimulationConfig;
use crate::error::RunError;
use crate::output::encoder::FrameEncoder;
use crate::simulation::engine::Simulator;
use crate::simulation::integrator::IntegratorConfig;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, SystemState};
use crate::visualization::renderer::{Exposure, FrameRenderer};

/// Snapshots the simulator may run ahead of the encoder
const PIPELINE_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub integrator: IntegratorConfig,
    pub pipelined: bool,
}

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub final_time: Option<f64>, // None when no frame was produced
    pub final_bodies: usize,
}

/// Renders each snapshot and feeds the encoder (and the exposure, if any)
struct FrameSink<'a, E: FrameEncoder> {
    renderer: FrameRenderer,
    encoder: &'a mut E,
    exposure: Option<&'a mut Exposure>,
    summary: RunSummary,
}

impl<E: FrameEncoder> FrameSink<'_, E> {
    fn consume(&mut self, frame: u64, state: &SystemState) -> Result<(), RunError> {
        let raster = self.renderer.render(state);
        self.encoder
            .encode(&raster)
            .map_err(|source| RunError::Write { frame, source })?;

        if let Some(exposure) = self.exposure.as_deref_mut() {
            exposure.add(frame, state);
        }

        self.summary.frames += 1;
        self.summary.final_time = Some(state.t);
        self.summary.final_bodies = state.bodies.len();
        Ok(())
    }
}

/// Simulate `cfg.frames` frames of `bodies` and write them to `encoder`.
///
/// `cfg` and `bodies` are only read. On error, frames already handed to the
/// encoder stay written.
pub fn run<E: FrameEncoder>(
    cfg: &SimulationConfig,
    bodies: &[Body],
    options: RunOptions,
    encoder: &mut E,
    exposure: Option<&mut Exposure>,
) -> Result<RunSummary, RunError> {
    info!(
        "simulating {} bodies for {} frames ({}x{}, dt = {}, {} integrator{})",
        bodies.len(),
        cfg.frames,
        cfg.width,
        cfg.height,
        cfg.dt,
        options.integrator,
        if options.pipelined { ", pipelined" } else { "" }
    );

    let scenario = Scenario::build_scenario(cfg, bodies).with_integrator(options.integrator);
    let snapshots = Simulator::new(scenario).snapshots(cfg.frames);

    let mut sink = FrameSink {
        renderer: FrameRenderer::from_config(cfg),
        encoder,
        exposure,
        summary: RunSummary {
            frames: 0,
            final_time: None,
            final_bodies: bodies.len(),
        },
    };

    if options.pipelined {
        thread::scope(|scope| {
            let (tx, rx) = mpsc::sync_channel(PIPELINE_DEPTH);
            let producer = scope.spawn(move || {
                for snapshot in snapshots {
                    // receiver gone means the consumer bailed out
                    if tx.send(snapshot).is_err() {
                        break;
                    }
                }
            });

            let consumed = rx
                .into_iter()
                .try_for_each(|(frame, state)| sink.consume(frame, &state));
            let joined = producer.join().map_err(|_| RunError::SimulationPanicked);
            consumed.and(joined)
        })?;
    } else {
        for (frame, state) in snapshots {
            sink.consume(frame, &state)?;
        }
    }

    sink.encoder.finish().map_err(RunError::Finish)?;

    info!(
        "wrote {} frames, {} bodies remain",
        sink.summary.frames, sink.summary.final_bodies
    );
    Ok(sink.summary)
}
