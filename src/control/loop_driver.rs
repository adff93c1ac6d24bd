//! Frame-driven run control.
//!
//! The host owns the clock: it hands out [`FrameRequest`]s through a
//! [`FrameScheduler`] and calls [`LoopDriver::on_frame`] when one fires. At
//! most one request is outstanding; `start` and `reset` cancel it before
//! rebuilding the run, and a request that fires after being superseded is
//! ignored.

use std::collections::VecDeque;

use log::info;

use crate::{
    constants::TIME_STEP,
    control::{
        config::SimulationConfig,
        layout::Viewport,
        simulation::{SimulationRun, StopReason},
    },
    errors::SimulationError,
    render_system::{draw::Frame, renderer::render},
    telemetry_system::telemetry::Telemetry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Host primitive for "call me on the next frame", e.g.
/// `requestAnimationFrame`/`cancelAnimationFrame` or a timer.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Receives every rendered frame.
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// In-process scheduler stepped by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameRequest>,
    cancelled: Vec<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    /// Fires the oldest outstanding request, if any.
    pub fn next_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled(&self) -> &[FrameRequest] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|pending| *pending != request);
        self.cancelled.push(request);
    }
}

/// Keeps the most recent frame.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames_presented: usize,
    pub last_frame: Option<Frame>,
}

impl RenderSink for FrameRecorder {
    fn present(&mut self, frame: &Frame) {
        self.frames_presented += 1;
        self.last_frame = Some(frame.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

pub struct LoopDriver<S: FrameScheduler, R: RenderSink> {
    scheduler: S,
    sink: R,
    state: LoopState,
    run: Option<SimulationRun>,
    pending: Option<FrameRequest>,
    stop_reason: Option<StopReason>,
    telemetry: Telemetry,
    time_step: f64,
}

impl<S: FrameScheduler, R: RenderSink> LoopDriver<S, R> {
    pub fn new(scheduler: S, sink: R) -> Self {
        LoopDriver {
            scheduler,
            sink,
            state: LoopState::Idle,
            run: None,
            pending: None,
            stop_reason: None,
            telemetry: Telemetry::new(),
            time_step: TIME_STEP,
        }
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Begins a fresh run and schedules its first tick. An invalid config
    /// leaves the driver exactly as it was.
    pub fn start(
        &mut self,
        config: &SimulationConfig,
        viewport: &Viewport,
    ) -> Result<(), SimulationError> {
        self.initialize(config, viewport)?;
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());
        info!(
            "Simulation started: {} bomb(s), {} trigger every {} {}",
            config.bomb_count,
            config.drop_trigger,
            config.drop_interval,
            config.drop_trigger.unit_name()
        );
        Ok(())
    }

    /// Rebuilds the run and presents its first frame without ticking.
    pub fn reset(
        &mut self,
        config: &SimulationConfig,
        viewport: &Viewport,
    ) -> Result<(), SimulationError> {
        self.initialize(config, viewport)?;
        self.state = LoopState::Idle;
        if let Some(run) = &self.run {
            self.sink.present(&render(run));
        }
        info!("Simulation reset");
        Ok(())
    }

    fn initialize(
        &mut self,
        config: &SimulationConfig,
        viewport: &Viewport,
    ) -> Result<(), SimulationError> {
        config.validate()?;
        self.cancel_pending();
        self.run = Some(SimulationRun::with_time_step(config, viewport, self.time_step));
        self.stop_reason = None;
        self.telemetry = Telemetry::new();
        Ok(())
    }

    /// Drops the outstanding frame request, if any.
    pub fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
        }
    }

    /// Host callback for a fired request. Stale requests are ignored.
    pub fn on_frame(&mut self, request: FrameRequest) -> LoopState {
        if self.pending != Some(request) {
            return self.state;
        }
        self.pending = None;

        if self.state == LoopState::Running {
            self.tick();
        }
        self.state
    }

    fn tick(&mut self) {
        let Some(run) = self.run.as_mut() else {
            self.state = LoopState::Idle;
            return;
        };

        let report = run.integrate();
        self.telemetry.collect_data(run, &report);
        self.sink.present(&render(run));
        run.advance_clock();

        match run.stop_reason() {
            Some(reason) => {
                let clock = run.clock;
                if reason == StopReason::AllBombsLanded && run.plane_out_of_bounds() {
                    info!("Plane also out of bounds");
                }
                info!("Simulation ended at t={:.2}s: {:?}", clock, reason);
                self.telemetry.record_stop(reason, clock);
                self.stop_reason = Some(reason);
                self.state = LoopState::Stopped;
            }
            None => {
                self.pending = Some(self.scheduler.request_frame());
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn run(&self) -> Option<&SimulationRun> {
        self.run.as_ref()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn pending_request(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Unit of the current drop interval ("s" or "m").
    pub fn unit_label(&self) -> Option<&'static str> {
        self.run
            .as_ref()
            .map(|run| run.config.drop_trigger.unit_label())
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }
}

impl<R: RenderSink> LoopDriver<ManualScheduler, R> {
    /// Fires due frames until the run stops, nothing is scheduled, or
    /// `max_frames` have been delivered.
    pub fn run_to_completion(&mut self, max_frames: usize) -> LoopState {
        let mut delivered = 0;
        while delivered < max_frames {
            let Some(request) = self.scheduler.next_due() else {
                break;
            };
            self.on_frame(request);
            delivered += 1;
            if self.state == LoopState::Stopped {
                break;
            }
        }
        self.state
    }
}
