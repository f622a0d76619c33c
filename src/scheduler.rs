use std::time::{Duration, Instant};

use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::GlApi;

use crate::context::RenderContext;
use crate::frame::{self, FrameParams};

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(15);

/// Fixed-period timer. The first tick is due one period after `start`;
/// ticks missed while the caller was busy collapse into a single one.
/// A deadline past what `Instant` can represent never comes due.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next_due: start.checked_add(period),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Consumes the pending tick if one is due at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        let period = self.period.as_nanos();
        if period == 0 {
            self.next_due = Some(now);
            return true;
        }

        // first multiple of the period strictly after `now`
        let missed = (now - due).as_nanos() / period;
        self.next_due = u64::try_from((missed + 1) * period)
            .ok()
            .and_then(|step| due.checked_add(Duration::from_nanos(step)));

        true
    }
}

/// Drives frame rendering from an [`Interval`]. Time is passed in, so the
/// loop can be stepped without a real clock.
pub struct RenderLoop<G: GlApi> {
    context: RenderContext<G>,
    renderer: GlRenderer,
    params: FrameParams,
    interval: Interval,
    frames: u64,
}

impl<G: GlApi> RenderLoop<G> {
    pub fn new(
        context: RenderContext<G>,
        params: FrameParams,
        period: Duration,
        start: Instant,
    ) -> Self {
        let renderer = GlRenderer::new(context.program().get_id());

        Self {
            context,
            renderer,
            params,
            interval: Interval::new(period, start),
            frames: 0,
        }
    }

    pub fn context(&self) -> &RenderContext<G> {
        &self.context
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.interval.deadline()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Renders one frame if the interval is due. Returns whether it did.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.interval.tick(now) {
            return false;
        }

        self.render_frame();
        true
    }

    pub fn render_frame(&mut self) {
        let commands = frame::render(&self.context.frame_state(&self.params));

        self.renderer
            .execute(self.context.gl(), self.context.program(), &commands);
        self.frames += 1;

        tracing::trace!(frame = self.frames, "frame rendered");
    }
}
