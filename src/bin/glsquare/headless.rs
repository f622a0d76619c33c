use std::time::{Duration, Instant};

use gl_wrapper::recording::{GlCall, RecordingGl};

use glsquare::alert::LogAlert;
use glsquare::frame::FrameParams;
use glsquare::scheduler::RenderLoop;
use glsquare::source::ShaderDocument;
use glsquare::{ContextAcquirer, SetupError};

struct RecordingAcquirer;

impl ContextAcquirer for RecordingAcquirer {
    type Gl = RecordingGl;

    fn acquire(&mut self) -> Result<RecordingGl, SetupError> {
        Ok(RecordingGl::new())
    }
}

/// Runs setup and `frames` ticks against the recording backend, stepping
/// the clock by one period per tick.
pub fn run(
    document: &ShaderDocument,
    params: FrameParams,
    period: Duration,
    frames: u32,
) -> bool {
    let Some(context) = glsquare::start(&mut RecordingAcquirer, document, &mut LogAlert) else {
        return false;
    };

    let setup_calls = context.gl().take_calls().len();

    let start = Instant::now();
    let mut render_loop = RenderLoop::new(context, params, period, start);

    for i in 1..=frames {
        let Some(now) = period.checked_mul(i).and_then(|d| start.checked_add(d)) else {
            tracing::warn!(frame = i, "interval too long to simulate, stopping");
            break;
        };
        render_loop.poll(now);
    }

    let calls = render_loop.context().gl().calls();
    let draws = calls
        .iter()
        .filter(|c| matches!(c, GlCall::DrawArrays(..)))
        .count();

    for call in &calls {
        tracing::debug!(?call);
    }

    tracing::info!(
        setup_calls,
        frame_calls = calls.len(),
        frames = render_loop.frames(),
        draws,
        "headless run finished"
    );
    println!("{} frames, {} draw calls", render_loop.frames(), draws);

    true
}
