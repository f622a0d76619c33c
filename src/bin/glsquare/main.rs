use std::time::{Duration, Instant};

use clap::Parser;
use glutin::prelude::*;
use tracing_subscriber::EnvFilter;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

use glsquare::alert::LogAlert;
use glsquare::frame::{FrameParams, CANVAS_HEIGHT, CANVAS_WIDTH};
use glsquare::scheduler::RenderLoop;
use glsquare::source::ShaderDocument;

mod args;
mod headless;
mod window;

use args::Args;
use window::GlutinAcquirer;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = <Args as Parser>::parse();

    let document = match &args.document {
        Some(path) => ShaderDocument::load_path(path),
        None => ShaderDocument::builtin(),
    };

    let document = match document {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Could not read shader document: {e}");
            std::process::exit(-1);
        }
    };

    let params = FrameParams::default();
    let period = Duration::from_millis(args.interval);

    if args.headless {
        if !headless::run(&document, params, period, args.frames) {
            std::process::exit(-1);
        }
        return;
    }

    let event_loop = EventLoop::new();
    let mut acquirer = GlutinAcquirer::new(&event_loop, CANVAS_WIDTH, CANVAS_HEIGHT);

    let Some(context) = glsquare::start(&mut acquirer, &document, &mut LogAlert) else {
        std::process::exit(-1);
    };
    let Some(gl_window) = acquirer.into_window() else {
        std::process::exit(-1);
    };

    let mut render_loop = RenderLoop::new(context, params, period, Instant::now());

    event_loop.run(move |event, _window_target, control_flow| match event {
        Event::MainEventsCleared => {
            if render_loop.poll(Instant::now()) {
                if let Err(e) = gl_window.surface.swap_buffers(&gl_window.context) {
                    tracing::warn!("swap failed: {e}");
                }
            }

            *control_flow = match render_loop.deadline() {
                Some(deadline) => ControlFlow::WaitUntil(deadline),
                None => ControlFlow::Wait,
            };
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => control_flow.set_exit(),
        _ => (),
    });
}
