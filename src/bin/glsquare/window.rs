use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{PhysicalSize, Size};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::native::NativeGl;
use glsquare::{ContextAcquirer, SetupError};

pub const SURFACE_ID: &str = "glCanvas";

pub struct GlWindow {
    pub context: PossiblyCurrentContext,
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

/// Opens a fixed-size window and makes an OpenGL 3.3 context current on it.
pub struct GlutinAcquirer<'a> {
    event_loop: &'a EventLoop<()>,
    width: u32,
    height: u32,
    window: Option<GlWindow>,
}

impl<'a> GlutinAcquirer<'a> {
    pub fn new(event_loop: &'a EventLoop<()>, width: u32, height: u32) -> Self {
        Self {
            event_loop,
            width,
            height,
            window: None,
        }
    }

    pub fn into_window(self) -> Option<GlWindow> {
        self.window
    }
}

fn unavailable(e: impl ToString) -> SetupError {
    SetupError::ContextUnavailable(e.to_string())
}

impl ContextAcquirer for GlutinAcquirer<'_> {
    type Gl = NativeGl;

    fn acquire(&mut self) -> Result<NativeGl, SetupError> {
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(self.width, self.height)))
            .with_resizable(false)
            .with_title(SURFACE_ID);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = display_builder
            .build(self.event_loop, template, |mut configs| {
                // glutin reports an error before calling us when nothing matches
                configs.next().expect("display offered no matching config")
            })
            .map_err(unavailable)?;

        let window = window.ok_or_else(|| unavailable("window was not created"))?;

        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(handle));

        let (width, height): (u32, u32) = window.inner_size().into();
        let (width, height) = NonZeroU32::new(width)
            .zip(NonZeroU32::new(height))
            .ok_or_else(|| unavailable("surface has zero size"))?;

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(handle, width, height);

        let surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(unavailable)?;

        let context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
            .map_err(unavailable)?
            .make_current(&surface)
            .map_err(unavailable)?;

        let gl = NativeGl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        })
        .ok_or_else(|| unavailable("required GL functions could not be loaded"))?;

        tracing::info!(width = width.get(), height = height.get(), "GL context ready");

        self.window = Some(GlWindow {
            context,
            surface,
            window,
        });

        Ok(gl)
    }
}
