use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::app::app::App;
use crate::mail::Mailer;

pub struct AppHandler {
    pub app: Option<App>,
    pub model_source: Option<String>,
    pub runtime: Runtime,
    pub mailer: Arc<dyn Mailer>,
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Abdullah — Portfolio")
            .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let app = self.runtime.block_on(App::new(
            window,
            self.runtime.handle().clone(),
            Arc::clone(&self.mailer),
            self.model_source.take(),
        ));
        match app {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                // Startup failure is the one fatal path: fail visibly.
                log::error!("failed to initialize renderer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if let Err(e) = app.render() {
                app.handle_render_error(e);
            }
            app.window.request_redraw();
        }
    }
}
