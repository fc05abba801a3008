use std::sync::Arc;
use winit::event_loop::{ControlFlow, EventLoop};

mod anim;
mod app;
mod assets;
mod content;
mod error;
mod gltf;
mod mail;
mod pages;
mod renderer;
mod router;
mod scene;
mod scroll;
mod settings;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Optional model path (or URL) as the first argument.
    let model_source = std::env::args().nth(1);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = app::handler::AppHandler {
        app: None,
        model_source,
        runtime: tokio::runtime::Runtime::new()?,
        mailer: Arc::new(mail::EmailJs::new()),
    };

    event_loop.run_app(&mut handler)?;

    Ok(())
}
