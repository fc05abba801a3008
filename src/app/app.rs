use std::sync::Arc;
use std::time::Instant;

use egui_wgpu::ScreenDescriptor;
use winit::window::Window;

use crate::error::FolioResult;
use crate::mail::Mailer;
use crate::pages::ActivePage;
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraPath, CameraState};
use crate::router::{BANNER_COUNT, PageTransition, Route, TransitionEvent};
use crate::settings::{Settings, Theme};

const DEFAULT_MODEL_SOURCE: &str = "assets/portfolio.glb";

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    egui_state: egui_winit::State,
    settings: Settings,
    transition: PageTransition,
    page: ActivePage,
    camera: CameraState,
    runtime: tokio::runtime::Handle,
    mailer: Arc<dyn Mailer>,
    model_source: String,
    last_frame: Option<Instant>,
}

impl App {
    pub async fn new(
        window: Arc<Window>,
        runtime: tokio::runtime::Handle,
        mailer: Arc<dyn Mailer>,
        model_source: Option<String>,
    ) -> FolioResult<Self> {
        let renderer = Renderer::new(&window).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = egui_winit::State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &*window,
            None,
            None,
            None,
        );

        let settings = Settings::load();
        let model_source = model_source.unwrap_or_else(|| DEFAULT_MODEL_SOURCE.to_string());

        // The camera rests on the first authored waypoint until scroll
        // moves it.
        let mut camera = match CameraPath::default().first() {
            Some(w) => CameraState::new(w.position.into(), w.target.into()),
            None => CameraState::default(),
        };
        let size = window.inner_size();
        camera.set_viewport(size.width, size.height);

        let transition = PageTransition::new(Route::Home);
        let page = ActivePage::mount(Route::Home, &runtime, &model_source, Arc::clone(&mailer));

        Ok(Self {
            window,
            renderer,
            egui_state,
            settings,
            transition,
            page,
            camera,
            runtime,
            mailer,
            model_source,
            last_frame: None,
        })
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                self.camera.set_viewport(size.width, size.height);
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
                if event.state.is_pressed() {
                    self.handle_debug_key(&event.logical_key);
                }
            }
            _ => {}
        }

        EventResponse {
            repaint: true,
            exit: false,
        }
    }

    /// Development-only camera nudger, gated behind the debug setting.
    fn handle_debug_key(&mut self, key: &winit::keyboard::Key) {
        if !self.settings.debug.debug_camera {
            return;
        }
        let winit::keyboard::Key::Character(ch) = key else {
            return;
        };
        const STEP: f32 = 0.1;
        match ch.as_str() {
            "w" => self.camera.nudge(2, -STEP),
            "s" => self.camera.nudge(2, STEP),
            "a" => self.camera.nudge(0, -STEP),
            "d" => self.camera.nudge(0, STEP),
            "q" => self.camera.nudge(1, STEP),
            "e" => self.camera.nudge(1, -STEP),
            _ => return,
        }
        log::debug!(
            "camera position {:?} target {:?}",
            self.camera.position,
            self.camera.target
        );
    }

    fn navbar(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut requested = None;
        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Abdullah").strong().size(18.0));
                ui.separator();
                for route in Route::ALL {
                    let selected = self.transition.current() == route;
                    if ui.selectable_label(selected, route.title()).clicked() {
                        requested = Some(route);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let icon = match self.settings.display.theme {
                        Theme::Light => "🌙",
                        Theme::Dark => "☀",
                    };
                    if ui.button(icon).clicked() {
                        self.settings.display.theme = match self.settings.display.theme {
                            Theme::Light => Theme::Dark,
                            Theme::Dark => Theme::Light,
                        };
                        self.settings.display.save();
                    }
                    ui.hyperlink_to("GitHub", "https://github.com/");
                    ui.hyperlink_to("LinkedIn", "https://www.linkedin.com/");
                });
            });
        });
        requested
    }

    fn paint_transition_mask(&self, ctx: &egui::Context) {
        if self.transition.is_idle() {
            return;
        }
        let screen = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("page-transition-mask"),
        ));
        let band_width = screen.width() / BANNER_COUNT as f32;
        let mask = egui::Color32::from_rgb(23, 23, 23);
        for i in 0..BANNER_COUNT {
            if let Some(offset) = self.transition.banner_offset(i) {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(
                        screen.left() + band_width * i as f32,
                        screen.top() + offset * screen.height(),
                    ),
                    egui::vec2(band_width + 1.0, screen.height()),
                );
                painter.rect_filled(rect, egui::CornerRadius::ZERO, mask);
            }
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| (now - last).as_secs_f32().min(0.25))
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        // Route changes only commit once the mask fully covers the view.
        if let TransitionEvent::Commit(route) = self.transition.step(dt) {
            if matches!(self.page, ActivePage::About(_)) {
                // Leaving the viewer releases its GPU buffers too.
                self.renderer.clear_scene();
            }
            self.camera.reset();
            self.page = ActivePage::mount(
                route,
                &self.runtime,
                &self.model_source,
                Arc::clone(&self.mailer),
            );
            self.transition.finish_navigation();
        }

        match &mut self.page {
            ActivePage::Home(page) => page.step(dt),
            ActivePage::Projects(page) => page.step(dt),
            ActivePage::Contact(page) => {
                page.step(dt);
                page.poll();
            }
            // Stepped in frame() below, after the UI pass reports layout.
            ActivePage::About(_) => {}
        }

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut requested = None;
        let full_output = egui_ctx.run(raw_input, |ctx| {
            ctx.set_visuals(match self.settings.display.theme {
                Theme::Light => egui::Visuals::light(),
                Theme::Dark => egui::Visuals::dark(),
            });

            requested = self.navbar(ctx);

            let transparent = matches!(self.page, ActivePage::About(_));
            let frame = if transparent {
                egui::Frame::NONE
            } else {
                egui::Frame::central_panel(&ctx.style())
            };
            egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
                let navigate = match &mut self.page {
                    ActivePage::Home(page) => page.ui(ui),
                    ActivePage::About(page) => {
                        page.ui(ui);
                        None
                    }
                    ActivePage::Projects(page) => page.ui(ui),
                    ActivePage::Contact(page) => {
                        page.ui(ui, &self.runtime);
                        None
                    }
                };
                if navigate.is_some() {
                    requested = navigate;
                }
            });

            self.paint_transition_mask(ctx);
        });

        if let Some(route) = requested {
            // Ignored while a transition is in flight.
            let _ = self.transition.request(route);
        }

        if let ActivePage::About(page) = &mut self.page {
            page.frame(dt, &mut self.camera, &mut self.renderer);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);
        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.renderer.size().0, self.renderer.size().1],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let draw_scene = matches!(&self.page, ActivePage::About(page) if page.has_scene());
        let clear_color = match self.settings.display.theme {
            Theme::Light => [0.93, 0.93, 0.95],
            Theme::Dark => [0.02, 0.02, 0.03],
        };

        self.renderer.render(
            &self.camera,
            draw_scene,
            clear_color,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }

    /// Lost or outdated surfaces are reconfigured for the next frame;
    /// anything else is logged and the frame skipped.
    pub fn handle_render_error(&mut self, error: wgpu::SurfaceError) {
        match error {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.renderer.resize(self.window.inner_size());
            }
            wgpu::SurfaceError::Timeout => {}
            other => log::error!("render error: {other:?}"),
        }
    }
}
