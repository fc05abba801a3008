use super::reveal::{HEADING_SLIDE, Reveal, TITLE_SPLIT};
use crate::anim::Ease;
use crate::assets::SceneLoader;
use crate::content::{self, SECTION_CLIPS};
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraPath, CameraState};
use crate::scene::{Mixer, Scene};
use crate::scroll::{HeadingRect, ScrollBinder};

/// The about page owns the 3D viewer: the model is loaded when the page
/// mounts and every pending load, trigger region and clip is dropped
/// when it unmounts. Scrolling the page scrubs the camera along the
/// authored waypoint path and picks each section's animation clip.
pub struct AboutPage {
    title: Reveal,
    loader: SceneLoader,
    scene: Option<Box<Scene>>,
    mixer: Mixer,
    binder: ScrollBinder,
    scroll_offset: f32,
    headings: Vec<HeadingRect>,
    viewport_height: f32,
    content_height: f32,
}

impl Drop for AboutPage {
    fn drop(&mut self) {
        // Unmounting mid-load abandons the fetch; a late completion is
        // discarded instead of touching disposed state.
        self.loader.cancel();
    }
}

impl AboutPage {
    pub fn new(runtime: &tokio::runtime::Handle, model_source: &str) -> Self {
        let mut loader = SceneLoader::new();
        loader.begin(runtime, model_source.to_string());
        Self {
            title: Reveal::new(TITLE_SPLIT),
            loader,
            scene: None,
            mixer: Mixer::new(),
            binder: ScrollBinder::new(CameraPath::default()),
            scroll_offset: 0.0,
            headings: Vec::new(),
            viewport_height: 0.0,
            content_height: 0.0,
        }
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Per-frame work outside the UI pass: finish the asset load, rebind
    /// triggers when layout drifted, scrub the camera, advance the clip.
    pub fn frame(&mut self, dt: f32, camera: &mut CameraState, renderer: &mut Renderer) {
        self.title.step(dt);

        if let Some(scene) = self.loader.poll() {
            renderer.upload_scene(&scene);
            self.scene = Some(scene);
            // The load may have shifted layout; force fresh regions.
            self.binder = ScrollBinder::new(CameraPath::default());
            // The model idles on its falling clip until a section picks
            // another one.
            if let Some(scene) = &self.scene
                && self.mixer.active().is_none()
                && scene.clip_index("Free_Fall").is_some()
            {
                self.mixer.play(scene, "Free_Fall");
            }
        }

        if !self.headings.is_empty()
            && self
                .binder
                .needs_rebind(self.viewport_height, self.content_height)
        {
            self.binder
                .bind(&self.headings, self.viewport_height, self.content_height);
            log::debug!(
                "bound {} camera transitions to the scroll layout",
                self.binder.transition_count()
            );
        }

        if let Some(section) = self.binder.update(self.scroll_offset, dt)
            && let Some(scene) = &self.scene
            && let Some(clip) = SECTION_CLIPS.get(section)
        {
            self.mixer.play(scene, clip);
        }

        if let Some((position, target)) = self.binder.camera_pose() {
            camera.position = position;
            camera.target = target;
        }

        if let Some(scene) = &mut self.scene
            && self.mixer.advance(scene, dt)
        {
            renderer.update_scene_vertices(scene);
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let output = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let origin_y = ui.next_widget_position().y;
                let viewport_height = ui.available_height();
                let mut headings = Vec::new();

                // Full-viewport intro.
                ui.allocate_ui(
                    egui::vec2(ui.available_width(), viewport_height),
                    |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(viewport_height * 0.4);
                            self.title.split_text(
                                ui,
                                "Get to know me",
                                egui::FontId::proportional(48.0),
                                ui.visuals().strong_text_color(),
                            );
                            if self.title.finished("Get to know me".chars().count()) {
                                ui.label(egui::RichText::new("🖱 scroll").size(18.0).weak());
                            }
                            if self.loader.is_loading() {
                                ui.add_space(8.0);
                                ui.spinner();
                            }
                        });
                    },
                );

                // Content column on the left; the model shows through on
                // the right of the window.
                let column_width = ui.available_width() * 0.58;

                ui.add_space(viewport_height * 0.3);
                headings.push(section_heading(ui, origin_y, "BIOGRAPHY"));
                ui.scope(|ui| {
                    ui.set_max_width(column_width);
                    ui.label(
                        "In my journey as a tech enthusiast, I've had the privilege of diving \
                         deep into various tools and technologies that shape our digital world. \
                         My experience spans across Visual Studio, where I've honed my skills in \
                         developing robust software solutions, and Android Studio, which has \
                         enabled me to create engaging and user-friendly mobile applications.",
                    );
                    ui.add_space(8.0);
                    ui.label(
                        "Beyond the realm of software development, I have explored the \
                         fascinating world of 3D design and manufacturing. CAD modeling and 3D \
                         printing have brought these designs into the physical world, offering \
                         tangible solutions and creative expressions.",
                    );
                });

                ui.add_space(viewport_height * 0.5);
                headings.push(section_heading(ui, origin_y, "SKILLS"));
                ui.scope(|ui| {
                    ui.set_max_width(column_width);
                    ui.horizontal_wrapped(|ui| {
                        for skill in content::SKILLS {
                            ui.label(egui::RichText::new(*skill).small());
                        }
                    });
                });

                ui.add_space(viewport_height * 0.5);
                headings.push(section_heading(ui, origin_y, "EXPERIENCE"));
                for experience in content::EXPERIENCES {
                    experience_card(ui, column_width, experience);
                }

                ui.add_space(viewport_height * 0.5);
                headings.push(section_heading(ui, origin_y, "LET'S CONNECT"));
                ui.scope(|ui| {
                    ui.set_max_width(column_width);
                    ui.label(
                        "Scroll back up any time, or head over to the contact page to start a \
                         project together.",
                    );
                });
                ui.add_space(viewport_height * 0.6);

                self.headings = headings;
            });

        self.scroll_offset = output.state.offset.y;
        self.viewport_height = output.inner_rect.height();
        self.content_height = output.content_size.y;
    }
}

/// A camera-driving section heading, fading in as it scrolls into view.
/// Returns its content-space rect for the trigger binder.
fn section_heading(ui: &mut egui::Ui, origin_y: f32, text: &str) -> HeadingRect {
    let anchor = ui.next_widget_position();
    let viewport = ui.clip_rect();
    let raw = ((viewport.bottom() - anchor.y) / (0.25 * viewport.height().max(1.0)))
        .clamp(0.0, 1.0);
    let opacity = HEADING_SLIDE.ease.apply(raw).clamp(0.0, 1.0);
    let response = ui
        .scope(|ui| {
            ui.set_opacity(opacity);
            ui.label(egui::RichText::new(text).size(32.0).strong())
        })
        .inner;
    HeadingRect {
        top: response.rect.top() - origin_y,
        height: response.rect.height(),
    }
}

/// One experience entry: a growing line and dot beside the card, scrubbed
/// by how far the card has scrolled into view.
fn experience_card(ui: &mut egui::Ui, column_width: f32, experience: &content::Experience) {
    ui.add_space(20.0);
    ui.horizontal(|ui| {
        let line_height = 90.0;
        let (line_rect, _) =
            ui.allocate_exact_size(egui::vec2(18.0, line_height), egui::Sense::hover());

        // Scrub the line growth from the card's on-screen position.
        let viewport_bottom = ui.clip_rect().bottom();
        let viewport_height = ui.clip_rect().height().max(1.0);
        let visible = (viewport_bottom - line_rect.top()) / (0.3 * viewport_height);
        let growth = visible.clamp(0.0, 1.0);

        let painter = ui.painter();
        let line_color = ui.visuals().weak_text_color();
        painter.line_segment(
            [
                line_rect.center_top(),
                egui::pos2(
                    line_rect.center().x,
                    line_rect.top() + line_height * growth,
                ),
            ],
            egui::Stroke::new(2.0, line_color),
        );
        if growth > 0.1 {
            painter.circle_filled(
                line_rect.center_top() + egui::vec2(0.0, 4.0),
                6.0 * Ease::OutBounce.apply(growth),
                ui.visuals().hyperlink_color,
            );
        }

        ui.vertical(|ui| {
            ui.set_max_width(column_width - 30.0);
            ui.label(egui::RichText::new(experience.title).size(18.0).strong());
            ui.label(egui::RichText::new(experience.date).small().weak());
            ui.label(experience.description);
        });
    });
}
