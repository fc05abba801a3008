use super::reveal::{Reveal, TITLE_SPLIT};
use crate::content::{self, Project};
use crate::router::Route;

pub struct ProjectsPage {
    title: Reveal,
}

impl ProjectsPage {
    pub fn new() -> Self {
        Self {
            title: Reveal::new(TITLE_SPLIT),
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.title.step(dt);
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut navigate = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let viewport_height = ui.available_height();
                ui.allocate_ui(egui::vec2(ui.available_width(), viewport_height), |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(viewport_height * 0.4);
                        self.title.split_text(
                            ui,
                            "My work collection",
                            egui::FontId::proportional(48.0),
                            ui.visuals().strong_text_color(),
                        );
                        ui.label(egui::RichText::new("▾").size(24.0));
                    });
                });

                ui.add_space(80.0);
                for project in content::PROJECTS {
                    project_card(ui, project);
                    ui.add_space(24.0);
                }

                ui.add_space(40.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Work In Progress").strong());
                });
                ui.label(
                    "Some features in my showcased projects are still under development and may \
                     not function as expected. I'm actively working to improve them. Thank you \
                     for your understanding!",
                );

                ui.add_space(120.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("Want a project?").size(40.0).strong());
                    ui.add_space(12.0);
                    if ui.button("Let's work").clicked() {
                        navigate = Some(Route::Contact);
                    }
                });
                ui.add_space(120.0);
            });

        navigate
    }
}

fn project_card(ui: &mut egui::Ui, project: &Project) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(project.title).size(20.0).strong());
                ui.label(
                    egui::RichText::new(project.category.as_str())
                        .small()
                        .weak(),
                );
            });
            ui.label(project.description);
            ui.hyperlink_to("Visit", project.link);
        });
}

impl Default for ProjectsPage {
    fn default() -> Self {
        Self::new()
    }
}
