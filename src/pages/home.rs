use super::reveal::{Reveal, RevealConfig, TITLE_SPLIT};
use crate::anim::{Ease, Position, Timeline};
use crate::router::Route;

// Opacity and drop-offset tracks for each intro block. Each block's two
// tracks start together; blocks follow each other with a 0.25 s gap.
const INTRO_ALPHA: usize = 0;
const INTRO_DROP: usize = 1;
const HERO_ALPHA: usize = 2;
const HERO_DROP: usize = 3;
const TEXT_ALPHA: usize = 4;
const TEXT_DROP: usize = 5;
const BUTTONS_ALPHA: usize = 6;
const BUTTONS_DROP: usize = 7;

pub struct HomePage {
    timeline: Timeline,
    name: Reveal,
}

impl HomePage {
    pub fn new() -> Self {
        let mut timeline = Timeline::new();
        for (alpha, drop, duration) in [
            (INTRO_ALPHA, INTRO_DROP, 0.25),
            (HERO_ALPHA, HERO_DROP, 0.5),
            (TEXT_ALPHA, TEXT_DROP, 0.25),
            (BUTTONS_ALPHA, BUTTONS_DROP, 0.25),
        ] {
            timeline = timeline
                .tween(alpha, (0.0, 1.0), duration, Ease::InExpo, Position::After(0.25))
                .tween(drop, (50.0, 0.0), duration, Ease::InExpo, Position::WithPrevious);
        }
        Self {
            timeline,
            name: Reveal::new(RevealConfig {
                delay: 1.0,
                ..TITLE_SPLIT
            }),
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.timeline.step(dt);
        self.name.step(dt);
    }

    fn block<R>(
        &self,
        ui: &mut egui::Ui,
        alpha_track: usize,
        drop_track: usize,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        ui.add_space(self.timeline.value(drop_track, 0.0));
        ui.scope(|ui| {
            ui.set_opacity(self.timeline.value(alpha_track, 1.0).clamp(0.0, 1.0));
            add_contents(ui)
        })
        .inner
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<Route> {
        let mut navigate = None;

        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            self.block(ui, INTRO_ALPHA, INTRO_DROP, |ui| {
                ui.label(
                    egui::RichText::new("بِسْمِ اللَّهِ الرَّحْمَنِ الرَّحِيم").size(32.0),
                );
            });

            ui.add_space(32.0);
            self.block(ui, HERO_ALPHA, HERO_DROP, |ui| {
                ui.label(egui::RichText::new("meet").size(40.0));
            });
            self.name.split_text(
                ui,
                "Abdullah",
                egui::FontId::proportional(56.0),
                ui.visuals().strong_text_color(),
            );

            ui.add_space(16.0);
            self.block(ui, TEXT_ALPHA, TEXT_DROP, |ui| {
                ui.label(
                    egui::RichText::new("MERN Stack + NEXT.js Developer")
                        .size(26.0)
                        .strong(),
                );
                ui.add_space(8.0);
                ui.label(
                    "Crafting web experiences that leave a lasting impression. With MERN stack \
                     and Next.js, I build sleek, powerful fullstack apps that are as intuitive \
                     as they are robust.",
                );
            });

            ui.add_space(24.0);
            self.block(ui, BUTTONS_ALPHA, BUTTONS_DROP, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("About me").clicked() {
                        navigate = Some(Route::About);
                    }
                    if ui.button("Let's work").clicked() {
                        navigate = Some(Route::Contact);
                    }
                });
            });
        });

        navigate
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_blocks_reveal_in_order() {
        let mut page = HomePage::new();
        page.step(0.4);
        assert!(page.timeline.value(INTRO_ALPHA, 0.0) > 0.0);
        assert_eq!(page.timeline.value(BUTTONS_ALPHA, 0.0), 0.0);
        page.step(3.0);
        assert_eq!(page.timeline.value(BUTTONS_ALPHA, 0.0), 1.0);
        assert_eq!(page.timeline.value(BUTTONS_DROP, 0.0), 0.0);
    }

    #[test]
    fn drop_tracks_start_with_their_alpha_tracks() {
        let page = HomePage::new();
        // Before anything runs, drops rest at their authored offset.
        assert_eq!(page.timeline.value(INTRO_DROP, 0.0), 50.0);
        assert_eq!(page.timeline.value(BUTTONS_DROP, 0.0), 50.0);
    }
}
