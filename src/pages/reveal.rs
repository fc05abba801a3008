use crate::anim::Ease;

/// One reveal recipe: how far content travels, how long each element
/// takes, the stagger between elements, and the curve. The page variants
/// that used to be duplicated per page are all instances of this.
#[derive(Debug, Clone, Copy)]
pub struct RevealConfig {
    pub drop: f32,
    pub duration: f32,
    pub stagger: f32,
    pub delay: f32,
    pub ease: Ease,
}

/// Per-character title reveal: characters drop in one after another.
pub const TITLE_SPLIT: RevealConfig = RevealConfig {
    drop: 60.0,
    duration: 0.5,
    stagger: 0.1,
    delay: 0.25,
    ease: Ease::InBack,
};

/// Block content sliding in shortly after the title.
pub const CONTENT_SLIDE: RevealConfig = RevealConfig {
    drop: 50.0,
    duration: 0.25,
    stagger: 0.25,
    delay: 0.25,
    ease: Ease::InExpo,
};

/// Section headings easing in as they scroll into view.
pub const HEADING_SLIDE: RevealConfig = RevealConfig {
    drop: 40.0,
    duration: 1.0,
    stagger: 0.15,
    delay: 0.0,
    ease: Ease::OutElastic,
};

/// A clocked reveal over `n` staggered elements.
#[derive(Debug, Clone)]
pub struct Reveal {
    config: RevealConfig,
    elapsed: f32,
}

impl Reveal {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            elapsed: 0.0,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    /// Eased progress of element `index`, in `[0, 1]` before easing is
    /// applied (overshooting curves may leave that range).
    pub fn progress(&self, index: usize) -> f32 {
        let start = self.config.delay + self.config.stagger * index as f32;
        let raw = if self.config.duration <= 0.0 {
            if self.elapsed >= start { 1.0 } else { 0.0 }
        } else {
            ((self.elapsed - start) / self.config.duration).clamp(0.0, 1.0)
        };
        self.config.ease.apply(raw)
    }

    pub fn finished(&self, count: usize) -> bool {
        let last = count.saturating_sub(1);
        self.elapsed
            >= self.config.delay + self.config.stagger * last as f32 + self.config.duration
    }

    /// Wrap an element: fades it in and settles it into place.
    pub fn show<R>(
        &self,
        ui: &mut egui::Ui,
        index: usize,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        let p = self.progress(index).clamp(0.0, 1.0);
        ui.add_space((1.0 - p) * self.config.drop);
        ui.scope(|ui| {
            ui.set_opacity(p);
            add_contents(ui)
        })
        .inner
    }

    /// Draw `text` one character at a time, each dropping into place.
    pub fn split_text(
        &self,
        ui: &mut egui::Ui,
        text: &str,
        font: egui::FontId,
        color: egui::Color32,
    ) {
        let widths: Vec<f32> = ui.fonts_mut(|fonts| {
            text.chars()
                .map(|ch| fonts.glyph_width(&font, ch))
                .collect()
        });
        let total: f32 = widths.iter().sum();
        let height = font.size * 1.3;
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(total.max(1.0), height + self.config.drop),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect.expand(self.config.drop));
        let baseline = rect.top() + self.config.drop + height * 0.5;
        let mut x = rect.left();
        for (i, ch) in text.chars().enumerate() {
            let p = self.progress(i);
            if p > 0.0 {
                let y = baseline - (1.0 - p) * self.config.drop;
                let alpha = p.clamp(0.0, 1.0);
                painter.text(
                    egui::pos2(x, y),
                    egui::Align2::LEFT_CENTER,
                    ch,
                    font.clone(),
                    color.gamma_multiply(alpha),
                );
            }
            x += widths[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(stagger: f32) -> Reveal {
        Reveal::new(RevealConfig {
            drop: 50.0,
            duration: 1.0,
            stagger,
            delay: 0.0,
            ease: Ease::Linear,
        })
    }

    #[test]
    fn elements_start_staggered() {
        let mut reveal = linear(0.5);
        reveal.step(0.5);
        assert_eq!(reveal.progress(0), 0.5);
        assert_eq!(reveal.progress(1), 0.0);
        assert_eq!(reveal.progress(2), 0.0);
    }

    #[test]
    fn delay_holds_everything_back() {
        let mut reveal = Reveal::new(RevealConfig {
            delay: 1.0,
            ..CONTENT_SLIDE
        });
        reveal.step(0.5);
        assert_eq!(reveal.progress(0), 0.0);
    }

    #[test]
    fn finished_accounts_for_the_last_element() {
        let mut reveal = linear(0.5);
        reveal.step(1.4);
        assert!(reveal.finished(1));
        assert!(!reveal.finished(3));
        reveal.step(0.7);
        assert!(reveal.finished(3));
    }

    #[test]
    fn progress_saturates_at_one() {
        let mut reveal = linear(0.0);
        reveal.step(10.0);
        assert_eq!(reveal.progress(0), 1.0);
        assert_eq!(reveal.progress(5), 1.0);
    }
}
