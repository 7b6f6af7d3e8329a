use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Titled result card, optionally outlined in an accent color
pub struct Card {
    title: String,
    min_width: f32,
    accent: Option<egui::Color32>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            min_width: 0.0,
            accent: None,
        }
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width;
        self
    }

    pub fn accent(mut self, color: egui::Color32) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        let mut frame = DesignSystem::card_frame();
        if let Some(color) = self.accent {
            frame = frame.stroke(egui::Stroke::new(1.5, color));
        }

        frame.show(ui, |ui| {
            if self.min_width > 0.0 {
                ui.set_min_width(self.min_width);
            }
            ui.label(
                egui::RichText::new(self.title)
                    .size(12.0)
                    .color(DesignSystem::TEXT_SECONDARY)
                    .strong(),
            );
            ui.add_space(DesignSystem::SPACING_SMALL);
            add_contents(ui)
        })
    }
}
