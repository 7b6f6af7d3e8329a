use crate::domain::risk::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;
use egui_plot::{Bar, BarChart, LineStyle, Plot, PlotPoint, Text, VLine};

/// Tier labels and where they sit on the x axis
const TIER_LABELS: [(&str, f64); 3] = [("Low Risk", 0.15), ("Medium Risk", 0.45), ("High Risk", 0.8)];

/// Horizontal bar of the crash probability on a fixed [0, 1] axis
pub fn render_risk_chart(ui: &mut egui::Ui, probability: f64, color: egui::Color32) {
    Plot::new("crash_probability_chart")
        .height(140.0)
        .include_x(0.0)
        .include_x(1.0)
        .include_y(-0.6)
        .include_y(0.9)
        .show_axes([true, false])
        .show_grid([true, false])
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bar = Bar::new(0.0, probability).width(0.5).fill(color);
            plot_ui.bar_chart(
                BarChart::new("Crash Probability", vec![bar])
                    .horizontal()
                    .color(color),
            );

            for (name, x) in [
                ("Medium threshold", MEDIUM_RISK_THRESHOLD),
                ("High threshold", HIGH_RISK_THRESHOLD),
            ] {
                plot_ui.vline(
                    VLine::new(name, x)
                        .style(LineStyle::dashed_loose())
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            }

            for (label, x) in TIER_LABELS {
                plot_ui.text(
                    Text::new(label, PlotPoint::new(x, 0.6), label)
                        .color(DesignSystem::TEXT_PRIMARY),
                );
            }
        });
}
