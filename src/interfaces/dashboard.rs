use crate::application::client::{DashboardClient, DashboardEvent};
use crate::application::session::DashboardSession;
use crate::domain::indicators::{GroupAssignment, ValueSource, widget_key};
use crate::interfaces::components::{Card, render_risk_chart};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::{AssessmentViewModel, SourceBadge};
use eframe::egui;
use std::time::Duration;
use tracing::{error, info};

const OTHER_SECTION_TITLE: &str = "Other Indicators";
const OTHER_SECTION_KEY: &str = "other_indicators";

pub struct CassandraApp {
    session: DashboardSession,
    client: DashboardClient,
    groups: GroupAssignment,
}

impl CassandraApp {
    pub fn new(session: DashboardSession, client: DashboardClient, fetch_on_startup: bool) -> Self {
        let groups = session.groups().clone();
        let mut app = Self {
            session,
            client,
            groups,
        };
        if fetch_on_startup {
            info!("Fetching market data on startup");
            app.start_fetch();
        }
        app
    }

    fn start_fetch(&mut self) {
        let Some(symbol_map) = self.session.begin_fetch() else {
            return;
        };
        if let Err(e) = self.client.request_fetch(symbol_map) {
            error!("Could not start fetch: {}", e);
            self.session.cancel_fetch(e.to_string());
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.client.poll_next() {
            match event {
                DashboardEvent::FetchCompleted(report) => self.session.complete_fetch(report),
                DashboardEvent::Log(line) => self.session.push_log(line),
            }
        }
    }

    fn indicator_section(&mut self, ui: &mut egui::Ui, title: &str, key: &str, names: &[String]) {
        if names.is_empty() {
            return;
        }
        egui::CollapsingHeader::new(egui::RichText::new(title).strong())
            .id_salt(key)
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new(format!("{}_grid", key))
                    .num_columns(3)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for name in names {
                            self.indicator_row(ui, key, name);
                            ui.end_row();
                        }
                    });
            });
    }

    fn indicator_row(&mut self, ui: &mut egui::Ui, section_key: &str, name: &str) {
        let Some(entry) = self.session.values_mut().value_mut(name) else {
            return;
        };
        ui.label(name);
        let response = ui
            .push_id(widget_key(section_key, name), |ui| {
                ui.add(
                    egui::DragValue::new(&mut entry.value)
                        .speed(0.01)
                        .fixed_decimals(4),
                )
            })
            .inner;
        if response.changed() {
            entry.source = ValueSource::Manual;
        }
        let badge = SourceBadge::for_source(entry.source);
        ui.label(egui::RichText::new(badge.text).small().color(badge.color))
            .on_hover_text(badge.tooltip);
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("indicator_panel")
            .default_width(360.0)
            .min_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Market Indicators");
                ui.separator();

                let busy = self.session.is_busy();
                ui.horizontal(|ui| {
                    let fetch_label = if busy { "Fetching..." } else { "Fetch Market Data" };
                    if ui
                        .add_enabled(!busy, egui::Button::new(fetch_label))
                        .clicked()
                    {
                        self.start_fetch();
                    }
                    if ui
                        .add_enabled(!busy, egui::Button::new("Analyze Market"))
                        .clicked()
                    {
                        self.session.analyze();
                    }
                    if ui.add_enabled(!busy, egui::Button::new("Reset")).clicked() {
                        self.session.reset_values();
                    }
                    if busy {
                        ui.spinner();
                    }
                });
                ui.add_space(DesignSystem::SPACING_SMALL);

                let groups = self.groups.clone();
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for (group, names) in groups.sections() {
                            self.indicator_section(ui, group.title(), group.key(), names);
                        }
                        self.indicator_section(
                            ui,
                            OTHER_SECTION_TITLE,
                            OTHER_SECTION_KEY,
                            groups.unassigned(),
                        );
                    });
            });
    }

    fn log_panel(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(140.0)
            .show(ctx, |ui| {
                egui::CollapsingHeader::new("Logs")
                    .default_open(false)
                    .show(ui, |ui| {
                        egui::ScrollArea::vertical()
                            .auto_shrink([false, true])
                            .stick_to_bottom(true)
                            .show(ui, |ui| {
                                for line in self.session.logs() {
                                    let color = if line.contains("ERROR") {
                                        DesignSystem::RISK_HIGH
                                    } else if line.contains("WARN") {
                                        DesignSystem::WARNING
                                    } else {
                                        DesignSystem::TEXT_SECONDARY
                                    };
                                    ui.label(egui::RichText::new(line.trim_end()).monospace().color(color));
                                }
                            });
                    });
            });
    }

    fn central_panel(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Stock Market Crash Risk Assessment");
                    ui.label(
                        egui::RichText::new(
                            "Estimates the probability of a market crash from current market \
                             indicators. Adjust the values on the left or fetch the latest \
                             closes, then run Analyze Market.",
                        )
                        .color(DesignSystem::TEXT_SECONDARY),
                    );
                    ui.label(
                        egui::RichText::new(format!(
                            "Model: {} ({})",
                            self.session.analyzer().model_name(),
                            self.session.analyzer().model_version()
                        ))
                        .small()
                        .color(DesignSystem::TEXT_MUTED),
                    );
                    ui.add_space(DesignSystem::SPACING_MEDIUM);

                    if let Some(message) = self.session.last_error() {
                        ui.colored_label(DesignSystem::RISK_HIGH, message);
                        ui.add_space(DesignSystem::SPACING_SMALL);
                    }

                    let degraded = self.session.values().degraded();
                    if !degraded.is_empty() {
                        ui.colored_label(
                            DesignSystem::WARNING,
                            format!(
                                "⚠ Fetch failed for {}; these inputs are 0.0",
                                degraded.join(", ")
                            ),
                        );
                        ui.add_space(DesignSystem::SPACING_SMALL);
                    }

                    if let Some(assessment) = self.session.assessment() {
                        let vm = AssessmentViewModel::from_assessment(assessment);
                        ui.horizontal(|ui| {
                            Card::new("Crash Probability").min_width(160.0).show(ui, |ui| {
                                ui.label(egui::RichText::new(&vm.probability_text).heading().strong());
                            });
                            Card::new("Risk Level")
                                .min_width(160.0)
                                .accent(vm.color)
                                .show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new(vm.tier_text)
                                            .heading()
                                            .strong()
                                            .color(vm.color),
                                    );
                                });
                            Card::new("Recommendation").min_width(260.0).show(ui, |ui| {
                                ui.label(egui::RichText::new(&vm.recommendation).italics());
                            });
                        });
                        ui.add_space(DesignSystem::SPACING_MEDIUM);
                        render_risk_chart(ui, vm.probability, vm.color);
                        ui.add_space(DesignSystem::SPACING_MEDIUM);
                    }

                    egui::CollapsingHeader::new("Model Features")
                        .default_open(false)
                        .show(ui, |ui| {
                            ui.label(format!(
                                "The model expects {} indicators, in this order:",
                                self.session.analyzer().feature_names().len()
                            ));
                            for (i, name) in self.session.analyzer().feature_names().iter().enumerate() {
                                ui.label(egui::RichText::new(format!("{:>2}. {}", i + 1, name)).monospace());
                            }
                        });
                });
            });
    }
}

impl eframe::App for CassandraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        self.drain_events();

        self.side_panel(ctx);
        self.log_panel(ctx);
        self.central_panel(ctx);

        // Keep polling the worker and the log channel
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
