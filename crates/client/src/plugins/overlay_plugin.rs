//! Overlay Plugin
//!
//! The egui overlay: title header, the "assemble" invitation in Intro, the
//! wish input while interactive, the pending spinner, and the granted
//! blessing card. Pure presentation; every interaction goes out as a message
//! and the state machine decides what it means.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use evergreen_common::GameMode;

use super::flow_plugin::{AssembleRequested, WishDismissed};
use super::wish_plugin::{GrantedWish, WishSubmitted};

const GOLD: egui::Color32 = egui::Color32::from_rgb(0xff, 0xd7, 0x00);
const CREAM: egui::Color32 = egui::Color32::from_rgb(0xff, 0xf8, 0xdc);
const ROSE: egui::Color32 = egui::Color32::from_rgb(0xe6, 0xc2, 0xcc);

/// Wish text being typed.
#[derive(Resource, Default)]
struct WishInput(String);

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }
        app.init_resource::<WishInput>()
            .add_systems(EguiPrimaryContextPass, draw_overlay);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_overlay(
    mut contexts: EguiContexts,
    mode: Res<State<GameMode>>,
    granted: Option<Res<GrantedWish>>,
    mut input: ResMut<WishInput>,
    mut assemble: MessageWriter<AssembleRequested>,
    mut submissions: MessageWriter<WishSubmitted>,
    mut dismissals: MessageWriter<WishDismissed>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let mode = *mode.get();

    egui::Area::new(egui::Id::new("header"))
        .anchor(egui::Align2::LEFT_TOP, [32.0, 32.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("ARIX").color(GOLD).size(48.0));
            ui.label(
                egui::RichText::new("S I G N A T U R E   C O L L E C T I O N")
                    .color(ROSE)
                    .size(13.0),
            );
        });

    egui::Area::new(egui::Id::new("center"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| match mode {
            GameMode::Intro => {
                let button = egui::Button::new(
                    egui::RichText::new("✦  ASSEMBLE THE GRAND TREE  ✦")
                        .color(GOLD)
                        .size(18.0),
                )
                .fill(egui::Color32::TRANSPARENT)
                .stroke(egui::Stroke::new(1.0, GOLD));
                if ui.add(button).clicked() {
                    assemble.write(AssembleRequested);
                }
            }
            GameMode::WishPending => {
                ui.vertical_centered(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("consulting the stars...")
                            .color(GOLD)
                            .italics()
                            .size(20.0),
                    );
                });
            }
            GameMode::WishGranted => {
                if let Some(wish) = granted.as_deref() {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(420.0);
                        ui.label(
                            egui::RichText::new(format!("\u{201c}{}\u{201d}", wish.0.message))
                                .color(CREAM)
                                .italics()
                                .size(22.0),
                        );
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(format!(
                                "MAGIC RESONANCE: {}%",
                                wish.0.magical_factor
                            ))
                            .color(GOLD.gamma_multiply(0.6))
                            .size(12.0),
                        );
                        ui.add_space(8.0);
                        if ui
                            .link(egui::RichText::new("Make Another Wish").color(GOLD))
                            .clicked()
                        {
                            dismissals.write(WishDismissed);
                        }
                    });
                }
            }
            _ => {}
        });

    // The wish input is live only once interaction unlocks.
    if mode == GameMode::Interactive {
        egui::Area::new(egui::Id::new("wish-input"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -48.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let edit = egui::TextEdit::singleline(&mut input.0)
                        .hint_text("Whisper your wish to the tree...")
                        .desired_width(380.0)
                        .text_color(GOLD);
                    let response = ui.add(edit);
                    let entered =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let sent = ui
                        .add_enabled(
                            !input.0.trim().is_empty(),
                            egui::Button::new(egui::RichText::new("Send").color(GOLD)),
                        )
                        .clicked();
                    if (entered || sent) && !input.0.trim().is_empty() {
                        submissions.write(WishSubmitted(std::mem::take(&mut input.0)));
                    }
                });
            });
    }
}
