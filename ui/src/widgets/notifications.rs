//! Bottom-right toast for command results. Auto-expiry is handled by the
//! app shell pruning the state each frame; this widget only renders and
//! offers a manual dismiss.

use egui::{Align2, Area, Color32, Context, Frame, Id};
use tablero_business::{NotificationState, Severity};
use tablero_states::StateCtx;

pub fn notification_toast(state_ctx: &mut StateCtx, ctx: &Context) {
    let Some(notification) = state_ctx.state_mut::<NotificationState>().current().cloned() else {
        return;
    };

    let (fill, text_color) = match notification.severity {
        Severity::Success => (Color32::from_rgb(46, 125, 50), Color32::WHITE),
        Severity::Error => (Color32::from_rgb(198, 40, 40), Color32::WHITE),
    };

    let mut dismissed = false;

    Area::new(Id::new("notification_toast"))
        .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .show(ctx, |ui| {
            Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(text_color, &notification.message);
                    if ui.small_button("x").clicked() {
                        dismissed = true;
                    }
                });
            });
        });

    if dismissed {
        state_ctx.update::<NotificationState>(|state| state.dismiss());
    }
}
