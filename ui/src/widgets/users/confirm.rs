//! Confirmation modal for destructive row actions. Nothing is dispatched
//! until the user confirms; declining returns the action state to idle.

use egui::{Ui, Window};
use tablero_business::users::{
    DeleteUserCommand, RowAction, RowActionState, ToggleStatusCommand,
};
use tablero_states::StateCtx;

pub fn confirm_modal(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let Some(pending) = state_ctx.state_mut::<RowActionState>().pending() else {
        return;
    };

    let mut confirmed = false;
    let mut declined = false;

    Window::new("Please confirm")
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            ui.label(pending.prompt());
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    declined = true;
                }
                if ui.button("Confirm").clicked() {
                    confirmed = true;
                }
            });
        });

    if declined {
        state_ctx.update::<RowActionState>(|actions| actions.decline());
        return;
    }

    if confirmed {
        let action = state_ctx.state_mut::<RowActionState>().confirm();
        match action {
            Some(RowAction::Delete { .. }) => state_ctx.dispatch::<DeleteUserCommand>(),
            Some(RowAction::ToggleStatus { .. }) => state_ctx.dispatch::<ToggleStatusCommand>(),
            None => {}
        }
    }
}
