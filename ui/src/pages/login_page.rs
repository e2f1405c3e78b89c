//! Login screen: username + password, validated client-side before the
//! token exchange.

use egui::{Color32, TextEdit, Ui};
use tablero_business::{LoginCommand, LoginCompute, LoginFormState};
use tablero_states::StateCtx;

pub fn login_page(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let submitting = state_ctx.cached::<LoginCompute>().is_submitting();
    let username_error = state_ctx
        .cached::<LoginCompute>()
        .field_error("username")
        .map(str::to_owned);
    let password_error = state_ctx
        .cached::<LoginCompute>()
        .field_error("password")
        .map(str::to_owned);
    let message = state_ctx
        .cached::<LoginCompute>()
        .message()
        .map(str::to_owned);

    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading("Tablero");
        ui.add_space(16.0);

        ui.scope(|ui| {
            ui.set_max_width(280.0);

            let form = state_ctx.state_mut::<LoginFormState>();

            ui.label("Username");
            ui.add_enabled(
                !submitting,
                TextEdit::singleline(&mut form.username).hint_text("Username"),
            );
            if let Some(error) = &username_error {
                ui.colored_label(Color32::RED, error);
            }
            ui.add_space(8.0);

            ui.label("Password");
            ui.horizontal(|ui| {
                ui.add_enabled(
                    !submitting,
                    TextEdit::singleline(&mut form.password)
                        .password(!form.show_password)
                        .hint_text("Password"),
                );
                let eye = if form.show_password { "Hide" } else { "Show" };
                if ui.small_button(eye).clicked() {
                    form.show_password = !form.show_password;
                }
            });
            if let Some(error) = &password_error {
                ui.colored_label(Color32::RED, error);
            }

            if let Some(message) = &message {
                ui.add_space(8.0);
                ui.colored_label(Color32::RED, message);
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!submitting, egui::Button::new("Sign in"))
                    .clicked()
                {
                    submit = true;
                }
                if submitting {
                    ui.spinner();
                }
            });
        });
    });

    if submit {
        state_ctx.dispatch::<LoginCommand>();
    }
}
