//! Create/edit user dialog.
//!
//! Renders the form buffers from `UsersPageState`, shows inline field errors
//! from the last failed submission, and dispatches `SaveUserCommand` on
//! submit. While a submission is in flight the inputs are disabled.

use egui::{Color32, ComboBox, TextEdit, Ui, Window};
use tablero_business::users::{
    FormMode, SaveUserCommand, SaveUserCompute, SaveUserInput, UserStatus, UsersPageState,
};
use tablero_states::StateCtx;

pub fn user_dialog(state_ctx: &mut StateCtx, ui: &mut Ui) {
    if !state_ctx.state_mut::<UsersPageState>().dialog_open {
        return;
    }

    let submitting = state_ctx.cached::<SaveUserCompute>().is_submitting();

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    {
        let page = state_ctx.state_mut::<UsersPageState>();
        let title = match page.mode {
            FormMode::Create => "New user",
            FormMode::Edit(_) => "Edit user",
        };
        let password_required = !page.mode.is_edit();

        Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ui.ctx(), |ui| {
                ui.label("Username");
                ui.add_enabled(
                    !submitting,
                    TextEdit::singleline(&mut page.form.username).hint_text("Username"),
                );
                if let Some(error) = page.form_errors.get("username") {
                    ui.colored_label(Color32::RED, error);
                }
                ui.add_space(8.0);

                let password_label = if password_required {
                    "Password"
                } else {
                    "Password (leave blank to keep)"
                };
                ui.label(password_label);
                ui.horizontal(|ui| {
                    ui.add_enabled(
                        !submitting,
                        TextEdit::singleline(&mut page.form.password)
                            .password(!page.show_password)
                            .hint_text("Password"),
                    );
                    let eye = if page.show_password { "Hide" } else { "Show" };
                    if ui.small_button(eye).clicked() {
                        page.show_password = !page.show_password;
                    }
                });
                if let Some(error) = page.form_errors.get("password") {
                    ui.colored_label(Color32::RED, error);
                }
                ui.add_space(8.0);

                ui.label("Confirm password");
                ui.horizontal(|ui| {
                    ui.add_enabled(
                        !submitting,
                        TextEdit::singleline(&mut page.form.confirm_password)
                            .password(!page.show_confirm_password)
                            .hint_text("Confirm password"),
                    );
                    let eye = if page.show_confirm_password {
                        "Hide"
                    } else {
                        "Show"
                    };
                    if ui.small_button(eye).clicked() {
                        page.show_confirm_password = !page.show_confirm_password;
                    }
                });
                if let Some(error) = page.form_errors.get("confirm_password") {
                    ui.colored_label(Color32::RED, error);
                }
                ui.add_space(8.0);

                ui.label("Status");
                // Distinct id: the filter bar renders its own "Status" combo.
                ComboBox::from_id_salt("user_dialog_status")
                    .selected_text(page.form.status.label())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut page.form.status, UserStatus::Active, "Active");
                        ui.selectable_value(
                            &mut page.form.status,
                            UserStatus::Inactive,
                            "Inactive",
                        );
                    });

                if !page.form_message.is_empty() {
                    ui.add_space(8.0);
                    ui.colored_label(Color32::RED, &page.form_message);
                }

                ui.add_space(16.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!submitting, egui::Button::new("Cancel"))
                        .clicked()
                    {
                        cancel = true;
                    }

                    let submit_label = match page.mode {
                        FormMode::Create => "Create",
                        FormMode::Edit(_) => "Update",
                    };
                    if ui
                        .add_enabled(!submitting, egui::Button::new(submit_label))
                        .clicked()
                    {
                        submit = true;
                    }
                    if submitting {
                        ui.spinner();
                    }
                });
            });
    }

    if !open || cancel {
        state_ctx.update::<UsersPageState>(|page| page.close_dialog());
        return;
    }

    if submit {
        let page = state_ctx.state_mut::<UsersPageState>();
        let mode = page.mode;
        let values = page.form.clone();
        state_ctx.update::<SaveUserInput>(|input| {
            input.mode = mode;
            input.values = values;
        });
        state_ctx.dispatch::<SaveUserCommand>();
    }
}
