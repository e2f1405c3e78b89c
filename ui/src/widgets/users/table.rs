//! Server-driven users table: sortable headers, row action buttons, and the
//! pagination footer. Emits intents only; every state change goes through
//! the query/row-action states.

use egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use tablero_business::users::{
    ListQueryState, PAGE_SIZE_OPTIONS, RowAction, RowActionState, SortDirection, SortField,
    UserRecord, UserSort, UserStatus, UsersListCompute, UsersPageState,
};
use tablero_states::StateCtx;

const ID_WIDTH: f32 = 60.0;
const STATUS_WIDTH: f32 = 90.0;
const ACTIONS_WIDTH: f32 = 220.0;
const ROW_HEIGHT: f32 = 28.0;
const HEADER_HEIGHT: f32 = 24.0;

enum RowIntent {
    Edit(UserRecord),
    ToggleStatus { id: i64, current: UserStatus },
    Delete { id: i64 },
}

pub fn users_table(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let compute = state_ctx.cached::<UsersListCompute>();
    let rows: Vec<UserRecord> = compute.rows().to_vec();
    let total = compute.total;
    let loading = compute.is_loading();
    let error = compute.error_message().map(str::to_owned);

    let query = state_ctx.state_mut::<ListQueryState>();
    let sort = query.sort;
    let page = query.page;
    let page_size = query.page_size;
    let page_count = state_ctx.cached::<UsersListCompute>().page_count(page_size);

    if let Some(error) = &error {
        ui.colored_label(Color32::RED, error);
        ui.add_space(4.0);
    }

    let mut sort_clicked: Option<SortField> = None;
    let mut row_intent: Option<RowIntent> = None;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::exact(ID_WIDTH))
        .column(Column::remainder().at_least(120.0))
        .column(Column::exact(STATUS_WIDTH))
        .column(Column::exact(ACTIONS_WIDTH))
        .header(HEADER_HEIGHT, |mut header| {
            header.col(|ui| {
                if sortable_header(ui, "ID", SortField::Id, sort) {
                    sort_clicked = Some(SortField::Id);
                }
            });
            header.col(|ui| {
                if sortable_header(ui, "Username", SortField::Username, sort) {
                    sort_clicked = Some(SortField::Username);
                }
            });
            header.col(|ui| {
                if sortable_header(ui, "Status", SortField::Status, sort) {
                    sort_clicked = Some(SortField::Status);
                }
            });
            header.col(|ui| {
                ui.strong("Actions");
            });
        })
        .body(|mut body| {
            for user in &rows {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.monospace(user.id.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&user.username);
                    });
                    row.col(|ui| {
                        status_chip(ui, user.status);
                    });
                    row.col(|ui| {
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                row_intent = Some(RowIntent::Edit(user.clone()));
                            }
                            let toggle_label = match user.status {
                                UserStatus::Active => "Deactivate",
                                UserStatus::Inactive => "Activate",
                            };
                            if ui.button(toggle_label).clicked() {
                                row_intent = Some(RowIntent::ToggleStatus {
                                    id: user.id,
                                    current: user.status,
                                });
                            }
                            if ui.button("Delete").clicked() {
                                row_intent = Some(RowIntent::Delete { id: user.id });
                            }
                        });
                    });
                });
            }
        });

    if rows.is_empty() && !loading {
        ui.add_space(8.0);
        ui.weak("No users found");
    }

    if loading {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.spinner();
            ui.weak("Loading...");
        });
    }

    ui.add_space(8.0);
    let footer = pagination_footer(ui, page, page_size, page_count, total);

    if let Some(field) = sort_clicked {
        state_ctx.update::<ListQueryState>(|query| query.toggle_sort(field));
    }

    match row_intent {
        Some(RowIntent::Edit(record)) => {
            state_ctx.update::<UsersPageState>(|page| page.open_edit_dialog(&record));
        }
        Some(RowIntent::ToggleStatus { id, current }) => {
            state_ctx
                .update::<RowActionState>(|actions| {
                    actions.request(RowAction::ToggleStatus { id, current });
                });
        }
        Some(RowIntent::Delete { id }) => {
            state_ctx.update::<RowActionState>(|actions| {
                actions.request(RowAction::Delete { id });
            });
        }
        None => {}
    }

    if let Some(new_page) = footer.page {
        state_ctx.update::<ListQueryState>(|query| query.set_page(new_page));
    }
    if let Some(new_size) = footer.page_size {
        state_ctx.update::<ListQueryState>(|query| query.set_page_size(new_size));
    }
}

/// Renders a clickable header label with the active sort marker. Returns
/// true when clicked.
fn sortable_header(ui: &mut Ui, label: &str, field: SortField, sort: Option<UserSort>) -> bool {
    let marker = match sort {
        Some(active) if active.field == field => match active.direction {
            SortDirection::Asc => " ^",
            SortDirection::Desc => " v",
        },
        _ => "",
    };
    ui.add(egui::Button::new(RichText::new(format!("{label}{marker}")).strong()).frame(false))
        .clicked()
}

fn status_chip(ui: &mut Ui, status: UserStatus) {
    let color = match status {
        UserStatus::Active => Color32::from_rgb(34, 139, 34),
        UserStatus::Inactive => Color32::GRAY,
    };
    ui.colored_label(color, status.label());
}

#[derive(Default)]
struct FooterIntents {
    page: Option<usize>,
    page_size: Option<usize>,
}

fn pagination_footer(
    ui: &mut Ui,
    page: usize,
    page_size: usize,
    page_count: usize,
    total: u64,
) -> FooterIntents {
    let mut intents = FooterIntents::default();

    ui.horizontal(|ui| {
        egui::ComboBox::from_label("per page")
            .selected_text(page_size.to_string())
            .show_ui(ui, |ui| {
                for option in PAGE_SIZE_OPTIONS {
                    if ui
                        .selectable_label(page_size == option, option.to_string())
                        .clicked()
                    {
                        intents.page_size = Some(option);
                    }
                }
            });

        ui.add_space(16.0);

        if ui
            .add_enabled(page > 0, egui::Button::new("Previous"))
            .clicked()
        {
            intents.page = Some(page - 1);
        }

        ui.label(format!("Page {} of {}", page + 1, page_count.max(1)));

        if ui
            .add_enabled(page + 1 < page_count, egui::Button::new("Next"))
            .clicked()
        {
            intents.page = Some(page + 1);
        }

        ui.add_space(16.0);
        ui.weak(format!("{total} users"));
    });

    intents
}
