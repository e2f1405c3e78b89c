//! Toolbar above the table: status filter, debounced search box, and the
//! create button.

use egui::{ComboBox, TextEdit, Ui};
use tablero_business::users::{ListQueryState, StatusFilter, UsersPageState};
use tablero_states::{StateCtx, Time};

const STATUS_FILTERS: [StatusFilter; 3] =
    [StatusFilter::All, StatusFilter::Active, StatusFilter::Inactive];

pub fn filter_bar(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let now = *state_ctx.state_mut::<Time>().as_ref();

    let mut selected_filter = state_ctx.state_mut::<ListQueryState>().status_filter;
    // The query state is the single source of truth for the search text;
    // the edit buffer is rebuilt from it every frame.
    let mut search_text = state_ctx
        .state_mut::<ListQueryState>()
        .search_display()
        .to_string();
    let mut search_changed = false;
    let mut open_create = false;

    ui.horizontal(|ui| {
        ComboBox::from_label("Status")
            .selected_text(selected_filter.label())
            .show_ui(ui, |ui| {
                for filter in STATUS_FILTERS {
                    ui.selectable_value(&mut selected_filter, filter, filter.label());
                }
            });

        ui.add_space(8.0);

        let response = ui.add(
            TextEdit::singleline(&mut search_text)
                .hint_text("Search")
                .desired_width(200.0),
        );
        search_changed = response.changed();

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add user").clicked() {
                open_create = true;
            }
        });
    });

    state_ctx.update::<ListQueryState>(|query| query.set_status_filter(selected_filter));

    if search_changed {
        state_ctx.update::<ListQueryState>(|query| query.edit_search(search_text, now));
    }

    if open_create {
        state_ctx.update::<UsersPageState>(|page| page.open_create_dialog());
    }
}
