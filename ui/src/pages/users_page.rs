//! The users page orchestrator.
//!
//! Owns the frame-by-frame plumbing: initial fetch, search debounce commit,
//! terminal command outcomes, and the dirty-query -> fetch dispatch. The
//! widgets below it only render and record intents.

use egui::Ui;
use tablero_business::users::{
    FetchUsersCommand, ListQueryState, RowActionCompute, RowActionOutcome, RowActionState,
    SaveUserCompute, UsersPageState,
};
use tablero_states::{StateCtx, Time};

use crate::widgets::users::{confirm_modal, filter_bar, user_dialog, users_table};

pub fn users_page(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let now = *state_ctx.state_mut::<Time>().as_ref();

    // First frame on this page: fetch with the default query.
    if !state_ctx.state_mut::<UsersPageState>().initial_fetch_done {
        state_ctx.state_mut::<UsersPageState>().initial_fetch_done = true;
        state_ctx.state_mut::<ListQueryState>().mark_dirty();
    }

    // Commit the pending search once its debounce window has passed.
    state_ctx.update::<ListQueryState>(|query| query.poll_search(now));

    react_to_save_outcome(state_ctx);
    react_to_row_action_outcome(state_ctx);

    // Every committed change above funnels into one dirty flag, and the
    // dirty flag into exactly one fetch.
    if state_ctx.state_mut::<ListQueryState>().take_dirty() {
        state_ctx.dispatch::<FetchUsersCommand>();
    }

    ui.heading("Users");
    ui.add_space(8.0);

    filter_bar(state_ctx, ui);
    ui.add_space(8.0);
    users_table(state_ctx, ui);

    user_dialog(state_ctx, ui);
    confirm_modal(state_ctx, ui);
}

fn react_to_save_outcome(state_ctx: &mut StateCtx) {
    if state_ctx.cached::<SaveUserCompute>().is_saved() {
        state_ctx.state_mut::<SaveUserCompute>().acknowledge();
        state_ctx.update::<UsersPageState>(|page| page.close_dialog());
        state_ctx.state_mut::<ListQueryState>().mark_dirty();
        return;
    }

    let failure = state_ctx.cached::<SaveUserCompute>().failure().cloned();
    if let Some(action) = failure {
        state_ctx.state_mut::<SaveUserCompute>().acknowledge();
        state_ctx.update::<UsersPageState>(|page| page.apply_failure(&action));
    }
}

fn react_to_row_action_outcome(state_ctx: &mut StateCtx) {
    match state_ctx.cached::<RowActionCompute>().outcome.clone() {
        RowActionOutcome::Idle => {}
        RowActionOutcome::Done => {
            state_ctx.state_mut::<RowActionCompute>().acknowledge();
            state_ctx.update::<RowActionState>(|actions| actions.reset());
            state_ctx.state_mut::<ListQueryState>().mark_dirty();
        }
        RowActionOutcome::Failed(_) => {
            // The command already raised the error toast.
            state_ctx.state_mut::<RowActionCompute>().acknowledge();
            state_ctx.update::<RowActionState>(|actions| actions.reset());
        }
    }
}
