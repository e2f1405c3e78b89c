use tablero_business::users::{
    ListQueryState, RowActionCompute, RowActionState, SaveUserCompute, SaveUserInput,
    UsersListCompute, UsersPageState,
};
use tablero_business::{
    LoginCompute, LoginFormState, LoginOutcome, NotificationState, SESSION_EXPIRED_MESSAGE,
    SessionState,
};
use tablero_states::Time;

use crate::{pages, state::State, widgets};

pub struct TableroApp {
    pub state: State,
}

impl TableroApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }
}

impl eframe::App for TableroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state_ctx = &mut self.state.ctx;

        // Advance the frame clock, then apply everything commands published
        // since the last frame.
        state_ctx.state_mut::<Time>().tick();
        state_ctx.sync_computes();

        let now = *state_ctx.state_mut::<Time>().as_ref();
        state_ctx.update::<NotificationState>(|toasts| toasts.prune(now));

        // A 401 anywhere marks the session expired; force logout here so the
        // next frame renders the login page with the fixed message. The whole
        // users domain resets with it: the next login starts from the default
        // query, like a fresh page mount.
        if state_ctx.state_mut::<SessionState>().expired {
            log::info!("session expired, forcing logout");
            state_ctx.update::<SessionState>(|session| session.logout());
            state_ctx.update::<UsersPageState>(|page| *page = UsersPageState::default());
            state_ctx.update::<ListQueryState>(|query| *query = ListQueryState::default());
            state_ctx.update::<SaveUserInput>(|input| *input = SaveUserInput::default());
            state_ctx.update::<RowActionState>(|actions| *actions = RowActionState::default());
            state_ctx.update::<UsersListCompute>(|list| *list = UsersListCompute::default());
            state_ctx.update::<SaveUserCompute>(|save| *save = SaveUserCompute::default());
            state_ctx.update::<RowActionCompute>(|row| *row = RowActionCompute::default());
            state_ctx
                .update::<NotificationState>(|toasts| toasts.show_error(SESSION_EXPIRED_MESSAGE, now));
        }

        let authenticated = state_ctx.state_mut::<SessionState>().is_authenticated();

        // Login is a transition, not a screen state: acknowledge it and drop
        // the password buffer once the session is in place.
        if authenticated && state_ctx.cached::<LoginCompute>().outcome == LoginOutcome::LoggedIn {
            state_ctx.state_mut::<LoginCompute>().acknowledge();
            state_ctx.update::<LoginFormState>(|form| {
                form.password.clear();
                form.show_password = false;
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if authenticated {
                pages::users_page(state_ctx, ui);
            } else {
                pages::login_page(state_ctx, ui);
            }
        });

        widgets::notification_toast(state_ctx, ctx);

        // Commands and the search debounce resolve without input events.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
