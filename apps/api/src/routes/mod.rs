pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::report::handlers as reports;
use crate::session::handlers as forms;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalogs
        .route("/api/v1/catalog/parts", get(catalog::handle_list_parts))
        .route(
            "/api/v1/catalog/troubleshooting",
            get(catalog::handle_list_ts),
        )
        .route("/api/v1/catalog/reports", get(catalog::handle_list_reports))
        .route("/api/v1/catalog/options", get(catalog::handle_list_options))
        // Form
        .route(
            "/api/v1/forms/:profile",
            get(forms::handle_get_form).patch(forms::handle_patch_form),
        )
        .route(
            "/api/v1/forms/:profile/reset",
            post(forms::handle_reset_form),
        )
        // Part chips
        .route("/api/v1/forms/:profile/parts", get(forms::handle_get_parts))
        .route(
            "/api/v1/forms/:profile/parts/toggle",
            post(forms::handle_toggle_part),
        )
        .route(
            "/api/v1/forms/:profile/parts/adjust",
            post(forms::handle_adjust_quantity),
        )
        .route(
            "/api/v1/forms/:profile/parts/quantity",
            post(forms::handle_set_quantity),
        )
        .route(
            "/api/v1/forms/:profile/parts/remove",
            post(forms::handle_remove_part),
        )
        .route(
            "/api/v1/forms/:profile/parts/detail",
            post(forms::handle_set_detail),
        )
        // Troubleshooting chips
        .route(
            "/api/v1/forms/:profile/ts/toggle",
            post(forms::handle_toggle_ts),
        )
        .route(
            "/api/v1/forms/:profile/ts/select-all",
            post(forms::handle_select_all_ts),
        )
        .route(
            "/api/v1/forms/:profile/ts/clear",
            post(forms::handle_clear_ts),
        )
        // Reports
        .route(
            "/api/v1/forms/:profile/generate",
            post(reports::handle_generate),
        )
        .route(
            "/api/v1/forms/:profile/outputs",
            get(reports::handle_get_outputs),
        )
        .route(
            "/api/v1/forms/:profile/export/:report",
            get(reports::handle_export),
        )
        .with_state(state)
}
