//! Application - App Initialization and Window Management
//!
//! Opens one window showing the configured grid.

use gpui::{
    actions, px, App, AppContext, Application, Bounds, SharedString, TitlebarOptions,
    WindowBounds, WindowOptions,
};

use super::grid_view::GridPage;
use crate::config::GridConfig;
use crate::state::DataGrid;

actions!(console_grid, [Quit]);

/// Run the grid application until its window is closed
pub fn run_app(config: GridConfig) {
    Application::new().run(move |cx: &mut App| {
        cx.on_action(|_: &Quit, cx: &mut App| cx.quit());

        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                cx.quit();
            }
        })
        .detach();

        let title = SharedString::from(config.title.clone());
        let grid = match DataGrid::with_http(config) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("Failed to create grid: {}", e);
                cx.quit();
                return;
            }
        };

        let bounds = Bounds::centered(None, gpui::size(px(1400.0), px(900.0)), cx);
        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some(title),
                appears_transparent: true,
                traffic_light_position: Some(gpui::point(px(9.0), px(9.0))),
            }),
            ..Default::default()
        };

        if let Err(e) = cx.open_window(window_options, |_window, cx| {
            cx.new(|cx| GridPage::new(grid, cx))
        }) {
            tracing::error!("Failed to open window: {}", e);
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}
