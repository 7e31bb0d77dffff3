//! GridPage - GPUI Presentation of a DataGrid
//!
//! Header row, virtualized body, toolbar, row-action menu, confirmation bar and
//! detail side-panel. State lives in the [`DataGrid`]; this view only draws the
//! latest [`GridView`] and forwards user intent.

use std::time::Duration;

use gpui::{
    div, prelude::*, px, uniform_list, App, ClickEvent, Context, FocusHandle, IntoElement,
    KeyDownEvent, ParentElement, Render, SharedString, Styled, Task, WeakEntity, Window,
};

use super::colors::GridColors;
use crate::components::data_table::{Column, ColumnWidth, DataProvider};
use crate::constants::{COLUMN_WIDTH, DETAIL_PANEL_WIDTH, HEADER_HEIGHT, POLL_INTERVAL_MS, ROW_HEIGHT};
use crate::domain::FieldKind;
use crate::services::{run_in_tokio, HttpPageSource, MutationClient};
use crate::state::{ActionForm, ColumnView, DataGrid, GridView, PresentationShell};
use crate::utils::format::truncate;

/// GPUI view over one grid
pub struct GridPage {
    grid: DataGrid<HttpPageSource>,
    mutations: Option<MutationClient>,
    view: GridView,
    /// Column renderers, kept in step with `view.columns`
    columns: Vec<Column>,
    pending_action: Option<ActionForm>,
    /// Keyboard target of the confirmation fields
    focus_handle: FocusHandle,
    notice: Option<SharedString>,
    pump: Option<Task<()>>,
}

impl PresentationShell for GridPage {
    fn present(&mut self, view: &GridView) {
        self.view = view.clone();
        self.columns = self.grid.columns().to_vec();
    }
}

impl GridPage {
    pub fn new(grid: DataGrid<HttpPageSource>, cx: &mut Context<Self>) -> Self {
        let mutations = match MutationClient::new(grid.config().client.clone()) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::error!("Row actions disabled: {}", e);
                None
            }
        };
        let view = grid.view();
        let columns = grid.columns().to_vec();

        let mut page = Self {
            grid,
            mutations,
            view,
            columns,
            pending_action: None,
            focus_handle: cx.focus_handle(),
            notice: None,
            pump: None,
        };
        page.start_pump(cx);
        page
    }

    /// Drain pager events on an interval and redraw when the grid changed
    fn start_pump(&mut self, cx: &mut Context<Self>) {
        let task = cx.spawn(async move |handle: WeakEntity<GridPage>, cx| {
            loop {
                cx.background_executor()
                    .timer(Duration::from_millis(POLL_INTERVAL_MS))
                    .await;

                let alive = handle.update(cx, |this, cx| {
                    if this.grid.poll() {
                        this.sync(cx);
                    }
                });
                if alive.is_err() {
                    break;
                }
            }
        });
        self.pump = Some(task);
    }

    fn sync(&mut self, cx: &mut Context<Self>) {
        let view = self.grid.view();
        self.present(&view);
        cx.notify();
    }

    fn refresh(&mut self, cx: &mut Context<Self>) {
        self.notice = None;
        self.grid.refresh();
        self.sync(cx);
    }

    fn open_detail(&mut self, row: usize, cx: &mut Context<Self>) {
        self.grid.open_detail(row);
        self.sync(cx);
    }

    fn close_detail(&mut self, cx: &mut Context<Self>) {
        self.grid.close_detail();
        self.sync(cx);
    }

    fn prepare_action(&mut self, row: usize, action: usize, cx: &mut Context<Self>) {
        self.pending_action = self.grid.prepare_action(row, action).map(ActionForm::new);
        cx.notify();
    }

    fn select_field(&mut self, index: usize, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(form) = self.pending_action.as_mut() {
            form.select(index);
            window.focus(&self.focus_handle);
            cx.notify();
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let Some(form) = self.pending_action.as_mut() else {
            return;
        };
        match event.keystroke.key.as_str() {
            "enter" => return self.confirm_action(cx),
            "escape" => return self.cancel_action(cx),
            "backspace" => form.backspace(),
            _ => {
                if let Some(text) = &event.keystroke.key_char {
                    form.type_text(text);
                }
            }
        }
        cx.notify();
    }

    fn cancel_action(&mut self, cx: &mut Context<Self>) {
        self.pending_action = None;
        cx.notify();
    }

    fn confirm_action(&mut self, cx: &mut Context<Self>) {
        let Some(form) = self.pending_action.as_ref() else {
            return;
        };
        let request = match form.submit() {
            Ok(request) => request,
            Err(e) => {
                self.notice = Some(e.to_string().into());
                cx.notify();
                return;
            }
        };
        self.pending_action = None;
        let Some(client) = self.mutations.clone() else {
            self.notice = Some("Row actions are unavailable".into());
            cx.notify();
            return;
        };

        cx.spawn(async move |handle: WeakEntity<GridPage>, cx| {
            let request_for_call = request.clone();
            let outcome =
                run_in_tokio(async move { client.execute(&request_for_call).await }).await;
            let _ = handle.update(cx, |this, cx| {
                match outcome {
                    Ok(outcome) => {
                        this.notice = Some(outcome.message.into());
                        this.grid.action_completed(&request);
                    }
                    Err(e) => {
                        tracing::warn!(action = %request.label, "Row action failed: {}", e);
                        this.notice = Some(format!("{} failed: {}", request.label, e).into());
                    }
                }
                this.sync(cx);
            });
        })
        .detach();
    }

    fn export(&mut self, cx: &mut Context<Self>) {
        let dir = directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        let path = dir.join(self.grid.export_file_name("csv"));

        let result = std::fs::File::create(&path)
            .map_err(crate::error::Error::from)
            .and_then(|file| self.grid.export_csv(file));
        self.notice = Some(match result {
            Ok(()) => format!("Exported to {}", path.display()).into(),
            Err(e) => format!("Export failed: {}", e).into(),
        });
        cx.notify();
    }

    fn column_width(width: &ColumnWidth) -> f32 {
        match width {
            ColumnWidth::Fixed(w) => *w,
            ColumnWidth::Flex { min, .. } => min.unwrap_or(COLUMN_WIDTH),
        }
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let mode = self.view.mode;
        let count = format!("{} items", self.view.rows.len());

        let mut bar = div()
            .w_full()
            .px_4()
            .py_2()
            .flex()
            .items_center()
            .justify_between()
            .bg(GridColors::header_bg())
            .text_color(GridColors::text_header())
            .child(div().text_sm().child(self.view.title.to_string()))
            .child(div().text_sm().child(count));

        if mode.show_toolbar {
            bar = bar.child(
                div()
                    .id("refresh")
                    .px_2()
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.refresh(cx);
                    }))
                    .child("Refresh"),
            );
        }
        if mode.enable_export {
            bar = bar.child(
                div()
                    .id("export")
                    .px_2()
                    .cursor_pointer()
                    .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                        this.export(cx);
                    }))
                    .child("Export CSV"),
            );
        }
        bar
    }

    fn render_header(&self) -> impl IntoElement {
        let visible: Vec<&ColumnView> = self.view.visible_columns().collect();
        div()
            .h(px(HEADER_HEIGHT))
            .w_full()
            .flex()
            .items_center()
            .bg(GridColors::table_header_bg())
            .border_b_1()
            .border_color(GridColors::border())
            .children(visible.into_iter().map(|col| {
                div()
                    .w(px(Self::column_width(&col.width)))
                    .px_3()
                    .text_sm()
                    .font_weight(gpui::FontWeight::MEDIUM)
                    .text_color(GridColors::text_primary())
                    .child(col.label.clone())
            }))
    }

    fn render_body(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let rows = self.view.rows.clone();
        let columns: Vec<(Column, f32)> = self
            .columns
            .iter()
            .zip(self.view.columns.iter())
            .filter(|(_, view)| view.visible)
            .map(|(col, view)| (col.clone(), Self::column_width(&view.width)))
            .collect();
        let actions = self.view.actions.clone();
        let detail_enabled = self.view.mode.enable_detail_panel;
        let handle = cx.entity().downgrade();

        uniform_list("grid-rows", rows.len(), move |range, _window, _cx: &mut App| {
            let start = range.start;
            rows.rows(range)
                .into_iter()
                .enumerate()
                .map(|(offset, record)| {
                    let index = start + offset;
                    let bg = if index % 2 == 0 {
                        GridColors::content_bg()
                    } else {
                        GridColors::table_row_alt()
                    };

                    let mut row = div()
                        .id(("grid-row", index))
                        .h(px(ROW_HEIGHT))
                        .w_full()
                        .flex()
                        .items_center()
                        .bg(bg)
                        .hover(|s| s.bg(GridColors::table_row_hover()))
                        .border_b_1()
                        .border_color(GridColors::border())
                        .children(columns.iter().map(|(col, width)| {
                            div()
                                .w(px(*width))
                                .px_3()
                                .text_sm()
                                .text_color(GridColors::text_primary())
                                .overflow_hidden()
                                .child(truncate(&col.render_cell(&record), 80))
                        }));

                    if detail_enabled {
                        let handle = handle.clone();
                        row = row.cursor_pointer().on_click(move |_event, _window, cx| {
                            let _ = handle.update(cx, |this, cx| this.open_detail(index, cx));
                        });
                    }

                    row.children(actions.iter().map(|action| {
                        let handle = handle.clone();
                        let action_index = action.index;
                        div()
                            .id(SharedString::from(format!("action-{index}-{action_index}")))
                            .px_2()
                            .text_sm()
                            .cursor_pointer()
                            .text_color(GridColors::action(action.color.as_deref()))
                            .on_click(move |_event, _window, cx| {
                                let _ = handle.update(cx, |this, cx| {
                                    this.prepare_action(index, action_index, cx)
                                });
                            })
                            .child(action.label.clone())
                    }))
                })
                .collect::<Vec<_>>()
        })
        .flex_1()
    }

    fn render_status(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let mut status = div().w_full().px_4().py_2().flex().flex_col().gap_1();

        if self.view.show_skeleton {
            status = status.child(
                div()
                    .text_sm()
                    .text_color(GridColors::text_muted())
                    .child("Loading..."),
            );
        }
        if let Some(error) = &self.view.error {
            status = status.child(
                div()
                    .flex()
                    .gap_2()
                    .text_sm()
                    .text_color(GridColors::danger())
                    .child(error.message.clone())
                    .child(
                        div()
                            .id("reload")
                            .cursor_pointer()
                            .text_color(GridColors::info())
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.refresh(cx);
                            }))
                            .child("Reload"),
                    ),
            );
        }
        if let Some(notice) = &self.notice {
            status = status.child(
                div()
                    .text_sm()
                    .text_color(GridColors::text_secondary())
                    .child(notice.clone()),
            );
        }
        status
    }

    fn render_confirmation(&self, form: &ActionForm, cx: &mut Context<Self>) -> impl IntoElement {
        let active = form.active();
        let fields = form
            .fields()
            .map(|(index, field, value)| {
                let shown = match field.kind {
                    FieldKind::Switch if value == "true" => "[x]".to_string(),
                    FieldKind::Switch => "[ ]".to_string(),
                    _ => format!("{value}{}", if active == Some(index) { "|" } else { "" }),
                };
                let label = if field.required {
                    format!("{} *", field.label)
                } else {
                    field.label.clone()
                };
                div()
                    .id(SharedString::from(format!("action-field-{index}")))
                    .flex()
                    .gap_2()
                    .text_sm()
                    .cursor_pointer()
                    .on_click(cx.listener(move |this, _event: &ClickEvent, window, cx| {
                        this.select_field(index, window, cx);
                    }))
                    .child(div().text_color(GridColors::text_secondary()).child(label))
                    .child(
                        div()
                            .min_w(px(COLUMN_WIDTH))
                            .px_2()
                            .border_1()
                            .border_color(GridColors::border())
                            .text_color(GridColors::text_primary())
                            .child(shown),
                    )
            })
            .collect::<Vec<_>>();

        div()
            .w_full()
            .px_4()
            .py_2()
            .flex()
            .flex_col()
            .gap_2()
            .border_t_1()
            .border_color(GridColors::border())
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(Self::on_key_down))
            .child(div().text_sm().child(form.request().prompt.clone()))
            .children(fields)
            .child(
                div()
                    .flex()
                    .gap_3()
                    .child(
                        div()
                            .id("confirm-action")
                            .cursor_pointer()
                            .text_color(GridColors::danger())
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.confirm_action(cx);
                            }))
                            .child("Confirm"),
                    )
                    .child(
                        div()
                            .id("cancel-action")
                            .cursor_pointer()
                            .text_color(GridColors::text_secondary())
                            .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                                this.cancel_action(cx);
                            }))
                            .child("Cancel"),
                    ),
            )
    }

    fn render_detail(&self, cx: &mut Context<Self>) -> Option<impl IntoElement> {
        let detail = self.view.detail.as_ref()?;
        Some(
            div()
                .w(px(DETAIL_PANEL_WIDTH))
                .h_full()
                .flex()
                .flex_col()
                .gap_2()
                .p_4()
                .border_l_1()
                .border_color(GridColors::border())
                .bg(GridColors::content_bg())
                .child(
                    div()
                        .id("close-detail")
                        .cursor_pointer()
                        .text_color(GridColors::text_secondary())
                        .on_click(cx.listener(|this, _event: &ClickEvent, _window, cx| {
                            this.close_detail(cx);
                        }))
                        .child("Close"),
                )
                .children(detail.entries.iter().map(|entry| {
                    div()
                        .flex()
                        .flex_col()
                        .child(
                            div()
                                .text_xs()
                                .text_color(GridColors::text_muted())
                                .child(entry.label.clone()),
                        )
                        .child(
                            div()
                                .text_sm()
                                .text_color(GridColors::text_primary())
                                .child(entry.value.clone()),
                        )
                })),
        )
    }

    /// Render empty state
    fn render_empty(&self) -> impl IntoElement {
        let message = self
            .view
            .empty_message
            .clone()
            .unwrap_or_else(|| "No data".to_string());
        div()
            .flex_1()
            .flex()
            .items_center()
            .justify_center()
            .text_color(GridColors::text_muted())
            .child(message)
    }
}

impl Render for GridPage {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let mut table = div()
            .flex_1()
            .flex()
            .flex_col()
            .bg(GridColors::content_bg())
            .border_1()
            .border_color(GridColors::border())
            .overflow_hidden();

        if let Some(message) = self.view.incorrect_format.clone() {
            table = table.child(
                div()
                    .flex_1()
                    .flex()
                    .items_center()
                    .justify_center()
                    .text_color(GridColors::warning())
                    .child(message),
            );
        } else {
            table = table.child(self.render_header());
            if self.view.rows.is_empty() && !self.view.show_skeleton {
                table = table.child(self.render_empty());
            } else {
                table = table.child(self.render_body(cx));
            }
        }

        let mut main = div()
            .flex_1()
            .flex()
            .flex_col()
            .child(self.render_toolbar(cx))
            .child(table)
            .child(self.render_status(cx));
        if let Some(form) = self.pending_action.clone() {
            main = main.child(self.render_confirmation(&form, cx));
        }

        div()
            .size_full()
            .flex()
            .flex_row()
            .bg(GridColors::background())
            .child(main)
            .children(self.render_detail(cx))
    }
}
