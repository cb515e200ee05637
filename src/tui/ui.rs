// UI rendering - called once per frame
//
// Splits the frame with ScreenLayout, draws every panel, and records the
// field and key rects on the app for pointer hit-testing.

use super::app::App;
use super::components::{keyboard_panel, logs_panel, status_bar, title_bar};
use super::layout::ScreenLayout;
use ratatui::widgets::Block;
use ratatui::Frame;

pub fn draw(f: &mut Frame, app: &mut App) {
    f.render_widget(Block::default().style(app.theme.base_style()), f.area());

    let tree = app.keyboard_tree();
    let layout = ScreenLayout::compute(
        f.area(),
        keyboard_panel::panel_height(tree.rows.len()),
        app.show_logs.then_some(logs_panel::PANEL_HEIGHT),
    );

    title_bar::render(f, layout.title, app);
    app.field
        .render(f, layout.field, &app.theme, app.is_focused());
    app.key_areas = keyboard_panel::render(
        f,
        layout.keyboard,
        &tree,
        &app.theme,
        app.settings.show_secondary,
    );
    if let Some(area) = layout.logs {
        logs_panel::render(f, area, &app.log_buffer, &app.theme);
    }
    status_bar::render(f, layout.status, app);

    app.field_area = layout.field;
}
