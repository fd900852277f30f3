use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{HistoryList, KeyForm, QuestionForm, ResultView, SchemaForm, TitleBar};
use crate::tui::{Focus, TuiState};

const KEY_HINTS: &str =
    "Tab switch panel · Enter submit · Ctrl+U upload · Ctrl+Y copy SQL · PgUp/PgDn scroll · Esc quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};
    let layout = Layout::vertical([
        Length(1),
        Length(KeyForm::HEIGHT.max(SchemaForm::HEIGHT)),
        Length(QuestionForm::HEIGHT),
        Min(0),
        Length(1),
    ]);
    let [title_area, forms_area, question_area, results_area, footer_area] = layout.areas(frame.area());
    let [key_area, schema_area] = Layout::horizontal([Percentage(50), Percentage(50)]).areas(forms_area);

    TitleBar {
        server_url: tui.server_url.clone(),
        session_id: app.session_id.clone(),
        schema_loaded: app.schema_loaded,
        busy: app.is_busy(),
    }
    .render(frame, title_area);

    KeyForm {
        field: &mut tui.key_field,
        phase: &app.key,
        focused: tui.focus == Focus::ApiKey,
        spinner_frame,
    }
    .render(frame, key_area);

    SchemaForm {
        input: &mut tui.schema_input,
        phase: &app.schema.phase,
        selected: app.schema.selected.as_ref(),
        schema_loaded: app.schema_loaded,
        focused: tui.focus == Focus::Schema,
        spinner_frame,
    }
    .render(frame, schema_area);

    QuestionForm {
        field: &mut tui.question_field,
        phase: &app.question,
        unlocked: app.question_unlocked(),
        focused: tui.focus == Focus::Question,
        spinner_frame,
    }
    .render(frame, question_area);

    draw_results(frame, results_area, app, &mut tui.results_scroll);

    frame.render_widget(
        Line::styled(KEY_HINTS, Style::default().add_modifier(Modifier::DIM)),
        footer_area,
    );
}

/// Result viewer (when there is one) stacked above the history list.
fn draw_results(frame: &mut Frame, area: Rect, app: &App, scroll_state: &mut ScrollViewState) {
    // Leave a column for the scrollbar
    let content_width = area.width.saturating_sub(1);

    let result_view = app.current_result.as_ref().map(|result| ResultView {
        result,
        copied: app.copy.is_succeeded(),
    });
    let history = HistoryList {
        items: app.history.items(),
    };

    let result_height = result_view.as_ref().map_or(0, |view| view.height(content_width));
    let history_height = history.height(content_width);

    let content_height = result_height.saturating_add(history_height);
    let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    if let Some(view) = &result_view {
        scroll_view.render_widget(view.paragraph(), Rect::new(0, 0, content_width, result_height));
    }
    scroll_view.render_widget(
        history.paragraph(),
        Rect::new(0, result_height, content_width, history_height),
    );

    frame.render_stateful_widget(scroll_view, area, scroll_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::QueryResult;
    use crate::tui::components::history_list::EMPTY_HISTORY;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, height: u16) -> String {
        let backend = TestBackend::new(120, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_draw_ui_fresh_start() {
        let app = App::new();
        let mut tui = TuiState::new("http://localhost:8000".into());
        let text = draw(&app, &mut tui, 40);
        assert!(text.contains("OpenAI API Key"));
        assert!(text.contains("Database Schema"));
        assert!(text.contains("Ask a Question"));
        assert!(text.contains(EMPTY_HISTORY));
        assert!(!text.contains("Generated SQL Query"));
    }

    #[test]
    fn test_draw_ui_with_result_and_history() {
        let mut app = App::new();
        app.session_id = Some("s-1".into());
        app.schema_loaded = true;
        let result = QueryResult::new("Top customers?", "SELECT * FROM customers;", "2025-01-01T10:00:00");
        app.history.push_front(result.clone());
        app.current_result = Some(result);

        let mut tui = TuiState::new("http://localhost:8000".into());
        let text = draw(&app, &mut tui, 50);
        assert!(text.contains("Generated SQL Query"));
        assert!(text.contains("Your last 1 queries"));
        assert!(text.contains("SELECT * FROM customers;"));
    }

    #[test]
    fn test_draw_ui_tiny_terminal_does_not_panic() {
        let app = App::new();
        let mut tui = TuiState::new("http://localhost:8000".into());
        draw(&app, &mut tui, 10);
    }
}
