//! Typeshot - Actor-based request-to-TypeScript tool
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use typeshot::clipboard::copy_to_terminal;
use typeshot::constants::{APP_NAME, LOG_FILE_NAME};
use typeshot::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use typeshot::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use typeshot::ui::{cursor_coords, highlight_typescript, method_color, notice_color};
use typeshot::{AppActor, AppState, Config, NetworkActor, ReqwestAdapter};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, rejected_env) = Config::from_env();

    // Initialize logging to file; stdout belongs to the terminal UI
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating {}", config.data_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.data_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(data_dir = %config.data_dir.display(), "Starting {}", APP_NAME);
    for var in rejected_env {
        tracing::warn!(var, "Ignoring invalid value, using the default");
    }

    let state = AppState::new(&config);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ReqwestAdapter::new(config.request_timeout), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut last_copy_seq = 0;

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        if let Some(copy) = &current_state.clipboard {
            if copy.seq > last_copy_seq {
                last_copy_seq = copy.seq;
                if let Err(e) = copy_to_terminal(&mut io::stdout(), &copy.text) {
                    tracing::warn!(error = %e, "Clipboard write failed");
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Method + URL
            Constraint::Length(10), // Body | Authorization + Header
            Constraint::Min(5),     // Output | History
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_url_bar(f, state, rows[0]);

    let form_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(form_cols[1]);

    let body_title = if state.form.method.body_editable() {
        " Body (JSON) ".to_string()
    } else {
        format!(" Body (read-only for {}) ", state.form.method.as_str())
    };
    draw_field(f, state, form_cols[0], Panel::Body, &body_title, &state.form.body);
    draw_field(f, state, right[0], Panel::Authorization, " Authorization ", &state.form.authorization);
    draw_field(f, state, right[1], Panel::Header, " Header (JSON object) ", &state.form.header);

    let output_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);
    draw_output(f, state, output_cols[0]);
    draw_history(f, state, output_cols[1]);

    draw_status_bar(f, state, rows[3]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn border_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let method = state.form.method.as_str();
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Url))
        .title(format!(" {}{} ", method, loading))
        .title_style(Style::default().fg(method_color(method)).bold());

    let input = Paragraph::new(state.form.url.as_str()).block(block);
    f.render_widget(input, area);

    place_cursor(f, state, area, Panel::Url, &state.form.url);
}

fn draw_field(f: &mut Frame, state: &RenderState, area: Rect, panel: Panel, title: &str, content: &str) {
    let mut style = border_style(state, panel);
    if panel == Panel::Body && !state.form.method.body_editable() {
        style = style.fg(Color::DarkGray);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title.to_string());

    let paragraph = Paragraph::new(content.to_string()).block(block);
    f.render_widget(paragraph, area);

    place_cursor(f, state, area, panel, content);
}

fn place_cursor(f: &mut Frame, state: &RenderState, area: Rect, panel: Panel, content: &str) {
    if state.active_panel != panel || state.input_mode != InputMode::Editing {
        return;
    }
    let (row, col) = cursor_coords(content, state.cursor_position);
    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    let x = (area.x + 1 + col).min(max_x);
    let y = (area.y + 1 + row).min(max_y);
    f.set_cursor_position(Position::new(x, y));
}

fn draw_output(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Output))
        .title(" Output (y:copy) ");

    let lines = if state.form.response.is_empty() {
        let hint = if state.is_loading { "Waiting for response..." } else { "Press 's' to send the request" };
        vec![Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))]
    } else {
        highlight_typescript(&state.form.response)
    };

    let output = Paragraph::new(lines)
        .block(block)
        .scroll((state.output_scroll, 0));
    f.render_widget(output, area);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::History))
        .title(format!(" History ({}) y:copy r:recall ", state.history.len()));

    if state.history.is_empty() {
        let empty = Paragraph::new("No requests yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .history
        .iter()
        .map(|record| {
            let method = record.method.to_uppercase();
            let method_span = Span::styled(
                format!("{:6}", method),
                Style::default().fg(method_color(&method)).bold(),
            );
            let time_span = Span::styled(
                record.recorded_at.format(" %H:%M ").to_string(),
                Style::default().fg(Color::DarkGray),
            );
            let url_span = Span::raw(record.url.clone());
            ListItem::new(Line::from(vec![method_span, time_span, url_span]))
        })
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().bold()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style);

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_history));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = match &state.notice {
        Some(notice) => Paragraph::new(format!(" {} ", notice.text))
            .style(Style::default().fg(notice_color(notice.level))),
        None => {
            let hint = if state.input_mode == InputMode::Editing {
                " ESC:stop editing | arrows:move | Enter:new line / send "
            } else {
                " Tab:panel | e:edit | m:method | s:send | y:copy | ?:help | q:quit "
            };
            Paragraph::new(hint).style(Style::default().fg(Color::DarkGray))
        }
    };
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TYPESHOT - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll output / select history entry

 REQUEST
   m                  Cycle HTTP method
   s                  Send request
   e / Enter          Edit focused field
   Enter (editing)    New line in Header/Body, send from URL

 OUTPUT & HISTORY
   y                  Copy output (or selected history entry)
   r / Enter          Recall history entry into the form
   Esc                Dismiss notice

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
