use crate::chart::annotation::Annotation;
use crate::chart::data::Fill;
use crate::chart::options::format_usage;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::ui::app::{AppState, DragState, Screen, ScrollDirection};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Terminal;
use std::io;
use std::ops::RangeInclusive;
use std::time::Duration;

const COLOR_ACCENT: Color = Color::Cyan;
const COLOR_MUTED: Color = Color::DarkGray;
const COLOR_HEADER: Color = Color::White;

// Nominal size of a terminal cell in chart pixels.
const CELL_WIDTH_PX: f64 = 8.0;
const CELL_HEIGHT_PX: f64 = 16.0;

// Tile pixels sampled per cell when filling hatched bars.
const HATCH_STEP_X: i64 = 2;
const HATCH_STEP_Y: i64 = 4;

const Y_LABEL_WIDTH: u16 = 11;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_tui(cfg: &AppConfig) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let loop_result = run_loop(&mut terminal, cfg);

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    loop_result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: &AppConfig,
) -> Result<(), AppError> {
    let mut state = AppState::new(cfg);
    tracing::info!(billing_day = cfg.billing_day, "chart started");

    while state.running {
        let frame_area = terminal.draw(|f| render(f, &state))?.area;
        let geometry = PlotGeometry::new(chart_area(frame_area), state.handle.visible());

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(key.code, key.modifiers, &mut state, &geometry);
            }
            Event::Mouse(mouse) => handle_mouse(mouse, &mut state, &geometry),
            _ => {}
        }
    }

    tracing::info!("chart closed");
    Ok(())
}

fn handle_key(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &mut AppState,
    geometry: &PlotGeometry,
) {
    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        state.running = false;
        return;
    }

    if state.screen == Screen::Help {
        if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
            state.screen = Screen::Chart;
        }
        return;
    }

    match code {
        KeyCode::Char('q') => state.running = false,
        KeyCode::Char('?') => state.screen = Screen::Help,
        KeyCode::Left => state.move_cursor(false),
        KeyCode::Right => state.move_cursor(true),
        KeyCode::Enter | KeyCode::Char(' ') => state.click_cursor(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => state.back(),
        KeyCode::Char(']') | KeyCode::Char('l') => {
            state.scroll(ScrollDirection::Right, geometry.px_per_category())
        }
        KeyCode::Char('[') | KeyCode::Char('h') => {
            tracing::debug!(tooltip = ?state.tooltip(), "scroll left");
            state.scroll(ScrollDirection::Left, geometry.px_per_category())
        }
        KeyCode::Char('+') | KeyCode::Char('=') => state.zoom(true),
        KeyCode::Char('-') => state.zoom(false),
        _ => {}
    }
}

fn handle_mouse(mouse: MouseEvent, state: &mut AppState, geometry: &PlotGeometry) {
    if state.screen != Screen::Chart {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag = Some(DragState {
                origin: mouse.column,
                panned_to: None,
            });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag else {
                return;
            };
            let from = match drag.panned_to {
                Some(column) => column,
                None => {
                    let moved = f64::from(mouse.column.abs_diff(drag.origin)) * CELL_WIDTH_PX;
                    if moved < state.handle.pan_threshold() {
                        return;
                    }
                    drag.origin
                }
            };
            // Dragging right pulls earlier categories into view.
            let dx = (f64::from(mouse.column) - f64::from(from)) * CELL_WIDTH_PX;
            state.handle.pan(-dx, geometry.px_per_category());
            state.clamp_cursor();
            state.drag = Some(DragState {
                origin: drag.origin,
                panned_to: Some(mouse.column),
            });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let was_pan = state.drag.take().is_some_and(|d| d.panned_to.is_some());
            if was_pan {
                return;
            }
            match geometry.bar_at(mouse.column, mouse.row) {
                Some(index) => {
                    state.cursor = index;
                    state.click(&[index]);
                }
                None => state.click(&[]),
            }
        }
        MouseEventKind::ScrollUp => state.zoom(true),
        MouseEventKind::ScrollDown => state.zoom(false),
        _ => {}
    }
}

/// Where bars go inside the chart block, for drawing and hit testing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlotGeometry {
    plot: Rect,
    first: usize,
    count: usize,
    slot_width: u16,
}

impl PlotGeometry {
    fn new(chart: Rect, visible: RangeInclusive<usize>) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(chart);
        let plot = Rect {
            x: inner.x.saturating_add(Y_LABEL_WIDTH),
            y: inner.y.saturating_add(1),
            width: inner.width.saturating_sub(Y_LABEL_WIDTH),
            height: inner.height.saturating_sub(3),
        };
        let first = *visible.start();
        let count = visible.end().saturating_sub(first) + 1;
        let slot_width = (plot.width / count.max(1) as u16).max(1);
        Self {
            plot,
            first,
            count,
            slot_width,
        }
    }

    fn px_per_category(&self) -> f64 {
        f64::from(self.slot_width) * CELL_WIDTH_PX
    }

    fn slot_x(&self, offset: usize) -> u16 {
        self.plot.x + (offset as u16) * self.slot_width
    }

    fn bar_width(&self) -> u16 {
        if self.slot_width > 2 {
            self.slot_width - 1
        } else {
            self.slot_width
        }
    }

    fn bar_at(&self, column: u16, row: u16) -> Option<usize> {
        let inside_x = column >= self.plot.x && column < self.plot.x + self.plot.width;
        let inside_y = row >= self.plot.y && row < self.plot.y + self.plot.height;
        if !inside_x || !inside_y {
            return None;
        }
        let offset = usize::from((column - self.plot.x) / self.slot_width);
        if offset >= self.count || (column - self.plot.x) % self.slot_width >= self.bar_width() {
            return None;
        }
        Some(self.first + offset)
    }
}

fn root_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area)
}

fn chart_area(area: Rect) -> Rect {
    root_layout(area)[1]
}

fn render(f: &mut ratatui::Frame, state: &AppState) {
    let root = root_layout(f.area());

    let window = state.handle.viewport();
    let header = Paragraph::new(format!(
        " usage-chart  ·  {}  ·  chart #{}  ·  x {:.1}..{:.1}  ·  {} ",
        state.view.mode().as_label(),
        state.handle.key().0,
        window.min,
        window.max,
        state.status
    ))
    .block(Block::default().borders(Borders::ALL).title(" View "))
    .style(Style::default().fg(COLOR_HEADER));
    f.render_widget(header, root[0]);

    render_chart(f, root[1], state);

    let tooltip = Paragraph::new(state.tooltip().unwrap_or_else(|| "-".into()))
        .block(Block::default().borders(Borders::ALL).title(" Tooltip "))
        .style(
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tooltip, root[2]);

    let footer = Paragraph::new(footer_text(state))
        .style(Style::default().fg(COLOR_MUTED))
        .alignment(Alignment::Left);
    f.render_widget(footer, root[3]);

    if state.screen == Screen::Help {
        render_help(f);
    }
}

fn footer_text(state: &AppState) -> &'static str {
    if state.view.drilldown {
        "←/→ select  [/] scroll  +/- zoom  b back to monthly  ? help  q quit"
    } else {
        "←/→ select  Enter drill down  [/] scroll  ? help  q quit"
    }
}

fn render_chart(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let chart = &state.chart;
    let options = &chart.options;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(chart.data.border_color.to_terminal()))
        .title(format!(" {} ", chart.data.label));
    f.render_widget(block, area);

    let visible = state.handle.visible();
    let geometry = PlotGeometry::new(area, visible.clone());
    let plot = geometry.plot;
    if plot.width == 0 || plot.height == 0 || chart.data.is_empty() {
        return;
    }

    let y_max = chart
        .data
        .values
        .iter()
        .copied()
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);
    let min_rows = chart
        .data
        .min_bar_length
        .map(|px| (f64::from(px) / CELL_HEIGHT_PX).ceil() as u16)
        .unwrap_or(0);
    let buf = f.buffer_mut();

    render_y_axis(buf, &geometry, y_max, &options.y.title);

    let bottom = plot.y + plot.height;
    for (offset, index) in visible.enumerate() {
        let (Some(label), Some(value)) = (chart.data.labels.get(index), chart.data.values.get(index))
        else {
            continue;
        };
        let x = geometry.slot_x(offset);
        let rows = ((value / y_max) * f64::from(plot.height)).round() as u16;
        let rows = rows.max(min_rows).min(plot.height);

        for row in 0..rows {
            let y = bottom - 1 - row;
            for col in 0..geometry.bar_width() {
                let (symbol, color) = match &chart.data.fill {
                    Fill::Solid { color } => ("█", color.to_terminal()),
                    Fill::Hatch { pattern } => {
                        let inked = pattern.is_inked(
                            i64::from(x + col) * HATCH_STEP_X,
                            i64::from(y) * HATCH_STEP_Y,
                        );
                        (if inked { "█" } else { "░" }, pattern.color.to_terminal())
                    }
                };
                if let Some(cell) = buf.cell_mut((x + col, y)) {
                    cell.set_symbol(symbol).set_fg(color);
                }
            }
        }

        let rule = &options.x.ticks;
        let tick_color = rule.color_for(label);
        let mut tick_style = if tick_color == rule.default_color {
            Style::default()
        } else {
            Style::default().fg(tick_color.to_terminal())
        };
        if index == state.cursor {
            tick_style = tick_style.add_modifier(Modifier::REVERSED);
        }
        buf.set_stringn(x, bottom, label, usize::from(geometry.slot_width), tick_style);

        for annotation in &options.annotations {
            let Annotation::Box(marker) = annotation;
            if marker.index != index || !marker.label.display {
                continue;
            }
            let marker_y = bottom.saturating_sub(rows + 1).max(plot.y);
            buf.set_stringn(
                x,
                marker_y,
                &marker.label.content,
                usize::from(geometry.bar_width()),
                Style::default()
                    .fg(marker.label.color.to_terminal())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

    let title = &options.x.title;
    let title_x = plot.x + plot.width.saturating_sub(title.len() as u16) / 2;
    buf.set_string(title_x, bottom + 1, title, Style::default().fg(COLOR_MUTED));
}

fn render_y_axis(buf: &mut Buffer, geometry: &PlotGeometry, y_max: f64, title: &str) {
    let plot = geometry.plot;
    let label_x = plot.x.saturating_sub(Y_LABEL_WIDTH);
    let style = Style::default().fg(COLOR_MUTED);

    buf.set_stringn(label_x, plot.y.saturating_sub(1), title, usize::from(Y_LABEL_WIDTH), style);
    let ticks = [
        (plot.y, y_max),
        (plot.y + plot.height / 2, y_max / 2.0),
        (plot.y + plot.height - 1, 0.0),
    ];
    for (y, value) in ticks {
        let text = format!("{:>width$}", format_usage(value), width = usize::from(Y_LABEL_WIDTH - 1));
        buf.set_stringn(label_x, y, text, usize::from(Y_LABEL_WIDTH - 1), style);
    }
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

fn render_help(f: &mut ratatui::Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);
    let key = |k: &'static str| Span::styled(k, Style::default().fg(COLOR_ACCENT));
    let lines = vec![
        Line::from(vec![key("←/→      "), Span::raw("move the tooltip between bars")]),
        Line::from(vec![key("Enter    "), Span::raw("open the daily view for a month")]),
        Line::from(vec![key("click    "), Span::raw("same as Enter, on the bar under the mouse")]),
        Line::from(vec![key("b/Esc    "), Span::raw("back to the monthly view")]),
        Line::from(vec![key("[ / ]    "), Span::raw("scroll left / right")]),
        Line::from(vec![key("drag     "), Span::raw("pan horizontally")]),
        Line::from(vec![key("+/-/wheel"), Span::raw(" zoom horizontally")]),
        Line::from(vec![key("q        "), Span::raw("quit")]),
        Line::from(""),
        Line::from("Press Enter or Esc"),
    ];
    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .style(Style::default().fg(COLOR_HEADER));
    f.render_widget(content, area);
}
