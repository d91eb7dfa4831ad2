use std::io::stdout;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fishbone_core::{Timeline, autoscroll};
use fishbone_protocol::{Color as FbColor, MarkSink, Point, Viewport};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Block,
};

use crate::demo::DemoTable;

/// Logical pixels per terminal row. Columns map 1:1 to pixels, rows are
/// taller, so vertical geometry is scaled down by this factor when mapped
/// to cells.
const PX_PER_ROW: f64 = 4.0;

/// Font size handed to the layout engine; all metrics derive from it.
const FONT_SIZE: f64 = 4.0;

fn to_term_color(c: FbColor) -> Color {
    Color::Rgb(
        (c.r.clamp(0.0, 1.0) * 255.0) as u8,
        (c.g.clamp(0.0, 1.0) * 255.0) as u8,
        (c.b.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// A pointer position in scrolled-document pixel space.
fn pointer_px(col: u16, row: u16, scroll_x: f64) -> Point {
    Point::new(
        f64::from(col) + scroll_x,
        (f64::from(row) - 1.0) * PX_PER_ROW + PX_PER_ROW / 2.0,
    )
}

pub fn run(table: &mut DemoTable) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut timeline = Timeline::new();
    let mut scroll_x: f64 = 0.0;
    let mut status: Option<String> = None;

    loop {
        let term_size = terminal.size()?;
        let viewport = Viewport {
            width: f64::from(term_size.width),
            height: f64::from(term_size.height.saturating_sub(1)) * PX_PER_ROW,
            font_size: FONT_SIZE,
        };

        // The snapshot is rebuilt per frame; any mark mutation from the
        // previous frame shows up here.
        let snapshot = table.snapshot();
        timeline.invalidate();
        let cycle = timeline.begin_cycle();
        match timeline.render(cycle, Some(&snapshot), &viewport) {
            Ok(_) => status = None,
            Err(err) => status = Some(err.to_string()),
        }
        scroll_x = scroll_x.min(timeline.max_scroll(viewport.width));

        let scene = timeline.scene().clone();
        let band_rect = timeline.rubber_band().rect();
        let autoscrolling = timeline.autoscroll().is_enabled();
        let marked = table.marked_count();

        terminal.draw(|frame| {
            let area = frame.area();

            let header_area = Rect::new(0, 0, area.width, 1);
            let title = match &status {
                Some(msg) => format!(" fishbone — {msg} "),
                None => format!(
                    " fishbone — {} cards | {marked} marked | ←→ scroll | a autoscroll{} | c clear | drag select (ctrl adds) | q quit ",
                    scene.cards.len(),
                    if autoscrolling { " ●" } else { "" },
                ),
            };
            let header =
                Block::default()
                    .title(title)
                    .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, header_area);

            let content = Rect::new(0, 1, area.width, area.height.saturating_sub(1));
            let buf = frame.buffer_mut();

            let to_cell = |x: f64, y: f64| -> Option<(u16, u16)> {
                let col = x - scroll_x;
                if col < 0.0 || col >= f64::from(content.width) || y < 0.0 {
                    return None;
                }
                let row = (y / PX_PER_ROW) as u16;
                if row >= content.height {
                    return None;
                }
                Some((content.x + col as u16, content.y + row))
            };

            // Ruler bands
            for segment in &scene.ruler {
                let Some((col, row)) = to_cell(segment.rect.x.max(scroll_x), segment.rect.y)
                else {
                    continue;
                };
                let end_col = ((segment.rect.right() - scroll_x) as u16).min(content.width);
                let width = (content.x + end_col).saturating_sub(col);
                if width == 0 {
                    continue;
                }
                let bg = if segment.level % 2 == 0 {
                    Color::DarkGray
                } else {
                    Color::Gray
                };
                let mut text = String::from("▏");
                text.push_str(&segment.label);
                for (i, ch) in text.chars().take(width as usize).enumerate() {
                    buf[(col + i as u16, row)]
                        .set_char(ch)
                        .set_fg(Color::White)
                        .set_bg(bg);
                }
                for i in text.chars().count() as u16..width {
                    buf[(col + i, row)].set_char(' ').set_bg(bg);
                }
            }

            // Connectors
            for conn in &scene.connectors {
                let top_row = (conn.rect.y / PX_PER_ROW) as u16;
                let bottom_row = (conn.rect.bottom() / PX_PER_ROW) as u16;
                for row in top_row..=bottom_row {
                    if let Some((col, cell_row)) =
                        to_cell(conn.rect.x, f64::from(row) * PX_PER_ROW)
                    {
                        buf[(col, cell_row)].set_char('│').set_fg(Color::DarkGray);
                    }
                }
            }

            // Cards
            for card in &scene.cards {
                let fill = to_term_color(card.fill);
                let fg = to_term_color(card.text_color);
                let top_row = (card.rect.y / PX_PER_ROW) as u16;
                let rows = ((card.rect.h / PX_PER_ROW) as u16).max(1);
                let label_row = top_row + rows / 2;
                for row in top_row..top_row + rows {
                    let Some((col, cell_row)) = to_cell(card.rect.x, f64::from(row) * PX_PER_ROW)
                    else {
                        continue;
                    };
                    let end_col = ((card.rect.right() - scroll_x) as u16).min(content.width);
                    let width = (content.x + end_col).saturating_sub(col);
                    let text = if row == label_row {
                        if card.marked {
                            format!(" ▶{}", card.label)
                        } else {
                            format!("  {}", card.label)
                        }
                    } else {
                        String::new()
                    };
                    let mut chars = text.chars();
                    for i in 0..width {
                        let cell = &mut buf[(col + i, cell_row)];
                        cell.set_char(chars.next().unwrap_or(' '))
                            .set_fg(fg)
                            .set_bg(fill);
                        if card.marked {
                            cell.set_style(
                                Style::default()
                                    .fg(fg)
                                    .bg(fill)
                                    .add_modifier(Modifier::BOLD),
                            );
                        }
                    }
                }
            }

            // Live rubber band
            if let Some(rect) = band_rect {
                let top_row = (rect.y / PX_PER_ROW) as u16;
                let bottom_row = (rect.bottom() / PX_PER_ROW) as u16;
                for row in top_row..=bottom_row {
                    for x in rect.x as u16..=rect.right() as u16 {
                        if let Some((col, cell_row)) =
                            to_cell(f64::from(x), f64::from(row) * PX_PER_ROW)
                        {
                            buf[(col, cell_row)].set_bg(Color::Rgb(70, 70, 110));
                        }
                    }
                }
            }
        })?;

        // Autoscroll re-schedules itself on the poll tick.
        if event::poll(autoscroll::TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Left => {
                        scroll_x = (scroll_x - FONT_SIZE * 1.5).max(0.0);
                    }
                    KeyCode::Right => {
                        scroll_x =
                            (scroll_x + FONT_SIZE * 1.5).min(timeline.max_scroll(viewport.width));
                    }
                    KeyCode::Char('a') => timeline.autoscroll_mut().toggle(),
                    KeyCode::Char('c') => table.clear_marks(),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let at = pointer_px(mouse.column, mouse.row, scroll_x);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => timeline.pointer_down(at),
                        MouseEventKind::Drag(MouseButton::Left) => timeline.pointer_move(at),
                        MouseEventKind::Up(MouseButton::Left) => {
                            let additive = mouse.modifiers.contains(KeyModifiers::CONTROL);
                            timeline.pointer_up(at, additive, table);
                        }
                        MouseEventKind::ScrollLeft => scroll_x = (scroll_x - 6.0).max(0.0),
                        MouseEventKind::ScrollRight => {
                            scroll_x = (scroll_x + 6.0).min(timeline.max_scroll(viewport.width));
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        } else {
            scroll_x = timeline
                .autoscroll()
                .step(scroll_x, timeline.max_scroll(viewport.width));
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
