use crate::selection::Confirmation;
use crate::tui::app::App;
use crate::tui::navigation::Row;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Presentation-only state of one row at draw time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowFlags {
    pub focused: bool,
    pub hovered: bool,
    pub pressed: bool,
}

impl RowFlags {
    fn for_row(app: &App, row: Row) -> Self {
        Self {
            focused: app.navigation.focused == row,
            hovered: app.pointer.hovered == Some(row),
            pressed: app.pointer.pressed == Some(row),
        }
    }
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // All pages
            Constraint::Min(3),    // Page list
            Constraint::Length(3), // Done button
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    draw_all_row(frame, chunks[0], app);
    draw_item_list(frame, chunks[1], app);
    draw_done_button(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);

    if app.help_mode {
        draw_help_window(frame);
    }
    if let Some(confirmation) = &app.pending_confirmation {
        draw_confirmation(frame, app, confirmation);
    }
}

/// Glyph and style for a checkbox row.
///
/// Hovering an unchecked box previews the check mark.
pub fn checkbox_style(checked: bool, flags: RowFlags) -> (&'static str, Style) {
    let glyph = if checked || flags.hovered { "[✓]" } else { "[ ]" };

    let mut style = if checked {
        if flags.pressed {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else if flags.hovered {
            Style::default().fg(Color::LightBlue)
        } else {
            Style::default().fg(Color::Cyan)
        }
    } else if flags.pressed {
        Style::default().fg(Color::Cyan).bg(Color::DarkGray)
    } else if flags.hovered {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    if flags.focused {
        style = style.add_modifier(Modifier::REVERSED);
    }

    (glyph, style)
}

fn checkbox_line(label: &str, checked: bool, flags: RowFlags) -> Line<'static> {
    let (glyph, style) = checkbox_style(checked, flags);
    let label_style = if flags.focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::styled(glyph, style),
        Span::raw(" "),
        Span::styled(label.to_string(), label_style),
    ])
}

fn draw_all_row(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default().borders(Borders::ALL).title("Select pages");
    let inner = block.inner(area);
    app.hit_areas.all = inner;

    let line = checkbox_line(&app.all_label, app.snapshot.all(), RowFlags::for_row(app, Row::All));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_item_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let title = if app.navigation.visible_items() < app.total_items() {
        let range = app.navigation.visible_range();
        format!("Pages {}-{} of {}", range.start + 1, range.end, app.total_items())
    } else {
        "Pages".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    app.hit_areas.items = inner;
    app.navigation.set_visible_items(inner.height as usize);

    let items: Vec<ListItem> = app
        .navigation
        .visible_range()
        .map(|i| {
            let label = app.labels.get(i).map(String::as_str).unwrap_or_default();
            let flags = RowFlags::for_row(app, Row::Item(i));
            ListItem::new(checkbox_line(label, app.is_item_checked(i), flags))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_done_button(frame: &mut Frame, area: Rect, app: &mut App) {
    app.hit_areas.done = area;
    let flags = RowFlags::for_row(app, Row::Done);

    let mut style = if flags.pressed {
        Style::default().bg(Color::Yellow).fg(Color::Black)
    } else if flags.hovered {
        Style::default().bg(Color::LightYellow).fg(Color::Black)
    } else {
        Style::default().fg(Color::Yellow)
    };
    if flags.focused {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let button = Paragraph::new("Done")
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(button, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer_text = format!(
        "Selected: {}/{} | ↑↓/j/k/Tab: move | Space: toggle | a: all | d: done | ?: help | q: quit",
        app.selected_count(),
        app.total_items()
    );

    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Yellow));

    frame.render_widget(footer, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = [
        "Page Selector - Keyboard Commands",
        "",
        "NAVIGATION:",
        "  ↑↓ / j/k          Move focus up/down",
        "  Tab / Shift+Tab   Next/previous control",
        "  Home/End / g/G    First/last control",
        "",
        "SELECTION:",
        "  Space / Enter     Toggle focused checkbox or press Done",
        "  a                 Toggle all pages",
        "  d                 Done: review the selection",
        "",
        "MOUSE:",
        "  Click             Toggle row or press Done",
        "  Wheel             Scroll the page list",
        "",
        "OTHER:",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Esc / Ctrl+C  Quit without confirming",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(80, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn draw_confirmation(frame: &mut Frame, app: &App, confirmation: &Confirmation) {
    let mut lines: Vec<Line> = match confirmation {
        Confirmation::Empty => vec![Line::from("No pages selected")],
        Confirmation::Selected(_) => {
            let mut lines = vec![Line::from("Selected pages:")];
            lines.extend(
                app.confirmation_labels(confirmation)
                    .into_iter()
                    .map(|label| Line::from(format!("  • {}", label))),
            );
            lines
        }
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: accept | Esc: keep editing",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Done ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    let area = centered_rect(60, 60, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_previews_check_on_unchecked_box() {
        let (glyph, _) = checkbox_style(false, RowFlags::default());
        assert_eq!(glyph, "[ ]");

        let hovered = RowFlags { hovered: true, ..RowFlags::default() };
        let (glyph, style) = checkbox_style(false, hovered);
        assert_eq!(glyph, "[✓]");
        assert_eq!(style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_focus_reverses_style() {
        let focused = RowFlags { focused: true, ..RowFlags::default() };
        let (glyph, style) = checkbox_style(true, focused);

        assert_eq!(glyph, "[✓]");
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 60, parent);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 30);
        assert_eq!(popup.x, 20);
    }
}
