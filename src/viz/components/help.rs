use ratatui::{prelude::*, widgets::*};

use crate::viz::util::centered;

fn key_line(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::from(key).light_cyan().bold(),
        Span::raw(" : "),
        Span::raw(action),
    ])
}

/// Popup listing the key bindings of the selected tab
pub fn render_help(area: Rect, buf: &mut Buffer, selected_tab: usize) {
    let mut lines = vec![
        key_line("  q  ", "Stop the episode and exit"),
        key_line("  h  ", "Toggle help popup"),
        key_line(" Tab ", "Switch tabs"),
    ];

    match selected_tab {
        0 => lines.push(key_line(
            "  p  ",
            "Toggle learned policy overlay (after the goal is reached)",
        )),
        1 => lines.extend([
            key_line("  s  ", "Toggle target selector widget hidden/visible"),
            key_line("  f  ", "Toggle focus on the selected target only"),
            key_line("⬆ / ⬇", "Switch log target"),
            key_line("⬅ / ➡", "Reduce/increase shown log messages by one level"),
            key_line("- / +", "Reduce/increase captured log messages by one level"),
            key_line("PgUp ", "Enter page mode and scroll up in log history"),
            key_line("PgDn ", "Only in page mode, scroll down in log history"),
            key_line(" Esc ", "Exit page mode"),
        ]),
        _ => {}
    }

    let popup = centered(area, 80, lines.len() as u16 + 4);
    Clear.render(popup, buf);

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1))
                .title("Help"),
        )
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}
