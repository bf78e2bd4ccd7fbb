use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::catalog::{CoffeeForm, FormField};

/// Rendered lines of the coffee form plus where the terminal cursor belongs,
/// relative to the top-left corner of the dialog's inner area.
pub(crate) struct FormView {
    pub(crate) lines: Vec<Line<'static>>,
    pub(crate) cursor: Option<(u16, u16)>,
}

/// Lay out every field of `form`, one line per field except for the taste
/// description, which spans as many lines as it contains.
pub(crate) fn form_view(form: &CoffeeForm) -> FormView {
    let mut lines = Vec::with_capacity(FormField::ALL.len() + 2);
    let mut cursor = None;

    for field in FormField::ALL {
        let is_active = form.active == field;
        let prefix = format!("{}: ", field.label());
        let prefix_width = prefix.chars().count();
        let value = form.value(field);

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        if field.is_selector() {
            let display = if is_active {
                format!("< {value} >")
            } else {
                value.to_string()
            };
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(display, style.add_modifier(Modifier::BOLD)),
            ]));
            continue;
        }

        if value.is_empty() {
            let placeholder_style = if is_active {
                style
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::raw(prefix),
                Span::styled(field.placeholder(), placeholder_style),
            ]));
            if is_active {
                cursor = Some((prefix_width as u16, (lines.len() - 1) as u16));
            }
            continue;
        }

        let indent = " ".repeat(prefix_width);
        for (idx, part) in value.split('\n').enumerate() {
            let lead = if idx == 0 { prefix.clone() } else { indent.clone() };
            lines.push(Line::from(vec![
                Span::raw(lead),
                Span::styled(part.to_string(), style),
            ]));
        }
        if is_active {
            let last = value.rsplit('\n').next().unwrap_or("");
            cursor = Some((
                (prefix_width + last.chars().count()) as u16,
                (lines.len() - 1) as u16,
            ));
        }
    }

    FormView { lines, cursor }
}
