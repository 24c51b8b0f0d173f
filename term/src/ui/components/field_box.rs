//! Labeled text field component.

use cardform::input::InputView;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::ui::{
    colors::{border_color, parse_color, text_style},
    traits::{CustomWidget, CustomWidgetContext},
};

/// Rows a field occupies: label, value and bottom border
pub const FIELD_HEIGHT: u16 = 3;

const MASK: char = '•';

/// One field: label on top, value (or placeholder) below, then a bottom
/// border in the container's border color
pub struct FieldBox<'a> {
    view: &'a InputView,
    focused: bool,
}

impl<'a> FieldBox<'a> {
    pub fn new(view: &'a InputView, focused: bool) -> Self {
        Self { view, focused }
    }

    /// Text shown on the value row, masked when required
    pub fn display_value(view: &InputView) -> String {
        if view.masked {
            MASK.to_string().repeat(view.value.chars().count())
        } else {
            view.value.clone()
        }
    }

    /// Column of the cursor relative to the field's left edge
    pub fn cursor_offset(view: &InputView, width: u16) -> u16 {
        let value_width = Self::display_value(view).width() as u16;
        value_width.min(width.saturating_sub(1))
    }

    // Keeps the end of long values visible
    fn visible_tail(text: &str, width: u16) -> String {
        let width = usize::from(width);
        let mut tail: Vec<char> = Vec::new();
        let mut used = 0;

        for c in text.chars().rev() {
            let w = c.width().unwrap_or(0);
            if used + w >= width.max(1) {
                break;
            }
            used += w;
            tail.push(c);
        }

        tail.into_iter().rev().collect()
    }
}

impl CustomWidget for FieldBox<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let colors = &ctx.state.colors;
        let view = self.view;

        let mut label_style = text_style(&view.label_style);
        if label_style.fg.is_none() {
            label_style = label_style.fg(colors.light_gray);
        }
        if self.focused {
            label_style = label_style.fg(colors.input_editing);
        }

        if let Some(label) = &view.label {
            Line::from(Span::styled(label.as_str(), label_style))
                .render(Rect { height: 1, ..area }, buf);
        }

        if area.height < 2 {
            return;
        }

        let value_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };

        let value = Self::display_value(view);
        let value_line = if value.is_empty() {
            let fg = view
                .placeholder_color
                .as_deref()
                .and_then(parse_color)
                .unwrap_or(colors.gray);
            Line::from(Span::styled(view.placeholder.as_str(), Style::default().fg(fg)))
        } else {
            let mut style = text_style(&view.input_style);
            if style.fg.is_none() {
                style = style.fg(colors.text);
            }
            Line::from(Span::styled(Self::visible_tail(&value, area.width), style))
        };
        value_line.render(value_area, buf);

        if area.height < FIELD_HEIGHT {
            return;
        }

        let border = if self.focused {
            colors.input_editing
        } else {
            border_color(&view.container_style).unwrap_or(colors.border_color)
        };

        Line::from(Span::styled(
            "─".repeat(usize::from(area.width)),
            Style::default().fg(border),
        ))
        .render(
            Rect {
                y: area.y + 2,
                height: 1,
                ..area
            },
            buf,
        );
    }
}

#[cfg(test)]
#[path = "./field_box_tests.rs"]
mod tests;
