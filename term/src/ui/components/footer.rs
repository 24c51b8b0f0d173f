//! Status line: the last form message and the key legend.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::ui::traits::{CustomWidget, CustomWidgetContext};

pub const LEGEND: &str = "tab/shift-tab: move • enter: next/submit • esc: quit";

pub struct InfoFooter {
    legend: String,
}

impl InfoFooter {
    pub fn new(legend: &str) -> Self {
        Self {
            legend: legend.to_string(),
        }
    }
}

impl CustomWidget for InfoFooter {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let state = ctx.state;
        let [message_area, legend_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        if let Some(message) = &state.message {
            let fg = if state.submitted {
                state.colors.header_text
            } else {
                state.colors.error
            };
            Paragraph::new(Line::from(message.as_str()))
                .style(Style::new().fg(fg))
                .centered()
                .render(message_area, buf);
        }

        Paragraph::new(Line::from(self.legend.as_str()))
            .style(Style::new().fg(state.colors.light_gray))
            .centered()
            .render(legend_area, buf);
    }
}

#[cfg(test)]
#[path = "./footer_tests.rs"]
mod tests;
