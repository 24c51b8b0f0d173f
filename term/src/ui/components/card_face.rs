//! Card preview component.

use cardform::card::CardFaceProps;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::ui::traits::{CustomWidget, CustomWidgetContext};

/// Base card size in cells before scaling
pub const CARD_WIDTH: u16 = 36;
pub const CARD_HEIGHT: u16 = 8;

/// Draws the front of the card, or the back while the CVC is focused
pub struct CardFace<'a> {
    props: &'a CardFaceProps,
}

impl<'a> CardFace<'a> {
    pub fn new(props: &'a CardFaceProps) -> Self {
        Self { props }
    }

    /// Size of the card for the configured scale, never larger than `area`
    pub fn size(&self, area: Rect) -> (u16, u16) {
        let scale = if self.props.scale.is_finite() && self.props.scale > 0.0 {
            self.props.scale
        } else {
            1.0
        };
        let width = (f64::from(CARD_WIDTH) * scale).round() as u16;
        (width.min(area.width), CARD_HEIGHT.min(area.height))
    }

    fn or_placeholder<'b>(value: &'b str, placeholder: &'b str) -> &'b str {
        if value.is_empty() { placeholder } else { value }
    }

    fn brand(&self) -> String {
        let Some(brand) = self.props.brand.as_deref() else {
            return String::new();
        };

        self.props
            .brand_icons
            .get(brand)
            .cloned()
            .unwrap_or_else(|| brand.to_uppercase())
    }

    fn front(&self) -> Vec<Line<'a>> {
        let props = self.props;
        let placeholders = &props.placeholders;

        vec![
            Line::from(""),
            Line::from(Span::styled(
                Self::or_placeholder(&props.number, &placeholders.number).to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::from(Self::or_placeholder(&props.name, &placeholders.name).to_uppercase()),
                Span::from("  "),
                Span::from(Self::or_placeholder(&props.expiry, &placeholders.expiry).to_string()),
            ]),
        ]
    }

    fn back(&self) -> Vec<Line<'a>> {
        let props = self.props;
        let cvc = if props.cvc.is_empty() {
            props.placeholders.cvc.clone()
        } else if props.hide_cvc {
            "•".repeat(props.cvc.chars().count())
        } else {
            props.cvc.clone()
        };

        vec![
            Line::from("▀".repeat(usize::from(CARD_WIDTH))),
            Line::from(""),
            Line::from(format!("CVC {cvc}")).alignment(Alignment::Right),
        ]
    }
}

impl CustomWidget for CardFace<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let colors = &ctx.state.colors;
        let (width, height) = self.size(area);
        let card_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y,
            width,
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(colors.border_color))
            .title_top(Line::from(self.brand()).alignment(Alignment::Right))
            .style(Style::default().bg(colors.card_bg).fg(colors.card_text));

        let lines = if self.props.shows_back() {
            self.back()
        } else {
            self.front()
        };

        Paragraph::new(lines)
            .block(block)
            .render(card_area, buf);
    }
}

#[cfg(test)]
#[path = "./card_face_tests.rs"]
mod tests;
