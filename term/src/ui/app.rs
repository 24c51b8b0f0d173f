//! Top level layout: title, card preview, field strip and status line.

use cardform::{field::FieldId, input::InputView, orchestrator::FormLayout};
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use std::collections::BTreeMap;

use crate::{
    host::{registry::LayoutRegistry, strip::StripScroll},
    ui::{
        components::{
            card_face::{CARD_HEIGHT, CardFace},
            field_strip::{FieldStrip, FormButton},
            footer::{InfoFooter, LEGEND},
        },
        traits::{CustomWidget, CustomWidgetContext},
    },
};

pub const TITLE: &str = "card details";

/// Everything one frame of the form needs beyond application state
pub struct FormFrame<'a> {
    pub layout: &'a FormLayout<FormButton>,
    pub inputs: &'a BTreeMap<FieldId, InputView>,
    pub registry: &'a LayoutRegistry,
    pub scroll: &'a StripScroll,
    pub cursor: Option<FieldId>,
}

pub struct App<'a> {
    frame: FormFrame<'a>,
}

impl<'a> App<'a> {
    pub fn new(frame: FormFrame<'a>) -> Self {
        Self { frame }
    }
}

impl CustomWidget for App<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let colors = &ctx.state.colors;
        let frame = self.frame;

        Block::new()
            .style(Style::new().bg(colors.buffer_bg))
            .render(area, buf);

        let [title_area, card_area, _, strip_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(area);

        Line::styled(
            TITLE,
            Style::new()
                .fg(colors.header_text)
                .add_modifier(Modifier::BOLD),
        )
        .centered()
        .render(title_area, buf);

        CardFace::new(&frame.layout.card).render(card_area, buf, ctx);

        frame.registry.begin_frame();
        FieldStrip::new(
            frame.layout.direction,
            &frame.layout.items,
            frame.inputs,
            frame.registry,
            frame.scroll,
            frame.cursor,
        )
        .render(
            strip_area.inner(Margin {
                horizontal: 1,
                vertical: 0,
            }),
            buf,
            ctx,
        );

        InfoFooter::new(LEGEND).render(footer_area, buf, ctx);
    }
}

#[cfg(test)]
#[path = "./app_tests.rs"]
mod tests;
