//! The scrollable strip holding the form's fields.

use cardform::{
    field::FieldId,
    input::InputView,
    orchestrator::{LayoutItem, RowJustify, StripDirection},
};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Line,
    widgets::Widget,
};
use std::collections::BTreeMap;
use unicode_width::UnicodeWidthStr;

use crate::{
    host::{
        registry::{LayoutRegistry, node_of},
        strip::StripScroll,
    },
    ui::{
        components::field_box::{FIELD_HEIGHT, FieldBox},
        traits::{CustomWidget, CustomWidgetContext},
    },
};

/// Columns between neighbouring items
pub const ITEM_GAP: u16 = 2;
/// Rows between stacked rows
pub const ROW_GAP: u16 = 1;

/// Element rendered right after the card number
#[derive(Debug, Clone, PartialEq)]
pub struct FormButton {
    pub label: String,
}

impl FormButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn clear() -> Self {
        Self::new("clear")
    }

    pub fn text(&self) -> String {
        format!("[ {} ]", self.label)
    }

    pub fn width(&self) -> u16 {
        self.text().width() as u16
    }
}

/// An item of the strip positioned in strip coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Placed {
    Field(FieldId, Rect),
    Button(FormButton, Rect),
}

impl Placed {
    pub fn rect(&self) -> Rect {
        match self {
            Placed::Field(_, rect) | Placed::Button(_, rect) => *rect,
        }
    }
}

// widths come from user config, so every sum saturates at the u16 edge
fn sum_widths(widths: impl Iterator<Item = u16>) -> u16 {
    widths.fold(0, u16::saturating_add)
}

fn item_width(item: &LayoutItem<FormButton>) -> u16 {
    match item {
        LayoutItem::Field { width, .. } => width.round().clamp(1.0, f64::from(u16::MAX)) as u16,
        LayoutItem::Element(button) => button.width(),
        LayoutItem::Row { items, .. } => {
            let gaps = u16::try_from(items.len().saturating_sub(1)).unwrap_or(u16::MAX);
            sum_widths(items.iter().map(item_width))
                .saturating_add(ITEM_GAP.saturating_mul(gaps))
        }
    }
}

fn place_item(item: &LayoutItem<FormButton>, x: u16, y: u16, out: &mut Vec<Placed>) {
    let width = item_width(item);
    match item {
        LayoutItem::Field { field, .. } => {
            out.push(Placed::Field(*field, Rect::new(x, y, width, FIELD_HEIGHT)))
        }
        LayoutItem::Element(button) => out.push(Placed::Button(
            button.clone(),
            Rect::new(x, y.saturating_add(1), width, 1),
        )),
        LayoutItem::Row { items, .. } => {
            let mut x = x;
            for item in items {
                place_item(item, x, y, out);
                x = x.saturating_add(item_width(item)).saturating_add(ITEM_GAP);
            }
        }
    }
}

fn place_row(
    justify: RowJustify,
    items: &[LayoutItem<FormButton>],
    y: u16,
    row_width: u16,
    out: &mut Vec<Placed>,
) {
    let widths: Vec<u16> = items.iter().map(item_width).collect();
    let used = sum_widths(widths.iter().copied());

    let gap = match justify {
        RowJustify::SpaceBetween if items.len() > 1 => {
            let gaps = u16::try_from(items.len() - 1).unwrap_or(u16::MAX);
            (row_width.saturating_sub(used) / gaps).max(ITEM_GAP)
        }
        _ => ITEM_GAP,
    };

    let mut x = 0;
    for (item, width) in items.iter().zip(widths) {
        place_item(item, x, y, out);
        x = x.saturating_add(width).saturating_add(gap);
    }
}

/// Positions every item in strip coordinates. Horizontal strips flow left
/// to right; vertical strips stack one row per item, spreading row contents
/// across `viewport_width`.
pub fn place(
    direction: StripDirection,
    items: &[LayoutItem<FormButton>],
    viewport_width: u16,
) -> Vec<Placed> {
    let mut placed = Vec::new();

    match direction {
        StripDirection::Horizontal => {
            let mut x = 0;
            for item in items {
                place_item(item, x, 0, &mut placed);
                x = x.saturating_add(item_width(item)).saturating_add(ITEM_GAP);
            }
        }
        StripDirection::Vertical => {
            let mut y = 0;
            for item in items {
                match item {
                    LayoutItem::Row { justify, items } => {
                        place_row(*justify, items, y, viewport_width, &mut placed)
                    }
                    _ => place_item(item, 0, y, &mut placed),
                }
                y = y.saturating_add(FIELD_HEIGHT + ROW_GAP);
            }
        }
    }

    placed
}

/// Union of every placed rect
pub fn extent(placed: &[Placed]) -> Rect {
    placed
        .iter()
        .map(Placed::rect)
        .fold(Rect::default(), |acc, rect| acc.union(rect))
}

/// Draws the strip into a buffer the size of its content, then copies the
/// scrolled viewport onto the screen. Every placement is recorded in the
/// layout registry.
pub struct FieldStrip<'a> {
    direction: StripDirection,
    items: &'a [LayoutItem<FormButton>],
    inputs: &'a BTreeMap<FieldId, InputView>,
    registry: &'a LayoutRegistry,
    scroll: &'a StripScroll,
    cursor: Option<FieldId>,
}

impl<'a> FieldStrip<'a> {
    pub fn new(
        direction: StripDirection,
        items: &'a [LayoutItem<FormButton>],
        inputs: &'a BTreeMap<FieldId, InputView>,
        registry: &'a LayoutRegistry,
        scroll: &'a StripScroll,
        cursor: Option<FieldId>,
    ) -> Self {
        Self {
            direction,
            items,
            inputs,
            registry,
            scroll,
            cursor,
        }
    }
}

// Translates a strip rect to the screen, clipped to the viewport
fn to_screen(rect: Rect, offset: u16, viewport: Rect) -> Option<Rect> {
    let x = i32::from(viewport.x) + i32::from(rect.x) - i32::from(offset);
    let left = x.max(i32::from(viewport.x));
    let right = (x + i32::from(rect.width)).min(i32::from(viewport.right()));
    let top = viewport.y.saturating_add(rect.y);

    if right <= left || top >= viewport.bottom() {
        return None;
    }

    let height = rect.height.min(viewport.bottom() - top);
    Some(Rect::new(left as u16, top, (right - left) as u16, height))
}

impl CustomWidget for FieldStrip<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext) {
        let placed = place(self.direction, self.items, area.width);
        let content = extent(&placed);
        self.scroll.set_extent(content.width, area.width);
        let offset = self.scroll.offset();

        let mut strip = Buffer::empty(Rect::new(0, 0, content.right(), content.bottom()));

        for item in &placed {
            let rect = item.rect();
            let screen = to_screen(rect, offset, area);

            match item {
                Placed::Field(field, rect) => {
                    self.registry.record(node_of(*field), *rect, screen);

                    let Some(view) = self.inputs.get(field) else {
                        continue;
                    };

                    let focused = self.cursor == Some(*field);
                    FieldBox::new(view, focused).render(*rect, &mut strip, ctx);

                    if focused
                        && let Some(screen) = screen
                        && screen.height > 1
                    {
                        let column = i32::from(area.x) + i32::from(rect.x) - i32::from(offset)
                            + i32::from(FieldBox::cursor_offset(view, rect.width));
                        if column >= i32::from(screen.x) && column < i32::from(screen.right()) {
                            self.registry
                                .set_cursor(Position::new(column as u16, screen.y + 1));
                        }
                    }
                }
                Placed::Button(button, rect) => {
                    if let Some(screen) = screen {
                        self.registry.record_button(screen);
                    }
                    Line::styled(
                        button.text(),
                        Style::default().fg(ctx.state.colors.header_text),
                    )
                    .render(*rect, &mut strip);
                }
            }
        }

        for y in 0..area.height.min(strip.area.height) {
            for x in 0..area.width {
                let source = (offset.saturating_add(x), y);
                if let Some(cell) = strip.cell(source)
                    && let Some(target) = buf.cell_mut((area.x + x, area.y + y))
                {
                    *target = cell.clone();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "./field_strip_tests.rs"]
mod tests;
