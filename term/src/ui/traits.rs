use ratatui::layout::Rect;

use crate::store::state::State;

pub struct CustomWidgetContext<'a> {
    // app state
    pub state: &'a State,
}

pub trait CustomWidget {
    fn render(self, area: Rect, buf: &mut ratatui::prelude::Buffer, ctx: &CustomWidgetContext);
}
