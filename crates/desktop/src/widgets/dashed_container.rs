use iced::advanced::graphics::geometry;
use iced::advanced::layout;
use iced::advanced::renderer;
use iced::advanced::widget::tree::Tree;
use iced::advanced::widget::Widget;
use iced::advanced::{Clipboard, Layout, Renderer as _, Shell};
use iced::border::Border;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{
    alignment, Color, Element, Event, Length, Padding, Point, Rectangle, Renderer, Size, Theme,
};

/// Configuration for the dashed border appearance.
#[derive(Debug, Clone, Copy)]
pub struct DashedBorderStyle {
    pub border_color: Color,
    pub border_width: f32,
    pub dash_length: f32,
    pub gap_length: f32,
    pub corner_radius: f32,
    pub background: Color,
}

/// A container that draws a dashed rounded-rectangle border around its child
/// and swaps to a highlight style while something is dragged over it.
pub struct DashedContainer<'a, Message> {
    content: Element<'a, Message>,
    style: DashedBorderStyle,
    highlight: Option<DashedBorderStyle>,
    highlighted: bool,
    padding: Padding,
    width: Length,
}

impl<'a, Message> DashedContainer<'a, Message> {
    pub fn new(
        style: DashedBorderStyle,
        padding: impl Into<Padding>,
        content: impl Into<Element<'a, Message>>,
    ) -> Self {
        Self {
            content: content.into(),
            style,
            highlight: None,
            highlighted: false,
            padding: padding.into(),
            width: Length::Fill,
        }
    }

    pub fn highlight(mut self, style: DashedBorderStyle, active: bool) -> Self {
        self.highlight = Some(style);
        self.highlighted = active;
        self
    }

    fn effective_style(&self) -> DashedBorderStyle {
        match self.highlight {
            Some(style) if self.highlighted => style,
            _ => self.style,
        }
    }
}

impl<Message> Widget<Message, Theme, Renderer> for DashedContainer<'_, Message> {
    fn children(&self) -> Vec<Tree> {
        vec![Tree::new(&self.content)]
    }

    fn diff(&self, tree: &mut Tree) {
        tree.diff_children(std::slice::from_ref(&self.content));
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: Length::Shrink,
        }
    }

    fn layout(
        &mut self,
        tree: &mut Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::positioned(
            limits,
            self.width,
            Length::Shrink,
            self.padding,
            |limits| {
                self.content.as_widget_mut().layout(
                    &mut tree.children[0],
                    renderer,
                    &limits.loose(),
                )
            },
            |content, size| {
                content.align(
                    alignment::Alignment::from(alignment::Horizontal::Center),
                    alignment::Alignment::from(alignment::Vertical::Top),
                    size,
                )
            },
        )
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: iced::mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        let Some(content_layout) = layout.children().next() else {
            return;
        };
        self.content.as_widget_mut().update(
            &mut tree.children[0],
            event,
            content_layout,
            cursor,
            renderer,
            clipboard,
            shell,
            viewport,
        );
    }

    fn mouse_interaction(
        &self,
        tree: &Tree,
        layout: Layout<'_>,
        cursor: iced::mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> iced::mouse::Interaction {
        let Some(content_layout) = layout.children().next() else {
            return iced::mouse::Interaction::default();
        };
        self.content.as_widget().mouse_interaction(
            &tree.children[0],
            content_layout,
            cursor,
            viewport,
            renderer,
        )
    }

    fn draw(
        &self,
        tree: &Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        renderer_style: &renderer::Style,
        layout: Layout<'_>,
        cursor: iced::mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let Some(clipped_viewport) = bounds.intersection(viewport) else {
            return;
        };
        let s = self.effective_style();

        renderer.fill_quad(
            renderer::Quad {
                bounds,
                border: Border {
                    radius: s.corner_radius.into(),
                    ..Border::default()
                },
                ..renderer::Quad::default()
            },
            s.background,
        );

        if let Some(content_layout) = layout.children().next() {
            self.content.as_widget().draw(
                &tree.children[0],
                renderer,
                theme,
                renderer_style,
                content_layout,
                cursor,
                &clipped_viewport,
            );
        }

        let mut frame = Frame::new(renderer, bounds.size());
        let inset = s.border_width / 2.0;
        let border_path = Path::rounded_rectangle(
            Point::new(inset, inset),
            Size::new(
                bounds.width - s.border_width,
                bounds.height - s.border_width,
            ),
            s.corner_radius.into(),
        );
        let dash_pattern = [s.dash_length, s.gap_length];
        frame.stroke(
            &border_path,
            Stroke {
                style: canvas::Style::Solid(s.border_color),
                width: s.border_width,
                line_cap: canvas::LineCap::Round,
                line_dash: canvas::LineDash {
                    segments: &dash_pattern,
                    offset: 0,
                },
                ..Stroke::default()
            },
        );
        let geom = frame.into_geometry();

        renderer.with_translation(iced::Vector::new(bounds.x, bounds.y), |renderer| {
            geometry::Renderer::draw_geometry(renderer, geom);
        });
    }
}

impl<'a, Message: 'a> From<DashedContainer<'a, Message>> for Element<'a, Message> {
    fn from(container: DashedContainer<'a, Message>) -> Self {
        Element::new(container)
    }
}

/// Creates a dashed-border container element with the given content and style.
pub fn dashed_container<'a, Message: 'a>(
    style: DashedBorderStyle,
    padding: impl Into<Padding>,
    content: impl Into<Element<'a, Message>>,
) -> DashedContainer<'a, Message> {
    DashedContainer::new(style, padding, content)
}
