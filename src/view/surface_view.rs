//! One picker control as a Floem view.
//!
//! The control's [`PixelSurface`](crate::surface::PixelSurface) is uploaded
//! as an RGBA8 image and stretched to the widget; the cursor is drawn on top
//! at its engine offset. Pointer events are mapped back to surface pixels and
//! handed to the engine.

use std::sync::Arc;

use floem::kurbo::{Point, Rect, Stroke};
use floem::peniko::{self, Blob, Color};
use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::constants;
use crate::drag::PointerButton;
use crate::geometry::SurfaceCoordinate;
use crate::picker::Picker;
use crate::surface::Surface;

use super::checkerboard::Checkerboard;
use super::PickerHandle;

struct Revision(u64);

pub struct SurfaceView<P: Picker + 'static> {
    id: ViewId,
    handle: PickerHandle<P>,
    control: P::ControlId,
    held: bool,
    checkerboard: Option<Checkerboard>,
    round_cursor: bool,
    size: floem::taffy::prelude::Size<f32>,
    img: Option<peniko::Image>,
    img_hash: Vec<u8>,
}

/// Creates a view for `control`, sized to its surface.
pub fn surface_view<P: Picker + 'static>(handle: &PickerHandle<P>, control: P::ControlId) -> SurfaceView<P> {
    let id = ViewId::new();
    let revision = handle.revision();
    create_effect(move |_| {
        id.update_state(Revision(revision.get()));
    });

    let size = handle.with(|p| p.control(control).surface_size());
    SurfaceView {
        id,
        handle: handle.clone(),
        control,
        held: false,
        checkerboard: None,
        round_cursor: false,
        size: Default::default(),
        img: None,
        img_hash: Vec::new(),
    }
    .style(move |s| {
        s.width(size.width)
            .height(size.height)
            .border_radius(constants::RADIUS)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl<P: Picker + 'static> SurfaceView<P> {
    /// Paint a checkerboard under the surface, for opacity controls.
    pub fn checkered(mut self) -> Self {
        let surface = self.handle.with(|p| p.control(self.control).surface_size());
        self.checkerboard = Some(Checkerboard::for_surface(surface));
        self
    }

    pub fn round_cursor(mut self) -> Self {
        self.round_cursor = true;
        self
    }

    /// Widget point to surface pixels.
    fn to_surface(&self, pos: Point) -> Option<SurfaceCoordinate> {
        let (w, h) = (self.size.width as f64, self.size.height as f64);
        if w == 0.0 || h == 0.0 {
            return None;
        }
        let surface = self.handle.with(|p| p.control(self.control).surface_size());
        Some(SurfaceCoordinate::new(
            pos.x * surface.width / w,
            pos.y * surface.height / h,
        ))
    }

    fn ensure_image(&mut self) {
        if self.img.is_some() {
            return;
        }
        let control = self.control;
        let (pixels, width, height) = self.handle.with(|p| {
            let surface = p.control(control).surface();
            (surface.as_rgba8().to_vec(), surface.width(), surface.height())
        });
        if width == 0 || height == 0 {
            return;
        }
        let blob = Blob::new(Arc::new(pixels));
        self.img_hash = blob.id().to_le_bytes().to_vec();
        self.img = Some(peniko::Image::new(blob, peniko::Format::Rgba8, width, height));
    }

    fn release(&mut self) {
        if self.held {
            self.held = false;
            self.handle.update(|p| p.pointer_up());
        }
    }
}

impl<P: Picker + 'static> View for SurfaceView<P> {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if state.downcast::<Revision>().is_ok() {
            self.img = None;
            self.id.request_paint();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let Some(point) = self.to_surface(e.pos) else {
                    return EventPropagation::Continue;
                };
                let button = if e.button.is_primary() {
                    PointerButton::Primary
                } else {
                    PointerButton::Other
                };
                let control = self.control;
                self.held = self.handle.update(|p| p.pointer_down(control, button, point));
                if self.held {
                    cx.update_active(self.id());
                }
                EventPropagation::Stop
            }
            Event::PointerMove(e) => {
                if !self.held {
                    return EventPropagation::Continue;
                }
                if let Some(point) = self.to_surface(e.pos) {
                    self.handle.update(|p| p.pointer_move(point));
                }
                EventPropagation::Stop
            }
            Event::PointerUp(_) | Event::FocusLost => {
                self.release();
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 {
            return;
        }
        let rect = Rect::new(0.0, 0.0, w, h);
        let rrect = rect.to_rounded_rect(constants::RADIUS as f64);

        cx.save();
        cx.clip(&rrect);
        if let Some(board) = self.checkerboard {
            board.paint(cx, rect);
        }
        self.ensure_image();
        if let Some(ref img) = self.img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.img_hash,
                },
                rect,
            );
        }
        cx.restore();

        cx.stroke(&rrect, Color::rgba8(0, 0, 0, 40), &Stroke::new(1.0));

        // Cursor, filled with the color under it.
        let control = self.control;
        let (offset, cursor, surface, under) = self.handle.with(|p| {
            let c = p.control(control);
            (c.offset(), c.cursor(), c.surface_size(), c.cursor_color().source().rgba)
        });
        let (sx, sy) = (w / surface.width, h / surface.height);
        let bounds = Rect::new(
            offset.x * sx,
            offset.y * sy,
            (offset.x + cursor.width) * sx,
            (offset.y + cursor.height) * sy,
        );
        let radius = if self.round_cursor {
            bounds.width().min(bounds.height()) / 2.0
        } else {
            2.0
        };
        let thumb = bounds.to_rounded_rect(radius);
        let alpha = (under.a * 255.0).round() as u8;
        cx.fill(&thumb, Color::rgba8(under.r, under.g, under.b, alpha), 0.0);
        cx.stroke(&thumb, Color::WHITE, &Stroke::new(2.0));
        cx.stroke(
            &bounds.inflate(1.0, 1.0).to_rounded_rect(radius + 1.0),
            Color::rgba8(0, 0, 0, 80),
            &Stroke::new(1.0),
        );
    }
}
