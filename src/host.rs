use crate::geometry::{
    clamp_to_page, sanitize_zoom, transform_visible_rect, untransform_visible_rect, zoom_scale,
    PagePoint, PageRect, PageSize, ScreenSize,
};

/// The view that owns the scrolled surface.
///
/// The gesture controller queries it for geometry whenever it needs fresh values, and reports
/// every new scroll position or visible rectangle back to it.
pub trait ViewportHost {
    /// Size of the whole page, in page coordinates.
    fn page_size(&self) -> PageSize;
    /// Currently visible part of the page, in page coordinates.
    fn viewport_rect(&self) -> PageRect;
    /// Size of the view on screen, in screen pixels.
    fn screen_size(&self) -> ScreenSize;
    /// Screen pixels per page unit.
    fn zoom_factor(&self) -> f64;

    /// Moves the viewport origin; may lie outside the page while overscrolled.
    fn set_scroll_offset(&mut self, offset: PagePoint);
    /// Replaces the visible rectangle, changing the zoom.
    fn set_visible_rect(&mut self, rect: PageRect);

    /// Called after every offset or visible rectangle update.
    fn on_geometry_changed(&mut self) {}

    /// The controller wants `advance_frame` to be called at the tick rate.
    fn start_ticks(&mut self) {}
    /// The controller no longer needs frame ticks.
    fn stop_ticks(&mut self) {}
}

/// In-memory host that keeps its geometry in fields and records what it was told.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    page: PageSize,
    screen: ScreenSize,
    viewport: PageRect,
    ticking: bool,
    offsets: Vec<PagePoint>,
    visible_rects: Vec<PageRect>,
    geometry_changes: usize,
}

impl MemoryHost {
    /// Creates a host showing the top-left corner of the page at zoom 1.
    pub fn new(page: PageSize, screen: ScreenSize) -> Self {
        Self {
            page,
            screen,
            viewport: PageRect::from_size(screen.cast_unit()),
            ticking: false,
            offsets: Vec::new(),
            visible_rects: Vec::new(),
            geometry_changes: 0,
        }
    }

    /// Scrolls without recording, as the host's own layout would.
    pub fn scroll_to(&mut self, offset: PagePoint) {
        self.viewport.origin = offset;
    }

    /// Changes the page size, keeping the viewport at the same relative position.
    pub fn set_page_size(&mut self, page: PageSize) {
        let relative = transform_visible_rect(self.viewport, self.page);
        let origin = untransform_visible_rect(relative, page).origin;
        self.viewport = clamp_to_page(PageRect::new(origin, self.viewport.size), page);
        self.page = page;
    }

    /// Changes the screen size, keeping the zoom.
    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        let zoom = zoom_scale(self.zoom_factor());
        self.screen = screen;
        self.viewport.size = screen / zoom;
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Every scroll offset reported so far, oldest first.
    pub fn offsets(&self) -> &[PagePoint] {
        &self.offsets
    }

    /// Every visible rectangle reported so far, oldest first.
    pub fn visible_rects(&self) -> &[PageRect] {
        &self.visible_rects
    }

    pub fn geometry_changes(&self) -> usize {
        self.geometry_changes
    }
}

impl ViewportHost for MemoryHost {
    fn page_size(&self) -> PageSize {
        self.page
    }

    fn viewport_rect(&self) -> PageRect {
        self.viewport
    }

    fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    fn zoom_factor(&self) -> f64 {
        if self.viewport.size.width > 0. {
            sanitize_zoom(self.screen.width / self.viewport.size.width)
        } else {
            1.
        }
    }

    fn set_scroll_offset(&mut self, offset: PagePoint) {
        self.viewport.origin = offset;
        self.offsets.push(offset);
    }

    fn set_visible_rect(&mut self, rect: PageRect) {
        self.viewport = rect;
        self.visible_rects.push(rect);
    }

    fn on_geometry_changed(&mut self) {
        self.geometry_changes += 1;
    }

    fn start_ticks(&mut self) {
        self.ticking = true;
    }

    fn stop_ticks(&mut self) {
        self.ticking = false;
    }
}
