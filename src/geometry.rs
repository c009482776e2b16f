//! Viewport geometry in page and screen space.
//!
//! The page is measured in page units, the view on screen in screen pixels. The zoom factor is
//! the number of screen pixels per page unit.

use euclid::{Point2D, Rect, Scale, Size2D, Vector2D};

/// Page coordinates, the units scroll offsets are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSpace {}

/// Screen pixels, the units touch positions are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSpace {}

/// A visible rectangle expressed as fractions of the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeSpace {}

pub type PagePoint = Point2D<f64, PageSpace>;
pub type PageVector = Vector2D<f64, PageSpace>;
pub type PageSize = Size2D<f64, PageSpace>;
pub type PageRect = Rect<f64, PageSpace>;

pub type ScreenPoint = Point2D<f64, ScreenSpace>;
pub type ScreenSize = Size2D<f64, ScreenSpace>;

pub type RelativeRect = Rect<f64, RelativeSpace>;

pub type Zoom = Scale<f64, PageSpace, ScreenSpace>;

/// Returns a zoom factor that is safe to divide by.
///
/// Hosts report garbage before the first layout; treat it as no zoom.
pub fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0. {
        zoom
    } else {
        1.
    }
}

/// Converts a host zoom factor into a page-to-screen scale.
pub fn zoom_scale(zoom: f64) -> Zoom {
    Scale::new(sanitize_zoom(zoom))
}

/// Converts a point on screen into page coordinates.
pub fn screen_to_page(point: ScreenPoint, viewport_origin: PagePoint, zoom: f64) -> PagePoint {
    viewport_origin + (point / zoom_scale(zoom)).to_vector()
}

/// Converts a point in page coordinates into a point on screen.
pub fn page_to_screen(point: PagePoint, viewport_origin: PagePoint, zoom: f64) -> ScreenPoint {
    (point - viewport_origin).to_point() * zoom_scale(zoom)
}

/// Moves `rect` so that it lies within a page of the given size.
///
/// On an axis where the rectangle is longer than the page, it is aligned to the page start.
pub fn clamp_to_page(rect: PageRect, page: PageSize) -> PageRect {
    let clamp = |loc: f64, len: f64, page_len: f64| {
        if len >= page_len {
            0.
        } else {
            loc.clamp(0., page_len - len)
        }
    };

    let origin = PagePoint::new(
        clamp(rect.origin.x, rect.size.width, page.width),
        clamp(rect.origin.y, rect.size.height, page.height),
    );
    PageRect::new(origin, rect.size)
}

/// Expresses a visible rectangle relative to the page size, so that it survives relayout.
///
/// Axes with a degenerate page length are left unchanged.
pub fn transform_visible_rect(rect: PageRect, page: PageSize) -> RelativeRect {
    let scale = |value: f64, page_len: f64| {
        if page_len > 0. {
            value / page_len
        } else {
            value
        }
    };

    euclid::rect(
        scale(rect.origin.x, page.width),
        scale(rect.origin.y, page.height),
        scale(rect.size.width, page.width),
        scale(rect.size.height, page.height),
    )
}

/// Inverse of [`transform_visible_rect`].
pub fn untransform_visible_rect(rect: RelativeRect, page: PageSize) -> PageRect {
    let unscale = |value: f64, page_len: f64| {
        if page_len > 0. {
            value * page_len
        } else {
            value
        }
    };

    euclid::rect(
        unscale(rect.origin.x, page.width),
        unscale(rect.origin.y, page.height),
        unscale(rect.size.width, page.width),
        unscale(rect.size.height, page.height),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn arbitrary_rect() -> impl Strategy<Value = PageRect> {
        (-5000f64..5000., -5000f64..5000., 1f64..5000., 1f64..5000.)
            .prop_map(|(x, y, w, h)| euclid::rect(x, y, w, h))
    }

    fn arbitrary_page() -> impl Strategy<Value = PageSize> {
        (1f64..20000., 1f64..20000.).prop_map(|(w, h)| PageSize::new(w, h))
    }

    proptest! {
        #[test]
        fn visible_rect_round_trip(rect in arbitrary_rect(), page in arbitrary_page()) {
            let back = untransform_visible_rect(transform_visible_rect(rect, page), page);
            assert_relative_eq!(back.origin.x, rect.origin.x, max_relative = 1e-12, epsilon = 1e-9);
            assert_relative_eq!(back.origin.y, rect.origin.y, max_relative = 1e-12, epsilon = 1e-9);
            assert_relative_eq!(back.size.width, rect.size.width, max_relative = 1e-12);
            assert_relative_eq!(back.size.height, rect.size.height, max_relative = 1e-12);
        }

        #[test]
        fn screen_page_round_trip(
            x in -2000f64..2000.,
            y in -2000f64..2000.,
            zoom in 0.1f64..10.,
        ) {
            let origin = PagePoint::new(120., -40.);
            let page = screen_to_page(ScreenPoint::new(x, y), origin, zoom);
            let back = page_to_screen(page, origin, zoom);
            assert_relative_eq!(back.x, x, epsilon = 1e-9);
            assert_relative_eq!(back.y, y, epsilon = 1e-9);
        }

        #[test]
        fn clamped_rect_fits_page(rect in arbitrary_rect(), page in arbitrary_page()) {
            let clamped = clamp_to_page(rect, page);
            prop_assert_eq!(clamped.size, rect.size);
            if rect.size.width < page.width {
                prop_assert!(clamped.origin.x >= 0. && clamped.max_x() <= page.width + 1e-9);
            } else {
                prop_assert_eq!(clamped.origin.x, 0.);
            }
            if rect.size.height < page.height {
                prop_assert!(clamped.origin.y >= 0. && clamped.max_y() <= page.height + 1e-9);
            } else {
                prop_assert_eq!(clamped.origin.y, 0.);
            }
        }
    }

    #[test]
    fn transform_is_page_relative() {
        let rect = euclid::rect(250., 500., 500., 250.);
        let page = PageSize::new(1000., 1000.);
        assert_eq!(
            transform_visible_rect(rect, page),
            euclid::rect(0.25, 0.5, 0.5, 0.25)
        );
    }

    #[test]
    fn degenerate_page_is_identity() {
        let rect: PageRect = euclid::rect(10., 20., 30., 40.);
        let relative = transform_visible_rect(rect, PageSize::new(0., 0.));
        assert_eq!(relative, rect.cast_unit());
        assert_eq!(
            untransform_visible_rect(relative, PageSize::new(0., -1.)),
            rect
        );
    }

    #[test]
    fn clamp_inside_page() {
        let page = PageSize::new(1000., 800.);
        assert_eq!(
            clamp_to_page(euclid::rect(-50., 700., 300., 200.), page),
            euclid::rect(0., 600., 300., 200.)
        );
        assert_eq!(
            clamp_to_page(euclid::rect(100., 100., 1200., 200.), page),
            euclid::rect(0., 100., 1200., 200.)
        );
    }

    #[test]
    fn zoomed_screen_to_page() {
        let origin = PagePoint::new(100., 200.);
        assert_eq!(
            screen_to_page(ScreenPoint::new(50., 50.), origin, 2.),
            PagePoint::new(125., 225.)
        );
        assert_eq!(
            screen_to_page(ScreenPoint::new(50., 50.), origin, 0.),
            PagePoint::new(150., 250.)
        );
    }

    #[test]
    fn page_to_screen_applies_zoom() {
        let origin = PagePoint::new(100., 200.);
        assert_eq!(
            page_to_screen(PagePoint::new(125., 225.), origin, 2.),
            ScreenPoint::new(50., 50.)
        );
        assert_eq!(zoom_scale(f64::NAN).get(), 1.);
    }
}
