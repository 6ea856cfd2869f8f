//! Vector drawing surface for map products.
//!
//! Every map-space draw is clipped to the fitted map rectangle of the
//! canvas's [`MapView`]. Geographic rings and lines are projected through the
//! view before rasterizing with tiny-skia.

use image::RgbaImage;
use projection::{MapView, PixelRect};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, StrokeDash,
    Transform,
};

use crate::color::{to_skia, Rgba};
use crate::error::{RenderError, Result};

/// Pixel size of static (non geo-referenced) products.
pub const STATIC_WIDTH: u32 = 1920;
pub const STATIC_HEIGHT: u32 = 1080;

/// Strip along the bottom of static products kept free for the title band.
pub const DRESS_BAND_HEIGHT: u32 = 90;

const PLOT_MARGIN: f64 = 20.0;

/// Area a static product's map is fitted into.
pub fn static_plot_area() -> PixelRect {
    PixelRect::new(
        PLOT_MARGIN,
        PLOT_MARGIN,
        STATIC_WIDTH as f64 - 2.0 * PLOT_MARGIN,
        (STATIC_HEIGHT - DRESS_BAND_HEIGHT) as f64 - 2.0 * PLOT_MARGIN,
    )
}

/// Stroke styling for lines and polygon outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f32,
    /// Alternating on/off lengths in pixels.
    pub dash: Option<Vec<f32>>,
}

impl LineStyle {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Rgba, width: f32, pattern: &[f32]) -> Self {
        Self {
            color,
            width,
            dash: Some(pattern.to_vec()),
        }
    }

    fn stroke(&self) -> Stroke {
        let mut stroke = Stroke {
            width: self.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        if let Some(pattern) = &self.dash {
            stroke.line_cap = LineCap::Butt;
            stroke.dash = StrokeDash::new(pattern.clone(), 0.0);
        }
        stroke
    }
}

/// Build a pixel-space path, or `None` when fewer than two usable points.
pub fn pixel_path(points: &[(f32, f32)], close: bool) -> Option<Path> {
    let mut pb = PathBuilder::new();
    let mut started = false;
    for &(x, y) in points {
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        if started {
            pb.line_to(x, y);
        } else {
            pb.move_to(x, y);
            started = true;
        }
    }
    if close && started {
        pb.close();
    }
    pb.finish()
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

pub struct MapCanvas {
    pixmap: Pixmap,
    view: MapView,
    clip: Mask,
}

impl MapCanvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, view: MapView, background: Rgba) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidCanvasSize { width, height })?;
        pixmap.fill(to_skia(background));

        let mut clip =
            Mask::new(width, height).ok_or(RenderError::InvalidCanvasSize { width, height })?;
        let r = view.map_rect();
        if let Some(rect) = Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
        {
            clip.fill_path(
                &PathBuilder::from_rect(rect),
                FillRule::Winding,
                false,
                Transform::identity(),
            );
        }

        Ok(Self { pixmap, view, clip })
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn map_rect(&self) -> PixelRect {
        self.view.map_rect()
    }

    /// Geographic point to pixel coordinates.
    pub fn to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let (x, y) = self.view.to_pixel(lon, lat);
        (x as f32, y as f32)
    }

    /// Project a line string into pixel space.
    pub fn project_line(&self, points: &[(f64, f64)]) -> Vec<(f32, f32)> {
        points
            .iter()
            .map(|&(lon, lat)| self.to_pixel(lon, lat))
            .collect()
    }

    /// Project polygon rings (outer and holes) into a single closed path.
    pub fn polygon_path(&self, rings: &[Vec<(f64, f64)>]) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for ring in rings {
            let projected = self.project_line(ring);
            let mut points = projected
                .iter()
                .filter(|(x, y)| x.is_finite() && y.is_finite());
            let Some(&(x0, y0)) = points.next() else {
                continue;
            };
            pb.move_to(x0, y0);
            for &(x, y) in points {
                pb.line_to(x, y);
            }
            pb.close();
        }
        pb.finish()
    }

    pub fn fill_polygon(&mut self, rings: &[Vec<(f64, f64)>], color: Rgba) {
        if let Some(path) = self.polygon_path(rings) {
            self.fill_path(&path, color);
        }
    }

    pub fn stroke_polygon(&mut self, rings: &[Vec<(f64, f64)>], style: &LineStyle) {
        if let Some(path) = self.polygon_path(rings) {
            self.stroke_path(&path, style);
        }
    }

    /// Fill a polygon with `/` diagonal lines `spacing` pixels apart.
    pub fn hatch_polygon(
        &mut self,
        rings: &[Vec<(f64, f64)>],
        color: Rgba,
        spacing: f32,
        width: f32,
    ) {
        let Some(path) = self.polygon_path(rings) else {
            return;
        };
        let mut mask = self.clip.clone();
        mask.intersect_path(&path, FillRule::EvenOdd, true, Transform::identity());

        let bounds = path.bounds();
        let Some(lines) = hatch_lines(
            bounds.left(),
            bounds.top(),
            bounds.right(),
            bounds.bottom(),
            spacing,
        ) else {
            return;
        };
        let stroke = LineStyle::solid(color, width).stroke();
        self.pixmap.stroke_path(
            &lines,
            &paint_for(color),
            &stroke,
            Transform::identity(),
            Some(&mask),
        );
    }

    pub fn stroke_line(&mut self, points: &[(f64, f64)], style: &LineStyle) {
        let projected = self.project_line(points);
        if let Some(path) = pixel_path(&projected, false) {
            self.stroke_path(&path, style);
        }
    }

    /// Fill a pixel-space path, clipped to the map.
    pub fn fill_path(&mut self, path: &Path, color: Rgba) {
        self.pixmap.fill_path(
            path,
            &paint_for(color),
            FillRule::EvenOdd,
            Transform::identity(),
            Some(&self.clip),
        );
    }

    /// Stroke a pixel-space path, clipped to the map.
    pub fn stroke_path(&mut self, path: &Path, style: &LineStyle) {
        self.pixmap.stroke_path(
            path,
            &paint_for(style.color),
            &style.stroke(),
            Transform::identity(),
            Some(&self.clip),
        );
    }

    /// Stroke the map rectangle border.
    pub fn frame_map(&mut self, style: &LineStyle) {
        let r = self.view.map_rect();
        if let Some(rect) = Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
        {
            self.pixmap.stroke_path(
                &PathBuilder::from_rect(rect),
                &paint_for(style.color),
                &style.stroke(),
                Transform::identity(),
                None,
            );
        }
    }

    /// Finish vector drawing and hand over straight-alpha pixels.
    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, data).ok_or(RenderError::InvalidCanvasSize { width, height })
    }
}

/// Diagonal `/` segments covering a pixel rectangle.
fn hatch_lines(left: f32, top: f32, right: f32, bottom: f32, spacing: f32) -> Option<Path> {
    if spacing <= 0.0 {
        return None;
    }
    let height = bottom - top;
    let mut pb = PathBuilder::new();
    let mut x = left - height;
    while x <= right {
        pb.move_to(x, bottom);
        pb.line_to(x + height, top);
        x += spacing;
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, RED, TRANSPARENT, WHITE};
    use projection::Projection;
    use wx_common::CONUS_EXTENT;

    fn canvas(background: Rgba) -> MapCanvas {
        let view = MapView::fit(
            Projection::web_mercator(),
            CONUS_EXTENT,
            PixelRect::new(10.0, 10.0, 180.0, 100.0),
        );
        MapCanvas::new(200, 120, view, background).unwrap()
    }

    fn square(lon0: f64, lat0: f64, size: f64) -> Vec<Vec<(f64, f64)>> {
        vec![vec![
            (lon0, lat0),
            (lon0 + size, lat0),
            (lon0 + size, lat0 + size),
            (lon0, lat0 + size),
        ]]
    }

    #[test]
    fn test_fill_polygon_paints_inside_only() {
        let mut c = canvas(WHITE);
        c.fill_polygon(&square(-100.0, 30.0, 10.0), RED);
        let (ix, iy) = c.to_pixel(-95.0, 35.0);
        let (ox, oy) = c.to_pixel(-120.0, 45.0);
        let img = c.into_image().unwrap();
        assert_eq!(img.get_pixel(ix as u32, iy as u32).0, RED);
        assert_eq!(img.get_pixel(ox as u32, oy as u32).0, WHITE);
    }

    #[test]
    fn test_drawing_is_clipped_to_map() {
        let mut c = canvas(TRANSPARENT);
        // A polygon far larger than the map
        c.fill_polygon(&square(-170.0, 0.0, 140.0), BLACK);
        let img = c.into_image().unwrap();
        assert_eq!(img.get_pixel(2, 2).0, TRANSPARENT);
        assert_eq!(img.get_pixel(100, 60).0, BLACK);
    }

    #[test]
    fn test_hatch_leaves_gaps() {
        let mut c = canvas(WHITE);
        c.hatch_polygon(&square(-110.0, 25.0, 30.0), BLACK, 8.0, 1.0);
        let img = c.into_image().unwrap();
        let painted = img.pixels().filter(|p| p.0 != WHITE).count();
        let total = (img.width() * img.height()) as usize;
        assert!(painted > 0);
        assert!(painted < total / 2);
    }

    #[test]
    fn test_invalid_canvas_size() {
        let view = MapView::fit(
            Projection::web_mercator(),
            CONUS_EXTENT,
            PixelRect::new(0.0, 0.0, 10.0, 10.0),
        );
        assert!(MapCanvas::new(0, 10, view, WHITE).is_err());
    }

    #[test]
    fn test_dashed_style() {
        let style = LineStyle::dashed(RED, 2.0, &[8.0, 4.0]);
        assert!(style.stroke().dash.is_some());
        assert!(LineStyle::solid(RED, 2.0).stroke().dash.is_none());
    }

    #[test]
    fn test_pixel_path_needs_points() {
        assert!(pixel_path(&[], false).is_none());
        assert!(pixel_path(&[(0.0, 0.0), (5.0, 5.0)], false).is_some());
    }
}
