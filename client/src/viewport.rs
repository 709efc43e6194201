/// Pan/zoom transform between screen pixels and an equirectangular world.
///
/// World space is degrees: `x = longitude`, `y = -latitude`, so north is up.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoViewport {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Screen pixels per degree.
    pub scale: f64,
}

const MIN_SCALE: f64 = 0.5;
const MAX_SCALE: f64 = 4096.0;
const ZOOM_SENSITIVITY: f64 = 0.001;
/// Pixels per degree at zoom 0 (one 256px tile spans 360 degrees).
const ZOOM0_SCALE: f64 = 256.0 / 360.0;

impl Default for GeoViewport {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: ZOOM0_SCALE,
        }
    }
}

impl GeoViewport {
    /// Scale for a slippy-map style zoom level.
    pub fn scale_for_zoom(zoom: f64) -> f64 {
        (ZOOM0_SCALE * zoom.exp2()).clamp(MIN_SCALE, MAX_SCALE)
    }

    /// `(x, y)` screen position of a geographic point.
    pub fn geo_to_screen(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        (
            longitude * self.scale + self.offset_x,
            -latitude * self.scale + self.offset_y,
        )
    }

    /// `(latitude, longitude)` under a screen position. Not clamped to the globe.
    pub fn screen_to_geo(&self, sx: f64, sy: f64) -> (f64, f64) {
        let longitude = (sx - self.offset_x) / self.scale;
        let latitude = -(sy - self.offset_y) / self.scale;
        (latitude, longitude)
    }

    /// Zoom toward a focus point (screen coordinates).
    pub fn zoom_at(&mut self, delta: f64, screen_x: f64, screen_y: f64) {
        let factor = (-delta * ZOOM_SENSITIVITY).exp();
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = new_scale / self.scale;

        // Keep the point under the cursor fixed
        self.offset_x = screen_x - (screen_x - self.offset_x) * ratio;
        self.offset_y = screen_y - (screen_y - self.offset_y) * ratio;
        self.scale = new_scale;
    }

    /// Pan by screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Put a geographic point at the middle of a `canvas_w` x `canvas_h` canvas.
    pub fn center_on(
        &mut self,
        latitude: f64,
        longitude: f64,
        zoom: f64,
        canvas_w: f64,
        canvas_h: f64,
    ) {
        self.scale = Self::scale_for_zoom(zoom);
        self.offset_x = canvas_w / 2.0 - longitude * self.scale;
        self.offset_y = canvas_h / 2.0 + latitude * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn screen_geo_inverse() {
        let mut vp = GeoViewport::default();
        vp.center_on(20.59, 78.96, 5.0, 800.0, 600.0);
        let (sx, sy) = vp.geo_to_screen(12.34, 56.78);
        let (lat, lng) = vp.screen_to_geo(sx, sy);
        assert!(close(lat, 12.34));
        assert!(close(lng, 56.78));
    }

    #[test]
    fn center_lands_mid_canvas() {
        let mut vp = GeoViewport::default();
        vp.center_on(20.59, 78.96, 5.0, 800.0, 600.0);
        let (lat, lng) = vp.screen_to_geo(400.0, 300.0);
        assert!(close(lat, 20.59));
        assert!(close(lng, 78.96));
    }

    #[test]
    fn north_is_up() {
        let mut vp = GeoViewport::default();
        vp.center_on(0.0, 0.0, 2.0, 400.0, 400.0);
        let (_, north_y) = vp.geo_to_screen(10.0, 0.0);
        let (_, south_y) = vp.geo_to_screen(-10.0, 0.0);
        assert!(north_y < south_y);
    }

    #[test]
    fn zoom_keeps_focus_point_fixed() {
        let mut vp = GeoViewport::default();
        vp.center_on(0.0, 0.0, 3.0, 800.0, 600.0);
        let before = vp.screen_to_geo(120.0, 80.0);
        vp.zoom_at(-300.0, 120.0, 80.0);
        let after = vp.screen_to_geo(120.0, 80.0);
        assert!(close(before.0, after.0));
        assert!(close(before.1, after.1));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = GeoViewport::default();
        vp.zoom_at(1e9, 0.0, 0.0);
        assert_eq!(vp.scale, MIN_SCALE);
        vp.zoom_at(-1e9, 0.0, 0.0);
        assert_eq!(vp.scale, MAX_SCALE);
    }
}
