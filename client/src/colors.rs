/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

pub const OCEAN: (u8, u8, u8) = (11, 19, 32);
pub const GLOBE: (u8, u8, u8) = (22, 38, 58);
pub const LAND: (u8, u8, u8) = (46, 66, 62);
pub const COAST: (u8, u8, u8) = (130, 165, 150);
pub const GRATICULE: (u8, u8, u8) = (120, 150, 190);
pub const MARKER: (u8, u8, u8) = (255, 77, 77);

/// Graticule alpha: major lines (every 30 degrees) are brighter.
pub fn graticule_alpha(degrees: i32) -> f64 {
    if degrees == 0 {
        0.55
    } else if degrees % 30 == 0 {
        0.3
    } else {
        0.12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rgba() {
        assert_eq!(rgba_css(255, 77, 77, 0.5), "rgba(255,77,77,0.5)");
    }

    #[test]
    fn equator_and_meridian_stand_out() {
        assert!(graticule_alpha(0) > graticule_alpha(30));
        assert!(graticule_alpha(30) > graticule_alpha(10));
        assert_eq!(graticule_alpha(-60), graticule_alpha(60));
    }
}
