use serde::Serialize;

/// A viewport-relative rectangle, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub fn to_css(self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Pointer offset from the centre of `region`, scaled by `strength` on each
/// axis. A zero-sized region yields no translation.
pub fn hero_tilt(region: Rect, client_x: f64, client_y: f64, strength: f64) -> Option<Translation> {
    if region.width <= 0.0 || region.height <= 0.0 {
        return None;
    }
    let x = (client_x - region.left) / region.width - 0.5;
    let y = (client_y - region.top) / region.height - 0.5;
    Some(Translation {
        x: x * strength,
        y: y * strength,
    })
}

/// Page-coordinate `top` for the floating note: halfway between the navbar's
/// bottom edge and the top of the hero container.
pub fn note_top(navbar: Rect, hero_container: Rect, scroll_y: f64) -> f64 {
    let nav_bottom = navbar.bottom() + scroll_y;
    let hero_top = hero_container.top + scroll_y;
    nav_bottom + (hero_top - nav_bottom) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn centred_pointer_has_no_tilt() {
        let region = Rect::new(0.0, 100.0, 800.0, 600.0);
        let tilt = hero_tilt(region, 400.0, 400.0, 12.0).expect("sized region");
        assert_eq!(tilt, Translation { x: 0.0, y: 0.0 });
    }

    #[test]
    fn corner_pointer_tilts_half_strength() {
        let region = Rect::new(0.0, 0.0, 800.0, 600.0);
        let tilt = hero_tilt(region, 0.0, 600.0, 12.0).expect("sized region");
        assert_eq!(tilt, Translation { x: -6.0, y: 6.0 });
        assert_eq!(tilt.to_css(), "translate3d(-6px, 6px, 0)");
    }

    #[test]
    fn empty_region_is_ignored() {
        assert_eq!(hero_tilt(Rect::default(), 10.0, 10.0, 12.0), None);
    }

    #[test]
    fn note_sits_between_navbar_and_hero() {
        let navbar = Rect::new(0.0, 0.0, 1200.0, 72.0);
        let hero = Rect::new(0.0, 232.0, 1140.0, 500.0);
        assert_eq!(note_top(navbar, hero, 0.0), 152.0);
        let scrolled_navbar = Rect::new(0.0, 0.0, 1200.0, 72.0);
        let scrolled_hero = Rect::new(0.0, 132.0, 1140.0, 500.0);
        assert_eq!(note_top(scrolled_navbar, scrolled_hero, 100.0), 202.0);
    }
}
