use super::Vec2;

/// Viewport resolution in pixels.
///
/// The vertex stage divides by this value without a guard, so hosts check
/// [`Resolution::is_valid`] before writing it to a uniform.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Resolution {
    pub width: f32,
    pub height: f32,
}

impl Resolution {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub const fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Position of the top-right viewport corner when the origin is centered.
    #[inline]
    pub fn half_extent(self) -> Vec2 {
        self.as_vec2() * 0.5
    }
}

impl From<(u32, u32)> for Resolution {
    #[inline]
    fn from((w, h): (u32, u32)) -> Self {
        Resolution::new(w as f32, h as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_requires_positive_finite_components() {
        assert!(Resolution::new(800.0, 600.0).is_valid());
        assert!(!Resolution::new(0.0, 600.0).is_valid());
        assert!(!Resolution::new(800.0, -1.0).is_valid());
        assert!(!Resolution::new(f32::INFINITY, 600.0).is_valid());
    }

    #[test]
    fn from_window_size() {
        let r: Resolution = (1920u32, 1080u32).into();
        assert_eq!(r.half_extent(), Vec2::new(960.0, 540.0));
    }
}
