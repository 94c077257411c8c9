//! Boxes and placement transforms in scene units (y up).

/// Axis-aligned box. `min > max` on either axis means empty.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Aabb2 {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Aabb2 {
    #[inline]
    pub fn from_min_max(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_center_size(center: [f32; 2], size: [f32; 2]) -> Self {
        Self {
            min: [0, 1].map(|i| center[i] - size[i] / 2.0),
            max: [0, 1].map(|i| center[i] + size[i] / 2.0),
        }
    }

    /// Identity for `union`.
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 2],
            max: [f32::NEG_INFINITY; 2],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..2).any(|i| self.min[i] > self.max[i])
    }

    pub fn include_point(&mut self, p: [f32; 2]) {
        for i in 0..2 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    pub fn union(self, other: Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => other,
            (_, true) => self,
            _ => Self {
                min: [0, 1].map(|i| self.min[i].min(other.min[i])),
                max: [0, 1].map(|i| self.max[i].max(other.max[i])),
            },
        }
    }

    #[inline]
    pub fn center(&self) -> [f32; 2] {
        [0, 1].map(|i| (self.min[i] + self.max[i]) / 2.0)
    }

    #[inline]
    pub fn size(&self) -> [f32; 2] {
        [0, 1].map(|i| self.max[i] - self.min[i])
    }

    #[inline]
    pub fn translated(self, dx: f32, dy: f32) -> Self {
        let d = [dx, dy];
        Self {
            min: [0, 1].map(|i| self.min[i] + d[i]),
            max: [0, 1].map(|i| self.max[i] + d[i]),
        }
    }

    /// Scale about the center.
    pub fn scaled(self, factor: f32) -> Self {
        let size = self.size();
        Self::from_center_size(self.center(), size.map(|s| s * factor))
    }

    /// Corners counter-clockwise from the lower left.
    pub fn corners(&self) -> [[f32; 2]; 4] {
        [
            self.min,
            [self.max[0], self.min[1]],
            self.max,
            [self.min[0], self.max[1]],
        ]
    }

    pub fn contains(&self, other: &Aabb2) -> bool {
        other.is_empty() || (0..2).all(|i| self.min[i] <= other.min[i] && other.max[i] <= self.max[i])
    }
}

/// Uniform scale then offset: the only placements a notebook needs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2 {
    pub scale: f32,
    pub offset: [f32; 2],
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2 {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: [0.0, 0.0],
    };

    #[inline]
    pub fn translate(dx: f32, dy: f32) -> Self {
        Self {
            scale: 1.0,
            offset: [dx, dy],
        }
    }

    #[inline]
    pub fn scale(factor: f32) -> Self {
        Self {
            scale: factor,
            offset: [0.0, 0.0],
        }
    }

    /// `self` after `inner`: maps `inner`'s local space into ours.
    pub fn compose(self, inner: Self) -> Self {
        Self {
            scale: self.scale * inner.scale,
            offset: self.apply(inner.offset),
        }
    }

    #[inline]
    pub fn apply(self, p: [f32; 2]) -> [f32; 2] {
        [0, 1].map(|i| p[i] * self.scale + self.offset[i])
    }

    pub fn apply_box(self, b: Aabb2) -> Aabb2 {
        if b.is_empty() {
            return b;
        }
        let mut out = Aabb2::empty();
        out.include_point(self.apply(b.min));
        out.include_point(self.apply(b.max));
        out
    }
}
