//! Procedural textures, generated rather than loaded from assets.
//! All jitter comes from an integer hash instead of a RNG, so the
//! pixels are reproducible across runs and in tests.

use image::{Rgba, RgbaImage};

pub const TEXTURE_SIZE: u32 = 512;
pub const RUG_TEXTURE_SIZE: u32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Wood,
    Marble,
    Wall,
    Rug,
    WindowView,
}

impl TextureKind {
    pub const ALL: [TextureKind; 5] = [
        TextureKind::Wood,
        TextureKind::Marble,
        TextureKind::Wall,
        TextureKind::Rug,
        TextureKind::WindowView,
    ];

    /// Stable slot used by the renderer's texture table.
    pub fn index(self) -> usize {
        match self {
            TextureKind::Wood => 0,
            TextureKind::Marble => 1,
            TextureKind::Wall => 2,
            TextureKind::Rug => 3,
            TextureKind::WindowView => 4,
        }
    }

    pub fn generate(self) -> RgbaImage {
        match self {
            TextureKind::Wood => wood(),
            TextureKind::Marble => marble(),
            TextureKind::Wall => wall(),
            TextureKind::Rug => rug(),
            TextureKind::WindowView => window_view(),
        }
    }
}

/// Integer hash to [0, 1), same scramble the terrain noise in the pack uses.
fn hash2(x: i32, y: i32) -> f32 {
    let mut n = x.wrapping_mul(374761393).wrapping_add(y.wrapping_mul(668265263));
    n = (n ^ (n >> 13)).wrapping_mul(1274126177);
    (n ^ (n >> 16)) as u32 as f32 / 4294967296.0
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

/// Multi-stop gradient; `stops` must be sorted by position.
fn gradient(stops: &[(f32, [u8; 3])], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    for pair in stops.windows(2) {
        let (p0, c0) = pair[0];
        let (p1, c1) = pair[1];
        if t <= p1 {
            let span = (p1 - p0).max(1e-6);
            return lerp_rgb(c0, c1, (t - p0) / span);
        }
    }
    stops.last().map(|&(_, c)| c).unwrap_or([0, 0, 0])
}

fn blend(dst: [u8; 3], src: [u8; 3], alpha: f32) -> [u8; 3] {
    lerp_rgb(dst, src, alpha)
}

fn px(c: [u8; 3]) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

/// Brown diagonal gradient with sine-displaced grain lines.
pub fn wood() -> RgbaImage {
    let size = TEXTURE_SIZE;
    let stops = [
        (0.0, [0x8b, 0x45, 0x13]),
        (0.3, [0xa0, 0x52, 0x2d]),
        (0.6, [0x8b, 0x45, 0x13]),
        (1.0, [0x65, 0x43, 0x21]),
    ];
    let grain = [0x65u8, 0x43, 0x21];

    let mut img = RgbaImage::from_fn(size, size, |x, y| {
        let t = (x + y) as f32 / (2 * size - 2) as f32;
        px(gradient(&stops, t))
    });

    for i in (0..size).step_by(8) {
        let line_y = i as f32 + (i as f32 * 0.01).sin() * 5.0;
        let row = line_y.round();
        if row < 0.0 || row >= size as f32 {
            continue;
        }
        let row = row as u32;
        for x in 0..size {
            let c = img.get_pixel(x, row).0;
            let mixed = blend([c[0], c[1], c[2]], grain, 0.3);
            img.put_pixel(x, row, px(mixed));
        }
    }
    img
}

/// Light radial gradient with meandering gray veins.
pub fn marble() -> RgbaImage {
    let size = TEXTURE_SIZE;
    let half = size as f32 / 2.0;
    let stops = [
        (0.0, [0xf0, 0xf0, 0xf0]),
        (0.5, [0xe8, 0xe8, 0xe8]),
        (1.0, [0xd0, 0xd0, 0xd0]),
    ];
    let vein = [0x96u8, 0x96, 0x96];

    let mut img = RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - half;
        let dy = y as f32 - half;
        let t = (dx * dx + dy * dy).sqrt() / half;
        px(gradient(&stops, t))
    });

    for k in 0..10 {
        let x0 = hash2(k, 0) * size as f32;
        let phase = hash2(k, 1) * std::f32::consts::TAU;
        let sweep = (hash2(k, 2) - 0.5) * 0.4;
        for y in 0..size {
            let fy = y as f32;
            let meander = (fy * 0.015 + phase).sin() * 60.0 + (fy * 0.043 + phase * 2.0).sin() * 25.0;
            let cx = x0 + fy * sweep + meander;
            for offset in -1..=1 {
                let x = cx.round() as i32 + offset;
                if x < 0 || x >= size as i32 {
                    continue;
                }
                let c = img.get_pixel(x as u32, y).0;
                let mixed = blend([c[0], c[1], c[2]], vein, 0.2);
                img.put_pixel(x as u32, y, px(mixed));
            }
        }
    }
    img
}

/// Soft vertical gradient with faint white speckles.
pub fn wall() -> RgbaImage {
    let size = TEXTURE_SIZE;
    let stops = [
        (0.0, [0xe8, 0xd5, 0xc4]),
        (0.5, [0xf5, 0xe6, 0xd8]),
        (1.0, [0xe8, 0xd5, 0xc4]),
    ];

    let mut img = RgbaImage::from_fn(size, size, |_x, y| {
        px(gradient(&stops, y as f32 / (size - 1) as f32))
    });

    for i in 0..1000 {
        let sx = (hash2(i, 11) * size as f32) as u32 % size;
        let sy = (hash2(i, 23) * size as f32) as u32 % size;
        let alpha = hash2(i, 37) * 0.05;
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let (x, y) = (sx + dx, sy + dy);
            if x >= size || y >= size {
                continue;
            }
            let c = img.get_pixel(x, y).0;
            let mixed = blend([c[0], c[1], c[2]], [255, 255, 255], alpha);
            img.put_pixel(x, y, px(mixed));
        }
    }
    img
}

/// Dark red field with a gold border band.
pub fn rug() -> RgbaImage {
    let size = RUG_TEXTURE_SIZE;
    let field = [0x8bu8, 0x00, 0x00];
    let border = [0xffu8, 0xd7, 0x00];

    // 10px stroke centered on a rect inset by 20px
    RgbaImage::from_fn(size, size, |x, y| {
        let fx = x as f32;
        let fy = y as f32;
        let (lo, hi) = (20.0, size as f32 - 20.0);
        let in_outer = fx >= lo - 5.0 && fx <= hi + 5.0 && fy >= lo - 5.0 && fy <= hi + 5.0;
        let edge_dist = (fx - lo)
            .abs()
            .min((fx - hi).abs())
            .min((fy - lo).abs())
            .min((fy - hi).abs());
        if in_outer && edge_dist <= 5.0 {
            px(border)
        } else {
            px(field)
        }
    })
}

/// Stand-in for the framed window photo: sky over a hill, with white
/// frame bars.
pub fn window_view() -> RgbaImage {
    let size = TEXTURE_SIZE;
    let sky = [
        (0.0, [0x6f, 0xb3, 0xe0]),
        (0.6, [0xc9, 0xe6, 0xf5]),
        (1.0, [0xe6, 0xf2, 0xfa]),
    ];
    let hill = [0x4a, 0x7c, 0x3f];
    let frame = [0xf2u8, 0xf2, 0xf2];

    RgbaImage::from_fn(size, size, |x, y| {
        let t = y as f32 / (size - 1) as f32;
        let horizon = size as f32 * 0.72;
        let bar = 12;
        let edge = 20;
        let center = size / 2;
        let on_frame = x < edge
            || x >= size - edge
            || y < edge
            || y >= size - edge
            || x.abs_diff(center) < bar
            || y.abs_diff(center) < bar;
        if on_frame {
            px(frame)
        } else if (y as f32) > horizon {
            px(hill)
        } else {
            px(gradient(&sky, t))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_dimensions() {
        for kind in TextureKind::ALL {
            let img = kind.generate();
            let expected = if kind == TextureKind::Rug {
                RUG_TEXTURE_SIZE
            } else {
                TEXTURE_SIZE
            };
            assert_eq!(img.width(), expected, "{kind:?}");
            assert_eq!(img.height(), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_textures_are_deterministic() {
        assert_eq!(wood().as_raw(), wood().as_raw());
        assert_eq!(marble().as_raw(), marble().as_raw());
    }

    #[test]
    fn test_rug_border_and_field() {
        let img = rug();
        let center = img.get_pixel(128, 128).0;
        assert_eq!([center[0], center[1], center[2]], [0x8b, 0x00, 0x00]);
        let border = img.get_pixel(20, 128).0;
        assert_eq!([border[0], border[1], border[2]], [0xff, 0xd7, 0x00]);
    }

    #[test]
    fn test_texture_index_matches_all_order() {
        for (i, kind) in TextureKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
