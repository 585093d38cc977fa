//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Opaque sRGB color from a 0xRRGGBB literal
pub const fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// sRGB to linear for one color (alpha untouched)
pub fn srgb_to_linear(color: [f32; 4]) -> [f32; 4] {
    let f = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [f(color[0]), f(color[1]), f(color[2]), color[3]]
}

/// Colors for game elements (sRGB)
pub mod colors {
    use super::rgb;

    pub const SKY: [f32; 4] = rgb(0x5c94fc);
    pub const GROUND: [f32; 4] = rgb(0x9b4a1b);
    pub const GROUND_EDGE: [f32; 4] = rgb(0x6b3e2e);
    pub const BRICK: [f32; 4] = rgb(0xff9b4a);
    pub const QUESTION: [f32; 4] = rgb(0xffcc00);
    pub const OUTLINE: [f32; 4] = rgb(0x000000);
    pub const PIPE: [f32; 4] = rgb(0x00aa00);
    pub const PIPE_EDGE: [f32; 4] = rgb(0x004400);
    pub const FLAG_POLE: [f32; 4] = rgb(0xffffff);
    pub const FLAG: [f32; 4] = rgb(0x00aa00);
    pub const GOOMBA: [f32; 4] = rgb(0x6b3e2e);
    pub const GOOMBA_EYE: [f32; 4] = rgb(0xffffff);

    // Player sprite
    pub const SHOES: [f32; 4] = rgb(0x333333);
    pub const OUTFIT: [f32; 4] = rgb(0x00ffff);
    pub const SKIN: [f32; 4] = rgb(0xffe0bd);
    pub const HAIR: [f32; 4] = rgb(0xff69b4);
    pub const EYE: [f32; 4] = rgb(0x000000);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_channels() {
        assert_eq!(rgb(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        let sky = colors::SKY;
        assert!((sky[0] - 0x5c as f32 / 255.0).abs() < 1e-6);
        assert!((sky[2] - 0xfc as f32 / 255.0).abs() < 1e-6);
        assert!(sky[2] < 1.0);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(srgb_to_linear([0.0, 1.0, 0.0, 0.5]), [0.0, 1.0, 0.0, 0.5]);
        let mid = srgb_to_linear([0.5, 0.5, 0.5, 1.0]);
        assert!((mid[0] - 0.214).abs() < 0.001);
    }
}
