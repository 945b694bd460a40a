//! # Color 模块
//!
//! RGBA 颜色与线性插值。
//!
//! 过渡动画的全部视觉输出就是一种颜色：Runtime 按时间算出当前颜色，
//! Host 负责把它涂到全屏遮罩表面上。

use serde::{Deserialize, Serialize};

/// RGBA 颜色（各通道 0.0 - 1.0）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 纯黑（最常用的遮蔽色）
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    /// 纯白（白屏过渡）
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    /// 完全透明
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// 创建颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 线性插值
    ///
    /// `t` 被截断到 0.0 - 1.0。采用 `(1 - t) * a + t * b` 的形式，
    /// 保证 `t = 0.0` / `t = 1.0` 时返回精确的端点值。
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| (1.0 - t) * a + t * b;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}
