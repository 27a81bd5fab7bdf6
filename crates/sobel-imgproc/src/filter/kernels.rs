use serde::{Deserialize, Serialize};

/// A 3x3 convolution kernel.
///
/// The weight for the neighbor at offset `(dr, dc)`, with `dr, dc` in `{-1, 0, 1}`,
/// is stored at `weights()[dr + 1][dc + 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kernel3([[f32; 3]; 3]);

impl Kernel3 {
    /// Create a kernel from its row-major weights.
    pub const fn new(weights: [[f32; 3]; 3]) -> Self {
        Self(weights)
    }

    /// Normalized Sobel kernel responding to horizontal intensity changes.
    ///
    /// Positive where the left neighbors are brighter than the right ones.
    pub const fn sobel_horizontal() -> Self {
        Self([[0.25, 0.0, -0.25], [0.50, 0.0, -0.50], [0.25, 0.0, -0.25]])
    }

    /// Normalized Sobel kernel responding to vertical intensity changes.
    ///
    /// Positive where the upper neighbors are brighter than the lower ones.
    pub const fn sobel_vertical() -> Self {
        Self([[0.25, 0.50, 0.25], [0.0, 0.0, 0.0], [-0.25, -0.50, -0.25]])
    }

    /// The row-major weights of the kernel.
    pub fn weights(&self) -> &[[f32; 3]; 3] {
        &self.0
    }

    /// Largest absolute response of the kernel for samples in `[0, max_value]`.
    pub fn response_bound(&self, max_value: f32) -> f32 {
        let (pos, neg) = self
            .0
            .iter()
            .flatten()
            .fold((0.0f32, 0.0f32), |(pos, neg), &w| {
                if w > 0.0 {
                    (pos + w, neg)
                } else {
                    (pos, neg - w)
                }
            });
        pos.max(neg) * max_value
    }
}

/// The horizontal and vertical normalized Sobel kernels.
pub fn sobel_kernels3() -> (Kernel3, Kernel3) {
    (Kernel3::sobel_horizontal(), Kernel3::sobel_vertical())
}
