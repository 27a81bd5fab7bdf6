use serde::{Deserialize, Serialize};

use crate::filter::kernels::Kernel3;

/// Parameters of the gradient magnitude step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeParams {
    /// Largest expected magnitude, mapped to 255. √(255² + 255²) ≈ 360.6 for 8-bit input.
    pub normalization: f64,
    /// Saturate the output to `[0, 255]`. When false, oversized values pass through.
    pub clamp: bool,
}

impl Default for MagnitudeParams {
    fn default() -> Self {
        Self {
            normalization: 360.6,
            clamp: true,
        }
    }
}

/// Parameters of the orientation sampling step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationParams {
    /// Distance in pixels between two samples, in both rows and columns.
    pub stride: usize,
    /// Length in pixels of the arrow drawn for a gradient of norm 255.
    pub max_arrow_length: f32,
}

impl Default for OrientationParams {
    fn default() -> Self {
        Self {
            stride: 10,
            max_arrow_length: 10.0,
        }
    }
}

/// Configuration of the full edge detection pipeline.
///
/// The defaults reproduce the reference constants: a margin of 2, the normalized
/// Sobel kernels, a sampling stride of 10, arrows up to 10 pixels and a magnitude
/// normalization of 360.6.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SobelParams {
    /// Width of the zero border added before filtering.
    pub margin: usize,
    /// Kernel producing the horizontal gradient.
    pub kernel_x: Kernel3,
    /// Kernel producing the vertical gradient.
    pub kernel_y: Kernel3,
    /// Magnitude step parameters.
    pub magnitude: MagnitudeParams,
    /// Orientation step parameters.
    pub orientation: OrientationParams,
}

impl Default for SobelParams {
    fn default() -> Self {
        Self {
            margin: 2,
            kernel_x: Kernel3::sobel_horizontal(),
            kernel_y: Kernel3::sobel_vertical(),
            magnitude: MagnitudeParams::default(),
            orientation: OrientationParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_json_partial() -> Result<(), serde_json::Error> {
        let params: SobelParams =
            serde_json::from_str(r#"{ "margin": 3, "magnitude": { "clamp": false } }"#)?;

        assert_eq!(params.margin, 3);
        assert!(!params.magnitude.clamp);
        assert_eq!(params.magnitude.normalization, 360.6);
        assert_eq!(params.kernel_x, Kernel3::sobel_horizontal());
        assert_eq!(params.orientation, OrientationParams::default());

        Ok(())
    }

    #[test]
    fn test_params_json_kernel() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(SobelParams::default())?;
        assert_eq!(json["kernel_y"][2][1], -0.5);

        let params: SobelParams = serde_json::from_value(json)?;
        assert_eq!(params, SobelParams::default());

        Ok(())
    }
}
