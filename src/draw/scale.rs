// src/draw/scale.rs
//
// First half of a paint pass: turns a container's layout size and the
// device pixel ratio into raster dimensions, line width and edge margins.

use crate::models::{GridSpec, LogicalSize, Units, Variant};

// Snapshot of the runtime state recomputed on every scale pass.
// All lengths except `ratio` are raster pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLayout {
    pub ratio: f64,
    pub line_width: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub surface_width: f64,
    pub surface_height: f64,
}

impl ScaleLayout {
    /// Returns `None` for a zero-area or non-finite container; callers must
    /// then leave the raster surface and prior state untouched.
    pub fn compute(
        spec: &GridSpec,
        container: LogicalSize,
        device_pixel_ratio: Option<f64>,
    ) -> Option<Self> {
        let ratio = resolve_ratio(device_pixel_ratio);
        let line_width = raster_line_width(spec.line_width, spec.units, ratio);
        let (margin_x, margin_y) = edge_margins(spec.variant, spec.extend, line_width);

        let content_width = container.width * ratio;
        let content_height = container.height * ratio;
        if !(content_width > 0.0 && content_height > 0.0) {
            return None;
        }
        // the stepping loops would never reach an infinite edge
        if !content_width.is_finite() || !content_height.is_finite() {
            return None;
        }

        Some(Self {
            ratio,
            line_width,
            margin_x,
            margin_y,
            content_width,
            content_height,
            surface_width: content_width + margin_x,
            surface_height: content_height + margin_y,
        })
    }

    // Integer pixel size of the backing buffer. Fractions are dropped, the
    // way a canvas truncates the width and height it is given.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.surface_width.trunc() as u32,
            self.surface_height.trunc() as u32,
        )
    }

    // Visual size of the surface in layout pixels
    pub fn display_size(&self) -> LogicalSize {
        LogicalSize::new(
            self.surface_width / self.ratio,
            self.surface_height / self.ratio,
        )
    }

    // Visual shift (x, y) in layout pixels so the margins spill out evenly
    // on both sides of the container
    pub fn display_offset(&self) -> (f64, f64) {
        (
            self.margin_x * -0.5 / self.ratio,
            self.margin_y * -0.5 / self.ratio,
        )
    }

    pub fn grid_size(&self, columns: u32) -> f64 {
        self.content_width / columns as f64
    }

    pub fn offset(&self) -> f64 {
        self.line_width / 2.0
    }
}

// Hosts that cannot report a ratio (or report nonsense) draw at 1:1
pub fn resolve_ratio(device_pixel_ratio: Option<f64>) -> f64 {
    match device_pixel_ratio {
        Some(r) if r.is_finite() && r > 0.0 => r,
        _ => 1.0,
    }
}

pub fn raster_line_width(nominal: f64, units: Units, ratio: f64) -> f64 {
    match units {
        Units::LogicalPixel => nominal / ratio,
        Units::DevicePixel => nominal,
    }
}

// Extra raster pixels per axis so edge strokes are not clipped
pub fn edge_margins(variant: Variant, extend: bool, line_width: f64) -> (f64, f64) {
    let margin_x = match variant {
        Variant::Squared | Variant::Columns => line_width,
        _ if extend => line_width,
        _ => 0.0,
    };
    let margin_y = match variant {
        Variant::Squared | Variant::Baseline | Variant::Rows => line_width,
        Variant::Columns => 0.0,
    };
    (margin_x, margin_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARIANTS: [Variant; 4] = [
        Variant::Columns,
        Variant::Rows,
        Variant::Squared,
        Variant::Baseline,
    ];

    fn spec(variant: Variant, line_width: f64, units: Units, extend: bool) -> GridSpec {
        GridSpec {
            variant,
            line_width,
            units,
            extend,
            ..GridSpec::default()
        }
    }

    mod ratio_tests {
        use super::*;

        #[test]
        fn test_missing_ratio_defaults_to_one() {
            assert_eq!(resolve_ratio(None), 1.0);
            assert_eq!(resolve_ratio(Some(0.0)), 1.0);
            assert_eq!(resolve_ratio(Some(f64::NAN)), 1.0);
            assert_eq!(resolve_ratio(Some(2.5)), 2.5);
        }

        #[test]
        fn test_device_pixel_units_ignore_ratio() {
            for ratio in [1.0, 1.5, 2.0, 3.0] {
                assert_eq!(raster_line_width(3.0, Units::DevicePixel, ratio), 3.0);
            }
        }

        #[test]
        fn test_logical_units_divide_by_ratio() {
            assert_eq!(raster_line_width(1.0, Units::LogicalPixel, 2.0), 0.5);
            assert_eq!(raster_line_width(3.0, Units::LogicalPixel, 1.5), 2.0);
        }
    }

    mod margin_tests {
        use super::*;

        #[test]
        fn test_margins_per_variant() {
            assert_eq!(edge_margins(Variant::Columns, false, 2.0), (2.0, 0.0));
            assert_eq!(edge_margins(Variant::Squared, false, 2.0), (2.0, 2.0));
            assert_eq!(edge_margins(Variant::Baseline, false, 2.0), (0.0, 2.0));
            assert_eq!(edge_margins(Variant::Rows, false, 2.0), (0.0, 2.0));
        }

        #[test]
        fn test_extend_pads_horizontal_axis() {
            assert_eq!(edge_margins(Variant::Baseline, true, 2.0), (2.0, 2.0));
            assert_eq!(edge_margins(Variant::Rows, true, 2.0), (2.0, 2.0));
            assert_eq!(edge_margins(Variant::Columns, true, 2.0), (2.0, 0.0));
        }
    }

    mod layout_tests {
        use super::*;

        #[test]
        fn test_surface_is_content_plus_margin() {
            for variant in ALL_VARIANTS {
                for extend in [true, false] {
                    for ratio in [1.0, 1.25, 2.0, 3.0] {
                        let s = spec(variant, 1.0, Units::LogicalPixel, extend);
                        let layout =
                            ScaleLayout::compute(&s, LogicalSize::new(333.0, 217.0), Some(ratio))
                                .unwrap();
                        assert_eq!(
                            layout.surface_width,
                            layout.content_width + layout.margin_x
                        );
                        assert_eq!(
                            layout.surface_height,
                            layout.content_height + layout.margin_y
                        );
                        assert_eq!(layout.content_width, 333.0 * ratio);
                        assert_eq!(layout.content_height, 217.0 * ratio);
                    }
                }
            }
        }

        #[test]
        fn test_zero_area_is_none() {
            let s = GridSpec::default();
            assert!(ScaleLayout::compute(&s, LogicalSize::new(0.0, 100.0), Some(2.0)).is_none());
            assert!(ScaleLayout::compute(&s, LogicalSize::new(100.0, 0.0), Some(2.0)).is_none());
        }

        #[test]
        fn test_display_size_and_offset() {
            let s = spec(Variant::Squared, 4.0, Units::DevicePixel, true);
            let layout = ScaleLayout::compute(&s, LogicalSize::new(100.0, 50.0), Some(2.0)).unwrap();
            assert_eq!(layout.pixel_size(), (204, 104));
            assert_eq!(layout.display_size(), LogicalSize::new(102.0, 52.0));
            assert_eq!(layout.display_offset(), (-1.0, -1.0));
        }

        #[test]
        fn test_pixel_size_truncates() {
            let s = spec(Variant::Columns, 1.0, Units::LogicalPixel, true);
            let layout = ScaleLayout::compute(&s, LogicalSize::new(100.3, 50.0), Some(1.5)).unwrap();
            // 150.45 + 0.666..
            assert_eq!(layout.pixel_size(), (151, 75));

            let s = spec(Variant::Columns, 1.0, Units::DevicePixel, true);
            let layout = ScaleLayout::compute(&s, LogicalSize::new(100.6, 50.7), Some(1.0)).unwrap();
            assert_eq!(layout.pixel_size(), (101, 50));
        }

        #[test]
        fn test_non_finite_size_is_none() {
            let s = GridSpec::default();
            for size in [
                LogicalSize::new(f64::INFINITY, 100.0),
                LogicalSize::new(100.0, f64::INFINITY),
                LogicalSize::new(f64::NAN, 100.0),
            ] {
                assert!(ScaleLayout::compute(&s, size, Some(1.0)).is_none(), "{:?}", size);
            }
            // a finite size that overflows once scaled
            assert!(ScaleLayout::compute(&s, LogicalSize::new(f64::MAX, 10.0), Some(2.0)).is_none());
        }
    }
}
