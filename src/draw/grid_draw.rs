// src/draw/grid_draw.rs
//
// Second half of a paint pass: emits the line segments for one grid
// variant. Positions are snapped with floor/round *after* adding the
// half-line-width offset so hairlines land on whole raster pixels.

use crate::draw::ScaleLayout;
use crate::models::{GridLine, Variant};

// Columns: a pair of lines around every 5th boundary (4|5, 9|10, ...)
const COLUMN_EMPHASIS: u32 = 5;
// Rows: a pair of lines around every 6th row step
const ROW_EMPHASIS: u32 = 6;
// Rows: a vertical line every 5th step, never at the left edge
const ROW_COLUMN_EMPHASIS: u32 = 5;

/// Builds the ordered list of segments for one paint pass.
///
/// `columns` must be at least 1; a zero column count yields no lines.
pub fn grid_lines(variant: Variant, columns: u32, layout: &ScaleLayout) -> Vec<GridLine> {
    let mut lines = Vec::new();
    if columns == 0 {
        return lines;
    }

    match variant {
        Variant::Baseline => horizontal_pass(layout, columns, &mut lines),
        Variant::Squared => {
            horizontal_pass(layout, columns, &mut lines);
            squared_vertical_pass(layout, columns, &mut lines);
        }
        Variant::Columns => column_pass(layout, columns, &mut lines),
        Variant::Rows => row_pass(layout, columns, &mut lines),
    }
    lines
}

/************************** Column recurrence *******************************/

// Distributes the remaining width over the remaining columns at each step.
// Floor-snapping each of these positions is not the same as snapping
// `index * grid_size` once the grid size is fractional, so the recurrence
// is kept as is.
#[derive(Debug, Clone)]
pub struct ColumnPositions {
    width: f64,
    columns: u32,
    index: u32,
    previous: f64,
}

impl Iterator for ColumnPositions {
    // (1-based column index, unsnapped boundary position)
    type Item = (u32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.columns {
            return None;
        }
        self.index += 1;
        let remaining = (self.columns - self.index + 1) as f64;
        let position = (self.width - self.previous) / remaining + self.previous;
        self.previous = position;
        Some((self.index, position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.columns - self.index) as usize;
        (left, Some(left))
    }
}

pub fn column_positions(width: f64, columns: u32) -> ColumnPositions {
    ColumnPositions {
        width,
        columns,
        index: 0,
        previous: 0.0,
    }
}

pub fn is_column_emphasis(index: u32) -> bool {
    index % COLUMN_EMPHASIS == 0 || (index + 1) % COLUMN_EMPHASIS == 0
}

pub fn is_row_emphasis(step: u32) -> bool {
    step % ROW_EMPHASIS == 0 || (step + 1) % ROW_EMPHASIS == 0
}

pub fn is_row_column_emphasis(step: u32) -> bool {
    step % ROW_COLUMN_EMPHASIS == 0 && step != 0
}

// Half-up rounding for the positive raster coordinates used here
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/************************** Variant passes **********************************/

// Shared by Baseline and Squared
fn horizontal_pass(layout: &ScaleLayout, columns: u32, lines: &mut Vec<GridLine>) {
    let grid_size = layout.grid_size(columns);
    let offset = layout.offset();

    lines.push(GridLine::horizontal(offset, 0.0, layout.surface_width));

    let mut y = grid_size;
    while y <= layout.content_height {
        let line_position = y + offset;
        // the offset is applied a second time here; kept for pixel parity
        let row = (line_position + offset).floor();
        lines.push(GridLine::horizontal(row, 0.0, layout.surface_width));
        y += grid_size;
    }
}

fn squared_vertical_pass(layout: &ScaleLayout, columns: u32, lines: &mut Vec<GridLine>) {
    let grid_size = layout.grid_size(columns);
    let offset = layout.offset();
    let line_length = (layout.content_height / grid_size).floor() * grid_size + offset;

    lines.push(GridLine::vertical(offset, 0.0, line_length));

    for (_, position) in column_positions(layout.content_width, columns) {
        let x = (position + offset).floor();
        lines.push(GridLine::vertical(x, 0.0, line_length));
    }
}

fn column_pass(layout: &ScaleLayout, columns: u32, lines: &mut Vec<GridLine>) {
    let offset = layout.offset();

    lines.push(GridLine::vertical(offset, 0.0, layout.surface_height));

    for (index, position) in column_positions(layout.content_width, columns) {
        if is_column_emphasis(index) {
            let x = (position + offset).floor();
            lines.push(GridLine::vertical(x, 0.0, layout.surface_height));
        }
    }
}

fn row_pass(layout: &ScaleLayout, columns: u32, lines: &mut Vec<GridLine>) {
    let grid_size = layout.grid_size(columns);
    let offset = layout.offset();
    let line_length = (layout.content_height / grid_size).floor() * grid_size + offset;

    lines.push(GridLine::horizontal(offset, 0.0, layout.surface_width));

    let mut step = 0;
    let mut y = 0.0;
    while y <= layout.surface_height {
        if is_row_emphasis(step) {
            let row = round_half_up(y + layout.line_width);
            lines.push(GridLine::horizontal(row, 0.0, layout.surface_width));
        }
        step += 1;
        y += grid_size;
    }

    let mut step = 0;
    let mut x = 0.0;
    while x <= layout.surface_width {
        if is_row_column_emphasis(step) {
            let column = round_half_up(x + layout.line_width);
            lines.push(GridLine::vertical(column, 0.0, line_length));
        }
        step += 1;
        x += grid_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GridSpec, LogicalSize, Units};

    fn layout_for(
        variant: Variant,
        size: LogicalSize,
        line_width: f64,
        units: Units,
        ratio: f64,
    ) -> ScaleLayout {
        let spec = GridSpec {
            variant,
            line_width,
            units,
            ..GridSpec::default()
        };
        ScaleLayout::compute(&spec, size, Some(ratio)).unwrap()
    }

    fn vertical_xs(lines: &[GridLine]) -> Vec<f64> {
        lines
            .iter()
            .filter(|l| l.is_vertical() && !l.is_horizontal())
            .map(|l| l.start.x)
            .collect()
    }

    fn horizontal_ys(lines: &[GridLine]) -> Vec<f64> {
        lines
            .iter()
            .filter(|l| l.is_horizontal() && !l.is_vertical())
            .map(|l| l.start.y)
            .collect()
    }

    mod recurrence_tests {
        use super::*;

        #[test]
        fn test_last_position_reaches_width() {
            for width in [1.0, 7.5, 333.0, 1000.0, 1234.567, 2880.0] {
                for columns in 1..=200 {
                    let (index, last) = column_positions(width, columns).last().unwrap();
                    assert_eq!(index, columns);
                    assert!(
                        (last - width).abs() <= width * 1e-12,
                        "width {} columns {} ended at {}",
                        width,
                        columns,
                        last
                    );
                }
            }
        }

        #[test]
        fn test_positions_are_increasing() {
            let positions: Vec<f64> = column_positions(1000.0, 7).map(|(_, p)| p).collect();
            assert_eq!(positions.len(), 7);
            assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn test_positions_close_to_uniform_spacing() {
            let grid_size = 1000.0 / 7.0;
            for (index, position) in column_positions(1000.0, 7) {
                assert!((position - index as f64 * grid_size).abs() < 1e-9);
            }
        }

        #[test]
        fn test_squared_lines_follow_recurrence_not_multiples() {
            // 15 * (100 / 24) + 0.5 floors to 63, the recurrence gives 62
            let layout = layout_for(
                Variant::Squared,
                LogicalSize::new(100.0, 20.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            let grid_size = 100.0 / 24.0;
            let line_length = 4.0 * grid_size + 0.5;

            let mut expected: Vec<GridLine> = [0.5, 5.0, 9.0, 13.0, 17.0]
                .into_iter()
                .map(|y| GridLine::horizontal(y, 0.0, 101.0))
                .collect();
            expected.extend(
                [
                    0.5, 4.0, 8.0, 13.0, 17.0, 21.0, 25.0, 29.0, 33.0, 38.0, 42.0, 46.0, 50.0,
                    54.0, 58.0, 62.0, 67.0, 71.0, 75.0, 79.0, 83.0, 88.0, 92.0, 96.0, 100.0,
                ]
                .into_iter()
                .map(|x| GridLine::vertical(x, 0.0, line_length)),
            );

            assert_eq!(grid_lines(Variant::Squared, 24, &layout), expected);
        }

        #[test]
        fn test_snapped_positions_differ_from_multiples() {
            let snapped = |width: f64, columns: u32, index: u32| {
                let (_, position) = column_positions(width, columns)
                    .find(|(i, _)| *i == index)
                    .unwrap();
                (position + 0.5).floor()
            };
            assert_eq!(snapped(100.0, 24, 15), 62.0);
            assert_eq!(snapped(100.1, 22, 10), 45.0);
            assert_eq!(snapped(100.3, 17, 5), 30.0);
        }

        #[test]
        fn test_size_hint() {
            let mut positions = column_positions(100.0, 3);
            assert_eq!(positions.size_hint(), (3, Some(3)));
            positions.next();
            assert_eq!(positions.size_hint(), (2, Some(2)));
        }
    }

    mod emphasis_tests {
        use super::*;

        #[test]
        fn test_column_emphasis_pairs() {
            let drawn: Vec<u32> = (1..=15).filter(|&i| is_column_emphasis(i)).collect();
            assert_eq!(drawn, vec![4, 5, 9, 10, 14, 15]);
        }

        #[test]
        fn test_row_emphasis_pairs() {
            let drawn: Vec<u32> = (0..=12).filter(|&i| is_row_emphasis(i)).collect();
            assert_eq!(drawn, vec![0, 5, 6, 11, 12]);
        }

        #[test]
        fn test_row_column_emphasis_skips_origin() {
            let drawn: Vec<u32> = (0..=15).filter(|&i| is_row_column_emphasis(i)).collect();
            assert_eq!(drawn, vec![5, 10, 15]);
        }
    }

    mod columns_tests {
        use super::*;

        #[test]
        fn test_ten_columns_wide_lines() {
            let layout = layout_for(
                Variant::Columns,
                LogicalSize::new(1000.0, 200.0),
                10.0,
                Units::LogicalPixel,
                1.0,
            );
            assert_eq!(layout.line_width, 10.0);

            let lines = grid_lines(Variant::Columns, 10, &layout);
            // edge line, then the pairs around the 5th and 10th boundary
            assert_eq!(vertical_xs(&lines), vec![5.0, 405.0, 505.0, 905.0, 1005.0]);
            for line in &lines {
                assert_eq!(line.start.y, 0.0);
                assert_eq!(line.end.y, layout.surface_height);
            }
        }

        #[test]
        fn test_non_emphasis_boundaries_have_no_segment() {
            let layout = layout_for(
                Variant::Columns,
                LogicalSize::new(1000.0, 200.0),
                10.0,
                Units::LogicalPixel,
                1.0,
            );
            let xs = vertical_xs(&grid_lines(Variant::Columns, 10, &layout));
            for boundary in [1.0, 2.0, 3.0, 6.0, 7.0, 8.0] {
                assert!(!xs.contains(&(boundary * 100.0 + 5.0)));
            }
        }

        #[test]
        fn test_single_column_draws_edge_only() {
            let layout = layout_for(
                Variant::Columns,
                LogicalSize::new(300.0, 100.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            // index 1: neither 1 nor 2 is a multiple of 5
            assert_eq!(vertical_xs(&grid_lines(Variant::Columns, 1, &layout)), vec![0.5]);
        }

        #[test]
        fn test_fractional_grid_size_snaps_each_step() {
            let layout = layout_for(
                Variant::Columns,
                LogicalSize::new(1000.0, 100.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            let xs = vertical_xs(&grid_lines(Variant::Columns, 7, &layout));
            assert_eq!(xs, vec![0.5, 571.0, 714.0]);
        }

        #[test]
        fn test_emphasis_pair_follows_recurrence() {
            // 5 * (100.3 / 17) + 0.5 floors to 29, the recurrence lands on 30
            let layout = layout_for(
                Variant::Columns,
                LogicalSize::new(100.3, 40.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            let xs = vertical_xs(&grid_lines(Variant::Columns, 17, &layout));
            assert_eq!(xs, vec![0.5, 24.0, 30.0, 53.0, 59.0, 83.0, 89.0]);
        }
    }

    mod rows_tests {
        use super::*;

        #[test]
        fn test_rows_emphasis_steps() {
            // 12 columns over 1200 raster pixels -> grid size 100
            let layout = layout_for(
                Variant::Rows,
                LogicalSize::new(1200.0, 600.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            assert_eq!(layout.grid_size(12), 100.0);

            let lines = grid_lines(Variant::Rows, 12, &layout);
            // first line at the offset, then steps 0, 5 and 6
            assert_eq!(horizontal_ys(&lines), vec![0.5, 1.0, 501.0, 601.0]);
            // column steps 5 and 10, never 0
            assert_eq!(vertical_xs(&lines), vec![501.0, 1001.0]);

            let line_length = 6.0 * 100.0 + 0.5;
            for line in lines.iter().filter(|l| !l.is_horizontal()) {
                assert_eq!(line.end.y, line_length);
            }
        }
    }

    mod baseline_tests {
        use super::*;

        #[test]
        fn test_horizontal_lines_apply_offset_twice() {
            // grid size 25, offset 1: the row at 25 lands on 27, not 26
            let layout = layout_for(
                Variant::Baseline,
                LogicalSize::new(100.0, 50.0),
                2.0,
                Units::DevicePixel,
                1.0,
            );
            let lines = grid_lines(Variant::Baseline, 4, &layout);
            assert_eq!(horizontal_ys(&lines), vec![1.0, 27.0, 52.0]);
            assert!(vertical_xs(&lines).is_empty());
            for line in &lines {
                assert_eq!(line.start.x, 0.0);
                assert_eq!(line.end.x, layout.surface_width);
            }
        }

        #[test]
        fn test_rows_stop_at_content_height() {
            let layout = layout_for(
                Variant::Baseline,
                LogicalSize::new(100.0, 60.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            let ys = horizontal_ys(&grid_lines(Variant::Baseline, 4, &layout));
            // edge + rows at 25 and 50; 75 is past the content height
            assert_eq!(ys.len(), 3);
        }
    }

    mod squared_tests {
        use super::*;

        #[test]
        fn test_squared_draws_both_axes() {
            let layout = layout_for(
                Variant::Squared,
                LogicalSize::new(100.0, 60.0),
                1.0,
                Units::DevicePixel,
                1.0,
            );
            let lines = grid_lines(Variant::Squared, 4, &layout);

            assert_eq!(horizontal_ys(&lines), vec![0.5, 26.0, 51.0]);
            assert_eq!(vertical_xs(&lines), vec![0.5, 25.0, 50.0, 75.0, 100.0]);

            // verticals stop at the last full row
            let line_length = 2.0 * 25.0 + 0.5;
            for line in lines.iter().filter(|l| !l.is_horizontal()) {
                assert_eq!(line.end.y, line_length);
            }
        }

        #[test]
        fn test_high_density_display() {
            let layout = layout_for(
                Variant::Squared,
                LogicalSize::new(50.0, 30.0),
                1.0,
                Units::LogicalPixel,
                2.0,
            );
            assert_eq!(layout.line_width, 0.5);
            let lines = grid_lines(Variant::Squared, 4, &layout);
            assert_eq!(vertical_xs(&lines), vec![0.25, 25.0, 50.0, 75.0, 100.0]);
        }
    }

    #[test]
    fn test_zero_columns_draws_nothing() {
        let layout = layout_for(
            Variant::Squared,
            LogicalSize::new(100.0, 100.0),
            1.0,
            Units::DevicePixel,
            1.0,
        );
        assert!(grid_lines(Variant::Squared, 0, &layout).is_empty());
    }
}
