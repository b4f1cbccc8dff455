//! The board grid contract and snapping helpers.
//!
//! Every positional quantity in the editor is expressed in pixels but
//! quantized to the grid: positions and drag/resize deltas snap to the 5 px
//! grid unit, component heights to the 20 px row, and interactive port drags
//! to an 8-grid-unit (40 px) pitch. These constants are bit-exact contract;
//! changing them changes every stored diagram's meaning.

/// Smallest positional quantum, in pixels.
pub const GRID_UNIT_PX: f32 = 5.0;
/// Board width in grid units.
pub const BOARD_COLUMNS: u32 = 160;
/// Board height in rows.
pub const BOARD_ROWS: u32 = 35;
/// Grid units per row.
pub const ROW_HEIGHT_UNITS: u32 = 4;
/// Row height in pixels (4 grid units).
pub const ROW_HEIGHT_PX: f32 = ROW_HEIGHT_UNITS as f32 * GRID_UNIT_PX;
/// Interactive port-drag pitch in grid units.
pub const PORT_PITCH_UNITS: u32 = 8;
/// Interactive port-drag pitch in pixels (8 grid units).
pub const PORT_PITCH_PX: f32 = PORT_PITCH_UNITS as f32 * GRID_UNIT_PX;
/// Default component height: 6 rows.
pub const DEFAULT_NODE_HEIGHT_PX: f32 = ROW_HEIGHT_PX * 6.0;
/// Minimum component height: 3 rows.
pub const MIN_NODE_HEIGHT_PX: f32 = ROW_HEIGHT_PX * 3.0;

/// Board width in pixels.
pub fn board_width_px() -> f32 {
    BOARD_COLUMNS as f32 * GRID_UNIT_PX
}

/// Board height in pixels.
pub fn board_height_px() -> f32 {
    BOARD_ROWS as f32 * ROW_HEIGHT_PX
}

/// Snap a coordinate to the nearest 5 px grid line.
pub fn snap(value: f32) -> f32 {
    (value / GRID_UNIT_PX).round() * GRID_UNIT_PX
}

/// Quantize a height to whole rows, never below the 3-row minimum.
pub fn snap_height(height_px: f32) -> f32 {
    let snapped = (height_px / ROW_HEIGHT_PX).round() * ROW_HEIGHT_PX;
    snapped.max(MIN_NODE_HEIGHT_PX)
}

/// 1-based board row containing the given y coordinate.
pub fn row_number(y: f32) -> i32 {
    (y / ROW_HEIGHT_PX).floor() as i32 + 1
}

/// Generate SVG path commands for the board's grid lines.
///
/// The board is a fixed 160×35-cell area with no zoom or pan, so unlike an
/// infinite-canvas grid this stops exactly at the board edges.
///
/// # Returns
/// SVG path commands string (e.g. "M 5 0 L 5 700 M 10 0 L 10 700 …")
pub fn board_grid_commands(spacing: f32) -> String {
    let width = board_width_px();
    let height = board_height_px();
    if spacing <= 0.0 {
        return String::new();
    }

    let mut commands = String::with_capacity(10000);

    let mut x = 0.0;
    while x <= width {
        if !commands.is_empty() {
            commands.push(' ');
        }
        commands.push_str(&format!("M {} 0 L {} {}", x, x, height));
        x += spacing;
    }

    let mut y = 0.0;
    while y <= height {
        commands.push(' ');
        commands.push_str(&format!("M 0 {} L {} {}", y, width, y));
        y += spacing;
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Grid contract constants
    // ========================================================================

    #[test]
    fn test_grid_contract_is_bit_exact() {
        assert_eq!(GRID_UNIT_PX, 5.0);
        assert_eq!(ROW_HEIGHT_PX, 20.0);
        assert_eq!(PORT_PITCH_PX, 40.0);
        assert_eq!(board_width_px(), 800.0);
        assert_eq!(board_height_px(), 700.0);
        assert_eq!(DEFAULT_NODE_HEIGHT_PX, 120.0);
        assert_eq!(MIN_NODE_HEIGHT_PX, 60.0);
    }

    // ========================================================================
    // Snapping
    // ========================================================================

    #[test]
    fn test_snap_rounds_to_nearest_unit() {
        assert_eq!(snap(0.0), 0.0);
        assert_eq!(snap(2.4), 0.0);
        assert_eq!(snap(2.5), 5.0);
        assert_eq!(snap(103.0), 105.0);
        assert_eq!(snap(-7.0), -5.0);
    }

    #[test]
    fn test_snap_height_quantizes_to_rows() {
        assert_eq!(snap_height(120.0), 120.0);
        assert_eq!(snap_height(131.0), 140.0);
        assert_eq!(snap_height(129.0), 120.0);
    }

    #[test]
    fn test_snap_height_enforces_minimum() {
        assert_eq!(snap_height(0.0), 60.0);
        assert_eq!(snap_height(45.0), 60.0);
        assert_eq!(snap_height(-20.0), 60.0);
    }

    #[test]
    fn test_row_number_is_one_based() {
        assert_eq!(row_number(0.0), 1);
        assert_eq!(row_number(19.9), 1);
        assert_eq!(row_number(20.0), 2);
        assert_eq!(row_number(100.0), 6);
    }

    // ========================================================================
    // Board grid rendering
    // ========================================================================

    #[test]
    fn test_board_grid_commands_cover_board() {
        let commands = board_grid_commands(GRID_UNIT_PX);
        assert!(commands.contains("M 0 0 L 0 700")); // first vertical
        assert!(commands.contains("M 5 0 L 5 700")); // second vertical
        assert!(commands.contains("M 0 0 L 800 0")); // first horizontal
        assert!(commands.contains("M 0 700 L 800 700")); // last horizontal
    }

    #[test]
    fn test_board_grid_commands_zero_spacing_is_empty() {
        assert!(board_grid_commands(0.0).is_empty());
    }

    #[test]
    fn test_board_grid_commands_no_trailing_space() {
        let commands = board_grid_commands(20.0);
        assert!(!commands.ends_with(' '));
    }
}
