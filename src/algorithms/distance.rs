use crate::grid::Position;

/// Cost of one orthogonal step.
pub const STEP_COST: u32 = 10;

/// Manhattan distance scaled by [`STEP_COST`].
///
/// Serves both as the heuristic estimate to the target and as the edge cost
/// between adjacent cells.
#[inline]
pub fn distance(a: Position, b: Position) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    STEP_COST.saturating_mul((dx + dy) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_scaled_manhattan() {
        assert_eq!(distance(Position::new(0, 0), Position::new(4, 4)), 80);
        assert_eq!(distance(Position::new(2, 1), Position::new(2, 1)), 0);
        assert_eq!(distance(Position::new(1, 1), Position::new(2, 2)), 20);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Position::new(7, 2);
        let b = Position::new(3, 9);
        assert_eq!(distance(a, b), distance(b, a));
    }
}
