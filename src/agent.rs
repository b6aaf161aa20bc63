use crate::algorithms::Route;
use crate::grid::{Grid, Position, WorldPoint};

/// The single route slot a planner writes into and the agent reads from.
#[derive(Debug, Default)]
pub struct RouteSlot {
    route: Option<Route>,
}

impl RouteSlot {
    pub fn new() -> Self {
        RouteSlot::default()
    }

    /// Replaces whatever route was published before. `None` clears the slot.
    pub fn publish(&mut self, route: Option<Route>) {
        self.route = route;
    }

    pub fn clear(&mut self) {
        self.route = None;
    }

    pub fn current(&self) -> Option<&Route> {
        self.route.as_ref()
    }
}

/// Locomotion side: steers toward the first point of the published route.
pub struct Agent {
    pub position: WorldPoint,
    pub moves: usize,
    /// Cleared to stop the agent; `steer` is a no-op while false.
    pub driveable: bool,
}

impl Agent {
    pub fn new(position: WorldPoint) -> Self {
        Agent {
            position,
            moves: 0,
            driveable: true,
        }
    }

    /// Places the agent at the centre of `cell`.
    pub fn at_cell(grid: &Grid, cell: Position) -> Self {
        Agent::new(grid.world_position(cell))
    }

    pub fn cell(&self, grid: &Grid) -> Option<Position> {
        grid.node_at(self.position)
    }

    pub fn move_to(&mut self, new_position: WorldPoint) {
        self.position = new_position;
        self.moves += 1;
    }

    /// Stops the agent where it stands.
    pub fn park(&mut self) {
        self.driveable = false;
    }

    /// Advances to the first waypoint of the published route. Returns false
    /// when the agent is parked or there is nothing to follow.
    pub fn steer(&mut self, slot: &RouteSlot, grid: &Grid) -> bool {
        if !self.driveable {
            return false;
        }
        let next = slot
            .current()
            .and_then(|route| route.waypoints(grid).first().copied());
        match next {
            Some(point) => {
                self.move_to(point);
                true
            }
            None => false,
        }
    }
}
