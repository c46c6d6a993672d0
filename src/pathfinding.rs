//! Path solver boundary and the reference grid A* solver.
//!
//! The decision loop only sees `PathSolver`: it submits a request, gets a
//! ticket back, and later receives exactly one completion for it. Results
//! are world-space waypoints, not cells; translating them back to cells is
//! the caller's job.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use glam::Vec3;
use hecs::Entity;
use tracing::debug;

use crate::grid::{Cell, GridMap};
use crate::tile_map::TileMap;

pub type PathTicket = u64;

/// Ordered world-space waypoints. The first is usually the requester's own
/// position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub waypoints: Vec<Vec3>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        Self { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathResult {
    Found(Path),
    /// No route, or the solver errored
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathCompletion {
    pub requester: Entity,
    pub ticket: PathTicket,
    pub result: PathResult,
}

pub trait PathSolver {
    /// No request from `requester` is outstanding
    fn is_idle(&self, requester: Entity) -> bool;

    fn request_path(&mut self, requester: Entity, from: Vec3, to: Vec3) -> PathTicket;

    /// Completions that became ready since the last poll
    fn poll_completed(&mut self) -> Vec<PathCompletion>;
}

// =============================================================================
// GRID SOLVER
// =============================================================================

struct PendingRequest {
    requester: Entity,
    ticket: PathTicket,
    from: Vec3,
    to: Vec3,
}

/// Four-neighbour A* over the walkable tiles of a `TileMap`.
///
/// Requests are queued and solved on the next `poll_completed`, so results
/// always arrive at least one tick after the request.
pub struct GridPathSolver {
    map: TileMap,
    grid: GridMap,
    smoothing: bool,
    pending: VecDeque<PendingRequest>,
    next_ticket: PathTicket,
}

impl GridPathSolver {
    pub fn new(map: TileMap, grid: GridMap, smoothing: bool) -> Self {
        Self {
            map,
            grid,
            smoothing,
            pending: VecDeque::new(),
            next_ticket: 1,
        }
    }

    fn solve(&self, from: Vec3, to: Vec3) -> PathResult {
        let start = self.grid.world_to_cell(from);
        let goal = self.grid.world_to_cell(to);

        let Some(cells) = find_path(&self.map, start, goal) else {
            return PathResult::Failed;
        };
        let cells = if self.smoothing {
            keep_corners(&cells)
        } else {
            cells
        };

        let mut waypoints = Vec::with_capacity(cells.len() + 1);
        waypoints.push(from);
        waypoints.extend(
            cells
                .iter()
                .filter(|cell| **cell != start)
                .map(|cell| self.grid.cell_to_world_center(*cell)),
        );
        PathResult::Found(Path::new(waypoints))
    }
}

impl PathSolver for GridPathSolver {
    fn is_idle(&self, requester: Entity) -> bool {
        !self.pending.iter().any(|p| p.requester == requester)
    }

    fn request_path(&mut self, requester: Entity, from: Vec3, to: Vec3) -> PathTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending.push_back(PendingRequest {
            requester,
            ticket,
            from,
            to,
        });
        ticket
    }

    fn poll_completed(&mut self) -> Vec<PathCompletion> {
        puffin::profile_function!();
        let pending: Vec<_> = self.pending.drain(..).collect();
        pending
            .into_iter()
            .map(|request| {
                let result = self.solve(request.from, request.to);
                if result == PathResult::Failed {
                    debug!(ticket = request.ticket, "no path found");
                }
                PathCompletion {
                    requester: request.requester,
                    ticket: request.ticket,
                    result,
                }
            })
            .collect()
    }
}

// =============================================================================
// A*
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredCell {
    cell: Cell,
    f_score: i32, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredCell {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for ScoredCell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from start to goal using A* algorithm.
/// Returns every cell on the path including both ends.
/// Returns None if the goal is not walkable or unreachable.
pub fn find_path(map: &TileMap, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
    if !map.tile(goal).is_walkable() {
        return None;
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Cell> = HashMap::new();
    let mut g_score: HashMap<Cell, i32> = HashMap::new();

    g_score.insert(start, 0);
    open_set.push(ScoredCell {
        cell: start,
        f_score: start.manhattan(goal),
    });

    while let Some(current) = open_set.pop() {
        if current.cell == goal {
            return Some(reconstruct_path(&came_from, current.cell));
        }

        let current_g = *g_score.get(&current.cell).unwrap_or(&i32::MAX);

        for step in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
            let neighbor = current.cell + step;
            if neighbor != goal && !map.tile(neighbor).is_walkable() {
                continue;
            }

            let tentative_g = current_g + 1;
            let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i32::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.cell);
                g_score.insert(neighbor, tentative_g);
                open_set.push(ScoredCell {
                    cell: neighbor,
                    f_score: tentative_g + neighbor.manhattan(goal),
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Drop cells in the middle of straight runs, keeping the ends and corners.
fn keep_corners(cells: &[Cell]) -> Vec<Cell> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }

    let mut kept = vec![cells[0]];
    for window in cells.windows(3) {
        let incoming = window[0].signum_toward(window[1]);
        let outgoing = window[1].signum_toward(window[2]);
        if incoming != outgoing {
            kept.push(window[1]);
        }
    }
    kept.extend(cells.last().copied());
    kept
}
