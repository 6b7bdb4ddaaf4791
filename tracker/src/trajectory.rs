use std::collections::VecDeque;
use std::num::NonZeroUsize;

use nalgebra::Point3;

/// Evenly spaced waypoints from `start` to `goal`, both included.
///
/// Each offset from `start` is truncated toward zero to whole millimetres; the
/// final waypoint is exactly `goal` so that arrival can be tested with `==`.
pub fn plan(start: Point3<f64>, goal: Point3<f64>, steps: NonZeroUsize) -> Vec<Point3<f64>> {
    let n = steps.get();
    let delta = goal - start;
    let mut points: Vec<Point3<f64>> = (0..n)
        .map(|i| start + (delta * i as f64 / n as f64).map(f64::trunc))
        .collect();
    points.push(goal);
    points
}

/// Waypoint queue that follows a goal which may move between calls.
#[derive(Debug, Clone)]
pub struct TrajectoryPlanner {
    current: Point3<f64>,
    pending: VecDeque<Point3<f64>>,
    steps: NonZeroUsize,
}

impl TrajectoryPlanner {
    pub fn new(start: Point3<f64>, goal: Point3<f64>, steps: NonZeroUsize) -> Self {
        let mut planner = Self {
            current: start,
            pending: VecDeque::new(),
            steps,
        };
        planner.replan(goal);
        planner
    }

    pub fn current(&self) -> Point3<f64> {
        self.current
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Next waypoint toward `goal`. If the goal moved since the last plan the
    /// rest of the queue is replaced by a fresh plan from the current point.
    /// Once the queue is drained the planner is idle: the last waypoint is
    /// returned again whatever goal is passed.
    pub fn advance(&mut self, goal: Point3<f64>) -> Point3<f64> {
        if self.pending.is_empty() {
            return self.current;
        }
        if self.pending.back() != Some(&goal) {
            self.replan(goal);
        }
        if let Some(next) = self.pending.pop_front() {
            self.current = next;
        }
        self.current
    }

    fn replan(&mut self, goal: Point3<f64>) {
        self.pending = plan(self.current, goal, self.steps).into_iter().skip(1).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_plan_is_even_and_inclusive() {
        let points = plan(Point3::origin(), Point3::new(10.0, 0.0, 0.0), steps(5));
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert!(points.iter().all(|p| p.y == 0.0 && p.z == 0.0));
    }

    #[test]
    fn test_plan_truncates_offsets_but_lands_on_goal() {
        let points = plan(Point3::new(1.0, 0.0, 0.0), Point3::new(11.0, -5.0, 0.5), steps(3));
        assert_eq!(points.len(), 4);
        assert_eq!(points[1], Point3::new(4.0, -1.0, 0.0));
        assert_eq!(points[2], Point3::new(7.0, -3.0, 0.0));
        assert_eq!(points[3], Point3::new(11.0, -5.0, 0.5));
    }

    #[test]
    fn test_plan_is_monotonic_toward_goal() {
        let start = Point3::new(985.0, 0.0, 940.0);
        let goal = Point3::new(962.0, 80.0, 700.0);
        let points = plan(start, goal, steps(10));
        assert_eq!(points.len(), 11);
        for pair in points.windows(2) {
            assert!((goal - pair[1]).norm() <= (goal - pair[0]).norm());
        }
    }

    #[test]
    fn test_single_step_goes_straight_to_goal() {
        let goal = Point3::new(3.0, 2.0, 1.0);
        let mut planner = TrajectoryPlanner::new(Point3::origin(), goal, steps(1));
        assert_eq!(planner.advance(goal), goal);
    }

    #[test]
    fn test_advance_walks_the_plan_then_holds() {
        let goal = Point3::new(10.0, 0.0, 0.0);
        let mut planner = TrajectoryPlanner::new(Point3::origin(), goal, steps(5));
        let walked: Vec<f64> = (0..5).map(|_| planner.advance(goal).x).collect();
        assert_eq!(walked, vec![2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(planner.remaining(), 0);
        assert_eq!(planner.advance(goal), goal);
        assert_eq!(planner.advance(goal), goal);
    }

    #[test]
    fn test_moved_goal_replans_from_current_point() {
        let mut planner = TrajectoryPlanner::new(Point3::origin(), Point3::new(10.0, 0.0, 0.0), steps(5));
        assert_eq!(planner.advance(Point3::new(10.0, 0.0, 0.0)), Point3::new(2.0, 0.0, 0.0));

        let moved = Point3::new(2.0, 10.0, 0.0);
        assert_eq!(planner.advance(moved), Point3::new(2.0, 2.0, 0.0));
        assert_eq!(planner.remaining(), 4);

        let mut last = planner.current();
        while planner.remaining() > 0 {
            last = planner.advance(moved);
        }
        assert_eq!(last, moved);
    }

    #[test]
    fn test_drained_planner_ignores_a_new_goal() {
        let goal = Point3::new(4.0, 0.0, 0.0);
        let mut planner = TrajectoryPlanner::new(Point3::origin(), goal, steps(2));
        planner.advance(goal);
        planner.advance(goal);
        assert_eq!(planner.current(), goal);
        assert_eq!(planner.remaining(), 0);

        let elsewhere = Point3::new(4.0, 4.0, 0.0);
        assert_eq!(planner.advance(elsewhere), goal);
        assert_eq!(planner.remaining(), 0);
        assert_eq!(planner.current(), goal);
    }
}
