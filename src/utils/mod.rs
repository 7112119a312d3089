//! Utility modules for motion_primitive_planner

pub mod occupancy_grid;

pub use occupancy_grid::OccupancyGrid;
