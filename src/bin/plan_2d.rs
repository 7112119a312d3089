// 2-D motion-primitive planning demo on an occupancy map

use gnuplot::{AxesCommon, Caption, Color, Figure};
use nalgebra::Vector2;

use motion_primitive_planner::common::Waypoint;
use motion_primitive_planner::env::{MapEnv, MapEnvConfig};
use motion_primitive_planner::graph_search::{GraphSearch, StateSpace};
use motion_primitive_planner::utils::OccupancyGrid;

const SHOW_ANIMATION: bool = false;

fn main() {
    println!("Motion-primitive planning start!!");

    let sx = 2.0; // start x position [m]
    let sy = 2.0; // start y position [m]
    let gx = 7.0; // goal x position [m]
    let gy = 7.0; // goal y position [m]
    let eps = 2.0; // heuristic inflation

    // Map boundary and an interior wall
    let mut ox = Vec::new();
    let mut oy = Vec::new();
    for i in 0..11 {
        ox.push(i as f64);
        oy.push(0.0);
        ox.push(i as f64);
        oy.push(10.0);
        ox.push(0.0);
        oy.push(i as f64);
        ox.push(10.0);
        oy.push(i as f64);
    }
    for i in 4..7 {
        ox.push(5.0);
        oy.push(i as f64);
    }
    println!("Created {} obstacle points", ox.len());

    let config = MapEnvConfig::default();
    let dt = config.dt;
    let grid = OccupancyGrid::new(&ox, &oy, 1.0, 0.5);
    let env = MapEnv::new(grid, Vector2::new(gx, gy), config);

    let start = Waypoint::at_rest(sx, sy);
    let start_key = env.key_of(&start);
    let mut ss = StateSpace::new(eps, dt);
    let search = GraphSearch::new(true);

    match search.astar(&start, &start_key, &env, &mut ss, -1, 30.0) {
        Ok(traj) => {
            println!(
                "Found trajectory: {} primitives, {:.1} s, cost {:.2}, {} expansions",
                traj.len(),
                traj.total_time(),
                traj.total_cost(1.0),
                ss.expand_iteration()
            );

            let ws = traj.sample(200);
            let rx: Vec<f64> = ws.iter().map(|w| w.pos.x).collect();
            let ry: Vec<f64> = ws.iter().map(|w| w.pos.y).collect();

            let closed = ss.closed_set();
            let cx: Vec<f64> = closed.iter().map(|w| w.pos.x).collect();
            let cy: Vec<f64> = closed.iter().map(|w| w.pos.y).collect();

            let mut fg = Figure::new();
            fg.axes2d()
                .points(&cx, &cy, &[Caption("Expanded"), Color("gray")])
                .points(&ox, &oy, &[Caption("Obstacles"), Color("black")])
                .points(&[sx], &[sy], &[Caption("Start"), Color("green")])
                .points(&[gx], &[gy], &[Caption("Goal"), Color("blue")])
                .lines(&rx, &ry, &[Caption("Trajectory"), Color("red")])
                .set_aspect_ratio(gnuplot::AutoOption::Fix(1.0))
                .set_title("Motion-Primitive Planning", &[])
                .set_x_label("X [m]", &[])
                .set_y_label("Y [m]", &[]);

            let output_path = "plan_2d_result.png";
            match fg.save_to_png(output_path, 800, 600) {
                Ok(()) => println!("Plot saved to: {}", output_path),
                Err(e) => eprintln!("Failed to save image: {}", e),
            }
            if SHOW_ANIMATION {
                fg.show().ok();
            }
        }
        Err(e) => println!("Planning failed: {}", e),
    }

    println!("Motion-primitive planning finish!!");
}
