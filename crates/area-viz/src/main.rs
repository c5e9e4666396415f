use area_tree::io::read_nodes;
use area_tree::{Partition, PartitionConfig};
use area_viz::{OrbitCamera, TreeNavigator, Viewport, draw_points_2d, draw_points_3d};
use macroquad::prelude::*;

const MARGIN: f32 = 20.0;
const PANEL_WIDTH: f32 = 300.0;

fn load() -> anyhow::Result<Partition> {
    let mut args = std::env::args().skip(1);
    let Some(nodefile) = args.next() else {
        anyhow::bail!("usage: area-viz <nodefile> [fieldsize]");
    };
    let mut config = PartitionConfig::default();
    if let Some(field) = args.next() {
        config = config.with_field_size(field.parse()?);
    }

    let points = read_nodes(&nodefile)?;
    if !matches!(points.dimensions(), 2 | 3) {
        anyhow::bail!("only 2D and 3D node files can be shown, got {}D", points.dimensions());
    }
    Ok(Partition::build(points, &config)?)
}

#[macroquad::main("Area Partition")]
async fn main() {
    let partition = match load() {
        Ok(partition) => partition,
        Err(err) => {
            eprintln!("error: {err:#}");
            return;
        }
    };
    let stats = partition.stats();
    println!(
        "Partition built: {} areas ({} empty), depth {}",
        stats.leaves, stats.empty_leaves, stats.max_depth
    );

    let three_d = partition.dimensions() == 3;
    let mut camera = OrbitCamera::framing(partition.bounds());
    let mut navigator = TreeNavigator::new();

    loop {
        navigator.update(&partition);
        clear_background(Color::from_rgba(15, 15, 25, 255));

        if three_d {
            camera.update();
            set_camera(&camera.to_camera3d());
            navigator.render_3d(&partition);
            draw_points_3d(&partition, camera.distance * 0.004);
            set_default_camera();
        } else {
            let viewport = Viewport::fit(
                partition.bounds(),
                screen_width() - PANEL_WIDTH,
                screen_height(),
                MARGIN,
            );
            navigator.render_2d(&partition, &viewport);
            draw_points_2d(&partition, &viewport);
        }

        let panel = screen_width() - PANEL_WIDTH;
        draw_rectangle(panel, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(0, 0, 0, 200));
        draw_text(
            &format!("{} nodes | {} areas", partition.input().len(), stats.leaves),
            panel + 10.0,
            25.0,
            20.0,
            WHITE,
        );
        navigator.draw_ui_at(&partition, panel, 50.0);
        if three_d {
            draw_text("Drag mouse to rotate, scroll to zoom", panel + 10.0, 135.0, 16.0, DARKGRAY);
        }
        draw_text(&format!("FPS: {}", get_fps()), panel + 10.0, 155.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
