//! Drape Diagnostic
//!
//! Headless run of the cloth scene: seed the sheet, let it fall onto the
//! ball, and print per-interval stats. Panics if the state diverges, so it
//! doubles as a quick stability check after parameter changes.
//!
//! Run with: cargo run -p cloth --example drape_diagnostic --release

use cloth::constants::{DEFAULT_DT, RESET_INTERVAL};
use cloth::{ClothSimulation, StencilMode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const RESOLUTION: usize = 128;
const FRAMES: usize = 300;

fn main() {
    let mut sim = ClothSimulation::new(RESOLUTION, StencilMode::Structural);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    sim.reset(&mut rng);

    let dt = DEFAULT_DT;
    let substeps_per_frame = ((1.0 / 60.0) / dt) as usize;
    println!(
        "n={} dt={:.3e} substeps/frame={} springs/point={}",
        RESOLUTION,
        dt,
        substeps_per_frame,
        sim.topology.len()
    );

    let mut current_t = 0.0f32;
    for frame in 0..FRAMES {
        if current_t > RESET_INTERVAL {
            sim.reset(&mut rng);
            current_t = 0.0;
            println!("--- reseed at frame {} ---", frame);
        }

        for _ in 0..substeps_per_frame {
            sim.substep(dt);
            current_t += dt;
        }

        if frame % 30 == 0 {
            println!(
                "frame={:4} t={:.2}s mean_y={:+.4} max_speed={:.3} penetration={:.2e}",
                frame,
                current_t,
                sim.mean_height(),
                sim.max_speed(),
                sim.max_penetration()
            );
        }

        assert!(
            sim.max_speed().is_finite(),
            "simulation diverged at frame {}",
            frame
        );
    }

    println!(
        "done: {} substeps, final mean_y={:+.4}",
        sim.substep_count,
        sim.mean_height()
    );
}
