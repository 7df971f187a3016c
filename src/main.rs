/*
 * Starglobe
 *
 * A decorative scene: a globe of surface, water and cloud points spinning
 * over a twinkling starfield. The clouds flock using three rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Set STARGLOBE_CONFIG to a JSON settings file to override the defaults and
 * RUST_LOG to change the log level.
 */

use starglobe::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting starglobe");

    nannou::app(app::model)
        .update(app::update)
        .run();
}
