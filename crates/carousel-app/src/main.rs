//! Headless carousel demo.
//!
//! Mounts a slide-mode carousel over an in-memory element tree and drives
//! it on the wall clock for a few seconds: autoplay ticks, a manual
//! interaction, a simulated resize, then teardown. Run with
//! `RUST_LOG=debug` to watch every backend mutation.

mod headless;

use std::thread;
use std::time::Duration;

use anyhow::Result;

use carousel_types::CarouselConfig;
use carousel_ui::{Carousel, CarouselSet, Clock, SystemClock};
use headless::HeadlessBackend;

const CONFIG_TOML: &str = r#"
mode = "slide"
transition_duration_ms = 300

[autoplay]
enabled = true
interval_ms = 1000
"#;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CarouselConfig::from_toml_str(CONFIG_TOML)?;
    log::info!(
        "Mounting {:?} carousels (mode {:?}, {}ms transitions)",
        config.slider,
        config.mode,
        config.transition_duration_ms,
    );

    let mut backend = HeadlessBackend::new();
    let slider = backend.add_slider("carousel", 4, 320.0);

    let clock = SystemClock::new();
    let mut set = CarouselSet::mount(&mut backend, &config, clock.now_ms());
    log::info!("Mounted {} instance(s)", set.len());

    let mut clicked = false;
    let mut resized = false;
    loop {
        let now = clock.now_ms();
        set.tick(&mut backend, now);

        // A user presses Next mid-run; autoplay reschedules around it.
        if now >= 1500 && !clicked {
            clicked = true;
            if let Some((_, Some(next))) = set.get(0).map(Carousel::nav_buttons) {
                log::info!("Clicking Next at t={now}ms");
                set.handle_click(&mut backend, now, next);
            }
        }

        // The viewport narrows; the track re-anchors at the new width.
        if now >= 2400 && !resized {
            resized = true;
            log::info!("Resizing slides to 240px at t={now}ms");
            backend.resize_slides(slider, 240.0);
            set.handle_resize(&mut backend);
        }

        if now >= 3600 {
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    if let Some(c) = set.get(0) {
        log::info!(
            "Final state: index {} of [{}, {}], offset {:.0}px",
            c.current_index(),
            c.sequence().first_item_index(),
            c.sequence().last_item_index(),
            c.slide_width() * c.current_index() as f32,
        );
    }

    set.destroy(&mut backend);
    log::info!("Carousel demo shut down cleanly");
    Ok(())
}
