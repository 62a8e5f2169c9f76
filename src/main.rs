//! Native galaxy viewer
//!
//! Run with: cargo run --release --features native --bin galaxy [-- --use-cpu]
//! Set GALAXY_CONFIG to a JSON file to override the initial parameters.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use spiral_galaxy::core::GalaxyConfig;
    use spiral_galaxy::GalaxyApp;
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,spiral_galaxy=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let use_cpu = std::env::args().any(|arg| arg == "--use-cpu");
    let config = GalaxyConfig::from_env();

    info!(use_cpu, "Starting galaxy viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Galaxy")
            .with_inner_size([1280.0, 720.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "galaxy",
        options,
        Box::new(move |cc| Ok(Box::new(GalaxyApp::new(cc, config, use_cpu)))),
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
