use std::path::PathBuf;

use eframe::egui;
use thriftboard::app::ThriftboardApp;
use thriftboard::data::loader;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path argument: loaded once at startup, then held
    // behind a read-only handle for the rest of the process.
    let initial: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Thriftboard – Second-hand Clothing 2000–2026",
        options,
        Box::new(move |_cc| {
            let mut app = ThriftboardApp::default();
            if let Some(path) = initial {
                match loader::load_file(&path) {
                    Ok(dataset) => app.state.set_dataset(dataset),
                    Err(e) => {
                        log::error!("failed to load {}: {e}", path.display());
                        app.state.status_message = Some(format!("Error: {e}"));
                    }
                }
            }
            Ok(Box::new(app))
        }),
    )
}
