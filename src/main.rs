use eframe::egui;
use video_click_coords::app::VideoClickApp;
use video_click_coords::{logging, Args, Config};

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = Config::resolve(args)?;
    logging::init(config.debug);

    tracing::info!(
        shape = %config.initial_shape,
        rectangle_mode = ?config.rectangle_mode,
        "starting"
    );

    let title = match &config.frame {
        Some(path) => format!(
            "Video Click Coordinates — {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => "Video Click Coordinates".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([860.0, 520.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(VideoClickApp::new(&config)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run eframe: {err}"))
}
