use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use radial_diagram::render::Variant;
use radial_diagram::{system_model_tree, DiagramConfig, DiagramEngine};

mod app;
mod ui;

use app::DiagramApp;

/// Interactive radial diagram of a named hierarchy.
#[derive(Debug, Parser)]
#[command(name = "radial-diagram", version, about)]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Diagram style: focused-sunburst, ring-explorer, dendrogram or mandala
    #[arg(short, long)]
    variant: Option<Variant>,

    /// Canvas width in logical pixels
    #[arg(long)]
    width: Option<f32>,

    /// Canvas height in logical pixels
    #[arg(long)]
    height: Option<f32>,

    /// Keep the rings still
    #[arg(long)]
    no_rotation: bool,
}

impl Args {
    fn into_config(self) -> Result<DiagramConfig, radial_diagram::ConfigError> {
        let mut config = match &self.config {
            Some(path) => DiagramConfig::load(path)?,
            None => DiagramConfig::default(),
        };
        if let Some(variant) = self.variant {
            config = config.with_variant(variant);
        }
        let width = self.width.unwrap_or(config.canvas.width);
        let height = self.height.unwrap_or(config.canvas.height);
        config = config.with_canvas(width, height);
        if self.no_rotation {
            config = config.with_rotation(false);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("radial-diagram: {}", e);
            std::process::exit(2);
        }
    };
    log::info!(
        "starting: variant={} canvas={}x{}",
        config.variant,
        config.canvas.width,
        config.canvas.height
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.canvas.width + 360.0, config.canvas.height + 160.0])
            .with_title("Radial diagram"),
        ..Default::default()
    };

    let engine = DiagramEngine::new(system_model_tree(), config);
    let result = eframe::run_native(
        "radial-diagram",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DiagramApp::new(engine)))
        }),
    );
    if let Err(e) = result {
        log::error!("window closed with error: {}", e);
        std::process::exit(1);
    }
}
