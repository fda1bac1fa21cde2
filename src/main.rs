//! Live annotator application for real-time shape tracking and face detection.

use anyhow::Result;
use clap::Parser;
use live_annotator::app::AnnotatorApp;
use live_annotator::config::Config;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use
    #[arg(long)]
    cam: Option<i32>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Directory containing the three haarcascade model files
    #[arg(long)]
    cascade_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Live Annotator");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(cam) = args.cam {
        config.camera.device = cam;
    }
    if let Some(dir) = &args.cascade_dir {
        config.cascades.frontal_face = dir.join("haarcascade_frontalface_alt.xml");
        config.cascades.profile_face = dir.join("haarcascade_profileface.xml");
        config.cascades.eye = dir.join("haarcascade_eye.xml");
    }

    let mut app = AnnotatorApp::new(&config)?;
    app.run()?;

    Ok(())
}
