use clap::Parser;
use log::{error, info, warn};

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;
use lumen::output::{self, OutputFormat, TevStream};
use lumen::renderer::ProgressiveRenderer;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("lumen - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    // Reject unsupported output paths before spending time rendering
    if let Err(e) = OutputFormat::from_path(&args.output) {
        error!("{}", e);
        std::process::exit(1);
    }

    if args.threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build_global() {
            warn!("Could not configure {} worker threads: {}", args.threads, e);
        }
    }

    let settings = args.render_settings();
    let scene = args.scene.build();
    info!(
        "Scene {:?}: {} spheres, {} triangles",
        args.scene,
        scene.spheres().len(),
        scene.triangles().len()
    );
    info!("Image resolution: {}x{}, frames: {}", settings.width, settings.height, settings.frames);

    let mut tev = args
        .tev_address()
        .and_then(|address| TevStream::connect(address, "lumen", settings.width, settings.height));
    let tev_every = args.tev_every.max(1);

    let mut renderer = ProgressiveRenderer::new(scene, &settings);
    renderer.render(settings.frames, |film, frame| {
        if let Some(stream) = tev.as_mut() {
            if frame % tev_every == 0 || frame == settings.frames {
                stream.update(film);
            }
        }
    });

    if let Err(e) = output::save_film(renderer.film(), &args.output) {
        error!("{}", e);
        std::process::exit(1);
    }
}
