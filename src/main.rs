use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use incident_sketch::config::Config;
use incident_sketch::draw::{
    IconCache, RasterImage, RenderOptions, RenderStyle, Scene, render_preview,
};
use incident_sketch::export::{self, ExportJob, OutputConfig};
use incident_sketch::input::{DisplayMapping, EditorSession, EditorSettings};
use incident_sketch::script::Step;
use incident_sketch::session;
use incident_sketch::util::{CANVAS_HEIGHT, CANVAS_WIDTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "incident-sketch")]
#[command(version = incident_sketch::VERSION, about = "Annotate incident photos and export the result")]
struct Cli {
    /// Base photograph (file path or file:// URL)
    #[arg(long, short = 'i', value_name = "REF")]
    image: Option<String>,

    /// Previously saved editor state (JSON) to continue editing
    #[arg(long, short = 's', value_name = "FILE")]
    state: Option<PathBuf>,

    /// Editing step to apply, in order (e.g. arm:crash, click:640,360, rotate, type:Wet floor)
    #[arg(long = "action", short = 'a', value_name = "STEP")]
    actions: Vec<Step>,

    /// Size of the display the step coordinates refer to (WIDTHxHEIGHT)
    #[arg(long, value_name = "WxH", value_parser = parse_display_size)]
    display_size: Option<(f64, f64)>,

    /// Directory for the output files (overrides the config)
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output file name without extension (overrides the config template)
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Write the editing preview (with the crop guide) instead of exporting
    #[arg(long, action = ArgAction::SetTrue)]
    preview: bool,

    /// Print the resulting editor state JSON to stdout
    #[arg(long, action = ArgAction::SetTrue)]
    print_state: bool,

    /// Configuration file to use instead of ~/.config/incident-sketch/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn parse_display_size(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid display dimension '{part}'"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config: {:#}; using defaults", err);
            Config::default()
        })),
    }
}

fn load_image(reference: Option<&str>) -> Option<RasterImage> {
    let reference = reference?;
    match RasterImage::load(reference) {
        Ok(image) => Some(image),
        Err(err) => {
            log::warn!("Base image unavailable ({err}); continuing on a blank canvas");
            None
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;
    let image = load_image(cli.image.as_deref());
    let image_size = image.as_ref().map(RasterImage::size);
    let icons = match &config.icons.directory {
        Some(dir) => IconCache::with_directory(dir),
        None => IconCache::builtin(),
    };

    let state = match &cli.state {
        Some(path) => session::load_state_file(path, image_size)?,
        None => session::deserialize_or_fit(None, image_size),
    };

    let mut editor = EditorSession::new(state, image_size, EditorSettings::from(&config));
    editor.subscribe(|notification| {
        if log::log_enabled!(log::Level::Debug) {
            match serde_json::to_string(notification) {
                Ok(json) => log::debug!("Notification: {json}"),
                Err(err) => log::debug!("Notification not serialisable: {err}"),
            }
        }
    });

    let mapping = match cli.display_size {
        Some((width, height)) => DisplayMapping::new(width, height),
        None => DisplayMapping::default(),
    };
    for step in &cli.actions {
        if !step.apply(&mut editor, &mapping) {
            log::info!("Step '{}' changed nothing", step);
        }
    }
    if let Some(at) = editor.take_text_request() {
        log::warn!(
            "Text placement at ({:.0}, {:.0}) was never answered with a type: step",
            at.x,
            at.y
        );
    }

    let style = RenderStyle::from(&config);
    let mut output = OutputConfig::from(&config.export);
    if let Some(dir) = cli.output_dir {
        output.directory = dir;
    }
    if let Some(name) = cli.name {
        output.filename_template = name;
    }

    if cli.preview {
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            CANVAS_WIDTH as i32,
            CANVAS_HEIGHT as i32,
        )
        .context("failed to create preview surface")?;
        {
            let ctx = cairo::Context::new(&surface).context("failed to create cairo context")?;
            let scene = Scene::new(editor.state(), image.as_ref(), &icons);
            render_preview(
                &ctx,
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
                &scene,
                &style,
                RenderOptions::preview(editor.selected()),
            );
        }
        let directory = export::file::ensure_directory_exists(&output.directory)?;
        let path = directory.join(format!(
            "{}-preview.png",
            export::file::generate_stem(&output.filename_template)
        ));
        let mut file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        surface
            .write_to_png(&mut file)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{}", path.display());
    } else {
        let job = ExportJob {
            state: editor.state().clone(),
            image,
            icons,
            style,
        };
        let runtime = tokio::runtime::Runtime::new().context("failed to start export runtime")?;
        let artifacts = runtime
            .block_on(export::export_png_async(job))
            .context("export failed")?;
        let saved = export::save_artifacts(&artifacts, &output)?;
        println!("{}", saved.png_path.display());
        println!("{}", saved.state_path.display());
    }

    if cli.print_state {
        println!("{}", session::serialize(editor.state())?);
    }

    Ok(())
}
