use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "store-tools", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit an image onto a fixed transparent canvas and write it as PNG.
    Resize(ResizeArgs),
    /// Build the release bundle and publish it to a Google Play track.
    Publish(PublishArgs),
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    /// Source image (PNG, JPEG, ...).
    #[arg(default_value = "icon.png")]
    input: PathBuf,

    /// Output PNG path.
    #[arg(default_value = "icon-512x512.png")]
    output: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = store_tools::ICON_SIZE)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = store_tools::ICON_SIZE)]
    height: u32,
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Publish config JSON; explicit flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Release track.
    #[arg(long, value_enum)]
    track: Option<store_tools::Track>,

    /// Status of the new release (`draft` until the app has a production release).
    #[arg(long, value_enum)]
    status: Option<store_tools::ReleaseStatus>,

    /// Share of users (0-1, exclusive) for `inProgress` and `halted` releases.
    #[arg(long)]
    user_fraction: Option<f64>,

    /// Path to the service account JSON key.
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Application id on Google Play.
    #[arg(long = "package")]
    package_name: Option<String>,

    /// App bundle to upload, relative to the project directory.
    #[arg(long)]
    bundle: Option<PathBuf>,

    /// Gradle project root.
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Upload an already built bundle without running Gradle.
    #[arg(long)]
    skip_build: bool,

    /// HTTP request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Resize(args) => cmd_resize(args),
        Command::Publish(args) => cmd_publish(args),
    }
}

fn cmd_resize(args: ResizeArgs) -> anyhow::Result<()> {
    let target = store_tools::TargetSpec::new(args.width, args.height)?;
    let source = store_tools::SourceImage::open(&args.input)?;
    let canvas = store_tools::fit(&source, target)?;
    canvas.save_png(&args.output)?;

    eprintln!(
        "resized to {}x{} and wrote {}",
        target.width,
        target.height,
        args.output.display()
    );
    Ok(())
}

fn publish_config(args: PublishArgs) -> anyhow::Result<store_tools::PublishConfig> {
    let mut cfg = match &args.config {
        Some(path) => store_tools::PublishConfig::from_path(path)?,
        None => store_tools::PublishConfig::default(),
    };

    if let Some(track) = args.track {
        cfg.track = track;
    }
    if let Some(status) = args.status {
        cfg.release_status = status;
    }
    if let Some(fraction) = args.user_fraction {
        cfg.user_fraction = Some(fraction);
    }
    if let Some(credentials) = args.credentials {
        cfg.credentials_path = credentials;
    }
    if let Some(package_name) = args.package_name {
        cfg.package_name = package_name;
    }
    if let Some(bundle) = args.bundle {
        cfg.bundle_path = bundle;
    }
    if let Some(project_dir) = args.project_dir {
        cfg.project_dir = project_dir;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        cfg.timeout_secs = timeout_secs;
    }
    cfg.skip_build |= args.skip_build;

    cfg.validate()?;
    Ok(cfg)
}

fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let cfg = publish_config(args)?;
    eprintln!("publishing {} to '{}'", cfg.package_name, cfg.track);

    let report = store_tools::run_publish(&cfg)?;

    eprintln!(
        "published version {} of {} to the '{}' track ({}, edit {})",
        report.version_code, report.package_name, report.track, report.status, report.edit_id
    );
    Ok(())
}
