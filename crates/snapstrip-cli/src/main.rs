use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::{ImageReader, RgbaImage};
use serde::Deserialize;
use snapstrip_core::{
    Assignment, EncodeFormat, PrintJob, Rect, RenderOutput, SlotLayout, StripConfig,
    encode_surface, plan, render, to_data_url, to_json_manifest,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "snapstrip",
    about = "Composite guest photos and a template into a booth strip",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Composite a strip and write the image (plus optional manifest)
    Compose(ComposeArgs),
    /// Layout-only: compute placements from photo headers and write JSON (no image)
    Layout(ComposeArgs),
    /// Composite a strip and submit it to a print queue
    Submit(SubmitArgs),
}

#[derive(Parser, Debug, Clone)]
struct ComposeArgs {
    // Input/Output
    /// Template image drawn under the photos
    #[arg(help_heading = "Input/Output")]
    template: PathBuf,
    /// Guest photos, one per slot in slot order
    #[arg(help_heading = "Input/Output")]
    photos: Vec<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Strip base name (files will be name.jpg/.json)
    #[arg(short, long, default_value = "snapstrip", help_heading = "Input/Output")]
    name: String,
    /// YAML config file path (overrides layout-related options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,

    // Layout
    /// Canvas width
    #[arg(long, default_value_t = 1500, help_heading = "Layout")]
    canvas_width: u32,
    /// Canvas height
    #[arg(long, default_value_t = 1050, help_heading = "Layout")]
    canvas_height: u32,
    /// Slot rectangle as "x,y,w,h" (repeat per slot; replaces the default layout)
    #[arg(long, help_heading = "Layout")]
    slot: Vec<String>,

    // Compositing
    /// Fit policy: contain | cover
    #[arg(long, value_parser = ["contain", "cover"], default_value = "contain", help_heading = "Compositing")]
    fit: String,
    /// Discard cover overflow outside the slot
    #[arg(long, default_value_t = false, help_heading = "Compositing")]
    clip_overflow: bool,
    /// Resampling filter: nearest | triangle | catmullrom | lanczos3
    #[arg(long, default_value = "triangle", help_heading = "Compositing")]
    filter: String,

    // Export
    /// Output format: jpeg | png
    #[arg(long, value_parser = ["jpeg", "jpg", "png"], default_value = "jpeg", help_heading = "Export")]
    format: String,
    /// JPEG quality (1..=100)
    #[arg(long, default_value_t = 92, help_heading = "Export")]
    quality: u8,
    /// Also write a JSON placement manifest next to the image
    #[arg(long, default_value_t = false, help_heading = "Export")]
    manifest: bool,
    /// Layout-only: compute placements from photo headers and write the manifest (no image)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    layout_only: bool,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
    /// Dry run: compute everything but do not write files
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct SubmitArgs {
    #[command(flatten)]
    compose: ComposeArgs,
    /// Print queue endpoint URL
    #[arg(long, help_heading = "Submission")]
    endpoint: String,
    /// Copies to print (1..=5)
    #[arg(long, default_value_t = 1, help_heading = "Submission")]
    copies: u32,
    /// Guest name attached to the job
    #[arg(long, help_heading = "Submission")]
    guest: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Compose(args) => run_compose(args, cli.progress && !cli.quiet),
        Commands::Layout(args) => {
            let mut a = args.clone();
            a.layout_only = true;
            run_compose(&a, false)
        }
        Commands::Submit(args) => run_submit(args, cli.progress && !cli.quiet),
    }
}

fn run_compose(args: &ComposeArgs, show_progress: bool) -> anyhow::Result<()> {
    let cfg = build_config(args)?;

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    check_photo_count(args, &cfg)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;

    // layout-only branch
    if args.layout_only {
        let mut sizes: Vec<(u32, u32)> = Vec::with_capacity(args.photos.len());
        for p in &args.photos {
            let dims = image::image_dimensions(p)
                .with_context(|| format!("read dimensions of {}", p.display()))?;
            sizes.push(dims);
        }
        let placements = plan(&sizes, &cfg)?;
        let manifest = to_json_manifest(&placements, &cfg);
        if args.dry_run {
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        } else {
            let json_path = args.out_dir.join(format!("{}.json", args.name));
            fs::write(&json_path, serde_json::to_string_pretty(&manifest)?)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, placements = placements.len(), "layout written");
        }
        return Ok(());
    }

    let out = compose(args, &cfg, show_progress)?;
    let format = parse_format(&args.format, args.quality)?;
    let bytes = encode_surface(&out.surface, format)?;

    if !args.dry_run {
        let img_path = args.out_dir.join(format!("{}.{}", args.name, format.extension()));
        fs::write(&img_path, &bytes).with_context(|| format!("write {}", img_path.display()))?;
        info!(?img_path, bytes = bytes.len(), "strip written");

        if args.manifest {
            let manifest = to_json_manifest(&out.placements, &cfg);
            let json_path = args.out_dir.join(format!("{}.json", args.name));
            fs::write(&json_path, serde_json::to_string_pretty(&manifest)?)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, "manifest written");
        }
    }

    info!(
        canvas_w = cfg.canvas_width,
        canvas_h = cfg.canvas_height,
        photos = out.placements.len(),
        "strip composited"
    );
    Ok(())
}

fn run_submit(args: &SubmitArgs, show_progress: bool) -> anyhow::Result<()> {
    if args.compose.layout_only {
        anyhow::bail!("--layout-only produces no image to submit");
    }
    let cfg = build_config(&args.compose)?;
    check_photo_count(&args.compose, &cfg)?;

    let out = compose(&args.compose, &cfg, show_progress)?;
    let format = parse_format(&args.compose.format, args.compose.quality)?;
    let bytes = encode_surface(&out.surface, format)?;
    let data_url = to_data_url(&bytes, format);

    let mut job = PrintJob::new(args.copies)?;
    if let Some(guest) = &args.guest {
        job = job.with_guest(guest.clone());
    }
    let fields = job.form_fields(&data_url);

    if args.compose.dry_run {
        info!(
            copies = job.copies,
            endpoint = %args.endpoint,
            payload_bytes = data_url.len(),
            "dry run; job not submitted"
        );
        return Ok(());
    }

    let client = reqwest::blocking::Client::new();
    let resp = client
        .post(&args.endpoint)
        .form(&fields)
        .send()
        .with_context(|| format!("post to {}", args.endpoint))?;
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("print queue rejected the job: {} {}", status, body.trim());
    }
    info!(%status, reply = %body.trim(), copies = job.copies, "print job submitted");
    Ok(())
}

fn compose(args: &ComposeArgs, cfg: &StripConfig, show_progress: bool) -> anyhow::Result<RenderOutput> {
    let template = load_rgba(&args.template)
        .with_context(|| format!("load template {}", args.template.display()))?;
    let photos = load_photos_with_progress(&args.photos, show_progress)?;
    info!(count = photos.len(), "loaded guest photos");

    let mut assignment = Assignment::new(cfg.slots.slot_count());
    for (slot, photo) in photos.into_iter().enumerate() {
        assignment.set_photo(slot, photo)?;
    }
    Ok(render(&template, &assignment, cfg)?)
}

fn build_config(args: &ComposeArgs) -> anyhow::Result<StripConfig> {
    let mut cfg = StripConfig {
        canvas_width: args.canvas_width,
        canvas_height: args.canvas_height,
        clip_overflow: args.clip_overflow,
        ..Default::default()
    };
    cfg.fit = args.fit.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    cfg.filter = args.filter.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    if !args.slot.is_empty() {
        let slots = args
            .slot
            .iter()
            .map(|s| parse_slot(s))
            .collect::<anyhow::Result<Vec<_>>>()?;
        cfg.slots = SlotLayout::new(slots);
    }

    // Config file sets layout-related options en bloc
    if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: BoothFile = serde_yaml::from_str(&file)?;
        cfg = y.into_strip_config(cfg);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn check_photo_count(args: &ComposeArgs, cfg: &StripConfig) -> anyhow::Result<()> {
    let slots = cfg.slots.slot_count();
    if args.photos.len() > slots {
        anyhow::bail!(
            "got {} photos but the layout has only {} slots",
            args.photos.len(),
            slots
        );
    }
    Ok(())
}

fn parse_slot(s: &str) -> anyhow::Result<Rect> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        anyhow::bail!("slot must be \"x,y,w,h\", got: {}", s);
    }
    let mut vals = [0.0f32; 4];
    for (i, part) in parts.iter().enumerate() {
        vals[i] = part
            .parse()
            .with_context(|| format!("slot component {} in {:?}", i, s))?;
    }
    Ok(Rect::new(vals[0], vals[1], vals[2], vals[3]))
}

fn parse_format(s: &str, quality: u8) -> anyhow::Result<EncodeFormat> {
    match s.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => Ok(EncodeFormat::Jpeg { quality }),
        "png" => Ok(EncodeFormat::Png),
        other => anyhow::bail!("unknown output format: {}", other),
    }
}

fn load_photos_with_progress(paths: &[PathBuf], progress: bool) -> anyhow::Result<Vec<RgbaImage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} loading {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        let photo = load_rgba(p).with_context(|| format!("load photo {}", p.display()))?;
        list.push(photo);
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(list)
}

fn load_rgba(p: &Path) -> anyhow::Result<RgbaImage> {
    let img = ImageReader::open(p)?.with_guessed_format()?.decode()?;
    Ok(img.to_rgba8())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct BoothFile {
    canvas_width: Option<u32>,
    canvas_height: Option<u32>,
    slots: Option<Vec<Rect>>,
    fit: Option<String>,
    clip_overflow: Option<bool>,
    filter: Option<String>,
}

impl BoothFile {
    fn into_strip_config(self, mut cfg: StripConfig) -> StripConfig {
        if let Some(v) = self.canvas_width {
            cfg.canvas_width = v;
        }
        if let Some(v) = self.canvas_height {
            cfg.canvas_height = v;
        }
        if let Some(v) = self.slots {
            cfg.slots = SlotLayout::new(v);
        }
        if let Some(v) = self.fit {
            cfg.fit = v.parse().unwrap_or(cfg.fit);
        }
        if let Some(v) = self.clip_overflow {
            cfg.clip_overflow = v;
        }
        if let Some(v) = self.filter {
            cfg.filter = v.parse().unwrap_or(cfg.filter);
        }
        cfg
    }
}
