//! Scripted demo: mounts every page section and drives a scroll from the
//! top of the page to the bottom, logging pin events and a few resolved
//! styles along the way.
//!
//! ```text
//! velvet-demo --width 390 --height 844
//! RUST_LOG=velvet=debug velvet-demo --config demo.toml
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use velvet_core::{Property, StyleBuffer, TargetHandle, ViewportMetrics};
use velvet_motion::{MotionEngine, SectionId};
use velvet_site::content::{HERO_SUBTITLE, HERO_TITLE};
use velvet_site::layout::{page_height, register_page};
use velvet_site::sections;
use velvet_text::{Granularity, SegmentTree};

#[derive(Parser, Debug)]
#[command(name = "velvet-demo", about = "Scroll the Velvet Pour page end to end")]
struct Cli {
    /// Viewport width in CSS pixels
    #[arg(long)]
    width: Option<f32>,

    /// Viewport height in CSS pixels
    #[arg(long)]
    height: Option<f32>,

    /// Optional TOML config overriding the demo defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DemoConfig {
    width: f32,
    height: f32,
    /// Reported video duration, in seconds
    media_duration: f32,
    /// Scroll speed of the scripted viewer, px per second
    scroll_speed: f32,
    fps: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
            media_duration: 8.0,
            scroll_speed: 1200.0,
            fps: 60.0,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<DemoConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DemoConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let viewport = ViewportMetrics::new(config.width, config.height);
    let mut engine = MotionEngine::new(viewport);
    register_page(engine.registry_mut(), viewport);
    let class = engine.viewport_class();
    info!(width = viewport.width, height = viewport.height, ?class, "page laid out");

    let title = SegmentTree::segment(HERO_TITLE, &[Granularity::Character]);
    let subtitle = SegmentTree::segment(HERO_SUBTITLE, &[Granularity::Line]);

    let mut names: HashMap<SectionId, &str> = HashMap::new();
    let registry = engine.registry();
    let specs = [
        ("navbar", sections::navbar(registry)?),
        ("hero", sections::hero(registry, class, &title, &subtitle)?),
        ("cocktails", sections::cocktails(registry)?),
        ("art", sections::art(registry, class)?),
    ];

    let mut hero_section = None;
    for (name, spec) in specs {
        let id = engine.mount_section(spec)?;
        names.insert(id, name);
        if name == "hero" {
            hero_section = Some(id);
        }
    }
    info!(sections = engine.section_count(), "page mounted");

    // Scroll the page top to bottom at a constant speed, then hold at the
    // end until scrubbed regions settle. Media metadata arrives once the
    // video block first enters the viewport.
    let dt = 1.0 / config.fps;
    let bottom = page_height(viewport) - viewport.height;
    let mut buffer = StyleBuffer::new();
    let mut scroll = 0.0f32;
    let mut metadata_sent = false;

    while scroll < bottom {
        scroll = (scroll + config.scroll_speed * dt).min(bottom);

        if !metadata_sent && scroll > viewport.height * 0.5 {
            if let Some(hero) = hero_section {
                engine.on_media_duration(hero, config.media_duration);
            }
            info!(duration = config.media_duration, "media metadata arrived");
            metadata_sent = true;
        }

        for event in engine.on_frame(scroll, dt, &mut buffer) {
            let section = names.get(&event.section).copied().unwrap_or("?");
            info!(section, transition = ?event.transition, scroll, "pin");
        }
    }
    for _ in 0..(config.fps as usize * 3) {
        for event in engine.on_frame(scroll, dt, &mut buffer) {
            let section = names.get(&event.section).copied().unwrap_or("?");
            info!(section, transition = ?event.transition, scroll, "pin");
        }
    }

    let float = |id: &str, property: Property| {
        engine
            .registry()
            .get(id)
            .and_then(|e| buffer.get(TargetHandle::Element(e), property))
            .and_then(|v| v.as_float())
    };
    info!(
        playback = ?float("video", Property::PlaybackPosition),
        nav_blur = ?float("nav", Property::BackdropBlur),
        closing_opacity = ?float("masked-content", Property::Opacity),
        "final state"
    );

    Ok(())
}
