//! # Scripts
//!
//! A script is a TOML description of a surface and the input events played onto it, standing in for
//! a touch screen. Rendering one yields the (optionally trimmed) picture.

use std::sync::Arc;

use anyhow::Context;
use sketchpad_core::{
    background::Background,
    color::Color,
    operation::TextOperation,
    raster::Raster,
    surface::{DrawingSurface, Mode, SurfaceListener},
    text::{Font, TextMetrics},
};

use crate::settings::Settings;

fn one() -> f32 {
    1.0
}

#[derive(serde::Deserialize, strum::IntoStaticStr, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    Begin {
        x: f32,
        y: f32,
    },
    Move {
        x: f32,
        y: f32,
    },
    End,
    LongPress,
    /// `#rrggbb` or `#rrggbbaa`
    Color {
        value: String,
    },
    StrokeWidth {
        value: f32,
    },
    /// Choose an emoji, switching to emoji mode. Size defaults to the configured one.
    Emoji {
        value: String,
        size: Option<f32>,
    },
    Mode {
        value: String,
    },
    /// Render `value` as a text box and place it, replacing any current text.
    Text {
        value: String,
        x: f32,
        y: f32,
        #[serde(default = "one")]
        scale: f32,
    },
    EraseText,
    Undo,
    HideText,
    ShowText,
    Reset,
    RemoveBackground,
}

#[derive(serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub width: u32,
    pub height: u32,
    /// Relative paths are relative to the script.
    pub background: Option<std::path::PathBuf>,
    pub output: Option<std::path::PathBuf>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Forwards surface notifications to the log.
struct LogListener {
    name: String,
}
impl SurfaceListener for LogListener {
    fn drawing_added(&mut self) {
        log::debug!("{}: surface painted on", self.name);
    }
    fn drawing_cleared(&mut self) {
        log::debug!("{}: surface blank", self.name);
    }
    fn text_changed(&mut self, text: &TextOperation) {
        log::debug!("{}: current text is now {:?}", self.name, text.text());
    }
    fn text_removed(&mut self) {
        log::debug!("{}: no text left", self.name);
    }
}

impl Script {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let string = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&string)?)
    }
    /// Where the picture goes: `output`, or the script path with a png extension.
    #[must_use]
    pub fn output_path(&self, script_path: &std::path::Path) -> std::path::PathBuf {
        match &self.output {
            Some(output) => relative_to(script_path, output),
            None => script_path.with_extension("png"),
        }
    }
    /// Play every event onto a fresh surface and return the picture, cropped to the trim box if `trim`.
    pub fn render(
        &self,
        script_path: &std::path::Path,
        settings: &Settings,
        font: Option<&Arc<Font>>,
        trim: bool,
    ) -> anyhow::Result<tiny_skia::Pixmap> {
        let raster = Raster::new(self.width, self.height)?.with_font(font.cloned());
        let metrics: Box<dyn TextMetrics> = match font {
            Some(font) => Box::new(Font::clone(font)),
            None => Box::<sketchpad_core::text::FixedAdvance>::default(),
        };
        let mut surface = DrawingSurface::new(settings.surface_settings(), settings.paint_state())
            .with_metrics(metrics);
        surface.set_listener(LogListener {
            name: script_path.display().to_string(),
        });
        surface.attach(raster);

        if let Some(background) = &self.background {
            let path = relative_to(script_path, background);
            let image = image::open(&path)
                .with_context(|| format!("decoding background {path:?}"))?
                .into_rgba8();
            let (width, height) = image.dimensions();
            surface.set_background(Background::from_rgba8(width, height, image.into_raw())?);
        }

        for (idx, event) in self.events.iter().enumerate() {
            log::trace!("event {idx}: {}", <&'static str>::from(event));
            apply(&mut surface, event, settings)
                .with_context(|| format!("event {idx} ({event:?})"))?;
        }

        let trim_box = if trim { surface.trim_box() } else { None };
        let raster = surface
            .detach()
            .ok_or_else(|| anyhow::anyhow!("surface lost its canvas"))?;
        match trim_box {
            Some(trim_box) => {
                log::info!("{}: trimmed to {trim_box:?}", script_path.display());
                Ok(raster.crop(trim_box)?)
            }
            None => Ok(raster.into_pixmap()),
        }
    }
}

fn relative_to(script_path: &std::path::Path, path: &std::path::Path) -> std::path::PathBuf {
    match script_path.parent() {
        Some(dir) => dir.join(path),
        None => path.to_owned(),
    }
}

fn apply(
    surface: &mut DrawingSurface<Raster>,
    event: &Event,
    settings: &Settings,
) -> anyhow::Result<()> {
    match event {
        Event::Begin { x, y } => surface.begin(*x, *y),
        Event::Move { x, y } => surface.move_to(*x, *y),
        Event::End => surface.end(),
        Event::LongPress => surface.long_press(),
        Event::Color { value } => surface.set_color(value.parse::<Color>()?),
        Event::StrokeWidth { value } => surface.set_stroke_width(*value),
        Event::Emoji { value, size } => {
            surface.set_emoji(value.clone(), size.unwrap_or(settings.emoji_size));
        }
        Event::Mode { value } => surface.set_mode(value.parse::<Mode>()?),
        Event::Text { value, x, y, scale } => {
            let bitmap = surface
                .canvas()
                .ok_or_else(|| anyhow::anyhow!("no canvas to render text with"))?
                .render_text_bitmap(value, &surface.paint().text, settings.text_padding)?;
            surface.draw_text_bitmap(bitmap, *x, *y, value.clone(), *scale)?;
        }
        Event::EraseText => surface.erase_text(),
        Event::Undo => {
            if !surface.undo() {
                log::warn!("nothing to undo");
            }
        }
        Event::HideText => surface.hide_text(),
        Event::ShowText => surface.show_text(),
        Event::Reset => surface.reset(),
        Event::RemoveBackground => surface.remove_background(),
    }
    Ok(())
}
