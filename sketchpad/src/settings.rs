use sketchpad_core::{
    style::PaintState,
    surface::SurfaceSettings,
    text::{Font, FontError},
    trim::TrimSettings,
};

const DOCUMENTATION: &str = r#"# Sketchpad settings. You may edit this file, but be aware that formatting and comments will not
# be preserved if it is ever rewritten. Missing keys take their default.

# trim_buffer: pixels of margin kept around the drawing when exporting trimmed.
# text_padding: pixels of padding around each text box, before scaling.
# stroke_width, emoji_size, text_size: starting sizes, in pixels.
# touch_tolerance: minimum pointer travel, in pixels, before a move counts.
# font: path to a TrueType/OpenType font for emoji and text. Without one, emoji are drawn as squares
# and text boxes are left blank.

"#;

#[must_use]
pub fn preferences_dir() -> Option<std::path::PathBuf> {
    let mut base_dir = dirs::preference_dir()?;
    base_dir.push(env!("CARGO_PKG_NAME"));
    Some(base_dir)
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub trim_buffer: i32,
    pub text_padding: f32,
    pub stroke_width: f32,
    pub touch_tolerance: f32,
    pub emoji_size: f32,
    pub text_size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<std::path::PathBuf>,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            trim_buffer: 24,
            text_padding: 16.0,
            stroke_width: 8.0,
            touch_tolerance: 2.0,
            emoji_size: 64.0,
            text_size: 12.0,
            font: None,
        }
    }
}
impl Settings {
    const FILENAME: &'static str = "settings.toml";
    #[must_use]
    pub fn path() -> Option<std::path::PathBuf> {
        let mut dir = preferences_dir()?;
        dir.push(Self::FILENAME);
        Some(dir)
    }
    /// Load from user preferences, or default with a warning if unavailable for some reason.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No preferences dir, using default settings.");
            return Self::default();
        };
        let settings: anyhow::Result<Self> = try_block::try_block! {
            let string = std::fs::read_to_string(&path)?;
            let settings : Self = toml::from_str(&string)?;
            Ok(settings)
        };
        match settings {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Settings at {path:?} weren't available, defaulting: {e:#}");
                Self::default()
            }
        }
    }
    /// Write to user preferences, unless a file is already there.
    pub fn save_if_missing(&self) -> anyhow::Result<()> {
        let mut preferences =
            preferences_dir().ok_or_else(|| anyhow::anyhow!("No preferences dir found"))?;
        // Explicity do *not* create recursively. If not found, the user probably has a good reason.
        let _ = std::fs::DirBuilder::new().create(&preferences);

        preferences.push(Self::FILENAME);
        if preferences.exists() {
            return Ok(());
        }
        let string = DOCUMENTATION.to_owned() + &toml::ser::to_string_pretty(self)?;
        std::fs::write(preferences, string)?;
        Ok(())
    }
    #[must_use]
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            touch_tolerance: self.touch_tolerance,
            trim: TrimSettings {
                trim_buffer: self.trim_buffer,
                text_padding: self.text_padding,
            },
            ..SurfaceSettings::default()
        }
    }
    #[must_use]
    pub fn paint_state(&self) -> PaintState {
        PaintState::new(self.stroke_width, self.emoji_size, self.text_size)
    }
    /// The configured font, if any.
    pub fn font(&self) -> Result<Option<Font>, FontError> {
        self.font.as_deref().map(Font::from_path).transpose()
    }
}
