//! Window and canvas configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (pixels)
    pub window_width: u32,

    /// Initial window height (pixels)
    pub window_height: u32,

    /// Opacity (0-255) of the black overlay composited at the start of each frame.
    /// Low values leave long trails.
    pub damping: u8,

    /// Directory screenshots are written to
    pub screenshot_dir: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            damping: 30,
            screenshot_dir: "screenshots".to_string(),
        }
    }
}

impl RenderConfig {
    /// Fade alpha as a fraction
    pub fn fade_alpha(&self) -> f32 {
        self.damping as f32 / 255.0
    }

    /// Screenshot file path for a given index
    pub fn screenshot_path(&self, index: usize) -> String {
        format!("{}/spiral_{:05}.png", self.screenshot_dir, index)
    }
}
