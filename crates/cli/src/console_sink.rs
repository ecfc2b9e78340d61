use std::path::PathBuf;

use livecheck_core::overlay::domain::overlay_state::OverlayState;
use livecheck_core::overlay::infrastructure::image_surface::ImageSurface;
use livecheck_core::pipeline::ui_sink::UiSink;

/// Prints validity changes and notifications to stdout, optionally
/// rendering each overlay to a numbered PNG.
pub struct ConsoleSink {
    width: u32,
    height: u32,
    render_dir: Option<PathBuf>,
    last_validity: Option<bool>,
    applied: usize,
    valid: usize,
    rendered: usize,
    messages: Vec<String>,
}

impl ConsoleSink {
    pub fn new(width: u32, height: u32, render_dir: Option<PathBuf>) -> Self {
        Self {
            width,
            height,
            render_dir,
            last_validity: None,
            applied: 0,
            valid: 0,
            rendered: 0,
            messages: Vec::new(),
        }
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn valid_count(&self) -> usize {
        self.valid
    }

    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl UiSink for ConsoleSink {
    fn on_validity(&mut self, is_valid: bool) {
        self.applied += 1;
        if is_valid {
            self.valid += 1;
        }
        if self.last_validity != Some(is_valid) {
            println!(
                "[{:>5}] capture {}",
                self.applied,
                if is_valid { "enabled" } else { "disabled" }
            );
            self.last_validity = Some(is_valid);
        }
    }

    fn show_message(&mut self, message: &str) {
        println!("        {message}");
        self.messages.push(message.to_string());
    }

    fn on_overlay_changed(&mut self, overlay: &OverlayState) {
        let Some(dir) = &self.render_dir else {
            return;
        };
        let mut surface = ImageSurface::new(self.width, self.height);
        overlay.draw(&mut surface);

        let path = dir.join(format!("overlay_{:05}.png", self.rendered));
        match surface.image().save(&path) {
            Ok(()) => self.rendered += 1,
            Err(e) => log::error!("Failed to save {}: {e}", path.display()),
        }
    }
}
