use crate::domain::ports::Clipboard;
use crate::error::{ConverterError, Result};
use copypasta::{ClipboardContext, ClipboardProvider};
use std::fmt::Display;

/// The desktop clipboard, via `copypasta`.
///
/// On X11 the copied text is served by this process: it vanishes once the
/// process exits unless a clipboard manager has taken it over. Callers check
/// [`SystemClipboard::held_by_process`] and keep running while the user pastes.
pub struct SystemClipboard {
    context: ClipboardContext,
}

impl SystemClipboard {
    /// Connects to the system clipboard. Fails on headless hosts.
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new().map_err(clipboard_error)?;
        Ok(Self { context })
    }

    /// Whether copied text only lives as long as this process.
    pub const fn held_by_process() -> bool {
        cfg!(all(
            unix,
            not(any(target_os = "macos", target_os = "ios", target_os = "android"))
        ))
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.context
            .set_contents(text.to_owned())
            .map_err(clipboard_error)
    }
}

fn clipboard_error(err: impl Display) -> ConverterError {
    ConverterError::Clipboard(err.to_string())
}
