use anyhow::{anyhow, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};

pub struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    /// Read the text representation, `None` when the clipboard has no text.
    pub fn read_text(ctx: &ClipboardContext) -> Result<Option<String>> {
        if !ctx.has(ContentFormat::Text) {
            return Ok(None);
        }

        map_clipboard_err(ctx.get_text()).map(Some)
    }

    pub fn write_text(ctx: &ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.set_text(text.to_string()))
    }

    #[cfg(target_os = "linux")]
    pub fn new_context() -> Result<ClipboardContext> {
        use clipboard_rs::ClipboardContextX11Options;

        map_clipboard_err(ClipboardContext::new_with_options(
            ClipboardContextX11Options { read_timeout: None },
        ))
    }

    #[cfg(not(target_os = "linux"))]
    pub fn new_context() -> Result<ClipboardContext> {
        map_clipboard_err(ClipboardContext::new())
    }
}
