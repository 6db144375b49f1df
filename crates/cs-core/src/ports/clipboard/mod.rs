mod change_origin;
mod system_clipboard;

pub use change_origin::ClipboardChangeOriginPort;
pub use system_clipboard::SystemClipboardPort;
