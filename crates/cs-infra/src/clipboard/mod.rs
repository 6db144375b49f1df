mod change_origin;

pub use change_origin::InMemoryClipboardChangeOrigin;
