/// Payload decoding. Response bodies and fixture files are decoded into a complete
/// [crate::JsonValue] by the DOM parser, which is also used to read raw views back in.

/// The DOM-based parser
pub mod dom;

pub use dom::Parser;
