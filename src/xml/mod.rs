//! XML document support.
//!
//! Definition documents are XML files whose root element (conventionally
//! `Defs`) holds one element per definition:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Defs>
//!   <ThingDef Name="BaseGun" Abstract="True">
//!     <comps><li>Equippable</li></comps>
//!   </ThingDef>
//!   <ThingDef ParentName="BaseGun">
//!     <defName>Revolver</defName>
//!   </ThingDef>
//! </Defs>
//! ```
//!
//! The reader keeps attributes verbatim and preserves text, CDATA (as text)
//! and comments. Leading and trailing whitespace is trimmed from every text
//! node, and text that trims to nothing is dropped. Each element records its
//! source position.

mod error;
mod reader;
mod writer;

pub use error::XmlError;
pub use reader::{parse_document, read_defs};
pub use writer::{write_defs, write_node};

/// Root element name used when writing a definition document.
pub const DEFS_ROOT: &str = "Defs";
