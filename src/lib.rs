pub mod convert;
pub mod culture;
pub mod document;
pub mod error;
pub mod filetime;
pub mod inputs;
pub mod naming;
pub mod resx;

pub use convert::{GeneratedFile, ResourceConverter, RunOutcome};
pub use culture::CultureTag;
pub use document::OutputDocument;
pub use error::{ConvertError, ResxError};
pub use filetime::BuildStamp;
pub use resx::{ResourceEntry, ResxDocument, value::ResourceValue};
