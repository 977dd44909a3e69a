pub mod error;
pub mod formatter;
pub mod logging;
pub mod scan;
pub mod walker;

pub use error::{ModlistError, Result};
pub use formatter::module_identifier;
pub use scan::{ScanOptions, scan, write_identifiers};
pub use walker::{SourceFiles, SourceWalker};
