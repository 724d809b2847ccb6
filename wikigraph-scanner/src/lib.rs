pub mod crawler;
pub mod error;
pub mod extract;
pub mod result;

pub use crawler::{Crawler, ProgressCallback, ResultCallback};
pub use error::ScanError;
pub use extract::{ArticleLink, PageLinks};
pub use result::PageResult;
