// Row-level building blocks shared by every report: filter, project, normalize, sort.
pub mod keyword_filter;
pub mod normalizer;
pub mod projector;
pub mod sort;

pub use keyword_filter::KeywordFilter;
pub use projector::Projection;
