// Core exports
pub mod emotions;
pub mod generator;
pub mod render;
pub mod session;
pub mod validation;

pub use emotions::Emotion;
pub use generator::generate_results;
pub use render::ResultsView;
pub use session::{Notice, NoticeKind, Stage, UploadSession};
pub use validation::validate_image;
