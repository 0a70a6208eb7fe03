pub mod format;
pub mod notice;
pub mod render;

pub use notice::Notice;
pub use notice::NoticeKind;
pub use render::Renderer;
