pub mod stage0_parse;
pub mod stage1_extract;
pub mod stage2_partition;
pub mod stage3_render;

pub use stage0_parse::*;
pub use stage1_extract::*;
pub use stage2_partition::*;
pub use stage3_render::*;
