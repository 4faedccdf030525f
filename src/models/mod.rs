pub mod action_item;
pub mod blocks;
pub mod option_value;
pub mod transcript;

pub use action_item::*;
pub use blocks::*;
pub use option_value::*;
pub use transcript::*;
