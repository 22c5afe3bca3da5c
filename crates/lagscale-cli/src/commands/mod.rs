pub mod check;
pub mod lag;
pub mod spec;
