pub mod args;
pub mod console;
pub mod drivers;
pub mod render;
