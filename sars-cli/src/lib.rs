pub mod forms;
pub mod input;
