// Data models for hand tracking input and gesture classification output

pub mod gesture;
pub mod hand;
