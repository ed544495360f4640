pub mod execute;
pub mod movegen;
pub mod perft;
pub mod promotion;
pub mod square_control;
pub mod types;
