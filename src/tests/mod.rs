pub mod engine_tests;
pub mod collusion_tests;
pub mod input_tests;
