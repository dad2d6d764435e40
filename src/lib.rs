#[allow(non_snake_case)]
pub mod Bioreactor;
#[allow(non_snake_case)]
pub mod Examples;
