/// example runs of the stirred-tank model
pub mod bioreactor_examples;
