mod io_tests;
mod level_tests;
mod policy_tests;
mod simulator_tests;
