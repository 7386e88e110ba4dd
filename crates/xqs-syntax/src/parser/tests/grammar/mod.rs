mod constructors_tests;
mod dialect_tests;
mod exprs_tests;
mod flwor_tests;
mod modules_tests;
mod types_tests;
