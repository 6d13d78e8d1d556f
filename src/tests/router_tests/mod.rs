mod form_tests;
mod predict_tests;
