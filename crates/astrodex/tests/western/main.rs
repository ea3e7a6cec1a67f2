mod dignities_tests;
mod tables_tests;
