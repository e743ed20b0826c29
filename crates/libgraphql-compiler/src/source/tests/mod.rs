mod splicer_tests;
