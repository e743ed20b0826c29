mod document_collector_tests;
