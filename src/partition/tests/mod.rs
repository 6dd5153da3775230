mod partitioner_tests;
