mod lookup_suite;
