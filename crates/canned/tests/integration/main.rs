mod helpers;

mod catalog_test;
