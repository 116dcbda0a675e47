mod support;

mod action_tests;
