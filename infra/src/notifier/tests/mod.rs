mod noop_tests;
mod smsc_tests;
