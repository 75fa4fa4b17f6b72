mod admin_test;
mod helpers;
mod session_test;
