//! Console output for game announcements

pub mod console;
