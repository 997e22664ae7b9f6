
/// Generic functionality for reading configuration and reference files
pub mod file_io;
/// Quick utility functions for htslib files
pub mod htslib_quickparse;
