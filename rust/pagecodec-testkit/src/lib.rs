//! Test utilities for the pagecodec crates.
//!
//! This crate provides generators for encoded pages (PLAIN value pages and
//! hybrid RLE dictionary index pages) and for synthetic values to fill them.

pub mod page_gen;
