//! Terminal output for the degree3 driver
//!
//! Data lines (keys, edges, rendered trees) go to stdout uncolored so they can be
//! piped; labels and diagnostics are colored. colored honours NO_COLOR and
//! CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;
use itertools::Itertools;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// One key of the demo walk.
pub fn demo_node(key: &str) {
    println!("Node: {}", key);
}

/// Heading above a printed tree: size and how it was built and walked.
pub fn tree_summary(len: usize, strategy: impl Display, order: impl Display) {
    let text = format!("{} nodes ({}, {})", len, strategy, order);
    println!("{}", text.cyan().bold());
}

/// A deletion and the keys it rewired.
pub fn deleted(key: &str, touched: &[String]) {
    let touched = if touched.is_empty() {
        "none".dimmed().to_string()
    } else {
        touched.iter().join(", ")
    };
    println!("{}: {} (touched: {})", "Deleted".green(), key.bold(), touched);
}

/// The centroid found for a tree of `len` nodes, searched from `start`.
pub fn centroid(key: &str, len: usize, start: &str) {
    println!("{}: {}", "Centroid".green(), key.bold());
    println!("  of {} nodes, searched from {}", len, start);
}

/// A config file location.
pub fn location(label: &str, path: impl Display) {
    println!("{}: {}", label.green(), path);
}

/// Plain data line.
pub fn line(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
