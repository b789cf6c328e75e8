//! Print the diff segments between two strings
//!
//! Run with: cargo run --example diff_demo -- "the red car" "the blue car"

use page_watcher::diff::{DiffStyle, build};

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(prev), Some(curr)) = (args.next(), args.next()) else {
        eprintln!("usage: diff_demo <previous> <current>");
        std::process::exit(2);
    };

    let segments = build(Some(&prev), Some(&curr));
    if segments.is_empty() {
        println!("(no changes)");
        return;
    }

    println!("=== {} segments ===\n", segments.len());
    for segment in &segments {
        let tag = match segment.style {
            DiffStyle::Plain if segment.is_delimiter() => "delim",
            DiffStyle::Plain => "plain",
            DiffStyle::Inserted => "+ins",
            DiffStyle::Deleted => "-del",
            DiffStyle::Replaced => "~rep",
        };
        println!("{tag:>6} {:?}", segment.text);
    }
}
