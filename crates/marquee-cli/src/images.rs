//! Image folder scanning.
//!
//! The devices can only render `.bmp` files, so the allow-list is simply the
//! sorted `.bmp` names of the configured folder. An unreadable folder yields
//! an empty list; validators then fall back to suffix checking.

use std::path::Path;

pub fn list_bmp(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".bmp"))
        .collect();
    names.sort();
    names
}

/// Print a numbered listing of a folder's images.
pub fn print_listing(dir: &Path, names: &[String]) {
    if names.is_empty() {
        println!("No images found in: {}", dir.display());
        println!("Check the folder paths in marquee.toml");
        return;
    }

    println!("Available images ({} files) in {}:", names.len(), dir.display());
    for (i, name) in names.iter().enumerate() {
        println!("{:3}. {}", i + 1, name);
    }
}
