//! The module contains function for displaying CLI splash screen.
//!
//! - Title
//! - Short Description
//! - Version Information

use colored::*;

use crate::cli::colors::MINIDB_TEAL;

pub fn splash_screen() {
    show_splash_screen();
    show_version_info();
}

fn show_splash_screen() {
    print!(
        r#"
    {}
        "#,
        r"
    ███╗   ███╗██╗███╗   ██╗██╗██████╗ ██████╗
    ████╗ ████║██║████╗  ██║██║██╔══██╗██╔══██╗
    ██╔████╔██║██║██╔██╗ ██║██║██║  ██║██████╔╝
    ██║╚██╔╝██║██║██║╚██╗██║██║██║  ██║██╔══██╗
    ██║ ╚═╝ ██║██║██║ ╚████║██║██████╔╝██████╔╝
    ╚═╝     ╚═╝╚═╝╚═╝  ╚═══╝╚═╝╚═════╝ ╚═════╝
        "
        .color(MINIDB_TEAL)
    )
}

fn show_version_info() {
    println!(
        r"
    {}

    Version {}
        ",
        env!("CARGO_PKG_DESCRIPTION").color(MINIDB_TEAL),
        env!("CARGO_PKG_VERSION").color(MINIDB_TEAL).italic(),
    )
}
