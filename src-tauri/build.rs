//! Build script for the Veilshot Tauri app.

fn main() {
    tauri_build::build();
}
