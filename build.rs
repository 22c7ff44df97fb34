//! Build script for the jazz preview player.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so it sits next to the `.env` file the binary reads.
//!
//! - Linux: `~/.local/share/jazzbox/.env.example`
//! - macOS: `~/Library/Application Support/jazzbox/.env.example`
//! - Windows: `%LOCALAPPDATA%/jazzbox/.env.example`
//!
//! Nothing here fails the build: a missing template or an unwritable data
//! directory only produces a cargo warning.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = std::path::PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    out_dir.push("jazzbox");

    if env_example_path.is_file() {
        let copied = std::fs::create_dir_all(&out_dir)
            .and_then(|_| std::fs::read_to_string(&env_example_path))
            .and_then(|contents| std::fs::write(out_dir.join(".env.example"), contents));
        if let Err(e) = copied {
            println!(
                "cargo:warning=cannot copy .env.example to {}: {}",
                out_dir.display(),
                e
            );
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
