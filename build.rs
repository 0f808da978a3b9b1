fn main() {
    // Pick up a .env next to the manifest so local builds can pin an address
    let _ = dotenv::dotenv();

    println!("cargo:rerun-if-env-changed=ALBUMRANKING_BASE_ADDRESS");

    // Embed the base address at compile time; blank means "not provided"
    // and discovery falls through to the runtime sources.
    if let Ok(addr) = std::env::var("ALBUMRANKING_BASE_ADDRESS") {
        println!("cargo:rustc-env=ALBUMRANKING_BASE_ADDRESS={}", addr);
    } else {
        println!("cargo:rustc-env=ALBUMRANKING_BASE_ADDRESS=");
    }
}
