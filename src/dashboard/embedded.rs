use rust_embed::RustEmbed;

/// Dashboard pages compiled into the binary from `pages/`.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/pages/"]
pub struct Pages;
