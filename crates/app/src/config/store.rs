//! Store Config

use std::path::PathBuf;

use clap::Args;

/// Device cart storage settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// Directory holding the device cart
    #[arg(long, env = "BOXCART_CART_DIR", default_value = ".boxcart", global = true)]
    pub cart_dir: PathBuf,

    /// Key the device cart is stored under
    #[arg(long, env = "BOXCART_STORAGE_KEY", default_value = "cart", global = true)]
    pub storage_key: String,
}
