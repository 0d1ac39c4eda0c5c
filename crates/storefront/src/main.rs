//! `thriftup`: compose a WhatsApp checkout link from a catalog export.
//!
//! ```text
//! thriftup --catalog products.json --add 65a1f0 --add 65a1f0 \
//!     --name "Sari" --phone 081234567890 --address "Jl. Merdeka 1"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use thriftup_checkout::BuyerInfo;
use thriftup_core::ProductId;
use thriftup_products::JsonFileCatalog;
use thriftup_storefront::Session;

#[derive(Parser)]
#[command(name = "thriftup", about = "Compose a WhatsApp checkout link for a cart")]
struct Cli {
    /// JSON array of product documents.
    #[arg(long)]
    catalog: PathBuf,

    /// Product id to add; repeat to add more units.
    #[arg(long = "add", value_name = "PRODUCT_ID")]
    add: Vec<String>,

    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    address: String,
}

fn main() -> anyhow::Result<()> {
    thriftup_observability::init();
    let cli = Cli::parse();

    let mut session = Session::from_env(JsonFileCatalog::new(&cli.catalog))
        .context("invalid storefront configuration")?;
    session
        .refresh_catalog()
        .with_context(|| format!("failed to load catalog {}", cli.catalog.display()))?;

    for raw in &cli.add {
        let id: ProductId = raw.parse().with_context(|| format!("bad product id `{raw}`"))?;
        session
            .add(&id)
            .with_context(|| format!("cannot add product `{raw}`"))?;
    }

    let buyer = BuyerInfo::new(cli.name, cli.phone, cli.address);
    let message = session.checkout(&buyer).context("checkout failed")?;

    println!("{}", message.text);
    println!();
    println!("{}", message.link);
    Ok(())
}
