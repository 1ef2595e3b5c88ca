//! Plain-text listing output.

use std::io::{self, Write};

use goodshop_catalog::{CatalogQuery, FilterPreset, Product};

pub const BANNER: &str = "~~ THE VERY GOOD FASHION SHOP ~~";

/// Write the header line for the current query, then one entry per product.
pub fn render_listing<W: Write>(
    out: &mut W,
    query: &CatalogQuery,
    products: &[&Product],
) -> io::Result<()> {
    writeln!(
        out,
        "-- {} product(s) | filter: {} | search: {:?} | sort: {}",
        products.len(),
        query.category,
        query.search.as_str(),
        query.sort
    )?;
    if products.is_empty() {
        writeln!(out, "   (no products match)")?;
        return Ok(());
    }
    for product in products {
        render_product(out, product)?;
    }
    Ok(())
}

pub fn render_product<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    writeln!(
        out,
        "   {:<28} {:<10} {:>9}",
        product.name(),
        product.category(),
        product.price().to_string()
    )?;
    if !product.description().is_empty() {
        writeln!(out, "      {}", product.description())?;
    }
    Ok(())
}

pub fn render_presets<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Filters:")?;
    for preset in FilterPreset::all_presets() {
        writeln!(out, "   {:<16} -> {}", preset.label, preset.filter)?;
    }
    Ok(())
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Commands:\n\
         \x20  filter <category...>   show only these categories (alias: category)\n\
         \x20  preset <label>         apply a filter preset (see `presets`)\n\
         \x20  all                    show every category\n\
         \x20  search <text>          search names and descriptions\n\
         \x20  reset                  clear the search\n\
         \x20  sort <asc|desc|none>   order by price\n\
         \x20  presets                list filter presets\n\
         \x20  list                   show the current listing\n\
         \x20  help                   show this help\n\
         \x20  quit                   leave the shop"
    )
}
