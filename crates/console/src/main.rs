//! Interactive console shell over the catalog service.
//!
//! The shell owns parsing and rendering only; every catalog access goes
//! through [`CatalogService`]'s public operations.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Result, bail};

use brewshelf_catalog::{
    CatalogService, InMemoryProductRepository, LeafType, Product, ProductRepository, RoastType,
};
use brewshelf_core::{Entity, ProductId};

const LIGHT_THRESHOLD_GRAMS: u32 = 150;

fn main() -> Result<()> {
    brewshelf_observability::init();

    let repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepository::new());
    let service = CatalogService::new(repo);
    seed_demo(&service)?;

    tracing::info!("console shell started");
    run(&service)
}

fn run(service: &CatalogService) -> Result<()> {
    loop {
        println!(
            "\nShop: tea & coffee\n\
             1) Create coffee\n\
             2) Create tea\n\
             3) List all products\n\
             4) List products lighter than {LIGHT_THRESHOLD_GRAMS}g\n\
             5) Show product details\n\
             6) Update product\n\
             7) Delete product\n\
             0) Exit"
        );

        let Some(choice) = read_line("Your choice")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => create_coffee_flow(service)?,
            "2" => create_tea_flow(service)?,
            "3" => print_products(&service.get_all()),
            "4" => print_products(&service.get_lighter_than(LIGHT_THRESHOLD_GRAMS)),
            "5" => detail_flow(service)?,
            "6" => update_flow(service)?,
            "7" => delete_flow(service)?,
            "0" => return Ok(()),
            _ => println!("Unknown command."),
        }
    }
}

fn create_coffee_flow(service: &CatalogService) -> Result<()> {
    let name = prompt("Name")?;
    let price = read_f64("Price")?;
    let weight = read_u32("Weight (g)")?;
    let roast = read_roast()?;
    match service.create_coffee(name, price, weight, roast) {
        Ok(p) => println!("Coffee added. id={}", p.id()),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn create_tea_flow(service: &CatalogService) -> Result<()> {
    let name = prompt("Name")?;
    let price = read_f64("Price")?;
    let weight = read_u32("Weight (g)")?;
    let leaf = read_leaf()?;
    match service.create_tea(name, price, weight, leaf) {
        Ok(p) => println!("Tea added. id={}", p.id()),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn detail_flow(service: &CatalogService) -> Result<()> {
    let Some(id) = read_product_id()? else {
        return Ok(());
    };
    match service.get_by_id(id) {
        Some(p) => println!("{}", p.description()),
        None => println!("Not found."),
    }
    Ok(())
}

fn update_flow(service: &CatalogService) -> Result<()> {
    let Some(id) = read_product_id()? else {
        return Ok(());
    };
    let Some(current) = service.get_by_id(id) else {
        println!("Not found.");
        return Ok(());
    };

    let name = {
        let s = prompt(&format!("New name (enter = keep '{}')", current.name()))?;
        if s.is_empty() { current.name().to_string() } else { s }
    };
    let price = read_f64_or_blank(&format!("New price (enter = keep {})", current.price()))?
        .unwrap_or(current.price());
    let weight = read_u32_or_blank(&format!("New weight (g) (enter = keep {})", current.weight()))?
        .unwrap_or(current.weight());

    // The variant of the stored entry picks the update path; the service
    // refuses to migrate a product between variants.
    let result = match &current {
        Product::Coffee(c) => {
            let roast = read_roast_or_keep(c.roast())?;
            service.update_coffee(id, name, price, weight, roast)
        }
        Product::Tea(t) => {
            let leaf = read_leaf_or_keep(t.leaf())?;
            service.update_tea(id, name, price, weight, leaf)
        }
    };

    match result {
        Ok(true) => println!("Updated."),
        Ok(false) => println!("Could not update."),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn delete_flow(service: &CatalogService) -> Result<()> {
    let Some(id) = read_product_id()? else {
        return Ok(());
    };
    if service.delete(id) {
        println!("Deleted.");
    } else {
        println!("Not found.");
    }
    Ok(())
}

fn print_products(items: &[Product]) {
    if items.is_empty() {
        println!("The list is empty.");
        return;
    }
    println!("{}", "-".repeat(40));
    for (i, p) in items.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, p.id(), p.description());
    }
    println!("{}", "-".repeat(40));
}

/// Read one trimmed line; `None` means stdin was closed.
fn read_line(label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt(label: &str) -> Result<String> {
    match read_line(label)? {
        Some(line) => Ok(line),
        None => bail!("input closed"),
    }
}

fn read_u32(label: &str) -> Result<u32> {
    loop {
        let s = prompt(label)?;
        match s.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Enter a whole number."),
        }
    }
}

fn read_u32_or_blank(label: &str) -> Result<Option<u32>> {
    loop {
        let s = prompt(label)?;
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<u32>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("Enter a whole number."),
        }
    }
}

fn read_f64(label: &str) -> Result<f64> {
    loop {
        let s = prompt(label)?.replace(',', ".");
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Enter a number, e.g. 199.90"),
        }
    }
}

fn read_f64_or_blank(label: &str) -> Result<Option<f64>> {
    loop {
        let s = prompt(label)?.replace(',', ".");
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("Enter a number, e.g. 199.90"),
        }
    }
}

fn read_product_id() -> Result<Option<ProductId>> {
    let s = prompt("Product id")?;
    match s.parse::<ProductId>() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            println!("Error: {e}");
            Ok(None)
        }
    }
}

fn read_roast() -> Result<RoastType> {
    let options = RoastType::ALL.map(|r| r.label()).join(", ");
    loop {
        let s = prompt(&format!("Roast type [{options}]"))?;
        match s.parse::<RoastType>() {
            Ok(r) => return Ok(r),
            Err(_) => println!("Valid values: {options}"),
        }
    }
}

fn read_roast_or_keep(current: RoastType) -> Result<RoastType> {
    let options = RoastType::ALL.map(|r| r.label()).join(", ");
    loop {
        let s = prompt(&format!("Roast type [{options}] (enter = keep {current})"))?;
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<RoastType>() {
            Ok(r) => return Ok(r),
            Err(_) => println!("Valid values: {options}"),
        }
    }
}

fn read_leaf() -> Result<LeafType> {
    let options = LeafType::ALL.map(|l| l.label()).join(", ");
    loop {
        let s = prompt(&format!("Leaf type [{options}]"))?;
        match s.parse::<LeafType>() {
            Ok(l) => return Ok(l),
            Err(_) => println!("Valid values: {options}"),
        }
    }
}

fn read_leaf_or_keep(current: LeafType) -> Result<LeafType> {
    let options = LeafType::ALL.map(|l| l.label()).join(", ");
    loop {
        let s = prompt(&format!("Leaf type [{options}] (enter = keep {current})"))?;
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<LeafType>() {
            Ok(l) => return Ok(l),
            Err(_) => println!("Valid values: {options}"),
        }
    }
}

fn seed_demo(service: &CatalogService) -> Result<()> {
    service.create_coffee("Arabica Premium", 799.0, 250, RoastType::Beans)?;
    service.create_coffee("Monarch", 199.0, 100, RoastType::Instant)?;
    service.create_tea("Assam Strong", 199.0, 90, LeafType::Black)?;
    service.create_tea("Lipton", 249.0, 180, LeafType::Green)?;
    Ok(())
}
