//! Example: Price a small commodity option book with Black-76
//!
//! Run with: cargo run --example price_book

use chrono::NaiveDate;
use commodity_pv::prelude::*;

fn main() -> PvResult<()> {
    let service = PricingService::new(MemoryPriceStore::new(), PricingConfig::default())?;

    // Futures prices; only the latest per asset is used
    service.upload_price_records(&[
        PriceRecord::new("2023-05-31 09:00:00.000000", "BRN", 95.0),
        PriceRecord::new("2023-05-31 17:00:00.000000", "BRN", 101.0),
        PriceRecord::new("2023-05-31 17:00:00.000000", "HH", 9.0),
    ])?;

    let today = NaiveDate::from_ymd_opt(2023, 6, 1)
        .ok_or_else(|| PvError::invalid_input("bad date"))?;
    let book = [
        "BRN Jan24 Call Strike 100 USD/BBL",
        "HH Mar24 Put Strike 10 USD/MMBTu",
    ];

    println!("=== Latest Prices ===\n");
    for (asset, price) in service.fetch_latest_prices()?.iter() {
        println!("{:<6} {:>8.2}", asset, price);
    }

    println!("\n=== Maturities (as of {}) ===\n", today);
    let calc = MaturityCalculator::new(service.config().maturity.clone());
    for text in book {
        let contract = OptionContract::parse(text)?;
        let expiry = calc.maturity_date(&contract.asset, contract.delivery, today)?;
        let years = calc.years_to_maturity(&contract.asset, contract.delivery, today)?;
        println!("{:<36} expires {} ({:.4}y)", text, expiry, years);
    }

    println!("\n=== Black-76 PV ===\n");
    let pv = service.calculate_pv_as_of(&book, today)?;
    for (text, pv) in book.iter().zip(pv) {
        println!("{:<36} {:>10.4}", text, pv);
    }

    Ok(())
}
