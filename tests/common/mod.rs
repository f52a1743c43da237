use debtplan::domain::debt::Debt;
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Random but valid debts: balances in whole dollars, APR in tenths of a
/// percent, minimum covering at least the first month's interest.
pub fn random_debts(rng: &mut StdRng, count: usize) -> Vec<Debt> {
    (1..=count)
        .map(|i| {
            let balance = Decimal::from(rng.gen_range(100..=30_000i64));
            let apr = Decimal::new(rng.gen_range(0..=299i64), 1);
            let floor = (balance * apr / Decimal::from(1200)).ceil() + Decimal::ONE;
            let min_payment = (floor + Decimal::from(rng.gen_range(10..=400i64))).min(balance);
            Debt::new(i.to_string(), &format!("Debt {i}"), balance, apr, min_payment)
                .expect("generated debt should be valid")
        })
        .collect()
}

pub fn write_debts_csv(path: &Path, debts: &[Debt]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    for debt in debts {
        wtr.serialize(debt)?;
    }
    wtr.flush()?;
    Ok(())
}
