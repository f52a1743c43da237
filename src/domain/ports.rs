use chrono::NaiveDate;

/// Supplies the "today" anchor that payment dates are counted from.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub type ClockBox = Box<dyn Clock>;
