use chrono::{Datelike, Months, NaiveDate};

/// Whole years elapsed between `birth_date` and `today`, or `None` when the
/// birth date lies in the future.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth_date > today {
        return None;
    }
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Birth dates that yield a given age on a given day: `(after, up_to]`.
///
/// Stores can filter on the date column directly instead of deriving an age
/// per record. Month arithmetic clamps Feb 29 to Feb 28 in common years, which
/// keeps the window in agreement with [`age_on`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthDateWindow {
    pub after: NaiveDate,
    pub up_to: NaiveDate,
}

impl BirthDateWindow {
    pub fn for_age(age: u32, today: NaiveDate) -> Option<Self> {
        let up_to_months = age.checked_mul(12)?;
        let after_months = age.checked_add(1)?.checked_mul(12)?;
        Some(BirthDateWindow {
            after: today.checked_sub_months(Months::new(after_months))?,
            up_to: today.checked_sub_months(Months::new(up_to_months))?,
        })
    }

    pub fn contains(&self, birth_date: NaiveDate) -> bool {
        birth_date > self.after && birth_date <= self.up_to
    }
}
