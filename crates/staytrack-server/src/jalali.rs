//! Gregorian → Jalali (Solar Hijri) civil date conversion.
//!
//! Arithmetic conversion using the 33-year cycle; exact for every date from
//! 1600 CE onward, which covers any timestamp this service will record.

/// A Jalali calendar date. Months are 1-based (1 = Farvardin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Cumulative day count at the start of each Gregorian month (non-leap).
const GREGORIAN_MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Convert a Gregorian civil date. `month` is 1-based.
pub fn from_gregorian(year: i32, month: u32, day: u32) -> JalaliDate {
    let gy = i64::from(year);
    let gm = month.clamp(1, 12) as usize;
    let gd = i64::from(day);

    let leap_year = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666 + 365 * gy + (leap_year + 3) / 4 - (leap_year + 99) / 100
        + (leap_year + 399) / 400
        + gd
        + GREGORIAN_MONTH_OFFSETS[gm - 1];

    let mut jy = -1595 + 33 * (days / 12_053);
    days %= 12_053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };

    JalaliDate {
        year: jy as i32,
        month: jm as u32,
        day: jd as u32,
    }
}

impl From<chrono::NaiveDate> for JalaliDate {
    fn from(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        from_gregorian(date.year(), date.month(), date.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nowruz_is_first_of_farvardin() {
        assert_eq!(
            from_gregorian(2024, 3, 20),
            JalaliDate { year: 1403, month: 1, day: 1 }
        );
        assert_eq!(
            from_gregorian(2023, 3, 21),
            JalaliDate { year: 1402, month: 1, day: 1 }
        );
    }

    #[test]
    fn test_last_day_before_nowruz() {
        assert_eq!(
            from_gregorian(2024, 3, 19),
            JalaliDate { year: 1402, month: 12, day: 29 }
        );
    }

    #[test]
    fn test_second_half_of_year() {
        assert_eq!(
            from_gregorian(2025, 1, 1),
            JalaliDate { year: 1403, month: 10, day: 12 }
        );
    }

    #[test]
    fn test_from_naive_date() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
        assert_eq!(JalaliDate::from(date).month, 1);
    }
}
